//! Command-line interface parsing
//!
//! Flags given here take precedence over the matching environment variables.

use clap::Parser;

/// Pokedex - explore the Pokemon world from your terminal
#[derive(Parser, Debug, Default)]
#[command(name = "pokedex")]
#[command(about = "Interactive Pokedex backed by the PokeAPI")]
#[command(version)]
pub struct Cli {
    /// PokeAPI root URL (env: POKEDEX_API_BASE)
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// How long fetched responses stay cached, in milliseconds
    /// (env: POKEDEX_CACHE_INTERVAL_MS)
    #[arg(long, value_name = "MS")]
    pub cache_interval_ms: Option<u64>,

    /// How often aged cache entries are swept, in milliseconds; defaults to
    /// the cache interval (env: POKEDEX_SWEEP_INTERVAL_MS)
    #[arg(long, value_name = "MS")]
    pub sweep_interval_ms: Option<u64>,

    /// Location areas shown per `map` page (env: POKEDEX_PAGE_SIZE)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,
}

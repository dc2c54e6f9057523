//! Pokedex - an interactive client for the PokeAPI
//!
//! Responses are memoized in a `TimedCache` whose entries are swept away by a
//! background reaper once they pass their max-age.

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod pokedex;
pub mod repl;
pub mod tasks;

pub use api::PokeApiClient;
pub use cache::{CacheConfig, TimedCache};
pub use config::Config;
pub use error::{PokedexError, Result};
pub use repl::Session;

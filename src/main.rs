//! Pokedex - an interactive client for the PokeAPI
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging (stderr)
//! 2. Load configuration from environment variables and CLI flags
//! 3. Create the response cache, which starts its reaper
//! 4. Run the REPL on stdin/stdout until `exit`, end of input or a signal
//! 5. Close the cache on every exit path

use std::io::stdout;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::io::{stdin, BufReader};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::cli::Cli;
use pokedex::{repl, Config, PokeApiClient, Session, TimedCache};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Log to stderr so lines do not interleave with REPL output.
    // Defaults to "warn", can be overridden with RUST_LOG.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build Tokio runtime")?;

    let result = runtime.block_on(run(cli));

    // Stdin is read on a blocking thread that cannot be cancelled
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env().merge_cli(&cli);
    info!(
        "Configuration loaded: api_base={}, cache_interval={}ms, sweep_interval={:?}ms, page_size={}",
        config.api_base, config.cache_interval_ms, config.sweep_interval_ms, config.page_size
    );

    let cache = TimedCache::with_config(config.cache_config());
    let client = PokeApiClient::new(&config.api_base, cache);
    let mut session = Session::new(client, config.first_page_url());

    let input = BufReader::new(stdin());
    let mut out = stdout();

    let outcome = tokio::select! {
        result = repl::run(&mut session, input, &mut out) => result.context("REPL failed"),
        _ = shutdown_signal() => Ok(()),
    };

    let stats = session.client().cache().stats().await;
    session.close().await;
    info!(
        "Cache closed: hits={}, misses={}, reaped={}, hit_rate={:.2}",
        stats.hits,
        stats.misses,
        stats.reaped,
        stats.hit_rate()
    );

    outcome
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }

    println!();
}

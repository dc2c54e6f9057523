//! Error types for the Pokedex client
//!
//! Provides unified error handling using thiserror. The cache itself never
//! fails; everything here belongs to fetching, decoding and command handling.

use thiserror::Error;

// == Pokedex Error Enum ==
/// Unified error type for the REPL and its API client.
#[derive(Error, Debug)]
pub enum PokedexError {
    /// HTTP transport failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// Response body was not the expected JSON
    #[error("unable to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reading input or writing output failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A command was invoked without its required argument
    #[error("please provide {0}")]
    MissingArgument(&'static str),

    #[error("there are no more entries to show")]
    NoMorePages,

    #[error("cannot go further back")]
    NoPreviousPage,

    /// Inspecting a creature that was never caught
    #[error("you do not have {0} in your Pokedex")]
    NotCaught(String),

    #[error("your Pokedex is empty!")]
    EmptyPokedex,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

// == Result Type Alias ==
/// Convenience Result type for the Pokedex client.
pub type Result<T> = std::result::Result<T, PokedexError>;

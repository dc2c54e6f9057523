//! API Module
//!
//! HTTP access to the PokeAPI, memoized through a `TimedCache`.

mod client;

pub use client::{Fetched, PokeApiClient};

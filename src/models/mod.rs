//! Response models for the PokeAPI
//!
//! This module defines the DTOs the REPL decodes from cached or freshly
//! fetched response payloads. Only the fields the commands use are mapped;
//! everything else in the JSON is ignored.

pub mod responses;

// Re-export commonly used types
pub use responses::{
    EncounteredPokemon, LocationArea, LocationAreaPage, NamedResource, Pokemon, PokemonStat,
    PokemonType,
};

//! The player's collection of caught Pokemon
//!
//! Lives in memory for the duration of a REPL session.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::models::Pokemon;

/// Share of the roll range that must be exceeded for a catch to succeed
pub const CATCH_THRESHOLD: f64 = 0.75;

/// A Pokemon in the collection and when it was caught
#[derive(Debug, Clone)]
pub struct CaughtPokemon {
    pub pokemon: Pokemon,
    pub caught_at: DateTime<Utc>,
}

/// Caught Pokemon keyed by the name the player caught them under, listed in
/// name order
///
/// `catch 25` files pikachu under `25`, so `inspect 25` finds it again.
#[derive(Debug, Default)]
pub struct Pokedex {
    entries: BTreeMap<String, CaughtPokemon>,
}

impl Pokedex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `pokemon` under `name`, replacing an earlier catch of that name.
    ///
    /// Returns the replaced entry, if any.
    pub fn insert(&mut self, name: impl Into<String>, pokemon: Pokemon) -> Option<CaughtPokemon> {
        self.entries.insert(
            name.into(),
            CaughtPokemon {
                pokemon,
                caught_at: Utc::now(),
            },
        )
    }

    pub fn get(&self, name: &str) -> Option<&CaughtPokemon> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rolls for a catch against a Pokemon's base experience.
///
/// A roll `r` is drawn uniformly from `[0, base_experience)`; the catch
/// succeeds when `r / base_experience` exceeds [`CATCH_THRESHOLD`]. A Pokemon
/// with no (or zero) base experience is always caught.
pub fn roll_catch<R: Rng + ?Sized>(base_experience: Option<u32>, rng: &mut R) -> bool {
    let experience = match base_experience {
        Some(exp) if exp > 0 => exp,
        _ => return true,
    };

    let roll = rng.gen_range(0..experience);
    f64::from(roll) / f64::from(experience) > CATCH_THRESHOLD
}

//! Command parsing for the REPL
//!
//! Turns a raw input line into a [`Command`].

use crate::error::{PokedexError, Result};

/// Name and description of every command, in the order `help` lists them
pub const COMMANDS: &[(&str, &str)] = &[
    ("help", "Displays a help message"),
    ("exit", "Exit the Pokedex"),
    (
        "map",
        "Displays the names of the next page of location areas in the Pokemon world",
    ),
    (
        "mapb",
        "Displays the names of the previous page of location areas in the Pokemon world",
    ),
    (
        "explore",
        "Displays the Pokemon found in a location area, by id or name",
    ),
    ("catch", "Throws a Pokeball at a Pokemon, by name"),
    ("inspect", "Shows details of a caught Pokemon"),
    ("pokedex", "Lists all caught Pokemon"),
];

/// A parsed REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore(String),
    Catch(String),
    Inspect(String),
    Pokedex,
}

/// Lowercases and trims `text`, then splits it on whitespace.
pub fn clean_input(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Parses cleaned words into a command.
///
/// Returns `Ok(None)` for a blank line. Words after the command name are
/// joined with single spaces to form its argument.
pub fn parse_command(words: &[String]) -> Result<Option<Command>> {
    let Some((name, rest)) = words.split_first() else {
        return Ok(None);
    };
    let argument = rest.join(" ");

    let command = match name.as_str() {
        "help" => Command::Help,
        "exit" => Command::Exit,
        "map" => Command::Map,
        "mapb" => Command::MapBack,
        "explore" => Command::Explore(require(argument, "a location area id or name to explore")?),
        "catch" => Command::Catch(require(argument, "a Pokemon name to catch")?),
        "inspect" => Command::Inspect(require(argument, "a Pokemon name to inspect")?),
        "pokedex" => Command::Pokedex,
        other => return Err(PokedexError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

fn require(argument: String, what: &'static str) -> Result<String> {
    if argument.is_empty() {
        Err(PokedexError::MissingArgument(what))
    } else {
        Ok(argument)
    }
}

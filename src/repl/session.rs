//! REPL session state and command execution

use std::io::Write;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::info;

use crate::api::{Fetched, PokeApiClient};
use crate::error::{PokedexError, Result};
use crate::pokedex::{roll_catch, Pokedex};
use crate::repl::command::{Command, COMMANDS};

/// How `inspect` renders the catch time
const CAUGHT_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// What the loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// State carried between commands: paging cursors, the collection and the
/// API client (which owns the response cache).
pub struct Session {
    client: PokeApiClient,
    next_page: Option<String>,
    previous_page: Option<String>,
    pokedex: Pokedex,
    rng: Box<dyn RngCore + Send>,
}

impl Session {
    /// Starts a session whose first `map` loads `first_page_url`.
    pub fn new(client: PokeApiClient, first_page_url: impl Into<String>) -> Self {
        Self::with_rng(client, first_page_url, StdRng::from_entropy())
    }

    /// Starts a session with a caller-supplied source of catch rolls.
    pub fn with_rng(
        client: PokeApiClient,
        first_page_url: impl Into<String>,
        rng: impl RngCore + Send + 'static,
    ) -> Self {
        Self {
            client,
            next_page: Some(first_page_url.into()),
            previous_page: None,
            pokedex: Pokedex::new(),
            rng: Box::new(rng),
        }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    pub fn pokedex(&self) -> &Pokedex {
        &self.pokedex
    }

    /// Closes the response cache's reaper.
    pub async fn close(&mut self) {
        self.client.close().await;
    }

    /// Runs `command`, writing its output to `out`.
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Flow::Exit);
            }
            Command::Map => {
                let url = self.next_page.clone().ok_or(PokedexError::NoMorePages)?;
                self.show_page(&url, out).await?;
            }
            Command::MapBack => {
                let url = self
                    .previous_page
                    .clone()
                    .ok_or(PokedexError::NoPreviousPage)?;
                self.show_page(&url, out).await?;
            }
            Command::Explore(area) => self.explore(&area, out).await?,
            Command::Catch(name) => self.catch(&name, out).await?,
            Command::Inspect(name) => self.inspect(&name, out)?,
            Command::Pokedex => self.list_pokedex(out)?,
        }

        Ok(Flow::Continue)
    }

    /// Prints the welcome banner and command list.
    pub fn help<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for (name, description) in COMMANDS {
            writeln!(out, "  {}: {}", name, description)?;
        }
        Ok(())
    }

    async fn show_page<W: Write>(&mut self, url: &str, out: &mut W) -> Result<()> {
        let (page, fetched) = self.client.location_areas(url).await?;
        report_cache_hit(fetched, out)?;

        self.next_page = page.next;
        self.previous_page = page.previous;

        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        Ok(())
    }

    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<()> {
        let url = self.client.location_area_url(area);
        writeln!(out, "Exploring location area: {} ({})", area, url)?;

        let (location, fetched) = self.client.location_area(area).await?;
        report_cache_hit(fetched, out)?;

        if !location.pokemon_encounters.is_empty() {
            writeln!(out, "Found Pokemon:")?;
        }
        for name in location.pokemon_names() {
            writeln!(out, "- {}", name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Throwing a Pokeball at {}...", name)?;

        let (pokemon, fetched) = self.client.pokemon(name).await?;
        report_cache_hit(fetched, out)?;

        if roll_catch(pokemon.base_experience, &mut self.rng) {
            writeln!(out, "You have caught {}!", name)?;
            info!(pokemon = %pokemon.name, caught_as = %name, "caught");
            self.pokedex.insert(name, pokemon);
        } else {
            writeln!(out, "{} escaped!", name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let caught = self
            .pokedex
            .get(name)
            .ok_or_else(|| PokedexError::NotCaught(name.to_string()))?;
        let pokemon = &caught.pokemon;

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(
            out,
            "Caught: {}",
            caught.caught_at.format(CAUGHT_AT_FORMAT)
        )?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  - {}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "  - {}", kind.kind.name)?;
        }
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.pokedex.is_empty() {
            return Err(PokedexError::EmptyPokedex);
        }

        writeln!(out, "Your Pokedex:")?;
        for name in self.pokedex.names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }
}

fn report_cache_hit<W: Write>(fetched: Fetched, out: &mut W) -> Result<()> {
    if fetched == Fetched::Cache {
        writeln!(out, "Cache hit!")?;
    }
    Ok(())
}

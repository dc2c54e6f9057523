//! REPL Module
//!
//! Reads commands line by line, dispatches them against a [`Session`] and
//! prints their output. Command errors are printed and the loop continues.

mod command;
mod session;

pub use command::{clean_input, parse_command, Command, COMMANDS};
pub use session::{Flow, Session};

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::error::Result;

/// Prompt printed before each line of input
pub const PROMPT: &str = "Pokedex > ";

/// Runs the read-eval-print loop until `exit` or end of input.
///
/// The help banner is printed once before the first prompt.
pub async fn run<R, W>(session: &mut Session, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    session.help(out)?;
    writeln!(out)?;

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            debug!("End of input");
            writeln!(out)?;
            return Ok(());
        };

        let command = match parse_command(&clean_input(&line)) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        match session.execute(command, out).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => return Ok(()),
            Err(e) => writeln!(out, "{}", e)?,
        }
    }
}

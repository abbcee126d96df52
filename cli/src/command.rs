use std::str::FromStr;

use minefield_core::{Coord, Coord2};
use thiserror::Error;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    New,
    Snapshot,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command {0:?}, type h for help")]
    Unknown(String),
    #[error("Expected <row> <col> after {0:?}")]
    MissingCoords(String),
    #[error("Invalid coordinate {0:?}")]
    InvalidCoord(String),
    #[error("Unexpected input {0:?}")]
    Trailing(String),
}

pub const HELP: &str = "\
commands:
  r <row> <col>   reveal a cell
  f <row> <col>   toggle a flag
  n               new game
  s               print the board as JSON
  h               this help
  q               quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Unknown(String::new()));
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Reveal(parse_coords(name, &mut words)?),
            "f" | "flag" => Self::Flag(parse_coords(name, &mut words)?),
            "n" | "new" => Self::New,
            "s" | "snapshot" => Self::Snapshot,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "x" => Self::Quit,
            _ => return Err(CommandError::Unknown(name.into())),
        };

        match words.next() {
            Some(extra) => Err(CommandError::Trailing(extra.into())),
            None => Ok(command),
        }
    }
}

fn parse_coords<'a>(
    name: &str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<Coord2, CommandError> {
    let mut next = || {
        let word = words
            .next()
            .ok_or_else(|| CommandError::MissingCoords(name.into()))?;
        word.parse::<Coord>()
            .map_err(|_| CommandError::InvalidCoord(word.into()))
    };
    let row = next()?;
    let col = next()?;
    Ok((row, col))
}

use std::io::{BufRead, Write};

use minefield_core::{FlagOutcome, GameError, Minefield, RevealOutcome};

use crate::command::{Command, HELP};
use crate::config::DisplayConfig;
use crate::render::BoardView;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Drives one engine from line-based input, redrawing after every change.
pub struct Session {
    engine: Minefield,
    display: DisplayConfig,
}

impl Session {
    pub fn new(engine: Minefield, display: DisplayConfig) -> Self {
        Self { engine, display }
    }

    pub fn engine(&self) -> &Minefield {
        &self.engine
    }

    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
        self.draw(out)?;
        writeln!(out, "type h for help")?;

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let flow = match line.parse::<Command>() {
                Ok(command) => self.execute(command, out)?,
                Err(error) => {
                    writeln!(out, "{error}")?;
                    Flow::Continue
                }
            };
            self.flush_events();

            if flow == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    fn execute(&mut self, command: Command, out: &mut impl Write) -> anyhow::Result<Flow> {
        match command {
            Command::Reveal(coords) => match self.engine.reveal(coords) {
                Ok(outcome) => self.report_reveal(outcome, out)?,
                Err(error) => self.report_error(error, out)?,
            },
            Command::Flag(coords) => match self.engine.toggle_flag(coords) {
                Ok(FlagOutcome::Revealed) => writeln!(out, "Cannot flag a revealed cell")?,
                Ok(outcome) if outcome.has_update() => self.draw(out)?,
                Ok(_) => {}
                Err(error) => self.report_error(error, out)?,
            },
            Command::New => {
                self.engine.reset()?;
                self.draw(out)?;
            }
            Command::Snapshot => {
                writeln!(out, "{}", serde_json::to_string(&self.engine.snapshot())?)?;
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn report_reveal(&self, outcome: RevealOutcome, out: &mut impl Write) -> anyhow::Result<()> {
        if outcome.has_update() {
            self.draw(out)?;
        }
        match outcome {
            RevealOutcome::HitMine => writeln!(out, "Game over. You hit a mine! Type n for a new game.")?,
            RevealOutcome::Win => writeln!(out, "You won! Type n for a new game.")?,
            RevealOutcome::Flagged => writeln!(out, "That cell is flagged, remove the flag first")?,
            RevealOutcome::AlreadyRevealed | RevealOutcome::Revealed(_) => {}
        }
        Ok(())
    }

    fn report_error(&self, error: GameError, out: &mut impl Write) -> anyhow::Result<()> {
        if !error.is_recoverable() {
            return Err(error.into());
        }
        log::debug!("ignored move: {error}");
        writeln!(out, "{error}")?;
        Ok(())
    }

    fn draw(&self, out: &mut impl Write) -> anyhow::Result<()> {
        writeln!(out, "{}", BoardView::new(&self.engine, &self.display))?;
        Ok(())
    }

    fn flush_events(&mut self) {
        for event in self.engine.drain_events() {
            log::debug!("{event:?}");
        }
    }
}

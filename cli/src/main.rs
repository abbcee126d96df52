use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use minefield_core::{CellCount, Coord, Minefield};

use crate::config::{BoardOverrides, Config};
use crate::session::Session;

mod command;
mod config;
mod render;
mod session;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board width in cells
    #[arg(long)]
    width: Option<Coord>,

    /// Board height in cells
    #[arg(long)]
    height: Option<Coord>,

    /// Number of mines
    #[arg(short, long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply(BoardOverrides {
        width: args.width,
        height: args.height,
        mines: args.mines,
        seed: args.seed,
    });
    log::debug!("board: {:?}", config.board);

    let engine = Minefield::new(config.game_config()).context("could not start a game")?;
    log::info!("seed: {:?}", engine.seed());

    let mut session = Session::new(engine, config.display);
    session.run(io::stdin().lock(), &mut io::stdout().lock())
}

use std::collections::VecDeque;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// Both terminal states only leave through [`Minefield::reset`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Where a game's mines come from, replayed on every reset.
#[derive(Clone, Debug, PartialEq, Eq)]
enum LayoutSource {
    /// Seeded placement is identical on every reset, unseeded draws fresh entropy.
    Random { seed: Option<u64> },
    Fixed(MineLayout),
}

impl LayoutSource {
    fn place(&self, config: &GameConfig) -> Result<(MineLayout, Option<u64>)> {
        match self {
            Self::Random { seed } => {
                let generator = match seed {
                    Some(seed) => RandomMineGenerator::new(*seed),
                    None => RandomMineGenerator::from_entropy(),
                };
                Ok((generator.generate(config)?, Some(generator.seed())))
            }
            Self::Fixed(layout) => Ok((layout.clone().generate(config)?, None)),
        }
    }
}

/// The minefield state machine: mines, revealed and flagged cells, and game state.
#[derive(Clone, Debug)]
pub struct Minefield {
    config: GameConfig,
    source: LayoutSource,
    seed: Option<u64>,
    mine_layout: MineLayout,
    board: Array2<EngineCell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: EngineState,
    triggered_mine: Option<Coord2>,
    events: EventLog,
}

impl Minefield {
    /// Creates a game with randomly placed mines.
    ///
    /// Fails with [`GameError::InvalidConfiguration`] unless the board is at least 1x1
    /// and `0 < mines < width * height`. With `config.seed` set the placement is
    /// reproducible, otherwise a seed is drawn from entropy and exposed by [`Self::seed`].
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Self::from_source(config, LayoutSource::Random { seed: config.seed })
    }

    /// Creates a game over a fixed mine layout. Reset restores the same layout.
    pub fn with_layout(mine_layout: MineLayout) -> Result<Self> {
        let config = mine_layout.game_config();
        config.validate()?;
        Self::from_source(config, LayoutSource::Fixed(mine_layout))
    }

    fn from_source(config: GameConfig, source: LayoutSource) -> Result<Self> {
        let (mine_layout, seed) = source.place(&config)?;
        let mut engine = Self {
            config,
            source,
            seed,
            board: Array2::default(config.size().to_nd_index()),
            mine_layout,
            revealed_count: 0,
            flagged_count: 0,
            state: EngineState::default(),
            triggered_mine: None,
            events: EventLog::default(),
        };
        engine.record_placement();
        Ok(engine)
    }

    /// Places a new layout and clears revealed and flagged cells.
    ///
    /// Seeded games get the same layout back, unseeded ones a fresh one.
    pub fn reset(&mut self) -> Result<()> {
        let (mine_layout, seed) = self.source.place(&self.config)?;

        self.mine_layout = mine_layout;
        self.seed = seed;
        self.board.fill(EngineCell::Hidden);
        self.revealed_count = 0;
        self.flagged_count = 0;
        self.state = EngineState::InProgress;
        self.triggered_mine = None;
        self.record_placement();
        Ok(())
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Board size as `(height, width)`.
    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    /// Seed behind the current layout, `None` for fixed layouts.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    /// Mines minus placed flags. Goes negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.mine_layout.mine_count() as isize) - (self.flagged_count as isize)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<EngineCell> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Ok(self.board_cell(coords))
    }

    pub(crate) fn board_cell(&self, coords: Coord2) -> EngineCell {
        self.board[coords.to_nd_index()]
    }

    /// The mine that ended a lost game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Mine coordinates of the current layout, for final-board rendering.
    pub fn mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_layout.mines()
    }

    pub fn mine_layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn events(&self) -> &[GameEvent] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// The up to eight in-bounds cells around `coords`.
    pub fn neighbors(&self, coords: Coord2) -> Result<NeighborIter> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Ok(self.mine_layout.iter_neighbors(coords))
    }

    /// Reveals `coords`, flood filling outward from cells with no adjacent mines.
    ///
    /// Flagged cells are protected: revealing one returns [`RevealOutcome::Flagged`]
    /// and the flood fill stops at them. The win check runs once, after the fill.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use EngineCell::*;

        let coords = self.mine_layout.validate_coords(coords)?;
        self.check_in_progress()?;

        match self.board[coords.to_nd_index()] {
            Revealed(_) => return Ok(RevealOutcome::AlreadyRevealed),
            Flagged => return Ok(RevealOutcome::Flagged),
            Hidden => {}
        }

        if self.mine_layout.contains_mine(coords) {
            log::debug!("mine hit at {coords:?}");
            self.triggered_mine = Some(coords);
            self.state = EngineState::Lost;
            self.events.record(GameEvent::MineTriggered { coords });
            return Ok(RevealOutcome::HitMine);
        }

        let adjacent_mines = self.open_cell(coords);
        let mut opened = 1;
        if adjacent_mines == 0 {
            opened += self.flood_fill(coords);
        }
        self.events.record(GameEvent::Revealed {
            coords,
            adjacent_mines,
            opened,
        });

        if self.revealed_count == self.mine_layout.safe_cell_count() {
            log::debug!("all {} safe cells revealed", self.revealed_count);
            self.state = EngineState::Won;
            self.events.record(GameEvent::Won);
            Ok(RevealOutcome::Win)
        } else {
            Ok(RevealOutcome::Revealed(adjacent_mines))
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use EngineCell::*;

        let coords = self.mine_layout.validate_coords(coords)?;
        self.check_in_progress()?;

        let outcome = match self.board[coords.to_nd_index()] {
            Hidden => {
                self.board[coords.to_nd_index()] = Flagged;
                self.flagged_count += 1;
                FlagOutcome::FlagAdded
            }
            Flagged => {
                self.board[coords.to_nd_index()] = Hidden;
                self.flagged_count -= 1;
                FlagOutcome::FlagRemoved
            }
            Revealed(_) => return Ok(FlagOutcome::Revealed),
        };

        self.events.record(GameEvent::FlagChanged {
            coords,
            flagged: outcome == FlagOutcome::FlagAdded,
        });
        Ok(outcome)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_engine(self)
    }

    /// Marks a safe hidden cell revealed and returns its adjacent mine count.
    fn open_cell(&mut self, coords: Coord2) -> u8 {
        let adjacent_mines = self.mine_layout.adjacent_mine_count(coords);
        self.board[coords.to_nd_index()] = EngineCell::Revealed(adjacent_mines);
        self.revealed_count += 1;
        adjacent_mines
    }

    /// Opens the zero region around an already opened zero cell and its numbered border.
    ///
    /// Runs on an explicit queue; a cell is skipped once it is no longer hidden, so the
    /// board itself is the visited set. Returns how many cells were opened.
    fn flood_fill(&mut self, origin: Coord2) -> CellCount {
        let mut opened = 0;
        let mut to_visit: VecDeque<_> = self.hidden_neighbors(origin).collect();

        while let Some(visit_coords) = to_visit.pop_front() {
            if self.board[visit_coords.to_nd_index()] != EngineCell::Hidden {
                continue;
            }

            // neighbors of a zero cell are never mines
            let adjacent_mines = self.open_cell(visit_coords);
            opened += 1;

            if adjacent_mines == 0 {
                to_visit.extend(self.hidden_neighbors(visit_coords));
            }
        }

        log::trace!("flood fill from {origin:?} opened {opened} cells");
        opened
    }

    fn hidden_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_layout
            .iter_neighbors(coords)
            .filter(|&pos| self.board[pos.to_nd_index()] == EngineCell::Hidden)
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }

    fn record_placement(&mut self) {
        log::debug!(
            "new {}x{} game, {} mines, seed {:?}",
            self.config.width,
            self.config.height,
            self.mine_layout.mine_count(),
            self.seed
        );
        self.events.record(GameEvent::MinesPlaced {
            seed: self.seed,
            mines: self.mine_layout.mine_count(),
        });
    }
}

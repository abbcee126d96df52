//! Single-player minefield engine.
//!
//! [`Minefield`] owns the grid, the mine layout and the revealed/flagged state,
//! and resolves reveal and flag actions into outcomes. Presentation layers call
//! into it and redraw from [`Minefield::snapshot`]; the engine never calls back.

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use event::*;
pub use generator::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod event;
mod generator;
mod snapshot;
mod tile;
mod types;

/// Board dimensions, mine count and optional seed for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GameConfig {
    pub const fn new(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
            seed: None,
        }
    }

    pub const fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Board size as `(height, width)`, the bounds of a [`Coord2`].
    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    /// Checks `width, height > 0` and `0 < mines < width * height`.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::InvalidConfiguration(format!(
                "board must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }

        if self.mines == 0 {
            return Err(GameError::InvalidConfiguration(
                "at least one mine is required".into(),
            ));
        }

        if self.mines >= self.total_cells() {
            return Err(GameError::InvalidConfiguration(format!(
                "{} mines do not leave a safe cell on a {}x{} board",
                self.mines, self.width, self.height
            )));
        }

        Ok(())
    }
}

/// Ground truth of where the mines are. Fixed for the lifetime of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Builds a layout from a `(height, width)` shaped mask.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        let max = usize::from(Coord::MAX);
        if rows == 0 || cols == 0 || rows > max || cols > max {
            return Err(GameError::InvalidConfiguration(format!(
                "mine mask of {rows}x{cols} is not a valid board shape"
            )));
        }

        // at most 255 * 255 mines, which fits a CellCount
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Ok(Self {
            mine_mask,
            mine_count,
        })
    }

    /// Builds a layout for a `(height, width)` board with mines at `mine_coords`.
    ///
    /// Repeated coordinates count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds { coords });
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new(self.width(), self.height(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds { coords })
        }
    }

    /// Board size as `(height, width)`.
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().1
    }

    pub fn height(&self) -> Coord {
        self.size().0
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // never more than the eight neighbors
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }

    /// Mine coordinates in row-major order.
    pub fn mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// Result of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagOutcome {
    FlagAdded,
    FlagRemoved,
    /// The cell is already revealed and cannot carry a flag.
    Revealed,
}

impl FlagOutcome {
    /// Whether this outcome changed what a renderer would show.
    pub const fn has_update(self) -> bool {
        match self {
            Self::FlagAdded | Self::FlagRemoved => true,
            Self::Revealed => false,
        }
    }
}

/// Result of a reveal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// The cell was revealed earlier, nothing changed.
    AlreadyRevealed,
    /// The cell carries a flag and is protected until the flag is removed.
    Flagged,
    /// The cell was safe and now shows its adjacent mine count.
    Revealed(u8),
    /// The cell held a mine, the game is lost.
    HitMine,
    /// The reveal uncovered the last safe cell, the game is won.
    Win,
}

impl RevealOutcome {
    /// Whether this outcome changed what a renderer would show.
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            AlreadyRevealed => false,
            Flagged => false,
            Revealed(_) => true,
            HitMine => true,
            Win => true,
        }
    }

    /// Whether this outcome ended the game.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::HitMine | Self::Win)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_empty_board() {
        assert!(matches!(
            GameConfig::new(0, 5, 1).validate(),
            Err(GameError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            GameConfig::new(5, 0, 1).validate(),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn config_requires_mines_and_a_safe_cell() {
        assert!(GameConfig::new(3, 3, 0).validate().is_err());
        assert!(GameConfig::new(3, 3, 9).validate().is_err());
        assert!(GameConfig::new(1, 1, 1).validate().is_err());
        assert!(GameConfig::new(3, 3, 8).validate().is_ok());
        assert!(GameConfig::new(2, 1, 1).validate().is_ok());
    }

    #[test]
    fn config_size_is_height_then_width() {
        let config = GameConfig::new(4, 2, 3);
        assert_eq!(config.size(), (2, 4));
        assert_eq!(config.total_cells(), 8);
        assert_eq!(config.safe_cells(), 5);
    }

    #[test]
    fn layout_counts_adjacent_mines() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (0, 2)]).unwrap();

        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.adjacent_mine_count((0, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((1, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((2, 0)), 0);
        assert_eq!(layout.safe_cell_count(), 7);
    }

    #[test]
    fn layout_collapses_duplicate_mines() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(1, 1), (1, 1)]).unwrap();
        assert_eq!(layout.mine_count(), 1);
        assert_eq!(layout.mines().collect::<Vec<_>>(), vec![(1, 1)]);
    }

    #[test]
    fn layout_rejects_out_of_bounds_mine() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 3), &[(2, 0)]),
            Err(GameError::OutOfBounds { coords: (2, 0) })
        );
    }

    #[test]
    fn layout_reports_width_and_height() {
        let layout = MineLayout::from_mine_coords((2, 5), &[(1, 4)]).unwrap();
        assert_eq!(layout.height(), 2);
        assert_eq!(layout.width(), 5);
        assert!(layout.contains_mine((1, 4)));
        assert_eq!(layout.validate_coords((1, 4)), Ok((1, 4)));
        assert!(layout.validate_coords((4, 1)).is_err());
    }

    #[test]
    fn reveal_outcome_updates() {
        assert!(!RevealOutcome::AlreadyRevealed.has_update());
        assert!(!RevealOutcome::Flagged.has_update());
        assert!(RevealOutcome::Revealed(0).has_update());
        assert!(RevealOutcome::Win.is_terminal());
        assert!(!RevealOutcome::Revealed(3).is_terminal());
    }
}

use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::*;

/// Player-visible board state, detached from the engine.
///
/// `matrix` is `(height, width)` shaped; `None` marks a hidden cell (flagged or not),
/// `Some(n)` a revealed cell with `n` adjacent mines. Flags are reported separately.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub matrix: Array2<Option<u8>>,
    pub flags: BTreeSet<Coord2>,
}

impl Snapshot {
    pub fn from_engine(engine: &Minefield) -> Self {
        let (rows, cols) = engine.size();
        let mut matrix = Array2::from_elem((rows, cols).to_nd_index(), None);
        let mut flags = BTreeSet::new();

        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                let cell = engine.board_cell(coords);
                matrix[coords.to_nd_index()] = cell.revealed_count();
                if cell == EngineCell::Flagged {
                    flags.insert(coords);
                }
            }
        }

        Self { matrix, flags }
    }

    /// Board size as `(height, width)`.
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.matrix.dim();
        (rows as Coord, cols as Coord)
    }

    /// Revealed count at `coords`, `None` if hidden or outside the board.
    pub fn revealed(&self, coords: Coord2) -> Option<u8> {
        self.matrix
            .get(coords.to_nd_index())
            .copied()
            .flatten()
    }

    pub fn is_flagged(&self, coords: Coord2) -> bool {
        self.flags.contains(&coords)
    }

    pub fn revealed_count(&self) -> usize {
        self.matrix.iter().filter(|cell| cell.is_some()).count()
    }
}

/// Plain ASCII grid: digits for revealed cells (`.` for zero), `#` hidden, `F` flagged.
impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.matrix.rows().into_iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                match cell {
                    Some(0) => f.write_str(".")?,
                    Some(count) => write!(f, "{count}")?,
                    None if self.is_flagged((row as Coord, col as Coord)) => f.write_str("F")?,
                    None => f.write_str("#")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(size: Coord2, mines: &[Coord2]) -> Minefield {
        Minefield::with_layout(MineLayout::from_mine_coords(size, mines).unwrap()).unwrap()
    }

    #[test]
    fn fresh_board_is_all_hidden() {
        let snapshot = engine((2, 3), &[(0, 0)]).snapshot();

        assert_eq!(snapshot.size(), (2, 3));
        assert_eq!(snapshot.revealed_count(), 0);
        assert!(snapshot.flags.is_empty());
        assert_eq!(snapshot.to_string(), "# # #\n# # #\n");
    }

    #[test]
    fn flags_are_reported_separately_from_matrix() {
        let mut engine = engine((2, 3), &[(0, 0)]);
        engine.toggle_flag((0, 0)).unwrap();
        engine.reveal((1, 2)).unwrap();

        let snapshot = engine.snapshot();

        assert_eq!(snapshot.revealed((0, 0)), None);
        assert!(snapshot.is_flagged((0, 0)));
        assert_eq!(snapshot.revealed((1, 2)), Some(0));
        assert_eq!(snapshot.revealed((0, 1)), Some(1));
        assert_eq!(snapshot.to_string(), "F 1 .\n# 1 .\n");
    }

    #[test]
    fn snapshot_survives_terminal_state() {
        let mut engine = engine((2, 2), &[(1, 1)]);
        engine.reveal((0, 0)).unwrap();
        engine.reveal((1, 1)).unwrap();

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.revealed((0, 0)), Some(1));
        assert_eq!(snapshot.revealed((1, 1)), None);
    }

    #[test]
    fn won_corner_flood_exports_every_safe_cell() {
        let mut engine = engine((3, 3), &[(0, 0)]);
        assert_eq!(engine.reveal((2, 2)), Ok(RevealOutcome::Win));

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.revealed_count(), 8);
        assert_eq!(snapshot.revealed((0, 0)), None);
        assert_eq!(snapshot.to_string(), "# 1 .\n1 1 .\n. . .\n");
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let mut engine = engine((1, 2), &[(0, 0)]);
        engine.toggle_flag((0, 0)).unwrap();

        let json = serde_json::to_value(engine.snapshot()).unwrap();
        assert_eq!(json["flags"], serde_json::json!([[0, 0]]));
    }
}

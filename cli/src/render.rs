use std::collections::BTreeSet;
use std::fmt;

use minefield_core::{Coord2, EngineState, Minefield};

use crate::config::DisplayConfig;

/// Text rendering of an engine's board with row and column labels.
///
/// Mines are only drawn once the game is lost.
pub struct BoardView<'a> {
    engine: &'a Minefield,
    display: &'a DisplayConfig,
}

impl<'a> BoardView<'a> {
    pub fn new(engine: &'a Minefield, display: &'a DisplayConfig) -> Self {
        Self { engine, display }
    }

    fn glyph(
        &self,
        cell: Option<u8>,
        coords: Coord2,
        flagged: bool,
        mines: &BTreeSet<Coord2>,
    ) -> char {
        let display = self.display;
        match cell {
            Some(0) => display.empty,
            Some(count) => char::from(b'0' + count),
            None if self.engine.triggered_mine() == Some(coords) => display.triggered,
            None if flagged => display.flag,
            None if mines.contains(&coords) => display.mine,
            None => display.hidden,
        }
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.engine.snapshot();
        let (rows, cols) = snapshot.size();
        let mines: BTreeSet<Coord2> = if self.engine.state() == EngineState::Lost {
            self.engine.mines().collect()
        } else {
            BTreeSet::new()
        };

        let label_width = rows.saturating_sub(1).to_string().len();
        let cell_width = cols.saturating_sub(1).to_string().len() + 1;

        write!(f, "{:label_width$}", "")?;
        for col in 0..cols {
            write!(f, "{col:>cell_width$}")?;
        }
        writeln!(f)?;

        for row in 0..rows {
            write!(f, "{row:>label_width$}")?;
            for col in 0..cols {
                let coords: Coord2 = (row, col);
                let glyph = self.glyph(
                    snapshot.revealed(coords),
                    coords,
                    snapshot.is_flagged(coords),
                    &mines,
                );
                write!(f, "{glyph:>cell_width$}")?;
            }
            writeln!(f)?;
        }

        let status = match self.engine.state() {
            EngineState::InProgress => "in progress",
            EngineState::Won => "won",
            EngineState::Lost => "lost",
        };
        write!(f, "mines left: {}, {status}", self.engine.mines_left())
    }
}

#[cfg(test)]
mod tests {
    use minefield_core::MineLayout;

    use super::*;

    fn engine(size: Coord2, mines: &[Coord2]) -> Minefield {
        Minefield::with_layout(MineLayout::from_mine_coords(size, mines).unwrap()).unwrap()
    }

    #[test]
    fn renders_labels_and_hidden_cells() {
        let engine = engine((2, 3), &[(0, 0)]);
        let display = DisplayConfig::default();

        assert_eq!(
            BoardView::new(&engine, &display).to_string(),
            "  0 1 2\n0 # # #\n1 # # #\nmines left: 1, in progress"
        );
    }

    #[test]
    fn renders_flags_and_counts() {
        let mut engine = engine((2, 3), &[(0, 0)]);
        engine.toggle_flag((0, 0)).unwrap();
        engine.reveal((1, 2)).unwrap();
        let display = DisplayConfig::default();

        assert_eq!(
            BoardView::new(&engine, &display).to_string(),
            "  0 1 2\n0 F 1 .\n1 # 1 .\nmines left: 0, in progress"
        );
    }

    #[test]
    fn lost_game_shows_mines() {
        let mut engine = engine((2, 2), &[(0, 0), (1, 1)]);
        engine.reveal((1, 1)).unwrap();
        let display = DisplayConfig::default();

        assert_eq!(
            BoardView::new(&engine, &display).to_string(),
            "  0 1\n0 * #\n1 # X\nmines left: 2, lost"
        );
    }

    #[test]
    fn wide_boards_pad_columns() {
        let engine = engine((1, 11), &[(0, 10)]);
        let display = DisplayConfig::default();
        let rendered = BoardView::new(&engine, &display).to_string();

        assert!(rendered.starts_with("   0  1  2"));
        assert!(rendered.contains(" 9 10\n"));
    }
}

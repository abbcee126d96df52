use std::path::Path;

use anyhow::Context;
use minefield_core::{CellCount, Coord, GameConfig};
use serde::{Deserialize, Serialize};

/// Settings file for the terminal game.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub board: BoardConfig,
    pub display: DisplayConfig,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
    pub seed: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 9,
            height: 9,
            mines: 10,
            seed: None,
        }
    }
}

/// Glyphs used when drawing the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub hidden: char,
    pub flag: char,
    pub mine: char,
    pub triggered: char,
    pub empty: char,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            hidden: '#',
            flag: 'F',
            mine: '*',
            triggered: 'X',
            empty: '.',
        }
    }
}

/// Board values given on the command line, taking precedence over the file.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoardOverrides {
    pub width: Option<Coord>,
    pub height: Option<Coord>,
    pub mines: Option<CellCount>,
    pub seed: Option<u64>,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read config file {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn apply(&mut self, overrides: BoardOverrides) {
        let board = &mut self.board;
        board.width = overrides.width.unwrap_or(board.width);
        board.height = overrides.height.unwrap_or(board.height);
        board.mines = overrides.mines.unwrap_or(board.mines);
        board.seed = overrides.seed.or(board.seed);
    }

    pub fn game_config(&self) -> GameConfig {
        let BoardConfig {
            width,
            height,
            mines,
            seed,
        } = self.board;
        GameConfig {
            width,
            height,
            mines,
            seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_beginner_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.game_config(), GameConfig::new(9, 9, 10));
    }

    #[test]
    fn parses_board_and_display() {
        let config = Config::from_toml(
            r#"
            [board]
            width = 30
            height = 16
            mines = 99
            seed = 42

            [display]
            hidden = "?"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.game_config(),
            GameConfig::new(30, 16, 99).with_seed(42)
        );
        assert_eq!(config.display.hidden, '?');
        assert_eq!(config.display.flag, 'F');
    }

    #[test]
    fn rejects_unknown_keys_and_oversized_board() {
        assert!(Config::from_toml("[board]\nwidht = 4\n").is_err());
        assert!(Config::from_toml("[board]\nwidth = 300\n").is_err());
        assert!(Config::from_toml("[display]\nflag = \"FF\"\n").is_err());
    }

    #[test]
    fn overrides_take_precedence() {
        let mut config = Config::from_toml("[board]\nwidth = 5\nseed = 3\n").unwrap();
        config.apply(BoardOverrides {
            height: Some(4),
            mines: Some(2),
            ..Default::default()
        });

        assert_eq!(config.game_config(), GameConfig::new(5, 4, 2).with_seed(3));
    }

    #[test]
    fn missing_file_is_reported() {
        let error = Config::load(Path::new("/nonexistent/minefield.toml")).unwrap_err();
        assert!(error.to_string().contains("could not read config file"));
    }
}

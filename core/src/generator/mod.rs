use crate::*;
pub use random::*;

mod random;

/// Produces the mine layout for a game.
pub trait MineLayoutGenerator {
    fn generate(self, config: &GameConfig) -> Result<MineLayout>;
}

/// A fixed layout generates itself, as long as it matches the requested board.
impl MineLayoutGenerator for MineLayout {
    fn generate(self, config: &GameConfig) -> Result<MineLayout> {
        if self.size() != config.size() || self.mine_count() != config.mines {
            return Err(GameError::InvalidConfiguration(format!(
                "fixed layout is {}x{} with {} mines, requested {}x{} with {}",
                self.width(),
                self.height(),
                self.mine_count(),
                config.width,
                config.height,
                config.mines
            )));
        }
        Ok(self)
    }
}

use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniformly random placement, reproducible from its seed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Draws a fresh seed from the thread-local entropy source.
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineLayoutGenerator for RandomMineGenerator {
    fn generate(self, config: &GameConfig) -> Result<MineLayout> {
        config.validate()?;

        let total_cells = usize::from(config.total_cells());
        let mines = usize::from(config.mines);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());

        // distinct indices, so exactly `mines` cells end up set
        for index in rand::seq::index::sample(&mut rng, total_cells, mines) {
            mine_mask[linear_to_coords(index, config.width).to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(mine_mask)?;
        debug_assert_eq!(layout.mine_count(), config.mines);
        log::debug!("placed {} mines with seed {}", layout.mine_count(), self.seed);
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_mine_count_within_bounds() {
        for (width, height, mines) in [(3, 3, 8), (9, 9, 10), (30, 16, 99), (2, 1, 1), (1, 7, 3)] {
            let config = GameConfig::new(width, height, mines);
            for seed in 0..20 {
                let layout = RandomMineGenerator::new(seed).generate(&config).unwrap();
                let placed: Vec<_> = layout.mines().collect();

                assert_eq!(placed.len(), usize::from(mines));
                assert_eq!(layout.mine_count(), mines);
                assert!(placed.iter().all(|&(row, col)| row < height && col < width));
            }
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::new(16, 16, 40);
        let first = RandomMineGenerator::new(1234).generate(&config).unwrap();
        let second = RandomMineGenerator::new(1234).generate(&config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_usually_differ() {
        let config = GameConfig::new(16, 16, 40);
        let layouts: Vec<_> = (0..8)
            .map(|seed| RandomMineGenerator::new(seed).generate(&config).unwrap())
            .collect();
        assert!(layouts.iter().any(|layout| *layout != layouts[0]));
    }

    #[test]
    fn rejects_invalid_configuration() {
        let outcome = RandomMineGenerator::new(0).generate(&GameConfig::new(1, 1, 1));
        assert!(matches!(outcome, Err(GameError::InvalidConfiguration(_))));
    }

    #[test]
    fn fixed_layout_must_match_config() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0)]).unwrap();
        assert!(layout.clone().generate(&GameConfig::new(3, 3, 1)).is_ok());
        assert!(layout.generate(&GameConfig::new(4, 3, 1)).is_err());
    }
}

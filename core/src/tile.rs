use serde::{Deserialize, Serialize};

/// Canonical player-visible state stored by the gameplay engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineCell {
    #[default]
    Hidden,
    Revealed(u8),
    Flagged,
}

impl EngineCell {
    /// The adjacent-mine count, only exposed once the cell is revealed.
    pub const fn revealed_count(self) -> Option<u8> {
        match self {
            Self::Revealed(count) => Some(count),
            Self::Hidden | Self::Flagged => None,
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::*;

/// A state change recorded by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A fresh layout was placed, on create or reset. `seed` is `None` for fixed layouts.
    MinesPlaced { seed: Option<u64>, mines: CellCount },
    /// A top-level reveal opened `opened` cells, including any flood fill.
    Revealed {
        coords: Coord2,
        adjacent_mines: u8,
        opened: CellCount,
    },
    FlagChanged { coords: Coord2, flagged: bool },
    MineTriggered { coords: Coord2 },
    Won,
}

/// In-memory record of engine events, owned by the engine and read by its caller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub(crate) fn record(&mut self, event: GameEvent) {
        log::trace!("event: {event:?}");
        self.events.push(event);
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Takes every recorded event, leaving the log empty.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        core::mem::take(&mut self.events)
    }
}

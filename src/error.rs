//! Invariant violations surfaced by floor generation and the entity registry.
//!
//! Rejected input and walking into walls are ordinary turn outcomes, not
//! errors; anything here means the floor cannot be trusted and generation
//! must stop.

use crate::spawner::EntityVariant;

/// Fatal errors raised while building or mutating a floor.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The requested map cannot hold one room per grid cell.
    #[error("map {width}x{height} is too small for a {cells_x}x{cells_y} room grid")]
    MapTooSmall {
        width: i32,
        height: i32,
        cells_x: i32,
        cells_y: i32,
    },

    /// Some floor tiles cannot be reached from the others.
    #[error("map is disconnected: {reachable} of {total} floor tiles reachable")]
    Disconnected { reachable: usize, total: usize },

    /// No free cell was left to place an entity on.
    #[error("no free cell left to place {variant:?}")]
    FreeCellsExhausted { variant: EntityVariant },

    /// A registry handle referred to an entity that no longer exists.
    #[error("entity registry handle is stale")]
    StaleEntity,
}

impl GameError {
    /// Stable identifier for log lines.
    pub fn error_code(&self) -> &'static str {
        match self {
            GameError::MapTooSmall { .. } => "MAP_TOO_SMALL",
            GameError::Disconnected { .. } => "MAP_DISCONNECTED",
            GameError::FreeCellsExhausted { .. } => "FREE_CELLS_EXHAUSTED",
            GameError::StaleEntity => "STALE_ENTITY",
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;

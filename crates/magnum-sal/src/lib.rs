//! Magnum Sal -- miner placement and removal rules over an event log.
//!
//! This crate builds on [`magnum_events`] to enforce the rules of the mine.
//! There is no board: every rule is a question asked of the
//! [`EventLog`](magnum_events::log::EventLog), answered fresh on each call.
//!
//! - [`NeighborView`](neighbors::NeighborView) nets placements against
//!   removals around a cell.
//! - [`MinerPlacementService`](placement::MinerPlacementService) admits a
//!   miner into a chamber next to a live miner (or at the entrance).
//! - [`MinerRemovalService`](removal::MinerRemovalService) takes a miner out
//!   unless doing so would split the chain.
//! - [`MagnumSal`](game::MagnumSal) owns the log and ties the services
//!   together.
//!
//! # Quick Start
//!
//! ```
//! use magnum_sal::prelude::*;
//!
//! let mut game = MagnumSal::new();
//! game.add_chamber(0, 0);
//! game.add_chamber(0, 1);
//!
//! game.place_miner(0, 0).unwrap();
//! game.place_miner(0, 1).unwrap();
//!
//! // The entrance is holding the chain together.
//! let err = game.remove_miner(0, 0).unwrap_err();
//! assert_eq!(err, RuleError::WouldBreakChain { at: Coordinate::ORIGIN });
//!
//! // The tail of the chain can leave.
//! game.remove_miner(0, 1).unwrap();
//! assert!(game.events().contains(&Event::miner_removed(0, 1)));
//! ```

#![deny(unsafe_code)]

use magnum_events::coord::Coordinate;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod game;
pub mod layout;
pub mod neighbors;
pub mod placement;
pub mod removal;
pub mod replay;

/// Re-export the event crate for convenience.
pub use magnum_events;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Why the mine refused a placement or removal.
///
/// A rejection is never fatal: the log is left exactly as it was and the
/// session can continue. Each variant carries the cell the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum RuleError {
    /// No chamber was ever dug at the target cell.
    #[error("there is no chamber at {at}, so a miner cannot be placed there")]
    NoChamberHere { at: Coordinate },

    /// The target is not the entrance and no neighbor holds a live miner.
    #[error("cannot place a miner at {at} because no neighboring cell holds a miner")]
    NoAdjacentMiner { at: Coordinate },

    /// No miner was ever placed at the target cell.
    #[error("there is no miner to be removed at {at}")]
    NoMinerHere { at: Coordinate },

    /// Every miner placed at the target cell has already been removed.
    #[error("all miners at {at} were already removed")]
    AlreadyRemoved { at: Coordinate },

    /// The target links two parts of the chain and holds its last miner.
    #[error("cannot remove the last miner at {at} from the middle of a chain")]
    WouldBreakChain { at: Coordinate },
}

impl RuleError {
    /// The cell the rejected operation targeted.
    pub fn at(&self) -> Coordinate {
        match *self {
            RuleError::NoChamberHere { at }
            | RuleError::NoAdjacentMiner { at }
            | RuleError::NoMinerHere { at }
            | RuleError::AlreadyRemoved { at }
            | RuleError::WouldBreakChain { at } => at,
        }
    }
}

/// Errors produced when loading a [`MineConfig`](config::MineConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration text was not valid JSON for a mine configuration.
    #[error("invalid mine configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    // Re-export everything from the event prelude.
    pub use magnum_events::prelude::*;

    pub use crate::config::MineConfig;
    pub use crate::game::MagnumSal;
    pub use crate::layout::MineLayout;
    pub use crate::neighbors::{NeighborView, Tally};
    pub use crate::placement::MinerPlacementService;
    pub use crate::removal::MinerRemovalService;
    pub use crate::replay::{replay, ReplayResult, ReplayViolation, SessionRecord};
    pub use crate::{ConfigError, RuleError};
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

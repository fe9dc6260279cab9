//! Placing miners.
//!
//! A miner may enter a cell when:
//!
//! 1. a chamber has been dug there, and
//! 2. the cell is the entrance, or one of its orthogonal neighbors currently
//!    holds a live miner.
//!
//! Both checks run against the full log on every call. The entrance is
//! recognised by its coordinate alone; nothing remembers whether it was
//! already seeded.

use magnum_events::coord::Coordinate;
use magnum_events::event::{Event, EventKind};
use magnum_events::log::EventLog;
use magnum_events::query::EventQuery;
use tracing::debug;

use crate::config::MineConfig;
use crate::neighbors::NeighborView;
use crate::RuleError;

/// Validates and records miner placements on a borrowed log.
#[derive(Debug)]
pub struct MinerPlacementService<'a> {
    events: &'a mut EventLog,
    config: MineConfig,
}

impl<'a> MinerPlacementService<'a> {
    /// A service for a mine whose entrance is `(0, 0)`.
    pub fn new(events: &'a mut EventLog) -> Self {
        Self::with_config(events, &MineConfig::default())
    }

    pub fn with_config(events: &'a mut EventLog, config: &MineConfig) -> Self {
        Self {
            events,
            config: config.clone(),
        }
    }

    /// Check whether a miner could be placed at `at` without recording it.
    pub fn check(&self, at: Coordinate) -> Result<(), RuleError> {
        let chambers = EventQuery::new(EventKind::ChamberAdded).at(at);
        if self.events.query(&chambers).next().is_none() {
            return Err(RuleError::NoChamberHere { at });
        }

        if !self.config.is_entrance(at) && NeighborView::new(self.events).neighbors(at).is_empty() {
            return Err(RuleError::NoAdjacentMiner { at });
        }

        Ok(())
    }

    /// Place a miner at `(x, y)`, appending `MinerPlaced` on success.
    ///
    /// On error the log is left untouched.
    pub fn place_miner(&mut self, x: i64, y: i64) -> Result<Event, RuleError> {
        let at = Coordinate::new(x, y);
        if let Err(err) = self.check(at) {
            debug!(%at, error = %err, "miner placement rejected");
            return Err(err);
        }

        let event = Event::miner_placed(x, y);
        self.events.append(event);
        debug!(%at, "miner placed");
        Ok(event)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

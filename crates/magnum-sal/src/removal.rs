//! Removing miners.
//!
//! A miner may leave a cell when the cell holds at least one live miner and
//! its departure does not split the chain. Chain integrity is judged
//! locally, from the number of distinct live neighbors (the *degree*):
//!
//! - degree 2: the cell sits inside a chain;
//! - degree 1 at the entrance: the entrance has no other side, so it is
//!   inside the chain as well.
//!
//! A cell inside the chain may still give up a miner if it holds a spare
//! (net count 2 or more).
//!
//! The degree test assumes the mine is dug as a path or tree with at most
//! two used sides per interior cell. Branching or looping layouts with
//! degree above 2 are not guarded.

use magnum_events::coord::Coordinate;
use magnum_events::event::Event;
use magnum_events::log::EventLog;
use tracing::debug;

use crate::config::MineConfig;
use crate::neighbors::NeighborView;
use crate::RuleError;

/// Validates and records miner removals on a borrowed log.
#[derive(Debug)]
pub struct MinerRemovalService<'a> {
    events: &'a mut EventLog,
    config: MineConfig,
}

impl<'a> MinerRemovalService<'a> {
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

    /// Check whether a miner could be removed from `at` without recording it.
    pub fn check(&self, at: Coordinate) -> Result<(), RuleError> {
        let view = NeighborView::new(self.events);

        let placed = view.placed_count(at);
        if placed == 0 {
            return Err(RuleError::NoMinerHere { at });
        }
        let miners_here = placed - view.removed_count(at);
        if miners_here <= 0 {
            return Err(RuleError::AlreadyRemoved { at });
        }

        let degree = view.neighbors(at).len();
        let in_chain = degree == 2 || (self.config.is_entrance(at) && degree == 1);
        if in_chain && miners_here == 1 {
            return Err(RuleError::WouldBreakChain { at });
        }

        Ok(())
    }

    /// Remove one miner from `(x, y)`, appending `MinerRemoved` on success.
    ///
    /// On error the log is left untouched.
    pub fn remove_miner(&mut self, x: i64, y: i64) -> Result<Event, RuleError> {
        let at = Coordinate::new(x, y);
        if let Err(err) = self.check(at) {
            debug!(%at, error = %err, "miner removal rejected");
            return Err(err);
        }

        let event = Event::miner_removed(x, y);
        self.events.append(event);
        debug!(%at, "miner removed");
        Ok(event)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! The mine session facade.
//!
//! [`MagnumSal`] owns the [`EventLog`] for one game and hands out the rule
//! services bound to it. The services borrow the log mutably for the length
//! of a call, so at most one operation can be in flight per session. A host
//! that shares a session across threads wraps it in its own lock.

use magnum_events::coord::Coordinate;
use magnum_events::event::Event;
use magnum_events::log::EventLog;
use tracing::debug;

use crate::config::MineConfig;
use crate::layout::MineLayout;
use crate::neighbors::NeighborView;
use crate::placement::MinerPlacementService;
use crate::removal::MinerRemovalService;
use crate::replay::SessionRecord;
use crate::RuleError;

/// One mine: its configuration and the log of everything that happened in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MagnumSal {
    events: EventLog,
    config: MineConfig,
}

impl MagnumSal {
    /// An empty mine with the entrance at `(0, 0)`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MineConfig) -> Self {
        Self::from_events_with_config(EventLog::new(), config)
    }

    /// Resume a mine from an existing log.
    ///
    /// The log is taken as-is; it is not re-validated against the rules (see
    /// [`replay`](crate::replay::replay) for that).
    pub fn from_events(events: EventLog) -> Self {
        Self::from_events_with_config(events, MineConfig::default())
    }

    pub fn from_events_with_config(events: EventLog, config: MineConfig) -> Self {
        Self { events, config }
    }

    /// Dig a chamber at `(x, y)`. Always succeeds, even for a duplicate.
    pub fn add_chamber(&mut self, x: i64, y: i64) -> Event {
        let event = Event::chamber_added(x, y);
        self.events.append(event);
        debug!(at = %Coordinate::new(x, y), "chamber added");
        event
    }

    /// The placement service, bound to this mine's log.
    pub fn placement(&mut self) -> MinerPlacementService<'_> {
        MinerPlacementService::with_config(&mut self.events, &self.config)
    }

    /// The removal service, bound to this mine's log.
    pub fn removal(&mut self) -> MinerRemovalService<'_> {
        MinerRemovalService::with_config(&mut self.events, &self.config)
    }

    pub fn place_miner(&mut self, x: i64, y: i64) -> Result<Event, RuleError> {
        self.placement().place_miner(x, y)
    }

    pub fn remove_miner(&mut self, x: i64, y: i64) -> Result<Event, RuleError> {
        self.removal().remove_miner(x, y)
    }

    pub fn neighbor_view(&self) -> NeighborView<'_> {
        NeighborView::new(&self.events)
    }

    /// A fresh projection of chambers and miner counts.
    pub fn layout(&self) -> MineLayout {
        MineLayout::project(&self.events)
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn into_events(self) -> EventLog {
        self.events
    }

    pub fn config(&self) -> &MineConfig {
        &self.config
    }

    /// BLAKE3 hex digest of the configuration and the log.
    ///
    /// This is the digest a [`SessionRecord`](crate::replay::SessionRecord)
    /// stores, so two sessions hash alike only when both their entrance and
    /// their events agree.
    pub fn state_hash(&self) -> String {
        SessionRecord::digest(&self.config, &self.events)
    }
}

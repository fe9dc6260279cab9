//! A read-only picture of the mine, projected from the log.
//!
//! [`MineLayout`] is built in one pass over the event log whenever a host
//! asks for it. It is never cached or updated incrementally; the rule
//! services do not read it.

use std::collections::{BTreeMap, BTreeSet};

use magnum_events::coord::Coordinate;
use magnum_events::event::Event;
use magnum_events::log::EventLog;

/// Chambers and net miner counts at one point in the log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MineLayout {
    /// Every cell with at least one `ChamberAdded` event.
    pub chambers: BTreeSet<Coordinate>,
    /// Net miner count for every cell that ever saw a placement or removal.
    /// Entries may be zero or negative.
    pub miners: BTreeMap<Coordinate, i64>,
}

impl MineLayout {
    pub fn project(events: &EventLog) -> Self {
        let mut layout = MineLayout::default();
        for event in events {
            match *event {
                Event::ChamberAdded { x, y } => {
                    layout.chambers.insert(Coordinate::new(x, y));
                }
                Event::MinerPlaced { x, y } => {
                    *layout.miners.entry(Coordinate::new(x, y)).or_insert(0) += 1;
                }
                Event::MinerRemoved { x, y } => {
                    *layout.miners.entry(Coordinate::new(x, y)).or_insert(0) -= 1;
                }
            }
        }
        layout
    }

    pub fn has_chamber(&self, at: Coordinate) -> bool {
        self.chambers.contains(&at)
    }

    pub fn net_count(&self, at: Coordinate) -> i64 {
        self.miners.get(&at).copied().unwrap_or(0)
    }

    /// Cells holding at least one miner, in coordinate order.
    pub fn live_miners(&self) -> impl Iterator<Item = (Coordinate, i64)> + '_ {
        self.miners
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(&at, &count)| (at, count))
    }

    /// Total number of live miners in the mine.
    pub fn total_live(&self) -> i64 {
        self.live_miners().map(|(_, count)| count).sum()
    }
}

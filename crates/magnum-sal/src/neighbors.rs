//! Live-miner counts derived from the event log.
//!
//! The number of miners in a cell is never stored. It is
//! `placements − removals` over the whole log, a signed integer that is
//! never clamped: a cell may hold two miners after a replace cycle, and a
//! hand-built log may even net below zero.
//!
//! [`NeighborView`] answers two questions from that definition:
//!
//! - How many miners are in *this* cell ([`net_count`](NeighborView::net_count))?
//! - Which of its four orthogonal neighbors hold a live miner
//!   ([`neighbors`](NeighborView::neighbors))?

use std::collections::BTreeMap;

use magnum_events::coord::Coordinate;
use magnum_events::event::{EventKind, Field};
use magnum_events::log::EventLog;
use magnum_events::query::EventQuery;

const POSITION: [Field; 2] = [Field::X, Field::Y];

// ---------------------------------------------------------------------------
// Tally
// ---------------------------------------------------------------------------

/// A multiset of coordinates with signed counts.
///
/// [`subtract`](Tally::subtract) keeps only strictly positive results, so a
/// tally produced by subtraction lists exactly the cells that still hold
/// something.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    counts: BTreeMap<Coordinate, i64>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `at`.
    pub fn add(&mut self, at: Coordinate) {
        *self.counts.entry(at).or_insert(0) += 1;
    }

    /// `self − other`, dropping every entry that nets to zero or below.
    pub fn subtract(&self, other: &Tally) -> Tally {
        let counts = self
            .counts
            .iter()
            .filter_map(|(&at, &count)| {
                let net = count - other.get(at);
                (net > 0).then_some((at, net))
            })
            .collect();
        Tally { counts }
    }

    /// The count for `at`, or 0 if it was never seen.
    pub fn get(&self, at: Coordinate) -> i64 {
        self.counts.get(&at).copied().unwrap_or(0)
    }

    /// Number of distinct coordinates present.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn contains(&self, at: Coordinate) -> bool {
        self.counts.contains_key(&at)
    }

    /// Entries in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, i64)> + '_ {
        self.counts.iter().map(|(&at, &count)| (at, count))
    }
}

impl FromIterator<Coordinate> for Tally {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        let mut tally = Tally::new();
        for at in iter {
            tally.add(at);
        }
        tally
    }
}

// ---------------------------------------------------------------------------
// NeighborView
// ---------------------------------------------------------------------------

/// Read-only projection of live miners, rebuilt from the log on every call.
#[derive(Debug, Clone, Copy)]
pub struct NeighborView<'a> {
    events: &'a EventLog,
}

impl<'a> NeighborView<'a> {
    pub fn new(events: &'a EventLog) -> Self {
        Self { events }
    }

    /// Live miners on the four orthogonal neighbors of `at`.
    ///
    /// Placements one step away are grouped by cell and the matching removals
    /// are subtracted; cells netting to zero or below are left out. Callers
    /// should rely on which cells are present, not on the counts.
    pub fn neighbors(&self, at: Coordinate) -> Tally {
        let placed = self.adjacent(EventKind::MinerPlaced, at);
        let removed = self.adjacent(EventKind::MinerRemoved, at);
        placed.subtract(&removed)
    }

    /// Number of `MinerPlaced` events ever recorded at `at`.
    pub fn placed_count(&self, at: Coordinate) -> i64 {
        self.count_at(EventKind::MinerPlaced, at)
    }

    /// Number of `MinerRemoved` events ever recorded at `at`.
    pub fn removed_count(&self, at: Coordinate) -> i64 {
        self.count_at(EventKind::MinerRemoved, at)
    }

    /// Miners currently at `at`: placements minus removals, unclamped.
    pub fn net_count(&self, at: Coordinate) -> i64 {
        self.placed_count(at) - self.removed_count(at)
    }

    fn adjacent(&self, kind: EventKind, at: Coordinate) -> Tally {
        let query = EventQuery::new(kind).adjacent_to(at);
        self.events
            .query_projected(&query, &POSITION)
            .map(|row| Coordinate::new(row[0], row[1]))
            .collect()
    }

    fn count_at(&self, kind: EventKind, at: Coordinate) -> i64 {
        self.events.count(&EventQuery::new(kind).at(at)) as i64
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

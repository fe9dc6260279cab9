//! The append-only event log: the only persistent state of a mine.
//!
//! [`EventLog`] holds every [`Event`] in the order it happened. It never
//! reorders, truncates, or edits an entry; the only mutation is
//! [`append`](EventLog::append). All game state is derived by querying it.
//!
//! # Query API
//!
//! - [`EventLog::query`]: events matching an [`EventQuery`], in log order.
//! - [`EventLog::query_projected`]: the same selection reduced to a tuple of
//!   named [`Field`]s.
//! - [`EventLog::count`]: number of matching events.
//! - [`EventLog::contains`]: structural membership test.
//!
//! # Example
//!
//! ```
//! use magnum_events::prelude::*;
//!
//! let mut log = EventLog::new();
//! log.append(Event::chamber_added(0, 0));
//! log.append(Event::miner_placed(0, 0));
//!
//! let placed = EventQuery::new(EventKind::MinerPlaced).at(Coordinate::ORIGIN);
//! assert_eq!(log.count(&placed), 1);
//! assert!(log.contains(&Event::chamber_added(0, 0)));
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::event::{Event, Field};
use crate::query::EventQuery;
use crate::LogError;

// ---------------------------------------------------------------------------
// EventLog
// ---------------------------------------------------------------------------

/// An ordered, append-only sequence of [`Event`]s.
///
/// Serializes as a plain JSON array of tagged event records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new, empty log.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add `event` as the new last entry. Performs no validation.
    pub fn append(&mut self, event: Event) {
        self.events.push(event);
        trace!(%event, len = self.events.len(), "event appended");
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All events in insertion order.
    pub fn as_slice(&self) -> &[Event] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Events matching `query`, in the order they were appended.
    pub fn query<'s>(&'s self, query: &'s EventQuery<'s>) -> impl Iterator<Item = &'s Event> + 's {
        self.events.iter().filter(move |e| query.matches(e))
    }

    /// Events matching `query`, each reduced to the values of `fields`.
    ///
    /// Row `i` holds `fields.len()` values in the order the fields were
    /// named. Rows keep log order.
    pub fn query_projected<'s>(
        &'s self,
        query: &'s EventQuery<'s>,
        fields: &'s [Field],
    ) -> impl Iterator<Item = Vec<i64>> + 's {
        self.query(query)
            .map(move |e| fields.iter().map(|&f| e.field(f)).collect())
    }

    /// Number of events matching `query`.
    pub fn count(&self, query: &EventQuery<'_>) -> usize {
        self.events.iter().filter(|e| query.matches(e)).count()
    }

    /// Whether an event structurally equal to `event` was ever appended.
    pub fn contains(&self, event: &Event) -> bool {
        let same_kind = EventQuery::new(event.kind());
        let found = self.query(&same_kind).any(|e| e == event);
        found
    }

    /// BLAKE3 hex digest of the canonical JSON encoding of the log.
    ///
    /// Two logs with the same events in the same order hash identically.
    pub fn state_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        serde_json::to_writer(&mut hasher, &self.events)
            .expect("event records are always JSON-serializable");
        hasher.finalize().to_hex().to_string()
    }

    /// Encode the log as a JSON array of tagged records.
    pub fn to_json(&self) -> Result<String, LogError> {
        serde_json::to_string(&self.events).map_err(LogError::Encode)
    }

    /// Decode a log previously produced by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> Result<Self, LogError> {
        let events: Vec<Event> = serde_json::from_str(json).map_err(LogError::Decode)?;
        Ok(Self { events })
    }
}

impl From<Vec<Event>> for EventLog {
    fn from(events: Vec<Event>) -> Self {
        Self { events }
    }
}

impl FromIterator<Event> for EventLog {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl Extend<Event> for EventLog {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        for event in iter {
            self.append(event);
        }
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl IntoIterator for EventLog {
    type Item = Event;
    type IntoIter = std::vec::IntoIter<Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coordinate;
    use crate::event::EventKind;

    fn shaft() -> EventLog {
        EventLog::from(vec![
            Event::chamber_added(0, 0),
            Event::chamber_added(0, 1),
            Event::chamber_added(0, 2),
            Event::miner_placed(0, 0),
            Event::miner_placed(0, 1),
            Event::miner_removed(0, 1),
            Event::miner_placed(0, 1),
        ])
    }

    #[test]
    fn append_preserves_order() {
        let mut log = EventLog::new();
        log.append(Event::chamber_added(3, 3));
        log.append(Event::chamber_added(1, 1));
        log.append(Event::chamber_added(3, 3));
        assert_eq!(
            log.as_slice(),
            &[
                Event::chamber_added(3, 3),
                Event::chamber_added(1, 1),
                Event::chamber_added(3, 3),
            ]
        );
    }

    #[test]
    fn query_by_kind_keeps_log_order() {
        let log = shaft();
        let q = EventQuery::new(EventKind::MinerPlaced);
        let got: Vec<_> = log.query(&q).copied().collect();
        assert_eq!(
            got,
            vec![
                Event::miner_placed(0, 0),
                Event::miner_placed(0, 1),
                Event::miner_placed(0, 1),
            ]
        );
    }

    #[test]
    fn query_combines_all_three_axes() {
        let log = shaft();
        let q = EventQuery::new(EventKind::MinerPlaced)
            .adjacent_to(Coordinate::new(0, 2))
            .field_eq(Field::X, 0);
        assert_eq!(log.count(&q), 2);

        let none = EventQuery::new(EventKind::MinerPlaced)
            .adjacent_to(Coordinate::new(0, 2))
            .field_eq(Field::X, 5);
        assert_eq!(log.query(&none).count(), 0);
    }

    #[test]
    fn projection_drops_the_variant() {
        let log = shaft();
        let placed = EventQuery::new(EventKind::MinerPlaced).at(Coordinate::new(0, 1));
        let removed = EventQuery::new(EventKind::MinerRemoved).at(Coordinate::new(0, 1));
        let fields = [Field::X, Field::Y];

        let p: Vec<_> = log.query_projected(&placed, &fields).collect();
        let r: Vec<_> = log.query_projected(&removed, &fields).collect();
        assert_eq!(p, vec![vec![0, 1], vec![0, 1]]);
        assert_eq!(r, vec![vec![0, 1]]);
    }

    #[test]
    fn projection_follows_field_order() {
        let log = EventLog::from(vec![Event::chamber_added(4, -2)]);
        let q = EventQuery::new(EventKind::ChamberAdded);
        let rows: Vec<_> = log.query_projected(&q, &[Field::Y, Field::X]).collect();
        assert_eq!(rows, vec![vec![-2, 4]]);
    }

    #[test]
    fn contains_is_structural() {
        let log = shaft();
        assert!(log.contains(&Event::miner_removed(0, 1)));
        assert!(!log.contains(&Event::miner_removed(0, 0)));
        assert!(!log.contains(&Event::chamber_added(0, 3)));
    }

    #[test]
    fn contains_needs_kind_and_cell_to_match() {
        let mut log = EventLog::new();
        assert!(!log.contains(&Event::chamber_added(0, 0)));

        log.append(Event::miner_placed(2, 2));
        assert!(log.contains(&Event::miner_placed(2, 2)));
        assert!(!log.contains(&Event::chamber_added(2, 2)));
        assert!(!log.contains(&Event::miner_removed(2, 2)));
        assert!(!log.contains(&Event::miner_placed(2, 3)));
    }

    #[test]
    fn queries_do_not_mutate() {
        let log = shaft();
        let before = log.clone();
        let q = EventQuery::new(EventKind::MinerPlaced).filter(|_| true);
        let first: Vec<_> = log.query(&q).copied().collect();
        let second: Vec<_> = log.query(&q).copied().collect();
        assert_eq!(first, second);
        assert_eq!(log, before);
    }

    #[test]
    fn json_round_trip_preserves_order() {
        let log = shaft();
        let json = log.to_json().unwrap();
        assert!(json.starts_with(r#"[{"variant":"ChamberAdded","x":0,"y":0}"#));
        let back = EventLog::from_json(&json).unwrap();
        assert_eq!(back, log);
        assert_eq!(back.state_hash(), log.state_hash());
    }

    #[test]
    fn from_json_reports_malformed_input() {
        let err = EventLog::from_json(r#"[{"variant":"MinerPlaced","x":0}]"#).unwrap_err();
        assert!(matches!(err, LogError::Decode(_)));
    }

    #[test]
    fn state_hash_depends_on_order() {
        let a = EventLog::from(vec![Event::chamber_added(0, 0), Event::chamber_added(0, 1)]);
        let b = EventLog::from(vec![Event::chamber_added(0, 1), Event::chamber_added(0, 0)]);
        assert_eq!(a.state_hash().len(), 64);
        assert_ne!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn extend_appends_in_order() {
        let mut log = EventLog::new();
        log.extend([Event::chamber_added(0, 0), Event::miner_placed(0, 0)]);
        assert_eq!(log.len(), 2);
        assert_eq!(log.as_slice()[1], Event::miner_placed(0, 0));
    }
}

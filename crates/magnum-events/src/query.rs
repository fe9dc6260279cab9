//! Filters over the event log.
//!
//! An [`EventQuery`] selects events along three independent axes, all
//! combined with logical AND:
//!
//! 1. **Kind**: the event variant must match (always required).
//! 2. **Predicate**: an arbitrary closure over the event (optional; several
//!    calls to [`filter`](EventQuery::filter) are ANDed together).
//! 3. **Field equality**: each listed [`Field`] must equal its value.
//!
//! ```
//! use magnum_events::prelude::*;
//!
//! let here = Coordinate::new(0, 1);
//! let query = EventQuery::new(EventKind::MinerPlaced)
//!     .filter(move |e| e.coordinate().is_adjacent(here))
//!     .field_eq(Field::X, 0);
//!
//! assert!(query.matches(&Event::miner_placed(0, 2)));
//! assert!(!query.matches(&Event::miner_placed(1, 1)));
//! assert!(!query.matches(&Event::miner_removed(0, 2)));
//! ```

use std::fmt;

use crate::coord::Coordinate;
use crate::event::{Event, EventKind, Field};

type Predicate<'a> = Box<dyn Fn(&Event) -> bool + 'a>;

// ---------------------------------------------------------------------------
// EventQuery
// ---------------------------------------------------------------------------

/// A composable selection of events by kind, predicate, and field values.
pub struct EventQuery<'a> {
    kind: EventKind,
    predicate: Option<Predicate<'a>>,
    equals: Vec<(Field, i64)>,
}

impl<'a> EventQuery<'a> {
    /// Select every event of `kind`.
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            predicate: None,
            equals: Vec::new(),
        }
    }

    /// Additionally require `predicate` to hold.
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Event) -> bool + 'a,
    {
        self.predicate = Some(match self.predicate.take() {
            Some(previous) => Box::new(move |e: &Event| previous(e) && predicate(e)),
            None => Box::new(predicate),
        });
        self
    }

    /// Additionally require `field` to equal `value`.
    pub fn field_eq(mut self, field: Field, value: i64) -> Self {
        self.equals.push((field, value));
        self
    }

    /// Shorthand for `x == at.x && y == at.y`.
    pub fn at(self, at: Coordinate) -> Self {
        self.field_eq(Field::X, at.x).field_eq(Field::Y, at.y)
    }

    /// Shorthand for a predicate matching events one orthogonal step from `at`.
    pub fn adjacent_to(self, at: Coordinate) -> Self {
        self.filter(move |e| e.coordinate().is_adjacent(at))
    }

    /// Whether `event` passes every filter of this query.
    pub fn matches(&self, event: &Event) -> bool {
        event.kind() == self.kind
            && self.predicate.as_ref().map_or(true, |p| p(event))
            && self
                .equals
                .iter()
                .all(|&(field, value)| event.field(field) == value)
    }
}

impl fmt::Debug for EventQuery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventQuery")
            .field("kind", &self.kind)
            .field("has_predicate", &self.predicate.is_some())
            .field("equals", &self.equals)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Domain events recorded in the mine's event log.
//!
//! An [`Event`] is an immutable fact: a chamber was dug, a miner was placed,
//! or a miner was removed. Every variant carries only the `(x, y)` of the
//! cell it concerns. Events have no identity beyond their content -- two
//! `MinerPlaced { x: 0, y: 1 }` values are equal and only their count in the
//! log matters.
//!
//! On the wire each event is a tagged record:
//!
//! ```
//! use magnum_events::event::Event;
//!
//! let json = serde_json::to_string(&Event::miner_placed(0, 1)).unwrap();
//! assert_eq!(json, r#"{"variant":"MinerPlaced","x":0,"y":1}"#);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coord::Coordinate;

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// The variant tag of an [`Event`], used to select events in queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    ChamberAdded,
    MinerPlaced,
    MinerRemoved,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [EventKind; 3] = [
        EventKind::ChamberAdded,
        EventKind::MinerPlaced,
        EventKind::MinerRemoved,
    ];

    /// Build an event of this kind at `at`.
    pub fn at(self, at: Coordinate) -> Event {
        let Coordinate { x, y } = at;
        match self {
            EventKind::ChamberAdded => Event::ChamberAdded { x, y },
            EventKind::MinerPlaced => Event::MinerPlaced { x, y },
            EventKind::MinerRemoved => Event::MinerRemoved { x, y },
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::ChamberAdded => "ChamberAdded",
            EventKind::MinerPlaced => "MinerPlaced",
            EventKind::MinerRemoved => "MinerRemoved",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A named field of an event, for equality filters and projections.
///
/// All current variants share the same field set, but queries name fields
/// explicitly so a projection compares placements and removals by position
/// alone, whatever else a variant might carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    X,
    Y,
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A fact that occurred in the mine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "variant")]
pub enum Event {
    /// A chamber now exists at `(x, y)`. Duplicates are legal and harmless.
    ChamberAdded { x: i64, y: i64 },
    /// A miner occupies `(x, y)` as of this event.
    MinerPlaced { x: i64, y: i64 },
    /// A miner previously placed at `(x, y)` has left.
    MinerRemoved { x: i64, y: i64 },
}

impl Event {
    pub fn chamber_added(x: i64, y: i64) -> Self {
        Event::ChamberAdded { x, y }
    }

    pub fn miner_placed(x: i64, y: i64) -> Self {
        Event::MinerPlaced { x, y }
    }

    pub fn miner_removed(x: i64, y: i64) -> Self {
        Event::MinerRemoved { x, y }
    }

    /// The variant tag of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::ChamberAdded { .. } => EventKind::ChamberAdded,
            Event::MinerPlaced { .. } => EventKind::MinerPlaced,
            Event::MinerRemoved { .. } => EventKind::MinerRemoved,
        }
    }

    /// The cell this event concerns.
    pub fn coordinate(&self) -> Coordinate {
        match *self {
            Event::ChamberAdded { x, y }
            | Event::MinerPlaced { x, y }
            | Event::MinerRemoved { x, y } => Coordinate::new(x, y),
        }
    }

    /// Read a single field by name.
    pub fn field(&self, field: Field) -> i64 {
        let at = self.coordinate();
        match field {
            Field::X => at.x,
            Field::Y => at.y,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind(), self.coordinate())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

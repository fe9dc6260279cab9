//! Magnum Events -- the append-only event log behind a Magnum Sal mine.
//!
//! A mine has no board. Its entire state is the ordered sequence of facts
//! that happened to it: chambers dug, miners placed, miners removed. This
//! crate provides those facts ([`Event`](event::Event)), the log that holds
//! them ([`EventLog`](log::EventLog)), and the filter used to ask questions
//! of it ([`EventQuery`](query::EventQuery)).
//!
//! # Quick Start
//!
//! ```
//! use magnum_events::prelude::*;
//!
//! let mut log = EventLog::new();
//! log.append(Event::chamber_added(0, 0));
//! log.append(Event::chamber_added(0, 1));
//! log.append(Event::miner_placed(0, 0));
//!
//! let beside_second = EventQuery::new(EventKind::MinerPlaced)
//!     .adjacent_to(Coordinate::new(0, 1));
//! assert_eq!(log.query(&beside_second).count(), 1);
//! ```

#![deny(unsafe_code)]

pub mod coord;
pub mod event;
pub mod log;
pub mod query;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced when encoding or decoding an event log.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The log could not be written as JSON.
    #[error("failed to encode event log: {0}")]
    Encode(#[source] serde_json::Error),

    /// The input was not a JSON array of tagged event records.
    #[error("failed to decode event log: {0}")]
    Decode(#[source] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::coord::Coordinate;
    pub use crate::event::{Event, EventKind, Field};
    pub use crate::log::EventLog;
    pub use crate::query::EventQuery;
    pub use crate::LogError;
}

// ---------------------------------------------------------------------------
// Integration Tests
// ---------------------------------------------------------------------------

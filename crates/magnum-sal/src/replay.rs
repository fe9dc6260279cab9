//! Session records and rule-checked replay.
//!
//! A [`SessionRecord`] is what a host stores for a game: the configuration,
//! the ordered event log, and a BLAKE3 digest over both. Replaying a record
//! feeds every event back through the rule services on a fresh session. This
//! catches two kinds of damage:
//!
//! - an event the rules would never have admitted (a hand-edited log, or one
//!   produced by a different rule set), reported as a [`ReplayViolation`];
//! - a digest that does not match the events or the configuration (a
//!   truncated or reordered log, or an edited entrance), reported through
//!   [`ReplayResult::hash_matches`].
//!
//! # Example
//!
//! ```
//! use magnum_sal::prelude::*;
//!
//! let mut game = MagnumSal::new();
//! game.add_chamber(0, 0);
//! game.add_chamber(1, 0);
//! game.place_miner(0, 0).unwrap();
//! game.place_miner(1, 0).unwrap();
//!
//! let record = SessionRecord::capture(&game);
//! let json = record.to_json().unwrap();
//!
//! let mut restored = MagnumSal::new();
//! let result = replay(&mut restored, &SessionRecord::from_json(&json).unwrap()).unwrap();
//! assert!(result.completed);
//! assert!(result.hash_matches);
//! assert_eq!(restored, game);
//! ```

use anyhow::{anyhow, Context};
use magnum_events::event::Event;
use magnum_events::log::EventLog;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::MineConfig;
use crate::game::MagnumSal;
use crate::RuleError;

// ---------------------------------------------------------------------------
// SessionRecord
// ---------------------------------------------------------------------------

/// A stored game: configuration, events in append order, and their digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub config: MineConfig,
    pub events: EventLog,
    /// BLAKE3 hex digest (64 lowercase hex chars) of `config` and `events`,
    /// as computed by [`SessionRecord::digest`].
    pub state_hash: String,
}

impl SessionRecord {
    /// Snapshot the current state of `game`.
    pub fn capture(game: &MagnumSal) -> Self {
        Self {
            config: game.config().clone(),
            events: game.events().clone(),
            state_hash: game.state_hash(),
        }
    }

    /// BLAKE3 hex digest of a session: its configuration followed by its log,
    /// both in their JSON encoding.
    pub fn digest(config: &MineConfig, events: &EventLog) -> String {
        let mut hasher = blake3::Hasher::new();
        serde_json::to_writer(&mut hasher, &(config, events))
            .expect("session state is always JSON-serializable");
        hasher.finalize().to_hex().to_string()
    }

    pub fn to_json(&self) -> Result<String, anyhow::Error> {
        serde_json::to_string(self).context("failed to encode session record")
    }

    pub fn from_json(json: &str) -> Result<Self, anyhow::Error> {
        serde_json::from_str(json).context("failed to decode session record")
    }
}

// ---------------------------------------------------------------------------
// ReplayResult
// ---------------------------------------------------------------------------

/// The outcome of replaying a [`SessionRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayResult {
    /// Whether every recorded event was admitted by the rules.
    pub completed: bool,
    /// Number of events re-applied before stopping.
    pub events_replayed: usize,
    /// The first event the rules refused. `None` if all were admitted.
    pub first_violation: Option<ReplayViolation>,
    /// Whether the replayed log hashes to the recorded digest. Only
    /// meaningful when `completed` is true.
    pub hash_matches: bool,
}

/// A recorded event that the rules refused during replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayViolation {
    /// Zero-based position of the event in the record.
    pub index: usize,
    pub event: Event,
    pub error: RuleError,
}

// ---------------------------------------------------------------------------
// replay()
// ---------------------------------------------------------------------------

/// Rebuild `game` from `record`, re-checking every event against the rules.
///
/// The record is validated before `game` is touched; on error `game` is left
/// unmodified. Once validation passes, `game` is reset to an empty session
/// with the record's configuration and each event is re-applied in order:
/// chambers are added, placements and removals go through the services.
/// Replay stops at the first refused event, leaving `game` holding the
/// admitted prefix.
///
/// # Errors
///
/// Returns an error if the recorded digest is not a 64-character lowercase
/// hex string.
pub fn replay(game: &mut MagnumSal, record: &SessionRecord) -> Result<ReplayResult, anyhow::Error> {
    if !is_hex_digest(&record.state_hash) {
        return Err(anyhow!(
            "session record has a malformed state hash {:?}: expected 64 lowercase hex chars",
            record.state_hash
        ));
    }

    *game = MagnumSal::with_config(record.config.clone());

    for (index, &event) in record.events.iter().enumerate() {
        let applied = match event {
            Event::ChamberAdded { x, y } => {
                game.add_chamber(x, y);
                Ok(event)
            }
            Event::MinerPlaced { x, y } => game.place_miner(x, y),
            Event::MinerRemoved { x, y } => game.remove_miner(x, y),
        };

        if let Err(error) = applied {
            warn!(index, %event, %error, "replay diverged: recorded event refused by rules");
            return Ok(ReplayResult {
                completed: false,
                events_replayed: index,
                first_violation: Some(ReplayViolation {
                    index,
                    event,
                    error,
                }),
                hash_matches: false,
            });
        }
    }

    let actual_hash = game.state_hash();
    let hash_matches = actual_hash == record.state_hash;
    if hash_matches {
        debug!(events = record.events.len(), "replay completed");
    } else {
        warn!(
            expected = %record.state_hash,
            actual = %actual_hash,
            "replay completed but state hash differs from record"
        );
    }

    Ok(ReplayResult {
        completed: true,
        events_replayed: record.events.len(),
        first_violation: None,
        hash_matches,
    })
}

fn is_hex_digest(hash: &str) -> bool {
    hash.len() == 64 && hash.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

//! Session configuration.
//!
//! ```
//! use magnum_sal::config::MineConfig;
//! use magnum_sal::magnum_events::coord::Coordinate;
//!
//! let config = MineConfig::from_json_str(r#"{ "entrance": { "x": 2, "y": -1 } }"#).unwrap();
//! assert_eq!(config.entrance, Coordinate::new(2, -1));
//!
//! // Missing fields fall back to the defaults.
//! assert_eq!(MineConfig::from_json_str("{}").unwrap(), MineConfig::default());
//! ```

use magnum_events::coord::Coordinate;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Rules parameters for one mine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MineConfig {
    /// The mine entrance. A miner may be placed here without a neighbor, and
    /// it counts as the inside of a chain when it has a single live neighbor.
    pub entrance: Coordinate,
}

impl Default for MineConfig {
    /// Defaults to an entrance at `(0, 0)`.
    fn default() -> Self {
        Self {
            entrance: Coordinate::ORIGIN,
        }
    }
}

impl MineConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Whether `at` is the entrance of this mine.
    #[inline]
    pub fn is_entrance(&self, at: Coordinate) -> bool {
        at == self.entrance
    }
}

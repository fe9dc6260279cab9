//! Grid coordinates for mine chambers.
//!
//! The mine grows on an unbounded 2-D integer grid. A [`Coordinate`] is a
//! plain `(x, y)` pair with no bounds checking; any `i64` pair is valid.
//! Adjacency is orthogonal only (Manhattan distance exactly 1).

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Coordinate
// ---------------------------------------------------------------------------

/// A cell on the mine grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i64,
    pub y: i64,
}

impl Coordinate {
    /// The mine entrance, `(0, 0)`.
    pub const ORIGIN: Coordinate = Coordinate { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to `other`, or `None` if it does not fit in a `u64`.
    #[inline]
    pub fn manhattan(self, other: Coordinate) -> Option<u64> {
        self.x.abs_diff(other.x).checked_add(self.y.abs_diff(other.y))
    }

    /// Returns `true` if `other` is one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Coordinate) -> bool {
        self.manhattan(other) == Some(1)
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

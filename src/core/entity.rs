//! Card identification.
//!
//! Every physical card in a match has a unique `CardId`. Ids are handed out
//! by an `IdAllocator` owned by the match, so uniqueness is guaranteed for
//! the lifetime of that match and has nothing to do with shuffling.
//!
//! ## Usage
//!
//! ```
//! use bioma::core::IdAllocator;
//!
//! let mut ids = IdAllocator::new();
//! let a = ids.next_id();
//! let b = ids.next_id();
//!
//! assert_ne!(a, b);
//! assert_eq!(ids.issued(), 2);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a card ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Monotonic card ID generator. Never reuses an ID.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Create an allocator starting at `CardId(0)`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next ID.
    pub fn next_id(&mut self) -> CardId {
        let id = CardId(self.next);
        self.next += 1;
        id
    }

    /// Number of IDs issued so far.
    #[must_use]
    pub fn issued(&self) -> u32 {
        self.next
    }
}

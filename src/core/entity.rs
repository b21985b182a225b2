//! Live card identification.
//!
//! Every card on the board has a unique `CardId`, allocated by the board
//! when the card is registered.
//!
//! ## ID Layout
//!
//! - `0`: Reserved as the "unassigned" sentinel. Cards that exist only
//!   inside a reward dispenser's queue carry this id until they are popped.
//! - `1..`: Allocated monotonically by the board, never reused.
//!
//! ## Usage
//!
//! ```
//! use stackcraft::core::CardId;
//!
//! let card = CardId(7);
//! assert!(card.is_assigned());
//! assert!(!CardId::UNASSIGNED.is_assigned());
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a live card.
///
/// Neighbor links store these ids rather than references; a stale id simply
/// resolves to "not found" on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// The sentinel for cards not yet registered on a board.
    pub const UNASSIGNED: CardId = CardId(0);

    /// The first id a fresh board hands out.
    pub const FIRST: CardId = CardId(1);

    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check whether this id was handed out by a board.
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        self.0 != 0
    }

    /// The id following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
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

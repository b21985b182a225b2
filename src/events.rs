//! Notifications for the presentation layer.
//!
//! The board and the day cycle append [`GameEvent`]s to an outbox as state
//! changes. Hosts drain the outbox after each tick or action and update
//! their views; the engine itself never reads it back.

use serde::{Deserialize, Serialize};

use crate::core::{CardId, Vec3};

/// Something the presentation layer may want to react to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A card type appeared on the board for the first time this session.
    CardObtained { card_type: String },

    /// A card was registered on the board.
    CardSpawned { id: CardId, card_type: String },

    /// A card left the board.
    CardRemoved { id: CardId },

    /// A card's visible state changed (uses, upgrade, hunger).
    Refresh { id: CardId },

    /// A creature died at `position`.
    CreatureDied { id: CardId, position: Vec3 },

    /// Day `day` ended and food was distributed.
    DayCompleted { day: u32 },

    /// No creature is left alive.
    GameOver,
}

impl GameEvent {
    /// The card this event concerns, if any.
    #[must_use]
    pub fn card(&self) -> Option<CardId> {
        match self {
            Self::CardSpawned { id, .. }
            | Self::CardRemoved { id }
            | Self::Refresh { id }
            | Self::CreatureDied { id, .. } => Some(*id),
            Self::CardObtained { .. } | Self::DayCompleted { .. } | Self::GameOver => None,
        }
    }
}

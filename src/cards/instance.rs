//! Card instances - runtime card state.
//!
//! A `Card` is one live card on the board. It caches the identity fields of
//! its current definition (type, category, value) and tracks mutable state:
//! neighbor links, the crafting timer, the combination use count, and the
//! behavioral payload.
//!
//! ## Links
//!
//! `bottom` and `top` point at the card directly below and above. Links are
//! always mirrored: if `a.top == Some(b)` then `b.bottom == Some(a)`. Only
//! the board edits links; it re-establishes the mirror in the same call.

use super::category::CardCategory;
use super::definition::{CardDefinition, DefinitionId};
use crate::behaviors::{Behavior, CreatureState, DispenserState, ProducerState};
use crate::core::{CardId, Vec3};

/// A card on the board.
#[derive(Clone, Debug)]
pub struct Card {
    /// Board-assigned id. [`CardId::UNASSIGNED`] until registered.
    pub id: CardId,

    /// Current definition. Changes on upgrade.
    definition: DefinitionId,

    pub card_type: String,
    pub category: CardCategory,
    pub value: i32,

    /// Card directly on top of this one.
    pub top: Option<CardId>,
    /// Card directly under this one.
    pub bottom: Option<CardId>,

    /// Completed combinations this card took part in.
    pub combination_uses: u32,

    pub position: Vec3,

    /// Seconds accumulated toward the matched recipe.
    pub process_time: f32,
    /// Matched recipe duration; 0 when nothing matches.
    pub target_process_time: f32,

    pub behavior: Behavior,
}

impl Card {
    /// Create an unregistered card.
    #[must_use]
    pub fn new(definition: DefinitionId, data: &CardDefinition, behavior: Behavior) -> Self {
        Self {
            id: CardId::UNASSIGNED,
            definition,
            card_type: data.card_type.clone(),
            category: data.category,
            value: data.value,
            top: None,
            bottom: None,
            combination_uses: 0,
            position: Vec3::ZERO,
            process_time: 0.0,
            target_process_time: 0.0,
            behavior,
        }
    }

    /// Current definition ID.
    #[must_use]
    pub fn definition(&self) -> DefinitionId {
        self.definition
    }

    /// Swap in an upgrade definition.
    ///
    /// Identity fields follow the new definition. Links, position, the use
    /// count and the behavior payload are kept.
    pub fn apply_definition(&mut self, definition: DefinitionId, data: &CardDefinition) {
        self.definition = definition;
        self.card_type = data.card_type.clone();
        self.category = data.category;
        self.value = data.value;
    }

    /// Clear the crafting timer.
    pub fn reset_process(&mut self) {
        self.process_time = 0.0;
        self.target_process_time = 0.0;
    }

    /// Crafting progress in `[0, 1]`.
    #[must_use]
    pub fn process_progress(&self) -> f32 {
        if self.target_process_time > 0.0 {
            (self.process_time / self.target_process_time).min(1.0)
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn is_crafting(&self) -> bool {
        self.target_process_time > 0.0
    }

    /// Check if the card is stacked with anything.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.top.is_some() || self.bottom.is_some()
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        matches!(self.behavior, Behavior::Creature(_))
    }

    #[must_use]
    pub fn creature(&self) -> Option<&CreatureState> {
        match &self.behavior {
            Behavior::Creature(state) => Some(state),
            _ => None,
        }
    }

    pub fn creature_mut(&mut self) -> Option<&mut CreatureState> {
        match &mut self.behavior {
            Behavior::Creature(state) => Some(state),
            _ => None,
        }
    }

    #[must_use]
    pub fn producer(&self) -> Option<&ProducerState> {
        match &self.behavior {
            Behavior::Producer(state) => Some(state),
            _ => None,
        }
    }

    pub fn producer_mut(&mut self) -> Option<&mut ProducerState> {
        match &mut self.behavior {
            Behavior::Producer(state) => Some(state),
            _ => None,
        }
    }

    #[must_use]
    pub fn dispenser(&self) -> Option<&DispenserState> {
        match &self.behavior {
            Behavior::Dispenser(state) => Some(state),
            _ => None,
        }
    }

    pub fn dispenser_mut(&mut self) -> Option<&mut DispenserState> {
        match &mut self.behavior {
            Behavior::Dispenser(state) => Some(state),
            _ => None,
        }
    }

    /// Check if the card should leave the board on the next cleanup.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.behavior.is_done()
    }
}

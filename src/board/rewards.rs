//! Popping reward dispensers.

use tracing::debug;

use super::Board;
use crate::cards::Catalog;
use crate::core::CardId;
use crate::error::{EngineError, Result};

impl Board {
    /// Pop the next reward of dispenser `id` onto the board.
    ///
    /// The reward lands at a random point on a circle around the
    /// dispenser. A dispenser emptied by this call is removed.
    pub fn pop_reward(&mut self, catalog: &Catalog, id: CardId) -> Result<CardId> {
        let card = self.get_mut(id).ok_or(EngineError::CardNotFound(id))?;
        let origin = card.position;
        let state = card.dispenser_mut().ok_or(EngineError::NotADispenser(id))?;
        let reward = state.pop().ok_or(EngineError::DispenserEmpty(id))?;
        let remaining = state.remaining();

        let radius = self.config.reward_pop_radius;
        let (dx, dz) = self.rng.ring_offset(radius, radius);
        let spawned = self.insert(catalog, reward, origin.planar_offset(dx, dz));
        debug!(dispenser = %id, reward = %spawned, remaining, "reward popped");
        Ok(spawned)
    }
}

//! Producer ticking: timed output while a creature works the producer.

use tracing::{debug, warn};

use super::Board;
use crate::cards::Catalog;
use crate::core::CardId;

impl Board {
    pub(crate) fn tick_producer(&mut self, catalog: &Catalog, id: CardId, dt: f32) {
        let staffed = self.chain_has_creature(id);
        let Some(card) = self.get_mut(id) else {
            return;
        };
        let origin = card.position;
        let Some(state) = card.producer_mut() else {
            return;
        };
        if !state.advance(staffed, dt) {
            return;
        }

        let drawn = match self.cards.get(&id).and_then(|card| card.producer()) {
            Some(state) => state.draw(&mut self.rng),
            None => None,
        };
        let Some(output) = drawn else {
            warn!(producer = %id, "producer has no outputs");
            return;
        };

        let (dx, dz) = self
            .rng
            .ring_offset(self.config.mine_ring_min, self.config.mine_ring_max);
        match self.spawn(catalog, output, origin.planar_offset(dx, dz)) {
            Ok(spawned) => debug!(producer = %id, output = %spawned, "produced"),
            Err(err) => warn!(producer = %id, error = %err, "failed to spawn output"),
        }
    }
}

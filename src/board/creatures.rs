//! Driving creature state machines and applying their side effects.

use tracing::{debug, info, warn};

use super::Board;
use crate::cards::Catalog;
use crate::core::CardId;
use crate::error::{EngineError, Result};
use crate::events::GameEvent;

impl Board {
    /// Start `creature` eating `food` and pause crafting on their chain.
    pub(crate) fn start_eating(&mut self, creature: CardId, food: CardId) {
        let Some(state) = self.get_mut(creature).and_then(|card| card.creature_mut()) else {
            return;
        };
        state.start_eating(food);
        debug!(creature = %creature, food = %food, "eating");

        let root = self.root(creature);
        for cid in self.chain(root) {
            if let Some(card) = self.get_mut(cid) {
                card.reset_process();
            }
        }
        self.refresh(creature);
    }

    pub(crate) fn tick_creature(&mut self, catalog: &Catalog, id: CardId, dt: f32) {
        // Abort a meal whose food left the board or the creature's side
        let target = self.get(id).and_then(|card| card.creature()).and_then(|c| c.eating_target());
        if let Some(food) = target {
            if !self.are_adjacent(id, food) {
                if let Some(state) = self.get_mut(id).and_then(|card| card.creature_mut()) {
                    state.abort_eating();
                }
                debug!(creature = %id, food = %food, "meal interrupted");
                self.check_combination(catalog, id);
            }
        }

        let Some(step) = self
            .get_mut(id)
            .and_then(|card| card.creature_mut())
            .map(|state| state.advance(dt))
        else {
            return;
        };

        if step.died {
            if let Err(err) = self.kill_creature(catalog, id) {
                warn!(creature = %id, error = %err, "failed to remove dead creature");
            }
            return;
        }

        if step.became_hungry {
            debug!(creature = %id, "hungry");
            self.shed_non_food_neighbors(catalog, id);
            self.refresh(id);
        }

        if let Some(food) = step.meal_ready {
            self.finish_meal(catalog, id, food);
        }

        let eating = self
            .get(id)
            .and_then(|card| card.creature())
            .map_or(false, |c| c.eating_target().is_some());
        if !eating {
            self.tick_crafting(catalog, id, dt);
        }
    }

    fn shed_non_food_neighbors(&mut self, catalog: &Catalog, id: CardId) {
        let Some(card) = self.get(id) else {
            return;
        };
        let (below, above) = (card.bottom, card.top);
        let is_food = |board: &Board, cid: CardId| board.get(cid).map_or(false, |c| c.category.is_food());

        if let Some(above) = above.filter(|cid| !is_food(self, *cid)) {
            self.detach(catalog, id, above);
        }
        if let Some(below) = below.filter(|cid| !is_food(self, *cid)) {
            self.detach(catalog, below, id);
        }
    }

    fn finish_meal(&mut self, catalog: &Catalog, creature: CardId, food: CardId) {
        if let Some(state) = self.get_mut(creature).and_then(|card| card.creature_mut()) {
            state.finish_meal();
        }

        match self.consume(catalog, food) {
            Ok(true) => {}
            Ok(false) => {
                // The food survives: separate it from the creature
                if !self.detach(catalog, creature, food) {
                    self.detach(catalog, food, creature);
                }
            }
            Err(err) => warn!(creature = %creature, error = %err, "meal food already gone"),
        }

        self.check_combination(catalog, creature);
        self.refresh(creature);
        debug!(creature = %creature, food = %food, "meal finished");
    }

    /// Kill a creature: split it out of its chain, drop its remains and
    /// remove it.
    pub fn kill_creature(&mut self, catalog: &Catalog, id: CardId) -> Result<()> {
        let card = self.get_mut(id).ok_or(EngineError::CardNotFound(id))?;
        let (below, above, position) = (card.bottom, card.top, card.position);
        let state = card.creature_mut().ok_or(EngineError::NotACreature(id))?;
        state.kill();
        let drop = state.death_drop();

        if let Some(above) = above {
            self.detach(catalog, id, above);
        }
        if let Some(below) = below {
            self.detach(catalog, below, id);
        }

        if let Some(drop) = drop {
            if let Err(err) = self.spawn(catalog, drop, position) {
                warn!(creature = %id, error = %err, "failed to spawn death drop");
            }
        }

        info!(creature = %id, "creature died");
        self.push_event(GameEvent::CreatureDied { id, position });
        self.remove(catalog, id)
    }
}

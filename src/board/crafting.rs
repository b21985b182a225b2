//! Crafting: matching chains, running timers, and the per-card lifecycle
//! after a combination completes.
//!
//! Only a chain's root carries a non-zero `target_process_time`. Every
//! other card keeps its timer at zero and defers to the root.

use tracing::{debug, warn};

use super::Board;
use crate::behaviors::Behavior;
use crate::cards::{Catalog, DefinitionId, StackItem};
use crate::core::{CardId, Vec3};
use crate::error::{EngineError, Result};

impl Board {
    /// Matcher input for `id`'s whole chain, root first.
    #[must_use]
    pub fn stack_items(&self, id: CardId) -> Vec<StackItem> {
        self.chain(id)
            .iter()
            .filter_map(|cid| self.get(*cid))
            .map(|card| StackItem::card(card.card_type.clone(), card.category))
            .collect()
    }

    /// Re-match `id`'s chain and set the root's crafting target.
    ///
    /// Non-root cards are cleared. A chain with an eating creature crafts
    /// nothing until the meal ends.
    pub fn check_combination(&mut self, catalog: &Catalog, id: CardId) {
        if !self.contains(id) {
            return;
        }
        let chain = self.chain(id);
        let Some((&root, rest)) = chain.split_first() else {
            return;
        };

        for cid in rest {
            if let Some(card) = self.get_mut(*cid) {
                card.reset_process();
            }
        }

        let eating = chain.iter().any(|cid| {
            self.get(*cid)
                .and_then(|card| card.creature())
                .map_or(false, |creature| creature.eating_target().is_some())
        });
        let target = if eating {
            0.0
        } else {
            let items = self.stack_items(root);
            catalog.first_match(&items).map_or(0.0, |m| m.recipe.duration)
        };

        if let Some(card) = self.get_mut(root) {
            card.target_process_time = target;
            if target <= 0.0 {
                card.process_time = 0.0;
            }
        }
    }

    /// Advance `id`'s crafting timer; completes the combination when the
    /// target is exceeded.
    pub(crate) fn tick_crafting(&mut self, catalog: &Catalog, id: CardId, dt: f32) {
        let Some(card) = self.get_mut(id) else {
            return;
        };

        if card.target_process_time <= 0.0 {
            card.process_time = 0.0;
            return;
        }

        card.process_time += dt;
        if card.process_time > card.target_process_time {
            card.reset_process();
            self.complete(catalog, id);
        }
    }

    /// Resolve and spawn the result of `id`'s chain, then run every
    /// participant's combination lifecycle.
    pub fn complete(&mut self, catalog: &Catalog, id: CardId) {
        let root = self.root(id);
        let chain = self.chain(root);
        let items = self.stack_items(root);

        let result = catalog.resolve_result(&items, &mut self.rng).map(|m| m.result_id);
        let Some(result) = result else {
            warn!(card = %root, "completed stack no longer matches any recipe");
            self.check_combination(catalog, root);
            return;
        };

        let origin = self.get(root).map(|card| card.position).unwrap_or_default();
        let (dx, dz) = self.rng.square_offset(self.config.craft_scatter);
        match self.spawn(catalog, result, origin.planar_offset(dx, dz)) {
            Ok(spawned) => debug!(root = %root, result = %spawned, "combination complete"),
            Err(err) => warn!(root = %root, error = %err, "failed to spawn combination result"),
        }

        for cid in chain {
            if self.contains(cid) {
                self.combined_complete(catalog, cid);
            }
        }
    }

    /// Per-card lifecycle after taking part in a completed combination.
    ///
    /// Creatures always survive. Other cards count a use, upgrade if their
    /// definition says so, and are destroyed once used up. Energy cards
    /// additionally leave their pollution behind.
    pub(crate) fn combined_complete(&mut self, catalog: &Catalog, id: CardId) {
        let Some(card) = self.get_mut(id) else {
            return;
        };

        if card.is_creature() {
            card.reset_process();
            self.check_combination(catalog, id);
            self.refresh(id);
            return;
        }

        let position = card.position;
        let pollution = match &card.behavior {
            Behavior::Energy(state) => state.pollution,
            _ => None,
        };

        card.combination_uses += 1;
        if let Some(next) = catalog
            .get(card.definition())
            .and_then(|def| def.upgrade_target.as_deref())
            .and_then(|target| catalog.id_of(target))
        {
            if let Some(data) = catalog.get(next) {
                debug!(card = %id, from = %card.card_type, to = %data.card_type, "upgraded");
                card.apply_definition(next, data);
            }
        }

        let data = catalog.get(card.definition());
        let used_up = data.map_or(true, |def| def.is_used_up(card.combination_uses));
        let removal = data
            .and_then(|def| def.removal_card.as_deref())
            .and_then(|target| catalog.id_of(target));

        if used_up {
            if let Err(err) = self.remove(catalog, id) {
                warn!(card = %id, error = %err, "failed to remove used-up card");
            }
            if let Some(removal) = removal {
                self.spawn_logged(catalog, removal, position);
            }
        } else {
            card.reset_process();
            self.check_combination(catalog, id);
            self.refresh(id);
        }

        if let Some(pollution) = pollution {
            self.spawn_logged(catalog, pollution, position);
        }
    }

    /// Count a consumption of `id` outside crafting (eating, day rollover).
    ///
    /// Returns `true` if the card was used up and removed.
    pub fn consume(&mut self, catalog: &Catalog, id: CardId) -> Result<bool> {
        let card = self.get_mut(id).ok_or(EngineError::CardNotFound(id))?;
        card.combination_uses += 1;
        let used_up = catalog
            .get(card.definition())
            .map_or(true, |def| def.is_used_up(card.combination_uses));

        if used_up {
            self.remove(catalog, id)?;
        } else {
            self.refresh(id);
        }
        Ok(used_up)
    }

    fn spawn_logged(&mut self, catalog: &Catalog, definition: DefinitionId, position: Vec3) {
        if let Err(err) = self.spawn(catalog, definition, position) {
            warn!(definition = %definition, error = %err, "spawn failed");
        }
    }
}

//! The live board: every card currently in play.
//!
//! `Board` owns the card arena, id allocation, the RNG and the event
//! outbox. All mutation goes through it so that neighbor links stay
//! mirrored and the presentation layer hears about every change.
//!
//! ## Submodules
//!
//! - `chain`: stacking, unstacking and chain traversal
//! - `crafting`: recipe matching, crafting timers and per-card lifecycle
//! - `creatures`: hunger, eating and death
//! - `producers`: timed output of staffed producers
//! - `rewards`: popping dispensers
//!
//! ## Arena
//!
//! Cards live in an `im::OrdMap` keyed by id. Ids are handed out in
//! increasing order and never reused, so map order is creation order and a
//! board clone is O(1).

mod chain;
mod crafting;
mod creatures;
mod producers;
mod rewards;

pub use chain::Chain;

use im::OrdMap;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::cards::{factory, Card, CardCategory, Catalog, DefinitionId};
use crate::core::{CardId, EngineConfig, GameRng, Vec3};
use crate::error::{EngineError, Result};
use crate::events::GameEvent;

/// Aggregate counts for the HUD.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoardStats {
    pub cards: usize,
    pub creatures: usize,
    pub food: usize,
    /// Food needed at the next day rollover.
    pub required_food: usize,
    pub pollution: usize,
}

/// The set of live cards.
#[derive(Clone, Debug)]
pub struct Board {
    cards: OrdMap<CardId, Card>,
    next_id: CardId,
    obtained: FxHashSet<String>,
    events: Vec<GameEvent>,
    rng: GameRng,
    config: EngineConfig,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            cards: OrdMap::new(),
            next_id: CardId::FIRST,
            obtained: FxHashSet::default(),
            events: Vec::new(),
            rng: GameRng::new(config.seed),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    // === Queries ===

    /// Get the number of live cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get a live card by id.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(&id)
    }

    /// Iterate over live cards in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Ids of all live cards in creation order.
    #[must_use]
    pub fn ids(&self) -> Vec<CardId> {
        self.cards.keys().copied().collect()
    }

    /// Live cards of one type.
    pub fn find_by_type<'a>(&'a self, card_type: &'a str) -> impl Iterator<Item = &'a Card> + 'a {
        self.iter().filter(move |card| card.card_type == card_type)
    }

    /// Check if a type has ever been on this board.
    #[must_use]
    pub fn has_obtained(&self, card_type: &str) -> bool {
        self.obtained.contains(card_type)
    }

    #[must_use]
    pub fn stats(&self, food_per_creature: u32) -> BoardStats {
        let mut stats = BoardStats {
            cards: self.cards.len(),
            ..BoardStats::default()
        };
        for card in self.iter() {
            if card.is_creature() {
                stats.creatures += 1;
            }
            match card.category {
                CardCategory::Food => stats.food += 1,
                CardCategory::Pollution => stats.pollution += 1,
                _ => {}
            }
        }
        stats.required_food = stats.creatures * food_per_creature as usize;
        stats
    }

    // === Events ===

    /// Pending notifications, oldest first.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending notifications.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn refresh(&mut self, id: CardId) {
        self.events.push(GameEvent::Refresh { id });
    }

    // === Spawning and removal ===

    /// Create a card of `definition` at `position`.
    pub fn spawn(&mut self, catalog: &Catalog, definition: DefinitionId, position: Vec3) -> Result<CardId> {
        let card = factory::build(catalog, definition, &mut self.rng)
            .ok_or_else(|| EngineError::UnknownType(definition.to_string()))?;
        Ok(self.insert(catalog, card, position))
    }

    /// Create a card by type name at `position`.
    pub fn spawn_type(&mut self, catalog: &Catalog, card_type: &str, position: Vec3) -> Result<CardId> {
        let definition = catalog
            .id_of(card_type)
            .ok_or_else(|| EngineError::UnknownType(card_type.to_string()))?;
        self.spawn(catalog, definition, position)
    }

    /// Register a detached card, assigning it a fresh id.
    pub fn insert(&mut self, catalog: &Catalog, mut card: Card, position: Vec3) -> CardId {
        let id = self.next_id;
        self.next_id = id.next();

        card.id = id;
        card.position = position;
        card.top = None;
        card.bottom = None;

        debug!(card = %id, card_type = %card.card_type, behavior = card.behavior.name(), "spawned");

        if self.obtained.insert(card.card_type.clone()) {
            self.events.push(GameEvent::CardObtained {
                card_type: card.card_type.clone(),
            });
        }
        self.events.push(GameEvent::CardSpawned {
            id,
            card_type: card.card_type.clone(),
        });
        self.cards.insert(id, card);

        self.cleanup(catalog);
        id
    }

    /// Remove a card, closing the gap it leaves in its chain.
    pub fn remove(&mut self, catalog: &Catalog, id: CardId) -> Result<()> {
        self.remove_card(catalog, id)?;
        self.cleanup(catalog);
        Ok(())
    }

    fn remove_card(&mut self, catalog: &Catalog, id: CardId) -> Result<()> {
        if !self.contains(id) {
            return Err(EngineError::CardNotFound(id));
        }

        let (below, above) = self.unlink_and_bridge(id);
        if let Some(card) = self.cards.remove(&id) {
            debug!(card = %id, card_type = %card.card_type, "removed");
        }
        self.events.push(GameEvent::CardRemoved { id });

        if let Some(survivor) = below.or(above) {
            self.check_combination(catalog, survivor);
        }
        Ok(())
    }

    /// Remove every card that reports itself done.
    fn cleanup(&mut self, catalog: &Catalog) {
        loop {
            let done: Vec<CardId> = self
                .cards
                .iter()
                .filter(|(_, card)| card.is_done())
                .map(|(id, _)| *id)
                .collect();
            if done.is_empty() {
                break;
            }
            for id in done {
                trace!(card = %id, "cleanup");
                if let Err(err) = self.remove_card(catalog, id) {
                    trace!(card = %id, error = %err, "cleanup skipped");
                }
            }
        }
    }

    /// Move a card. Positions are presentation data; links are unaffected.
    pub fn set_position(&mut self, id: CardId, position: Vec3) -> Result<()> {
        let card = self.get_mut(id).ok_or(EngineError::CardNotFound(id))?;
        card.position = position;
        Ok(())
    }

    // === Simulation ===

    /// Advance every live card by `dt` seconds.
    ///
    /// Cards are visited in creation order over a snapshot of the ids taken
    /// before the pass. A card removed earlier in the pass is skipped; a
    /// card spawned during the pass is first ticked on the next call.
    pub fn tick(&mut self, catalog: &Catalog, dt: f32) {
        let snapshot = self.ids();
        for id in snapshot {
            self.tick_card(catalog, id, dt);
        }
    }

    fn tick_card(&mut self, catalog: &Catalog, id: CardId, dt: f32) {
        let Some(card) = self.cards.get(&id) else {
            return;
        };
        let (is_creature, is_producer) = (card.is_creature(), card.producer().is_some());

        if is_creature {
            self.tick_creature(catalog, id, dt);
        } else if is_producer {
            self.tick_crafting(catalog, id, dt);
            if self.contains(id) {
                self.tick_producer(catalog, id, dt);
            }
        } else {
            self.tick_crafting(catalog, id, dt);
        }
    }
}

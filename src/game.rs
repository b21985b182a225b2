//! Game facade: catalog, board and day cycle behind one handle.
//!
//! ## Example
//!
//! ```
//! use stackcraft::cards::{CardCategory, CardDefinition, Catalog, Recipe};
//! use stackcraft::core::{EngineConfig, Vec3};
//! use stackcraft::game::{Game, InitialCard};
//!
//! let catalog = Catalog::new(vec![
//!     CardDefinition::new("Wood", CardCategory::RawMaterial),
//!     CardDefinition::new("Plank", CardCategory::CraftedMaterial)
//!         .with_recipe(Recipe::new(2.0).with_part("Wood", 2)),
//! ])
//! .unwrap();
//!
//! let mut game = Game::new(catalog, EngineConfig::default());
//! let ids = game
//!     .spawn_layout(&[
//!         InitialCard::new("Wood", Vec3::ZERO),
//!         InitialCard::new("Wood", Vec3::ZERO),
//!     ])
//!     .unwrap();
//! assert!(game.attach(ids[0], ids[1]));
//!
//! for _ in 0..25 {
//!     game.tick(0.1);
//! }
//! assert_eq!(game.board().find_by_type("Plank").count(), 1);
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::{Board, BoardStats};
use crate::cards::{Card, Catalog};
use crate::core::{CardId, EngineConfig, Vec3};
use crate::day::DayCycle;
use crate::error::Result;
use crate::events::GameEvent;
use crate::market::{Purchase, Sale, SellZone, ShopZone};

/// A card placed on the board at start-up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InitialCard {
    pub card_type: String,
    pub position: Vec3,
}

impl InitialCard {
    pub fn new(card_type: impl Into<String>, position: Vec3) -> Self {
        Self {
            card_type: card_type.into(),
            position,
        }
    }
}

/// A running game.
#[derive(Clone, Debug)]
pub struct Game {
    catalog: Catalog,
    board: Board,
    day: DayCycle,
}

impl Game {
    #[must_use]
    pub fn new(catalog: Catalog, config: EngineConfig) -> Self {
        info!(definitions = catalog.len(), seed = config.seed, "new game");
        let day = DayCycle::new(config.day.clone());
        Self {
            catalog,
            board: Board::new(config),
            day,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn day(&self) -> &DayCycle {
        &self.day
    }

    pub fn day_mut(&mut self) -> &mut DayCycle {
        &mut self.day
    }

    // === Set-up ===

    /// Spawn every card of a start-up layout, in order.
    pub fn spawn_layout(&mut self, layout: &[InitialCard]) -> Result<Vec<CardId>> {
        layout
            .iter()
            .map(|card| self.spawn(&card.card_type, card.position))
            .collect()
    }

    /// Spawn one card of every dispenser definition at the origin.
    pub fn spawn_dispensers(&mut self) -> Result<Vec<CardId>> {
        let definitions: Vec<_> = self.catalog.dispensers().map(|(id, _)| id).collect();
        definitions
            .into_iter()
            .map(|definition| self.board.spawn(&self.catalog, definition, Vec3::ZERO))
            .collect()
    }

    // === Board operations ===

    pub fn spawn(&mut self, card_type: &str, position: Vec3) -> Result<CardId> {
        self.board.spawn_type(&self.catalog, card_type, position)
    }

    pub fn remove(&mut self, id: CardId) -> Result<()> {
        self.board.remove(&self.catalog, id)
    }

    pub fn attach(&mut self, bottom: CardId, top: CardId) -> bool {
        self.board.attach(&self.catalog, bottom, top)
    }

    pub fn detach(&mut self, bottom: CardId, top: CardId) -> bool {
        self.board.detach(&self.catalog, bottom, top)
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.board.get(id)
    }

    pub fn top_types(&self, id: CardId) -> Result<Vec<String>> {
        self.board.top_types(id)
    }

    pub fn set_position(&mut self, id: CardId, position: Vec3) -> Result<()> {
        self.board.set_position(id, position)
    }

    pub fn pop_reward(&mut self, id: CardId) -> Result<CardId> {
        self.board.pop_reward(&self.catalog, id)
    }

    pub fn sell(&mut self, zone: &SellZone, id: CardId) -> Result<Option<Sale>> {
        zone.sell(&mut self.board, &self.catalog, id)
    }

    pub fn purchase(&mut self, zone: &mut ShopZone, id: CardId) -> Result<Option<Purchase>> {
        zone.purchase(&mut self.board, &self.catalog, id)
    }

    #[must_use]
    pub fn stats(&self) -> BoardStats {
        self.board.stats(self.day.config().food_per_creature)
    }

    // === Frame ===

    /// Advance one frame: every card, then the day clock.
    pub fn tick(&mut self, dt: f32) {
        self.board.tick(&self.catalog, dt);
        self.day.tick(&mut self.board, &self.catalog, dt);
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.day.is_game_over()
    }

    /// Take all pending notifications.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.board.drain_events()
    }
}

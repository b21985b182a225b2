//! # stackcraft
//!
//! A card-stacking crafting economy engine.
//!
//! Cards are stacked into vertical chains. Chains are matched against a
//! recipe catalog, and matched chains turn into new cards after a contact
//! duration. Creatures must be fed, producers work while staffed by a
//! creature, and dispensers hand out pre-rolled rewards.
//!
//! ## Design Principles
//!
//! 1. **Data-Driven**: Card types, recipes and variant parameters are
//!    definitions loaded once into an immutable [`cards::Catalog`].
//!
//! 2. **Arena, Not Pointers**: Live cards sit in an id-keyed persistent
//!    map; neighbor links are plain ids resolved on demand.
//!
//! 3. **Explicit Context**: Operations take the catalog as a parameter;
//!    there is no global state. Notifications go to an event outbox the
//!    host drains.
//!
//! 4. **Deterministic**: All randomness flows from one seeded RNG.
//!
//! ## Modules
//!
//! - `core`: Card ids, positions, RNG, configuration
//! - `cards`: Definitions, the catalog and matcher, card instances, factory
//! - `behaviors`: Creature, producer, dispenser and energy state
//! - `board`: Live registry, stacking, crafting, per-tick update
//! - `day`: Day clock and food distribution
//! - `market`: Sell and shop zones
//! - `events`: Outbox notifications
//! - `game`: Facade bundling the above

pub mod behaviors;
pub mod board;
pub mod cards;
pub mod core;
pub mod day;
pub mod error;
pub mod events;
pub mod game;
pub mod market;

// Re-export commonly used types
pub use crate::board::{Board, BoardStats, Chain};
pub use crate::cards::{Card, CardCategory, CardDefinition, CardKind, Catalog, DefinitionId, Recipe};
pub use crate::core::{CardId, DayConfig, EngineConfig, GameRng, Vec3};
pub use crate::day::DayCycle;
pub use crate::error::{CatalogError, EngineError, Result};
pub use crate::events::GameEvent;
pub use crate::game::{Game, InitialCard};
pub use crate::market::{SellZone, ShopZone};

//! Card system: categories, definitions, the catalog, and live instances.
//!
//! ## Key Types
//!
//! - `CardCategory`: Broad grouping used by wildcards and feeding rules
//! - `CardDefinition`: Static card data, recipes and variant parameters
//! - `Catalog`: Validated definition table and recipe matcher
//! - `Card`: Runtime card state (links, timers, behavior payload)
//!
//! Definitions are loaded once and never change; cards are created by the
//! [`factory`] and owned by the [`Board`](crate::board::Board).

pub mod catalog;
pub mod category;
pub mod definition;
pub mod factory;
pub mod instance;

pub use catalog::{Catalog, RecipeMatch, StackItem};
pub use category::CardCategory;
pub use definition::{
    CardDefinition, CardKind, CreatureSpec, DefinitionId, DispenserSpec, EnergySpec, ProducerSpec,
    RatioItem, Recipe, RecipePart,
};
pub use instance::Card;

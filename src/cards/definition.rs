//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card type.
//! For example, "Plank" is a crafted material worth 2, made from two Wood
//! in two seconds - these are part of the definition.
//!
//! Instance-specific data (neighbors, timers, use count, hunger) is stored
//! separately in [`Card`](super::Card).
//!
//! Definitions refer to each other by type name. The [`Catalog`](super::Catalog)
//! resolves and validates every reference when it is built.

use serde::{Deserialize, Serialize};

use super::category::CardCategory;

/// Index of a definition inside its catalog.
///
/// Assigned by the catalog in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DefinitionId(pub u32);

impl DefinitionId {
    /// Create a new definition ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for DefinitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Definition({})", self.0)
    }
}

/// One ingredient slot of a recipe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipePart {
    /// Sample type. Required exactly, or - for a wildcard part - only its
    /// category is required.
    pub card: String,

    /// How many cards this part requires (at least 1).
    #[serde(default = "default_part_count")]
    pub count: u32,

    /// Match any card sharing the sample's category.
    #[serde(default)]
    pub any_of_category: bool,
}

fn default_part_count() -> u32 {
    1
}

impl RecipePart {
    /// A part requiring `count` cards of exactly this type.
    pub fn exact(card: impl Into<String>, count: u32) -> Self {
        Self {
            card: card.into(),
            count,
            any_of_category: false,
        }
    }

    /// A part requiring `count` cards of the sample's category.
    pub fn category_of(card: impl Into<String>, count: u32) -> Self {
        Self {
            card: card.into(),
            count,
            any_of_category: true,
        }
    }
}

/// A crafting rule: the parts that must be stacked together and how long
/// they must stay in contact.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Seconds of contact before completion.
    #[serde(default = "default_duration")]
    pub duration: f32,

    /// Required ingredients.
    pub parts: Vec<RecipePart>,
}

fn default_duration() -> f32 {
    2.0
}

impl Recipe {
    /// Create an empty recipe with the given duration.
    #[must_use]
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            parts: Vec::new(),
        }
    }

    /// Add a part requiring an exact type (builder pattern).
    #[must_use]
    pub fn with_part(mut self, card: impl Into<String>, count: u32) -> Self {
        self.parts.push(RecipePart::exact(card, count));
        self
    }

    /// Add a category wildcard part (builder pattern).
    #[must_use]
    pub fn with_category_part(mut self, sample: impl Into<String>, count: u32) -> Self {
        self.parts.push(RecipePart::category_of(sample, count));
        self
    }

    /// Total number of cards the recipe consumes.
    #[must_use]
    pub fn card_count(&self) -> u32 {
        self.parts.iter().map(|p| p.count).sum()
    }
}

/// A weighted entry of a draw pool.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatioItem {
    /// Type to spawn.
    pub card: String,
    /// Relative chance.
    pub ratio: f32,
}

impl RatioItem {
    pub fn new(card: impl Into<String>, ratio: f32) -> Self {
        Self {
            card: card.into(),
            ratio,
        }
    }
}

/// Creature survival parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatureSpec {
    pub max_health: f32,
    pub max_food: f32,
    /// Food lost per second while not eating.
    pub food_decrease_rate: f32,
    /// Health lost per second while hungry.
    pub health_decrease_rate: f32,
    /// Food restored by one meal.
    pub food_per_meal: f32,
    /// Seconds a meal takes.
    pub eating_duration: f32,
    /// Spawned where the creature dies.
    pub death_drop: Option<String>,
}

impl Default for CreatureSpec {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            max_food: 5.0,
            food_decrease_rate: 0.1,
            health_decrease_rate: 1.0,
            food_per_meal: 1.0,
            eating_duration: 1.0,
            death_drop: None,
        }
    }
}

impl CreatureSpec {
    /// A creature that never gets hungry.
    #[must_use]
    pub fn always_fed() -> Self {
        Self {
            food_decrease_rate: 0.0,
            health_decrease_rate: 0.0,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_death_drop(mut self, card: impl Into<String>) -> Self {
        self.death_drop = Some(card.into());
        self
    }
}

/// Periodic producer parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProducerSpec {
    /// Seconds between outputs while a creature is in the chain.
    #[serde(default = "default_interval")]
    pub interval: f32,
    /// Output pool.
    #[serde(default)]
    pub outputs: Vec<RatioItem>,
}

fn default_interval() -> f32 {
    5.0
}

/// Reward dispenser parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DispenserSpec {
    #[serde(default = "default_min_count")]
    pub min_count: u32,
    #[serde(default = "default_max_count")]
    pub max_count: u32,
    /// Reward pool.
    #[serde(default)]
    pub rewards: Vec<RatioItem>,
}

fn default_min_count() -> u32 {
    1
}

fn default_max_count() -> u32 {
    5
}

/// Energy source parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergySpec {
    /// Spawned each time the energy takes part in a combination.
    #[serde(default)]
    pub pollution: Option<String>,
}

/// Behavioral variant of a definition.
///
/// Selects which runtime payload the factory attaches to new cards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant")]
pub enum CardKind {
    #[default]
    Plain,
    Creature(CreatureSpec),
    Producer(ProducerSpec),
    Dispenser(DispenserSpec),
    Energy(EnergySpec),
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use stackcraft::cards::{CardCategory, CardDefinition, Recipe};
///
/// let plank = CardDefinition::new("Plank", CardCategory::CraftedMaterial)
///     .with_value(2)
///     .with_recipe(Recipe::new(2.0).with_part("Wood", 2));
///
/// assert_eq!(plank.recipes[0].card_count(), 2);
/// assert_eq!(plank.max_uses, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique type name.
    pub card_type: String,

    #[serde(default)]
    pub category: CardCategory,

    /// Sale value.
    #[serde(default)]
    pub value: i32,

    /// Recipes that produce this definition.
    #[serde(default)]
    pub recipes: Vec<Recipe>,

    /// Combinations a card survives. Negative = unlimited.
    #[serde(default = "default_max_uses")]
    pub max_uses: i32,

    /// Definition a card turns into after each combination.
    #[serde(default)]
    pub upgrade_target: Option<String>,

    /// Spawned when the crafting lifecycle destroys the card.
    #[serde(default)]
    pub removal_card: Option<String>,

    /// Relative chance when several recipes match the same stack.
    #[serde(default = "default_weight")]
    pub weight: f32,

    #[serde(default)]
    pub kind: CardKind,
}

fn default_max_uses() -> i32 {
    1
}

fn default_weight() -> f32 {
    1.0
}

impl CardDefinition {
    /// Create a plain definition with default lifecycle settings.
    pub fn new(card_type: impl Into<String>, category: CardCategory) -> Self {
        Self {
            card_type: card_type.into(),
            category,
            value: 0,
            recipes: Vec::new(),
            max_uses: default_max_uses(),
            upgrade_target: None,
            removal_card: None,
            weight: default_weight(),
            kind: CardKind::Plain,
        }
    }

    /// Set the sale value (builder pattern).
    #[must_use]
    pub fn with_value(mut self, value: i32) -> Self {
        self.value = value;
        self
    }

    /// Add a recipe producing this definition (builder pattern).
    #[must_use]
    pub fn with_recipe(mut self, recipe: Recipe) -> Self {
        self.recipes.push(recipe);
        self
    }

    /// Set the max-uses policy (builder pattern).
    #[must_use]
    pub fn with_max_uses(mut self, max_uses: i32) -> Self {
        self.max_uses = max_uses;
        self
    }

    /// Never destroyed by crafting (builder pattern).
    #[must_use]
    pub fn unlimited(self) -> Self {
        self.with_max_uses(-1)
    }

    /// Set the upgrade target (builder pattern).
    #[must_use]
    pub fn with_upgrade(mut self, card_type: impl Into<String>) -> Self {
        self.upgrade_target = Some(card_type.into());
        self
    }

    /// Set the card spawned on destruction (builder pattern).
    #[must_use]
    pub fn with_removal_card(mut self, card_type: impl Into<String>) -> Self {
        self.removal_card = Some(card_type.into());
        self
    }

    /// Set the selection weight (builder pattern).
    #[must_use]
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Set the behavioral variant (builder pattern).
    #[must_use]
    pub fn with_kind(mut self, kind: CardKind) -> Self {
        self.kind = kind;
        self
    }

    /// Selection weight with non-positive values floored to 1.
    #[must_use]
    pub fn effective_weight(&self) -> f32 {
        if self.weight > 0.0 {
            self.weight
        } else {
            1.0
        }
    }

    /// Check if a card with `uses` completed combinations must be destroyed.
    #[must_use]
    pub fn is_used_up(&self, uses: u32) -> bool {
        if self.max_uses < 0 {
            return false;
        }
        i64::from(uses) >= i64::from(self.max_uses.max(1))
    }

    /// Every type name this definition refers to.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        let parts = self
            .recipes
            .iter()
            .flat_map(|r| r.parts.iter().map(|p| p.card.as_str()));
        let links = self
            .upgrade_target
            .iter()
            .chain(self.removal_card.iter())
            .map(String::as_str);
        let variant: Vec<&str> = match &self.kind {
            CardKind::Plain => Vec::new(),
            CardKind::Creature(spec) => spec.death_drop.iter().map(String::as_str).collect(),
            CardKind::Producer(spec) => spec.outputs.iter().map(|i| i.card.as_str()).collect(),
            CardKind::Dispenser(spec) => spec.rewards.iter().map(|i| i.card.as_str()).collect(),
            CardKind::Energy(spec) => spec.pollution.iter().map(String::as_str).collect(),
        };
        parts.chain(links).chain(variant)
    }
}

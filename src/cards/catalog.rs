//! Combination catalog: definition lookup and recipe matching.
//!
//! The `Catalog` stores every card definition of a game. It is built once at
//! start-up, validated, and immutable afterwards.
//!
//! ## Matching
//!
//! Each recipe is compiled into a sorted multiset of required tokens. A part
//! contributes its exact type `count` times, or - for a category wildcard -
//! the category token `count` times. A stack matches when its own sorted
//! token multiset is equal, so attach order never matters.
//!
//! For wildcard recipes a stack card maps to its exact type when that type
//! is one of the recipe's exact requirements, to its category token when the
//! category is one of the wildcard categories, and to its exact type
//! otherwise. Wildcard recipes need each card's category; a query carrying
//! only type names cannot satisfy them.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use super::category::CardCategory;
use super::definition::{CardDefinition, CardKind, DefinitionId, Recipe};
use crate::core::GameRng;
use crate::error::CatalogError;

/// One card of a stack, as seen by the matcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackItem {
    pub card_type: String,
    /// `None` when only the type name is known.
    pub category: Option<CardCategory>,
}

impl StackItem {
    /// A stack entry with full card data.
    pub fn card(card_type: impl Into<String>, category: CardCategory) -> Self {
        Self {
            card_type: card_type.into(),
            category: Some(category),
        }
    }

    /// A stack entry known only by type name.
    pub fn typed(card_type: impl Into<String>) -> Self {
        Self {
            card_type: card_type.into(),
            category: None,
        }
    }
}

/// A recipe satisfied by a stack.
#[derive(Clone, Copy, Debug)]
pub struct RecipeMatch<'a> {
    /// Definition the recipe produces.
    pub result_id: DefinitionId,
    pub result: &'a CardDefinition,
    pub recipe: &'a Recipe,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum MatchToken {
    Type(String),
    Category(CardCategory),
}

#[derive(Clone, Debug)]
struct CompiledRecipe {
    result: DefinitionId,
    recipe_index: usize,
    /// Sorted.
    required: Vec<MatchToken>,
    exact_types: FxHashSet<String>,
    wildcards: SmallVec<[CardCategory; 2]>,
}

impl CompiledRecipe {
    fn matches(&self, items: &[StackItem], exact_tokens: &[MatchToken]) -> bool {
        if items.len() != self.required.len() {
            return false;
        }

        if self.wildcards.is_empty() {
            return exact_tokens == self.required.as_slice();
        }

        let mut actual = Vec::with_capacity(items.len());
        for item in items {
            let Some(category) = item.category else {
                return false;
            };
            let token = if self.exact_types.contains(&item.card_type) {
                MatchToken::Type(item.card_type.clone())
            } else if self.wildcards.contains(&category) {
                MatchToken::Category(category)
            } else {
                MatchToken::Type(item.card_type.clone())
            };
            actual.push(token);
        }
        actual.sort();
        actual == self.required
    }
}

/// Immutable table of card definitions and their recipes.
///
/// ## Example
///
/// ```
/// use stackcraft::cards::{Catalog, CardCategory, CardDefinition, Recipe, StackItem};
///
/// let catalog = Catalog::new(vec![
///     CardDefinition::new("Wood", CardCategory::RawMaterial),
///     CardDefinition::new("Plank", CardCategory::CraftedMaterial)
///         .with_recipe(Recipe::new(2.0).with_part("Wood", 2)),
/// ])
/// .unwrap();
///
/// let stack = vec![StackItem::typed("Wood"), StackItem::typed("Wood")];
/// let found = catalog.first_match(&stack).unwrap();
/// assert_eq!(found.result.card_type, "Plank");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    definitions: Vec<CardDefinition>,
    by_type: FxHashMap<String, DefinitionId>,
    recipes: Vec<CompiledRecipe>,
}

impl Catalog {
    /// Build and validate a catalog.
    ///
    /// Iteration order (and therefore first-match order) is the order of
    /// `definitions`.
    pub fn new(
        definitions: impl IntoIterator<Item = CardDefinition>,
    ) -> Result<Self, CatalogError> {
        let definitions: Vec<CardDefinition> = definitions.into_iter().collect();

        let mut by_type = FxHashMap::default();
        for (index, def) in definitions.iter().enumerate() {
            let id = DefinitionId::new(index as u32);
            if by_type.insert(def.card_type.clone(), id).is_some() {
                return Err(CatalogError::DuplicateType(def.card_type.clone()));
            }
        }

        for def in &definitions {
            for target in def.references() {
                if !by_type.contains_key(target) {
                    return Err(CatalogError::UnknownReference {
                        from: def.card_type.clone(),
                        target: target.to_string(),
                    });
                }
            }
        }

        // Dispensers pre-roll their rewards on creation
        for def in &definitions {
            if let CardKind::Dispenser(spec) = &def.kind {
                let nested = spec.rewards.iter().find(|item| {
                    by_type
                        .get(&item.card)
                        .map_or(false, |id| matches!(definitions[id.index()].kind, CardKind::Dispenser(_)))
                });
                if let Some(item) = nested {
                    return Err(CatalogError::NestedDispenser {
                        card_type: def.card_type.clone(),
                        reward: item.card.clone(),
                    });
                }
            }
        }

        let mut recipes = Vec::new();
        for (index, def) in definitions.iter().enumerate() {
            for (recipe_index, recipe) in def.recipes.iter().enumerate() {
                recipes.push(Self::compile(
                    &definitions,
                    &by_type,
                    DefinitionId::new(index as u32),
                    recipe_index,
                    recipe,
                )?);
            }
        }

        Ok(Self {
            definitions,
            by_type,
            recipes,
        })
    }

    fn compile(
        definitions: &[CardDefinition],
        by_type: &FxHashMap<String, DefinitionId>,
        result: DefinitionId,
        recipe_index: usize,
        recipe: &Recipe,
    ) -> Result<CompiledRecipe, CatalogError> {
        let owner = &definitions[result.index()].card_type;
        if recipe.parts.is_empty() {
            return Err(CatalogError::EmptyRecipe(owner.clone()));
        }

        let mut required = Vec::new();
        let mut exact_types = FxHashSet::default();
        let mut wildcards: SmallVec<[CardCategory; 2]> = SmallVec::new();

        for part in &recipe.parts {
            if part.count == 0 {
                return Err(CatalogError::ZeroPartCount {
                    card_type: owner.clone(),
                    part: part.card.clone(),
                });
            }

            let token = if part.any_of_category {
                let sample = by_type
                    .get(&part.card)
                    .map(|id| definitions[id.index()].category)
                    .ok_or_else(|| CatalogError::UnknownReference {
                        from: owner.clone(),
                        target: part.card.clone(),
                    })?;
                if !wildcards.contains(&sample) {
                    wildcards.push(sample);
                }
                MatchToken::Category(sample)
            } else {
                exact_types.insert(part.card.clone());
                MatchToken::Type(part.card.clone())
            };

            for _ in 0..part.count {
                required.push(token.clone());
            }
        }
        required.sort();

        Ok(CompiledRecipe {
            result,
            recipe_index,
            required,
            exact_types,
            wildcards,
        })
    }

    /// Get a definition by ID.
    #[must_use]
    pub fn get(&self, id: DefinitionId) -> Option<&CardDefinition> {
        self.definitions.get(id.index())
    }

    /// Look up a definition ID by type name.
    #[must_use]
    pub fn id_of(&self, card_type: &str) -> Option<DefinitionId> {
        self.by_type.get(card_type).copied()
    }

    /// Get a definition by type name.
    #[must_use]
    pub fn get_by_type(&self, card_type: &str) -> Option<&CardDefinition> {
        self.id_of(card_type).and_then(|id| self.get(id))
    }

    /// Get the number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Iterate over all definitions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (DefinitionId, &CardDefinition)> {
        self.definitions
            .iter()
            .enumerate()
            .map(|(i, def)| (DefinitionId::new(i as u32), def))
    }

    /// Find definitions of a category.
    pub fn find_by_category(
        &self,
        category: CardCategory,
    ) -> impl Iterator<Item = (DefinitionId, &CardDefinition)> {
        self.iter().filter(move |(_, def)| def.category == category)
    }

    /// Definitions of the reward-dispenser variant.
    pub fn dispensers(&self) -> impl Iterator<Item = (DefinitionId, &CardDefinition)> {
        self.iter()
            .filter(|(_, def)| matches!(def.kind, CardKind::Dispenser(_)))
    }

    /// Every recipe, across every definition, that the stack satisfies.
    ///
    /// Results follow catalog order.
    #[must_use]
    pub fn find_all_matches(&self, stack: &[StackItem]) -> Vec<RecipeMatch<'_>> {
        if stack.is_empty() {
            return Vec::new();
        }

        let mut exact_tokens: Vec<MatchToken> = stack
            .iter()
            .map(|item| MatchToken::Type(item.card_type.clone()))
            .collect();
        exact_tokens.sort();

        self.recipes
            .iter()
            .filter(|compiled| compiled.matches(stack, &exact_tokens))
            .filter_map(|compiled| self.to_match(compiled))
            .collect()
    }

    /// The first matching recipe in catalog order.
    ///
    /// Used where only the recipe's duration is needed.
    #[must_use]
    pub fn first_match(&self, stack: &[StackItem]) -> Option<RecipeMatch<'_>> {
        self.find_all_matches(stack).into_iter().next()
    }

    /// Pick the result for a stack.
    ///
    /// A single match is returned as-is. Among several, the choice is
    /// weighted by each result definition's effective weight.
    pub fn resolve_result(&self, stack: &[StackItem], rng: &mut GameRng) -> Option<RecipeMatch<'_>> {
        let mut matches = self.find_all_matches(stack);
        match matches.len() {
            0 => None,
            1 => matches.pop(),
            _ => {
                let weights: Vec<f32> = matches
                    .iter()
                    .map(|m| m.result.effective_weight())
                    .collect();
                let index = rng.choose_weighted(&weights)?;
                matches.get(index).copied()
            }
        }
    }

    fn to_match(&self, compiled: &CompiledRecipe) -> Option<RecipeMatch<'_>> {
        let result = self.get(compiled.result)?;
        let recipe = result.recipes.get(compiled.recipe_index)?;
        Some(RecipeMatch {
            result_id: compiled.result,
            result,
            recipe,
        })
    }
}

//! Card categories.
//!
//! Categories group definitions for wildcard recipe parts, creature feeding
//! rules, and board statistics.

use serde::{Deserialize, Serialize};

/// Broad grouping of card definitions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    #[default]
    None,
    /// Edible cards (Fish, canned fish, ...).
    Food,
    /// Gathered materials (Wood, Stone, Ice, ...).
    RawMaterial,
    /// Crafted goods (Hammer, Ship, ...).
    CraftedMaterial,
    /// Harvestable sources (Tree, Rock, fishing hole, ...).
    HarvestingMaterial,
    /// Living creatures that must be fed.
    Creature,
    /// Energy sources.
    Energy,
    /// Byproduct of energy use.
    Pollution,
    /// Currency, cargo and other one-offs.
    Special,
}

impl CardCategory {
    /// Get display name for this category.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Food => "Food",
            Self::RawMaterial => "Raw Material",
            Self::CraftedMaterial => "Crafted Material",
            Self::HarvestingMaterial => "Harvesting Material",
            Self::Creature => "Creature",
            Self::Energy => "Energy",
            Self::Pollution => "Pollution",
            Self::Special => "Special",
        }
    }

    /// Check if this is the food category.
    #[must_use]
    pub fn is_food(self) -> bool {
        self == Self::Food
    }
}

impl std::fmt::Display for CardCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

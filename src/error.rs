//! Error types for the engine.
//!
//! Runtime operations return [`EngineError`] through the [`Result`] alias.
//! None of these are fatal: they describe stale ids and unknown types that
//! routinely come from user actions, and callers treat them as no-ops.
//!
//! [`CatalogError`] only surfaces while the definition table is assembled at
//! start-up.

use crate::core::CardId;

/// Errors returned by board and game operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// No live card has this id.
    #[error("card not found: {0}")]
    CardNotFound(CardId),

    /// No definition has this type name.
    #[error("unknown card type: {0}")]
    UnknownType(String),

    /// The card exists but is not a reward dispenser.
    #[error("{0} is not a reward dispenser")]
    NotADispenser(CardId),

    /// The card exists but is not a creature.
    #[error("{0} is not a creature")]
    NotACreature(CardId),

    /// The dispenser has no rewards left.
    #[error("dispenser {0} is empty")]
    DispenserEmpty(CardId),
}

/// Errors raised while building a [`Catalog`](crate::cards::Catalog).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Two definitions share a type name.
    #[error("duplicate card type: {0}")]
    DuplicateType(String),

    /// A definition references a type that is not in the table.
    #[error("{from} references unknown card type {target}")]
    UnknownReference {
        /// The definition holding the reference.
        from: String,
        /// The missing type.
        target: String,
    },

    /// A recipe has no parts.
    #[error("recipe for {0} has no parts")]
    EmptyRecipe(String),

    /// A recipe part requires zero cards.
    #[error("recipe for {card_type} has a part requiring zero {part}")]
    ZeroPartCount {
        /// The definition the recipe produces.
        card_type: String,
        /// The part's sample type.
        part: String,
    },

    /// A dispenser's reward pool contains another dispenser.
    #[error("dispenser {card_type} cannot reward dispenser {reward}")]
    NestedDispenser {
        card_type: String,
        reward: String,
    },
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            EngineError::CardNotFound(CardId(3)).to_string(),
            "card not found: Card(3)"
        );
        assert_eq!(
            CatalogError::UnknownReference {
                from: "Plank".into(),
                target: "Log".into()
            }
            .to_string(),
            "Plank references unknown card type Log"
        );
    }
}

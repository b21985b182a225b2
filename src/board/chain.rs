//! Stacking: linking cards into chains and walking them.
//!
//! A chain is a vertical stack of cards joined by mirrored `bottom`/`top`
//! links. The root is the card with no bottom neighbor; crafting state for
//! the whole chain lives on the root.

use smallvec::SmallVec;
use tracing::debug;

use super::Board;
use crate::cards::Catalog;
use crate::core::CardId;
use crate::error::{EngineError, Result};

/// Card ids of a chain, bottom to top.
pub type Chain = SmallVec<[CardId; 8]>;

impl Board {
    /// The root of `id`'s chain. Returns `id` itself for unknown cards.
    #[must_use]
    pub fn root(&self, id: CardId) -> CardId {
        let mut current = id;
        // Bounded walk: a broken link can never loop forever
        for _ in 0..=self.len() {
            match self.get(current).and_then(|card| card.bottom) {
                Some(below) if self.contains(below) => current = below,
                _ => break,
            }
        }
        current
    }

    /// Every card of `id`'s chain, root first.
    #[must_use]
    pub fn chain(&self, id: CardId) -> Chain {
        self.chain_above(self.root(id))
    }

    /// `id` and every card above it, bottom to top.
    #[must_use]
    pub fn chain_above(&self, id: CardId) -> Chain {
        let mut chain = Chain::new();
        if !self.contains(id) {
            return chain;
        }

        let mut current = Some(id);
        while let Some(next) = current {
            if chain.len() > self.len() {
                break;
            }
            chain.push(next);
            current = self.get(next).and_then(|card| card.top).filter(|t| self.contains(*t));
        }
        chain
    }

    /// Type names of `id` and every card above it.
    pub fn top_types(&self, id: CardId) -> Result<Vec<String>> {
        if !self.contains(id) {
            return Err(EngineError::CardNotFound(id));
        }
        Ok(self
            .chain_above(id)
            .iter()
            .filter_map(|cid| self.get(*cid).map(|card| card.card_type.clone()))
            .collect())
    }

    /// Check if `bottom.top == top` and `top.bottom == bottom`.
    #[must_use]
    pub fn are_linked(&self, bottom: CardId, top: CardId) -> bool {
        let up = self.get(bottom).and_then(|card| card.top) == Some(top);
        let down = self.get(top).and_then(|card| card.bottom) == Some(bottom);
        up && down
    }

    /// Check if two cards are direct neighbors in either order.
    #[must_use]
    pub fn are_adjacent(&self, a: CardId, b: CardId) -> bool {
        self.are_linked(a, b) || self.are_linked(b, a)
    }

    /// Check if any creature other than `id` shares its chain.
    #[must_use]
    pub fn chain_has_creature(&self, id: CardId) -> bool {
        self.chain(id)
            .iter()
            .filter(|cid| **cid != id)
            .any(|cid| self.get(*cid).map_or(false, |card| card.is_creature()))
    }

    /// Place `top` directly on `bottom`.
    ///
    /// Refused (returning `false`, nothing changed) when either side is
    /// already linked on that face, when both cards are in the same chain,
    /// or when a creature involved does not accept the pairing. On success
    /// a creature meeting food starts eating; otherwise the new chain is
    /// matched against the catalog.
    pub fn attach(&mut self, catalog: &Catalog, bottom: CardId, top: CardId) -> bool {
        if bottom == top {
            return false;
        }
        let (Some(lower), Some(upper)) = (self.get(bottom), self.get(top)) else {
            return false;
        };
        if lower.top.is_some() || upper.bottom.is_some() {
            return false;
        }
        if self.root(bottom) == self.root(top) {
            return false;
        }

        let lower_category = lower.category;
        let upper_category = upper.category;
        let lower_is_creature = lower.is_creature();
        let upper_is_creature = upper.is_creature();

        if let Some(creature) = upper.creature() {
            if !creature.can_be_placed_on(lower_category) {
                debug!(bottom = %bottom, top = %top, "placement refused by creature");
                return false;
            }
        }

        // Covers `bottom` itself
        let refused = self.chain(bottom).iter().any(|cid| {
            self.get(*cid)
                .and_then(|card| card.creature())
                .map_or(false, |creature| !creature.can_merge_with(upper_category))
        });
        if refused {
            debug!(bottom = %bottom, top = %top, "merge refused by creature");
            return false;
        }

        if let Some(card) = self.get_mut(bottom) {
            card.top = Some(top);
        }
        if let Some(card) = self.get_mut(top) {
            card.bottom = Some(bottom);
        }
        debug!(bottom = %bottom, top = %top, "attached");

        if lower_is_creature && upper_category.is_food() {
            self.start_eating(bottom, top);
        } else if upper_is_creature && lower_category.is_food() {
            self.start_eating(top, bottom);
        } else {
            self.check_combination(catalog, bottom);
        }
        true
    }

    /// Separate `top` from `bottom` and re-match both resulting chains.
    ///
    /// Returns `false` if the two cards are not linked to each other.
    pub fn detach(&mut self, catalog: &Catalog, bottom: CardId, top: CardId) -> bool {
        if !self.are_linked(bottom, top) {
            return false;
        }

        if let Some(card) = self.get_mut(bottom) {
            card.top = None;
        }
        if let Some(card) = self.get_mut(top) {
            card.bottom = None;
        }
        debug!(bottom = %bottom, top = %top, "detached");

        self.check_combination(catalog, bottom);
        self.check_combination(catalog, top);
        true
    }

    /// Unlink `id` from both neighbors and join them to each other.
    ///
    /// Returns the former `(bottom, top)` neighbors.
    pub(crate) fn unlink_and_bridge(&mut self, id: CardId) -> (Option<CardId>, Option<CardId>) {
        let Some(card) = self.get_mut(id) else {
            return (None, None);
        };
        let below = card.bottom.take();
        let above = card.top.take();

        if let Some(card) = below.and_then(|b| self.get_mut(b)) {
            card.top = above;
        }
        if let Some(card) = above.and_then(|t| self.get_mut(t)) {
            card.bottom = below;
        }
        (below, above)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardCategory, CardDefinition, Recipe};
    use crate::core::{EngineConfig, Vec3};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CardDefinition::new("Wood", CardCategory::RawMaterial),
            CardDefinition::new("Stone", CardCategory::RawMaterial),
            CardDefinition::new("Plank", CardCategory::CraftedMaterial)
                .with_recipe(Recipe::new(2.0).with_part("Wood", 2)),
        ])
        .unwrap()
    }

    fn board_with(catalog: &Catalog, types: &[&str]) -> (Board, Vec<CardId>) {
        let mut board = Board::new(EngineConfig::default());
        let ids = types
            .iter()
            .map(|t| board.spawn_type(catalog, t, Vec3::ZERO).unwrap())
            .collect();
        (board, ids)
    }

    #[test]
    fn test_attach_builds_chain() {
        let catalog = catalog();
        let (mut board, ids) = board_with(&catalog, &["Wood", "Stone", "Wood"]);

        assert!(board.attach(&catalog, ids[0], ids[1]));
        assert!(board.attach(&catalog, ids[1], ids[2]));

        assert_eq!(board.root(ids[2]), ids[0]);
        assert_eq!(board.chain(ids[1]).as_slice(), ids.as_slice());
        assert_eq!(board.chain_above(ids[1]).as_slice(), &ids[1..]);
        assert_eq!(board.top_types(ids[1]).unwrap(), vec!["Stone", "Wood"]);
        assert!(board.are_linked(ids[0], ids[1]));
        assert!(!board.are_linked(ids[1], ids[0]));
        assert!(board.are_adjacent(ids[1], ids[0]));
    }

    #[test]
    fn test_attach_refuses_occupied_faces() {
        let catalog = catalog();
        let (mut board, ids) = board_with(&catalog, &["Wood", "Stone", "Wood"]);

        assert!(board.attach(&catalog, ids[0], ids[1]));
        // ids[0] already has a top
        assert!(!board.attach(&catalog, ids[0], ids[2]));
        // ids[1] already has a bottom
        assert!(!board.attach(&catalog, ids[2], ids[1]));
    }

    #[test]
    fn test_attach_refuses_cycles() {
        let catalog = catalog();
        let (mut board, ids) = board_with(&catalog, &["Wood", "Stone"]);

        assert!(!board.attach(&catalog, ids[0], ids[0]));
        assert!(board.attach(&catalog, ids[0], ids[1]));
        assert!(!board.attach(&catalog, ids[1], ids[0]));
        assert_eq!(board.chain(ids[0]).len(), 2);
    }

    #[test]
    fn test_attach_unknown_card() {
        let catalog = catalog();
        let (mut board, ids) = board_with(&catalog, &["Wood"]);
        assert!(!board.attach(&catalog, ids[0], CardId(77)));
    }

    #[test]
    fn test_attach_triggers_matching() {
        let catalog = catalog();
        let (mut board, ids) = board_with(&catalog, &["Wood", "Wood"]);

        assert!(board.attach(&catalog, ids[0], ids[1]));
        assert_eq!(board.get(ids[0]).unwrap().target_process_time, 2.0);
        assert_eq!(board.get(ids[1]).unwrap().target_process_time, 0.0);
    }

    #[test]
    fn test_detach_restores_standalone_cards() {
        let catalog = catalog();
        let (mut board, ids) = board_with(&catalog, &["Wood", "Wood"]);

        assert!(board.attach(&catalog, ids[0], ids[1]));
        assert!(board.detach(&catalog, ids[0], ids[1]));

        for id in &ids {
            let card = board.get(*id).unwrap();
            assert!(!card.is_linked());
            assert_eq!(card.target_process_time, 0.0);
        }
        // Not linked any more
        assert!(!board.detach(&catalog, ids[0], ids[1]));
    }

    #[test]
    fn test_remove_bridges_neighbors() {
        let catalog = catalog();
        let (mut board, ids) = board_with(&catalog, &["Wood", "Stone", "Wood"]);
        board.attach(&catalog, ids[0], ids[1]);
        board.attach(&catalog, ids[1], ids[2]);

        board.remove(&catalog, ids[1]).unwrap();

        assert!(board.are_linked(ids[0], ids[2]));
        // Wood on Wood now matches Plank
        assert_eq!(board.get(ids[0]).unwrap().target_process_time, 2.0);
    }

    #[test]
    fn test_remove_top_of_chain() {
        let catalog = catalog();
        let (mut board, ids) = board_with(&catalog, &["Wood", "Wood"]);
        board.attach(&catalog, ids[0], ids[1]);

        board.remove(&catalog, ids[1]).unwrap();
        let root = board.get(ids[0]).unwrap();
        assert_eq!(root.top, None);
        assert_eq!(root.target_process_time, 0.0);
    }

    #[test]
    fn test_top_types_unknown_card() {
        let catalog = catalog();
        let (board, _) = board_with(&catalog, &[]);
        assert_eq!(board.top_types(CardId(5)), Err(EngineError::CardNotFound(CardId(5))));
    }
}

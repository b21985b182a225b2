//! Crafting lifecycle tests.
//!
//! These tests drive whole stacks through the board:
//! - Matching on attach and order invariance
//! - Timed completion and result spawning
//! - Max-uses, upgrade and removal-card lifecycle

use proptest::prelude::*;

use stackcraft::cards::{CardCategory, CardDefinition, CardKind, Catalog, CreatureSpec, Recipe};
use stackcraft::core::{CardId, EngineConfig, Vec3};
use stackcraft::{Board, GameEvent};

fn catalog() -> Catalog {
    Catalog::new(vec![
        CardDefinition::new("Wood", CardCategory::RawMaterial).with_value(1),
        CardDefinition::new("Stone", CardCategory::RawMaterial).with_value(1),
        CardDefinition::new("Fish", CardCategory::Food),
        CardDefinition::new("Plank", CardCategory::CraftedMaterial)
            .with_value(2)
            .with_recipe(Recipe::new(2.0).with_part("Wood", 2)),
        CardDefinition::new("Hammer", CardCategory::CraftedMaterial)
            .with_recipe(Recipe::new(3.0).with_part("Stone", 1).with_part("Wood", 1)),
        CardDefinition::new("Wall", CardCategory::CraftedMaterial)
            .with_recipe(Recipe::new(4.0).with_part("Stone", 2).with_part("Wood", 1)),
        CardDefinition::new("Campfire", CardCategory::CraftedMaterial)
            .with_recipe(Recipe::new(1.0).with_category_part("Fish", 1).with_part("Wood", 1)),
        // Lifecycle fixtures
        CardDefinition::new("Tree", CardCategory::HarvestingMaterial).unlimited(),
        CardDefinition::new("Chisel", CardCategory::CraftedMaterial).with_max_uses(3),
        CardDefinition::new("Flint", CardCategory::RawMaterial),
        CardDefinition::new("Sprout", CardCategory::HarvestingMaterial).with_upgrade("Oak"),
        CardDefinition::new("Oak", CardCategory::HarvestingMaterial).unlimited(),
        CardDefinition::new("Ember", CardCategory::Special),
        CardDefinition::new("Torch", CardCategory::CraftedMaterial).with_removal_card("Ember"),
        CardDefinition::new("Chips", CardCategory::RawMaterial)
            .with_recipe(Recipe::new(1.0).with_part("Tree", 1).with_part("Chisel", 1))
            .with_recipe(Recipe::new(1.0).with_part("Tree", 1).with_part("Flint", 1))
            .with_recipe(Recipe::new(1.0).with_part("Sprout", 1).with_part("Chisel", 1))
            .with_recipe(Recipe::new(1.0).with_part("Oak", 1).with_part("Chisel", 1))
            .with_recipe(Recipe::new(1.0).with_part("Torch", 1).with_part("Tree", 1)),
        CardDefinition::new("Egg", CardCategory::RawMaterial),
        CardDefinition::new("Chick", CardCategory::Creature)
            .unlimited()
            .with_kind(CardKind::Creature(CreatureSpec::default()))
            .with_recipe(Recipe::new(2.0).with_part("Egg", 2)),
    ])
    .unwrap()
}

fn spawn_all(board: &mut Board, catalog: &Catalog, types: &[&str]) -> Vec<CardId> {
    types
        .iter()
        .map(|t| board.spawn_type(catalog, t, Vec3::ZERO).unwrap())
        .collect()
}

fn stack(board: &mut Board, catalog: &Catalog, types: &[&str]) -> Vec<CardId> {
    let ids = spawn_all(board, catalog, types);
    for pair in ids.windows(2) {
        assert!(board.attach(catalog, pair[0], pair[1]));
    }
    ids
}

fn count(board: &Board, card_type: &str) -> usize {
    board.find_by_type(card_type).count()
}

/// Two Wood become one Plank after the recipe duration.
#[test]
fn test_wood_to_plank_end_to_end() {
    let catalog = catalog();
    let mut board = Board::new(EngineConfig::default());
    let woods = stack(&mut board, &catalog, &["Wood", "Wood"]);

    for _ in 0..25 {
        board.tick(&catalog, 0.1);
    }

    assert_eq!(count(&board, "Plank"), 1);
    assert_eq!(count(&board, "Wood"), 0);
    assert!(woods.iter().all(|id| !board.contains(*id)));
    assert_eq!(board.len(), 1);

    let events = board.drain_events();
    assert!(events.contains(&GameEvent::CardObtained {
        card_type: "Plank".into()
    }));
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::CardRemoved { .. }))
            .count(),
        2
    );
}

/// Attaching then detaching leaves both cards unlinked.
#[test]
fn test_attach_detach_round_trip() {
    let catalog = catalog();
    let mut board = Board::new(EngineConfig::default());
    let ids = spawn_all(&mut board, &catalog, &["Wood", "Stone"]);

    assert!(board.attach(&catalog, ids[0], ids[1]));
    assert!(board.detach(&catalog, ids[0], ids[1]));

    for id in ids {
        let card = board.get(id).unwrap();
        assert_eq!(card.top, None);
        assert_eq!(card.bottom, None);
    }
}

/// Stacking Stone on Wood or Wood on Stone matches the same recipe.
#[test]
fn test_reversed_stack_matches_same_recipe() {
    let catalog = catalog();
    let mut board = Board::new(EngineConfig::default());

    let forward = stack(&mut board, &catalog, &["Stone", "Wood"]);
    let reversed = stack(&mut board, &catalog, &["Wood", "Stone"]);

    assert_eq!(board.get(forward[0]).unwrap().target_process_time, 3.0);
    assert_eq!(board.get(reversed[0]).unwrap().target_process_time, 3.0);
}

#[test]
fn test_category_wildcard_recipe() {
    let catalog = catalog();
    let mut board = Board::new(EngineConfig::default());

    let fire = stack(&mut board, &catalog, &["Wood", "Fish"]);
    board.complete(&catalog, fire[0]);
    assert_eq!(count(&board, "Campfire"), 1);

    // Wood + Stone is a Hammer, never a Campfire
    let hammer = stack(&mut board, &catalog, &["Wood", "Stone"]);
    board.complete(&catalog, hammer[0]);
    assert_eq!(count(&board, "Campfire"), 1);
    assert_eq!(count(&board, "Hammer"), 1);
}

/// Completion with a stack that no longer matches spawns nothing.
#[test]
fn test_completion_without_match_is_harmless() {
    let catalog = catalog();
    let mut board = Board::new(EngineConfig::default());
    let ids = stack(&mut board, &catalog, &["Fish", "Stone"]);

    board.complete(&catalog, ids[1]);

    assert_eq!(board.len(), 2);
    assert_eq!(board.get(ids[0]).unwrap().combination_uses, 0);
    assert_eq!(board.get(ids[0]).unwrap().target_process_time, 0.0);
}

#[test]
fn test_max_uses_one_is_removed_after_first_completion() {
    let catalog = catalog();
    let mut board = Board::new(EngineConfig::default());
    let ids = stack(&mut board, &catalog, &["Tree", "Flint"]);

    board.complete(&catalog, ids[0]);

    assert!(!board.contains(ids[1]));
    assert!(board.contains(ids[0]));
}

#[test]
fn test_max_uses_three_survives_two_completions() {
    let catalog = catalog();
    let mut board = Board::new(EngineConfig::default());
    let ids = stack(&mut board, &catalog, &["Tree", "Chisel"]);

    for expected_uses in 1..=2 {
        board.complete(&catalog, ids[0]);
        assert_eq!(board.get(ids[1]).unwrap().combination_uses, expected_uses);
    }
    board.complete(&catalog, ids[0]);

    assert!(!board.contains(ids[1]));
    assert_eq!(count(&board, "Chips"), 3);
}

#[test]
fn test_unlimited_survives_many_completions() {
    let catalog = catalog();
    let mut board = Board::new(EngineConfig::default());
    let tree = board.spawn_type(&catalog, "Tree", Vec3::ZERO).unwrap();

    for _ in 0..20 {
        let flint = board.spawn_type(&catalog, "Flint", Vec3::ZERO).unwrap();
        assert!(board.attach(&catalog, tree, flint));
        board.complete(&catalog, tree);
    }

    assert_eq!(board.get(tree).unwrap().combination_uses, 20);
    assert_eq!(count(&board, "Chips"), 20);
    assert_eq!(count(&board, "Flint"), 0);
}

/// The upgraded definition's policy decides survival.
#[test]
fn test_upgrade_before_destroy() {
    let catalog = catalog();
    let mut board = Board::new(EngineConfig::default());
    let ids = stack(&mut board, &catalog, &["Sprout", "Chisel"]);

    board.complete(&catalog, ids[0]);

    let upgraded = board.get(ids[0]).unwrap();
    assert_eq!(upgraded.card_type, "Oak");
    assert_eq!(upgraded.combination_uses, 1);
    // Oak + Chisel is a recipe too, so crafting restarts
    assert_eq!(upgraded.target_process_time, 1.0);
    assert!(board.events().contains(&GameEvent::Refresh { id: ids[0] }));
}

#[test]
fn test_destroyed_card_leaves_removal_card() {
    let catalog = catalog();
    let mut board = Board::new(EngineConfig::default());
    let ids = stack(&mut board, &catalog, &["Torch", "Tree"]);
    board.set_position(ids[0], Vec3::new(-3.0, 0.0, 7.0)).unwrap();

    board.complete(&catalog, ids[0]);

    assert!(!board.contains(ids[0]));
    let ember = board.find_by_type("Ember").next().unwrap();
    assert_eq!(ember.position, Vec3::new(-3.0, 0.0, 7.0));
}

/// Destroying a middle card keeps the chain connected.
#[test]
fn test_destroyed_card_relinks_chain() {
    let catalog = catalog();
    let mut board = Board::new(EngineConfig::default());
    let ids = stack(&mut board, &catalog, &["Wood", "Stone", "Wood"]);

    board.remove(&catalog, ids[1]).unwrap();

    assert_eq!(board.chain(ids[2]).as_slice(), &[ids[0], ids[2]]);
    assert_eq!(board.get(ids[0]).unwrap().target_process_time, 2.0);
}

/// Results spawned mid-tick are first ticked on the next pass.
#[test]
fn test_spawned_cards_wait_for_next_tick() {
    let catalog = catalog();
    let mut board = Board::new(EngineConfig::default());
    stack(&mut board, &catalog, &["Egg", "Egg"]);

    board.tick(&catalog, 2.5);
    let chick = board.find_by_type("Chick").next().unwrap().id;
    let food = |board: &Board| board.get(chick).unwrap().creature().unwrap().food;
    assert_eq!(food(&board), CreatureSpec::default().max_food);

    board.tick(&catalog, 1.0);
    assert!(food(&board) < CreatureSpec::default().max_food);
}

/// Huge result weights still resolve to one of the candidates.
#[test]
fn test_ambiguous_recipe_with_huge_weights() {
    let catalog = Catalog::new(vec![
        CardDefinition::new("Ore", CardCategory::RawMaterial),
        CardDefinition::new("Gold", CardCategory::CraftedMaterial)
            .with_weight(f32::MAX)
            .with_recipe(Recipe::new(2.0).with_part("Ore", 2)),
        CardDefinition::new("Iron", CardCategory::CraftedMaterial)
            .with_weight(f32::MAX)
            .with_recipe(Recipe::new(2.0).with_part("Ore", 2)),
    ])
    .unwrap();
    let mut board = Board::new(EngineConfig::default());
    stack(&mut board, &catalog, &["Ore", "Ore"]);

    board.tick(&catalog, 2.5);

    assert_eq!(count(&board, "Gold") + count(&board, "Iron"), 1);
    assert_eq!(count(&board, "Ore"), 0);
}

fn type_name(is_stone: bool) -> &'static str {
    if is_stone {
        "Stone"
    } else {
        "Wood"
    }
}

proptest! {
    #[test]
    fn prop_match_independent_of_stack_order(
        picks in prop::collection::vec(any::<bool>(), 2..5),
        rotation in 0..5usize,
    ) {
        let catalog = catalog();
        let mut board = Board::new(EngineConfig::default());

        let forward: Vec<&str> = picks.iter().map(|s| type_name(*s)).collect();
        let mut rotated = forward.clone();
        let len = rotated.len();
        rotated.rotate_left(rotation % len);
        let mut reversed = forward.clone();
        reversed.reverse();

        let targets: Vec<f32> = [forward, rotated, reversed]
            .iter()
            .map(|types| {
                let ids = stack(&mut board, &catalog, types);
                board.get(ids[0]).unwrap().target_process_time
            })
            .collect();

        prop_assert_eq!(targets[0], targets[1]);
        prop_assert_eq!(targets[0], targets[2]);
    }
}

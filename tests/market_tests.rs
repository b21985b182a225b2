//! Market tests: selling stacks and buying with currency.

use stackcraft::cards::{CardCategory, CardDefinition, Catalog};
use stackcraft::core::{CardId, EngineConfig, Vec3};
use stackcraft::{Game, SellZone, ShopZone};

fn catalog() -> Catalog {
    Catalog::new(vec![
        CardDefinition::new("Coin", CardCategory::Special).with_value(1),
        CardDefinition::new("Plank", CardCategory::CraftedMaterial).with_value(2),
        CardDefinition::new("Rock", CardCategory::RawMaterial),
        CardDefinition::new("Cargo", CardCategory::Special),
    ])
    .unwrap()
}

fn stack(game: &mut Game, types: &[&str]) -> Vec<CardId> {
    let ids: Vec<CardId> = types
        .iter()
        .map(|t| game.spawn(t, Vec3::ZERO).unwrap())
        .collect();
    for pair in ids.windows(2) {
        assert!(game.attach(pair[0], pair[1]));
    }
    ids
}

#[test]
fn test_sell_stack_for_coin_stack() {
    let mut game = Game::new(catalog(), EngineConfig::default());
    let planks = stack(&mut game, &["Plank", "Plank"]);

    let zone = SellZone::new("Coin");
    let sale = game.sell(&zone, planks[0]).unwrap().unwrap();

    assert_eq!(sale.total_value, 4);
    assert_eq!(sale.sold, planks);
    assert!(planks.iter().all(|id| game.get(*id).is_none()));

    assert_eq!(sale.rewards.len(), 4);
    assert_eq!(game.board().chain(sale.rewards[0]).to_vec(), sale.rewards);
}

/// Selling from the middle leaves the cards below in place.
#[test]
fn test_sell_upper_part_of_stack() {
    let mut game = Game::new(catalog(), EngineConfig::default());
    let ids = stack(&mut game, &["Rock", "Plank"]);

    let sale = game.sell(&SellZone::new("Coin"), ids[1]).unwrap().unwrap();

    assert_eq!(sale.total_value, 2);
    assert!(game.get(ids[0]).is_some());
    assert_eq!(game.get(ids[0]).unwrap().top, None);
}

#[test]
fn test_shop_carries_progress() {
    let mut game = Game::new(catalog(), EngineConfig::default());
    let mut shop = ShopZone::new("Coin", "Cargo", 3, Vec3::new(5.0, 0.0, 5.0));

    let first = stack(&mut game, &["Coin", "Coin", "Rock"]);
    let purchase = game.purchase(&mut shop, first[0]).unwrap().unwrap();
    assert_eq!(purchase.value, 2);
    assert!(purchase.rewards.is_empty());
    assert_eq!(shop.progress(), 2);
    assert_eq!(shop.remaining(), 1);
    // Only currency is taken
    assert!(game.get(first[2]).is_some());

    let second = stack(&mut game, &["Coin", "Coin"]);
    let purchase = game.purchase(&mut shop, second[0]).unwrap().unwrap();
    assert_eq!(purchase.rewards.len(), 1);
    assert_eq!(shop.progress(), 1);

    let cargo = game.get(purchase.rewards[0]).unwrap();
    assert_eq!(cargo.card_type, "Cargo");
    assert!((cargo.position.x - 5.0).abs() <= 1.5);
    assert!((cargo.position.z - 5.0).abs() <= 1.5);
}

#[test]
fn test_shop_without_currency() {
    let mut game = Game::new(catalog(), EngineConfig::default());
    let mut shop = ShopZone::new("Coin", "Cargo", 3, Vec3::ZERO);
    let rock = game.spawn("Rock", Vec3::ZERO).unwrap();

    assert_eq!(game.purchase(&mut shop, rock).unwrap(), None);
    assert!(game.get(rock).is_some());
    assert_eq!(shop.progress(), 0);
}

//! Card construction from definitions.
//!
//! The factory resolves a definition's variant parameters against the
//! catalog and attaches the matching runtime payload. Dispensers roll their
//! reward queue here, once.

use std::collections::VecDeque;

use tracing::warn;

use super::catalog::Catalog;
use super::definition::{CardKind, DefinitionId, DispenserSpec, RatioItem};
use super::instance::Card;
use crate::behaviors::{Behavior, CreatureState, DispenserState, EnergyState, ProducerState};
use crate::core::GameRng;

/// Build an unregistered card for `definition`.
///
/// Returns `None` if the catalog has no such definition.
pub fn build(catalog: &Catalog, definition: DefinitionId, rng: &mut GameRng) -> Option<Card> {
    let data = catalog.get(definition)?;

    let behavior = match &data.kind {
        CardKind::Plain => Behavior::Plain,
        CardKind::Creature(spec) => {
            let death_drop = spec.death_drop.as_deref().and_then(|t| catalog.id_of(t));
            Behavior::Creature(CreatureState::new(spec.clone(), death_drop))
        }
        CardKind::Producer(spec) => {
            Behavior::Producer(ProducerState::new(spec.interval, resolve_pool(catalog, &spec.outputs)))
        }
        CardKind::Dispenser(spec) => Behavior::Dispenser(DispenserState::new(roll_rewards(
            catalog,
            &data.card_type,
            spec,
            rng,
        ))),
        CardKind::Energy(spec) => Behavior::Energy(EnergyState::new(
            spec.pollution.as_deref().and_then(|t| catalog.id_of(t)),
        )),
    };

    Some(Card::new(definition, data, behavior))
}

/// Resolve a ratio pool to definition ids, skipping unknown types.
pub fn resolve_pool(catalog: &Catalog, items: &[RatioItem]) -> Vec<(DefinitionId, f32)> {
    items
        .iter()
        .filter_map(|item| catalog.id_of(&item.card).map(|id| (id, item.ratio)))
        .collect()
}

fn roll_rewards(
    catalog: &Catalog,
    owner: &str,
    spec: &DispenserSpec,
    rng: &mut GameRng,
) -> VecDeque<Card> {
    let pool = resolve_pool(catalog, &spec.rewards);
    if pool.is_empty() {
        warn!(dispenser = owner, "dispenser has an empty reward pool");
        return VecDeque::new();
    }

    let weights: Vec<f32> = pool.iter().map(|(_, ratio)| *ratio).collect();
    let count = rng.gen_inclusive(spec.min_count, spec.max_count);

    let mut queue = VecDeque::with_capacity(count as usize);
    for _ in 0..count {
        let Some(index) = rng.choose_weighted(&weights) else {
            break;
        };
        let Some(&(reward, _)) = pool.get(index) else {
            continue;
        };
        if let Some(card) = build(catalog, reward, rng) {
            queue.push_back(card);
        }
    }
    queue
}

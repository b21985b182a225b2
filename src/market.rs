//! Market zones: turning cards into currency and currency into cards.
//!
//! Both zones act on a dropped card and everything stacked above it.
//!
//! - [`SellZone`] removes the stack and pays out its summed value as
//!   reward cards, stacked on top of each other.
//! - [`ShopZone`] takes only the currency cards of the stack, banks their
//!   value, and hands out one reward per `cost` banked.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::cards::{Catalog, DefinitionId};
use crate::core::{CardId, Vec3};
use crate::error::{EngineError, Result};

/// Result of a successful sale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sale {
    pub sold: Vec<CardId>,
    pub total_value: i32,
    /// Reward cards, bottom of their stack first.
    pub rewards: Vec<CardId>,
}

/// Sells stacks for reward cards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SellZone {
    /// Type paid out, one card per point of value.
    pub reward_type: String,
    /// Half-width of the payout scatter.
    #[serde(default = "default_spread")]
    pub spread: f32,
}

fn default_spread() -> f32 {
    1.5
}

impl SellZone {
    pub fn new(reward_type: impl Into<String>) -> Self {
        Self {
            reward_type: reward_type.into(),
            spread: default_spread(),
        }
    }

    /// Sell `id` and every card above it.
    ///
    /// Returns `Ok(None)` when the stack is worth nothing; nothing changes
    /// in that case.
    pub fn sell(&self, board: &mut Board, catalog: &Catalog, id: CardId) -> Result<Option<Sale>> {
        let reward = catalog
            .id_of(&self.reward_type)
            .ok_or_else(|| EngineError::UnknownType(self.reward_type.clone()))?;
        let origin = board.get(id).ok_or(EngineError::CardNotFound(id))?.position;

        let sold = board.chain_above(id).to_vec();
        let total_value: i32 = sold
            .iter()
            .filter_map(|cid| board.get(*cid))
            .map(|card| card.value)
            .sum();
        if total_value <= 0 {
            debug!(card = %id, "nothing of value to sell");
            return Ok(None);
        }

        // Top first, so no removal has to bridge the stack being sold
        for cid in sold.iter().rev() {
            board.remove(catalog, *cid)?;
        }

        let r = self.spread.abs();
        let rng = board.rng_mut();
        let (dx, dz) = (rng.gen_f32(-r, r), rng.gen_f32(-r, -r / 2.0));
        let position = origin.planar_offset(dx, dz);

        let rewards = Self::pay_out(board, catalog, reward, total_value, position)?;
        debug!(card = %id, sold = sold.len(), total_value, "sold");
        Ok(Some(Sale {
            sold,
            total_value,
            rewards,
        }))
    }

    fn pay_out(
        board: &mut Board,
        catalog: &Catalog,
        reward: DefinitionId,
        count: i32,
        position: Vec3,
    ) -> Result<Vec<CardId>> {
        let mut rewards: Vec<CardId> = Vec::with_capacity(count.max(0) as usize);
        for _ in 0..count {
            let spawned = board.spawn(catalog, reward, position)?;
            if let Some(&below) = rewards.last() {
                board.attach(catalog, below, spawned);
            }
            rewards.push(spawned);
        }
        Ok(rewards)
    }
}

/// Result of a successful purchase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Purchase {
    /// Currency cards taken.
    pub spent: Vec<CardId>,
    pub value: i32,
    /// Rewards handed out by this purchase (possibly none yet).
    pub rewards: Vec<CardId>,
}

/// Buys reward cards with currency cards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShopZone {
    pub currency_type: String,
    pub reward_type: String,
    pub cost: i32,
    /// Where rewards appear.
    pub position: Vec3,
    #[serde(default = "default_spread")]
    pub spread: f32,
    #[serde(default)]
    progress: i32,
}

impl ShopZone {
    pub fn new(
        currency_type: impl Into<String>,
        reward_type: impl Into<String>,
        cost: i32,
        position: Vec3,
    ) -> Self {
        Self {
            currency_type: currency_type.into(),
            reward_type: reward_type.into(),
            cost,
            position,
            spread: default_spread(),
            progress: 0,
        }
    }

    /// Value banked toward the next reward.
    #[must_use]
    pub fn progress(&self) -> i32 {
        self.progress
    }

    /// Value still missing for the next reward.
    #[must_use]
    pub fn remaining(&self) -> i32 {
        self.effective_cost() - self.progress
    }

    fn effective_cost(&self) -> i32 {
        self.cost.max(1)
    }

    /// Spend the currency in `id` and above.
    ///
    /// Returns `Ok(None)` when the stack holds no currency.
    pub fn purchase(&mut self, board: &mut Board, catalog: &Catalog, id: CardId) -> Result<Option<Purchase>> {
        let reward = catalog
            .id_of(&self.reward_type)
            .ok_or_else(|| EngineError::UnknownType(self.reward_type.clone()))?;
        if !board.contains(id) {
            return Err(EngineError::CardNotFound(id));
        }

        let spent: Vec<CardId> = board
            .chain_above(id)
            .iter()
            .copied()
            .filter(|cid| board.get(*cid).map_or(false, |card| card.card_type == self.currency_type))
            .collect();
        if spent.is_empty() {
            debug!(card = %id, currency = %self.currency_type, "no currency offered");
            return Ok(None);
        }

        let mut value = 0;
        for cid in &spent {
            if let Some(card) = board.get(*cid) {
                value += card.value;
            }
            board.remove(catalog, *cid)?;
        }

        self.progress += value;
        let cost = self.effective_cost();
        let mut rewards = Vec::new();
        while self.progress >= cost {
            self.progress -= cost;
            let (dx, dz) = board.rng_mut().square_offset(self.spread);
            rewards.push(board.spawn(catalog, reward, self.position.planar_offset(dx, dz))?);
        }

        debug!(card = %id, value, progress = self.progress, bought = rewards.len(), "purchase");
        Ok(Some(Purchase { spent, value, rewards }))
    }
}

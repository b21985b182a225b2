//! Reward dispenser (cargo, chest).
//!
//! Rewards are rolled once when the dispenser is created and popped one at
//! a time. An empty dispenser reports itself done and the board removes it.

use std::collections::VecDeque;

use crate::cards::Card;

/// Runtime state of a dispenser card.
#[derive(Clone, Debug, Default)]
pub struct DispenserState {
    queue: VecDeque<Card>,
}

impl DispenserState {
    #[must_use]
    pub fn new(queue: VecDeque<Card>) -> Self {
        Self { queue }
    }

    /// Take the next reward.
    pub fn pop(&mut self) -> Option<Card> {
        self.queue.pop_front()
    }

    /// Rewards left.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.queue.is_empty()
    }

    /// Upcoming rewards in pop order.
    pub fn peek(&self) -> impl Iterator<Item = &Card> {
        self.queue.iter()
    }
}

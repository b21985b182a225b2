//! Day cycle: the clock that feeds creatures.
//!
//! Day time advances by `dt * time_multiplier`. When it reaches the day
//! duration the clock wraps, the day counter increments, and food is
//! distributed: each creature, in board order, eats up to
//! `food_per_creature` food cards. A creature that gets fewer dies. Once no
//! creature is left the game is over.

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::cards::{CardCategory, Catalog};
use crate::core::{CardId, DayConfig};
use crate::events::GameEvent;

/// Outcome of one food distribution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeedingReport {
    pub fed: usize,
    pub starved: usize,
    pub food_consumed: usize,
}

/// Day clock and end-of-day food distribution.
#[derive(Clone, Debug)]
pub struct DayCycle {
    config: DayConfig,
    time_multiplier: f32,
    current_time: f32,
    current_day: u32,
    game_over: bool,
}

impl DayCycle {
    #[must_use]
    pub fn new(config: DayConfig) -> Self {
        let time_multiplier = config.time_multiplier.clamp(0.0, config.max_time_multiplier.max(0.0));
        Self {
            config,
            time_multiplier,
            current_time: 0.0,
            current_day: 1,
            game_over: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &DayConfig {
        &self.config
    }

    /// Current day, starting at 1.
    #[must_use]
    pub fn current_day(&self) -> u32 {
        self.current_day
    }

    /// Seconds into the current day.
    #[must_use]
    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    /// Fraction of the current day elapsed, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.config.day_duration > 0.0 {
            (self.current_time / self.config.day_duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn time_multiplier(&self) -> f32 {
        self.time_multiplier
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.time_multiplier <= 0.0
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Set the clock speed, clamped to `[0, max_time_multiplier]`.
    pub fn set_time_multiplier(&mut self, multiplier: f32) {
        let clamped = multiplier.clamp(0.0, self.config.max_time_multiplier.max(0.0));
        if clamped != self.time_multiplier {
            debug!(multiplier = clamped, "time multiplier changed");
            self.time_multiplier = clamped;
        }
    }

    pub fn pause(&mut self) {
        self.time_multiplier = 0.0;
    }

    /// Resume at normal speed if paused.
    pub fn resume(&mut self) {
        if self.is_paused() {
            self.time_multiplier = 1.0;
        }
    }

    /// Restart the current day's clock.
    pub fn reset_day(&mut self) {
        self.current_time = 0.0;
    }

    /// Advance the clock. Returns `true` if a day ended during this call.
    pub fn tick(&mut self, board: &mut Board, catalog: &Catalog, dt: f32) -> bool {
        if self.is_paused() {
            return false;
        }

        self.current_time += dt * self.time_multiplier;
        if self.current_time < self.config.day_duration {
            return false;
        }

        self.current_time = 0.0;
        self.current_day += 1;
        let report = self.distribute_food(board, catalog);
        info!(
            day = self.current_day,
            fed = report.fed,
            starved = report.starved,
            "day complete"
        );
        board.push_event(GameEvent::DayCompleted {
            day: self.current_day,
        });
        true
    }

    /// Feed every creature from the food on the board.
    pub fn distribute_food(&mut self, board: &mut Board, catalog: &Catalog) -> FeedingReport {
        let creatures: Vec<CardId> = board
            .iter()
            .filter(|card| card.is_creature())
            .map(|card| card.id)
            .collect();
        let food: Vec<CardId> = board
            .iter()
            .filter(|card| card.category == CardCategory::Food && !card.is_creature())
            .map(|card| card.id)
            .collect();

        let needed = self.config.food_per_creature;
        let mut report = FeedingReport::default();
        let mut next_food = food.iter().copied();

        for creature in creatures {
            if !board.contains(creature) {
                continue;
            }

            let mut given = 0;
            while given < needed {
                let Some(food_id) = next_food.next() else {
                    break;
                };
                // Food can disappear mid-distribution
                if board.consume(catalog, food_id).is_ok() {
                    given += 1;
                    report.food_consumed += 1;
                }
            }

            if given < needed {
                report.starved += 1;
                if let Err(err) = board.kill_creature(catalog, creature) {
                    warn!(creature = %creature, error = %err, "failed to starve creature");
                }
            } else {
                report.fed += 1;
            }
        }

        self.check_game_over(board);
        report
    }

    fn check_game_over(&mut self, board: &mut Board) {
        if self.game_over {
            return;
        }
        if board.iter().any(|card| card.is_creature()) {
            return;
        }
        self.game_over = true;
        info!(day = self.current_day, "game over: no creatures left");
        board.push_event(GameEvent::GameOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cycle = DayCycle::new(DayConfig::default());
        assert_eq!(cycle.current_day(), 1);
        assert_eq!(cycle.time_multiplier(), 1.0);
        assert_eq!(cycle.progress(), 0.0);
        assert!(!cycle.is_game_over());
    }

    #[test]
    fn test_multiplier_clamped() {
        let mut cycle = DayCycle::new(DayConfig::default());

        cycle.set_time_multiplier(10.0);
        assert_eq!(cycle.time_multiplier(), 3.0);

        cycle.set_time_multiplier(-1.0);
        assert_eq!(cycle.time_multiplier(), 0.0);
        assert!(cycle.is_paused());
    }

    #[test]
    fn test_pause_resume() {
        let mut cycle = DayCycle::new(DayConfig::default());
        cycle.set_time_multiplier(2.0);

        // Resume is a no-op while running
        cycle.resume();
        assert_eq!(cycle.time_multiplier(), 2.0);

        cycle.pause();
        assert!(cycle.is_paused());
        cycle.resume();
        assert_eq!(cycle.time_multiplier(), 1.0);
    }
}

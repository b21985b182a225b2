//! Periodic producer (mine, quarry, fishing spot).
//!
//! A producer emits one weighted draw from its output pool every `interval`
//! seconds, but only while some creature shares its chain. The timer
//! restarts whenever a creature arrives and is reset when none remains.

use crate::cards::DefinitionId;
use crate::core::GameRng;

/// Runtime state of a producer card.
#[derive(Clone, Debug)]
pub struct ProducerState {
    interval: f32,
    outputs: Vec<(DefinitionId, f32)>,
    timer: f32,
    had_creature: bool,
}

impl ProducerState {
    #[must_use]
    pub fn new(interval: f32, outputs: Vec<(DefinitionId, f32)>) -> Self {
        Self {
            interval,
            outputs,
            timer: 0.0,
            had_creature: false,
        }
    }

    #[must_use]
    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Seconds accumulated toward the next output.
    #[must_use]
    pub fn timer(&self) -> f32 {
        self.timer
    }

    #[must_use]
    pub fn has_outputs(&self) -> bool {
        !self.outputs.is_empty()
    }

    /// Advance the production timer. Returns `true` when an output is due.
    pub fn advance(&mut self, creature_present: bool, dt: f32) -> bool {
        if !creature_present {
            self.had_creature = false;
            self.timer = 0.0;
            return false;
        }

        if !self.had_creature {
            self.had_creature = true;
            self.timer = 0.0;
        }

        self.timer += dt;
        if self.timer >= self.interval {
            self.timer = 0.0;
            return true;
        }
        false
    }

    /// Weighted draw from the output pool.
    pub fn draw(&self, rng: &mut GameRng) -> Option<DefinitionId> {
        let weights: Vec<f32> = self.outputs.iter().map(|(_, ratio)| *ratio).collect();
        let index = rng.choose_weighted(&weights)?;
        self.outputs.get(index).map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mine() -> ProducerState {
        ProducerState::new(2.0, vec![(DefinitionId::new(0), 1.0)])
    }

    #[test]
    fn test_no_creature_no_output() {
        let mut state = mine();
        for _ in 0..100 {
            assert!(!state.advance(false, 1.0));
        }
        assert_eq!(state.timer(), 0.0);
    }

    #[test]
    fn test_fires_on_interval() {
        let mut state = mine();
        assert!(!state.advance(true, 1.0));
        assert!(state.advance(true, 1.0));
        assert_eq!(state.timer(), 0.0);

        assert!(!state.advance(true, 1.5));
        assert!(state.advance(true, 0.5));
    }

    #[test]
    fn test_leaving_resets_timer() {
        let mut state = mine();
        state.advance(true, 1.5);
        assert!(!state.advance(false, 0.1));
        assert_eq!(state.timer(), 0.0);

        // Progress from before the creature left is gone
        assert!(!state.advance(true, 1.0));
        assert!(state.advance(true, 1.0));
    }

    #[test]
    fn test_draw_weighted() {
        let state = ProducerState::new(
            1.0,
            vec![(DefinitionId::new(0), 1.0), (DefinitionId::new(1), 3.0)],
        );
        let mut rng = GameRng::new(5);

        let draws = 4_000;
        let second = (0..draws)
            .filter(|_| state.draw(&mut rng) == Some(DefinitionId::new(1)))
            .count();
        let share = second as f64 / draws as f64;
        assert!((share - 0.75).abs() < 0.04, "share {}", share);
    }

    #[test]
    fn test_draw_empty_pool() {
        let state = ProducerState::new(1.0, Vec::new());
        let mut rng = GameRng::new(5);
        assert!(!state.has_outputs());
        assert_eq!(state.draw(&mut rng), None);
    }
}

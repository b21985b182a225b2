//! Engine configuration.
//!
//! Games configure the simulation at startup by providing:
//! - `EngineConfig`: RNG seed and spawn placement parameters
//! - `DayConfig`: Day length, time speed, and feeding requirements
//!
//! Both deserialize with serde, and every field has a default, so a partial
//! document is enough.

use serde::{Deserialize, Serialize};

/// Day-cycle configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayConfig {
    /// Length of one day in simulated seconds.
    pub day_duration: f32,

    /// Initial time multiplier (0 = paused).
    pub time_multiplier: f32,

    /// Upper clamp for `DayCycle::set_time_multiplier`.
    pub max_time_multiplier: f32,

    /// Food cards each creature needs at a day boundary to survive.
    pub food_per_creature: u32,
}

impl Default for DayConfig {
    fn default() -> Self {
        Self {
            day_duration: 60.0,
            time_multiplier: 1.0,
            max_time_multiplier: 3.0,
            food_per_creature: 2,
        }
    }
}

impl DayConfig {
    /// Set the day length.
    #[must_use]
    pub fn with_day_duration(mut self, seconds: f32) -> Self {
        self.day_duration = seconds;
        self
    }

    /// Set the initial time multiplier.
    #[must_use]
    pub fn with_time_multiplier(mut self, multiplier: f32) -> Self {
        self.time_multiplier = multiplier;
        self
    }

    /// Set how many food cards a creature needs per day.
    #[must_use]
    pub fn with_food_per_creature(mut self, count: u32) -> Self {
        self.food_per_creature = count;
        self
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Random seed. Same seed produces the same simulation.
    pub seed: u64,

    /// Half-width of the square scatter around a crafting stack's root
    /// where the result card lands.
    pub craft_scatter: f32,

    /// Inner radius of the ring a producer spawns output on.
    pub mine_ring_min: f32,

    /// Outer radius of the ring a producer spawns output on.
    pub mine_ring_max: f32,

    /// Distance from a dispenser at which popped rewards land.
    pub reward_pop_radius: f32,

    /// Day-cycle parameters.
    pub day: DayConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            craft_scatter: 1.5,
            mine_ring_min: 1.5,
            mine_ring_max: 2.5,
            reward_pop_radius: 2.0,
            day: DayConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Create a new config with custom seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Create a new config with a custom crafting scatter.
    #[must_use]
    pub fn with_craft_scatter(mut self, half_width: f32) -> Self {
        self.craft_scatter = half_width;
        self
    }

    /// Create a new config with a custom producer ring.
    #[must_use]
    pub fn with_mine_ring(mut self, min: f32, max: f32) -> Self {
        self.mine_ring_min = min;
        self.mine_ring_max = max;
        self
    }

    /// Create a new config with custom day parameters.
    #[must_use]
    pub fn with_day(mut self, day: DayConfig) -> Self {
        self.day = day;
        self
    }
}

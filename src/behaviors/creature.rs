//! Creature survival state machine.
//!
//! ```text
//!            food <= 0                 health <= 0
//!   Normal ------------> Hungry ---------------------> Dead
//!     ^  \                 |
//!     |   \ food contact   | food contact
//!     |    v               v
//!     +--- Eating <--------+
//!   meal done
//! ```
//!
//! While `Eating`, neither food nor health decays. The state machine only
//! reports transitions; the board applies their side effects (detaching
//! neighbors, consuming the food card, removing a dead creature).

use crate::cards::{CardCategory, CreatureSpec, DefinitionId};
use crate::core::CardId;

/// Coarse creature condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreatureMood {
    Normal,
    Hungry,
    /// Eating the given food card.
    Eating(CardId),
    Dead,
}

/// What happened during one `advance`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CreatureStep {
    /// Food just ran out.
    pub became_hungry: bool,
    /// Health just ran out.
    pub died: bool,
    /// The meal on this card is finished and should be consumed.
    pub meal_ready: Option<CardId>,
}

/// Runtime state of a creature card.
#[derive(Clone, Debug)]
pub struct CreatureState {
    spec: CreatureSpec,
    death_drop: Option<DefinitionId>,
    pub food: f32,
    pub health: f32,
    mood: CreatureMood,
    eating_progress: f32,
}

impl CreatureState {
    /// A full, healthy creature.
    #[must_use]
    pub fn new(spec: CreatureSpec, death_drop: Option<DefinitionId>) -> Self {
        Self {
            food: spec.max_food,
            health: spec.max_health,
            spec,
            death_drop,
            mood: CreatureMood::Normal,
            eating_progress: 0.0,
        }
    }

    #[must_use]
    pub fn spec(&self) -> &CreatureSpec {
        &self.spec
    }

    #[must_use]
    pub fn mood(&self) -> CreatureMood {
        self.mood
    }

    #[must_use]
    pub fn death_drop(&self) -> Option<DefinitionId> {
        self.death_drop
    }

    #[must_use]
    pub fn is_hungry(&self) -> bool {
        self.mood == CreatureMood::Hungry
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.food >= self.spec.max_food
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.mood == CreatureMood::Dead
    }

    /// The food card currently being eaten.
    #[must_use]
    pub fn eating_target(&self) -> Option<CardId> {
        match self.mood {
            CreatureMood::Eating(food) => Some(food),
            _ => None,
        }
    }

    /// Fraction of the current meal already eaten.
    #[must_use]
    pub fn eating_progress(&self) -> f32 {
        if self.spec.eating_duration > 0.0 {
            (self.eating_progress / self.spec.eating_duration).min(1.0)
        } else {
            1.0
        }
    }

    /// Whether a card of `category` may be placed on top of this creature.
    #[must_use]
    pub fn can_merge_with(&self, category: CardCategory) -> bool {
        match self.mood {
            CreatureMood::Dead => false,
            _ if category.is_food() => !self.is_full() && self.eating_target().is_none(),
            CreatureMood::Hungry => false,
            _ => true,
        }
    }

    /// Whether this creature may be placed on a card of `category`.
    #[must_use]
    pub fn can_be_placed_on(&self, category: CardCategory) -> bool {
        match self.mood {
            CreatureMood::Dead => false,
            CreatureMood::Eating(_) if category.is_food() => false,
            CreatureMood::Hungry => category.is_food(),
            _ => true,
        }
    }

    /// Begin eating `food`. Pauses hunger and health decay.
    pub fn start_eating(&mut self, food: CardId) {
        if self.is_dead() {
            return;
        }
        self.mood = CreatureMood::Eating(food);
        self.eating_progress = 0.0;
    }

    /// Stop eating without a meal; the next `advance` re-evaluates hunger.
    pub fn abort_eating(&mut self) {
        if self.eating_target().is_some() {
            self.mood = CreatureMood::Normal;
            self.eating_progress = 0.0;
        }
    }

    /// Apply a finished meal.
    pub fn finish_meal(&mut self) {
        if self.is_dead() {
            return;
        }
        self.food = (self.food + self.spec.food_per_meal).min(self.spec.max_food);
        self.mood = CreatureMood::Normal;
        self.eating_progress = 0.0;
    }

    /// Mark the creature dead.
    pub fn kill(&mut self) {
        self.health = 0.0;
        self.mood = CreatureMood::Dead;
    }

    /// Advance decay and eating by `dt` seconds.
    pub fn advance(&mut self, dt: f32) -> CreatureStep {
        let mut step = CreatureStep::default();

        match self.mood {
            CreatureMood::Dead => {}
            CreatureMood::Eating(food) => {
                self.eating_progress += dt;
                if self.eating_progress >= self.spec.eating_duration {
                    step.meal_ready = Some(food);
                }
            }
            CreatureMood::Normal => {
                if self.food > 0.0 {
                    self.food = (self.food - self.spec.food_decrease_rate * dt).max(0.0);
                    if self.food <= 0.0 {
                        self.mood = CreatureMood::Hungry;
                        step.became_hungry = true;
                    }
                } else {
                    // Already empty: hunger starts with this tick
                    self.mood = CreatureMood::Hungry;
                    step.became_hungry = true;
                    self.decay_health(dt, &mut step);
                }
            }
            CreatureMood::Hungry => self.decay_health(dt, &mut step),
        }

        step
    }

    fn decay_health(&mut self, dt: f32, step: &mut CreatureStep) {
        self.health = (self.health - self.spec.health_decrease_rate * dt).max(0.0);
        if self.health <= 0.0 {
            self.mood = CreatureMood::Dead;
            step.died = true;
        }
    }
}

//! Behavioral variants of cards.
//!
//! Every card carries a [`Behavior`]: `Plain` for ordinary materials, or
//! the runtime state of one of the special variants. The states here are
//! self-contained state machines; the board drives them each tick and
//! applies the side effects they report.
//!
//! | Variant    | State               | Ticked by                    |
//! |------------|---------------------|------------------------------|
//! | Creature   | [`CreatureState`]   | hunger, eating, death        |
//! | Producer   | [`ProducerState`]   | timed output while staffed   |
//! | Dispenser  | [`DispenserState`]  | not ticked; popped on demand |
//! | Energy     | [`EnergyState`]     | not ticked; pollutes on use  |

pub mod creature;
pub mod dispenser;
pub mod energy;
pub mod producer;

pub use creature::{CreatureMood, CreatureState, CreatureStep};
pub use dispenser::DispenserState;
pub use energy::EnergyState;
pub use producer::ProducerState;

/// Runtime payload selected by a definition's [`CardKind`](crate::cards::CardKind).
#[derive(Clone, Debug, Default)]
pub enum Behavior {
    #[default]
    Plain,
    Creature(CreatureState),
    Producer(ProducerState),
    Dispenser(DispenserState),
    Energy(EnergyState),
}

impl Behavior {
    /// Short variant name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Creature(_) => "creature",
            Self::Producer(_) => "producer",
            Self::Dispenser(_) => "dispenser",
            Self::Energy(_) => "energy",
        }
    }

    /// Check if the card should be removed by the cleanup pass.
    #[must_use]
    pub fn is_done(&self) -> bool {
        match self {
            Self::Dispenser(state) => state.is_done(),
            _ => false,
        }
    }
}

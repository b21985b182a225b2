//! Energy source: leaves pollution behind each time it is used.

use crate::cards::DefinitionId;

/// Runtime state of an energy card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EnergyState {
    pub pollution: Option<DefinitionId>,
}

impl EnergyState {
    #[must_use]
    pub fn new(pollution: Option<DefinitionId>) -> Self {
        Self { pollution }
    }
}

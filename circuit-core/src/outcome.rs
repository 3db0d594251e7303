//! Won/lost classification of a completed run.

use crate::position::ActivationSet;
use serde::{Deserialize, Serialize};

/// The verdict on a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Every circuit on the grid was activated.
    Won,
    /// Some circuits remain inactive.
    Lost {
        /// Circuit cells the run never activated.
        missing: ActivationSet,
    },
}

impl Outcome {
    /// Whether the run won.
    pub fn is_won(&self) -> bool {
        matches!(self, Outcome::Won)
    }
}

/// Classify a run: won iff every key in `circuits` is in `activations`.
///
/// `circuits` should come fresh from [`crate::Grid::circuit_cells`]. A
/// grid with no circuits is won by any completed run.
pub fn evaluate(circuits: &ActivationSet, activations: &ActivationSet) -> Outcome {
    if activations.is_superset(circuits) {
        Outcome::Won
    } else {
        Outcome::Lost {
            missing: circuits.missing_from(activations),
        }
    }
}

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ResultsError;
use crate::game::{Move, Observation, Simulator};

/// Learning hyperparameters, set once before training.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HyperParams {
    pub learning_rate: f64,
    pub discount_factor: f64,
    pub explore_rate: f64,
}

impl Default for HyperParams {
    fn default() -> Self {
        HyperParams {
            learning_rate: 0.1,
            discount_factor: 0.4,
            explore_rate: 0.05,
        }
    }
}

/// Interface to the tabular learner controlling one seat.
pub trait LearningAgent {
    fn hyperparams(&self) -> HyperParams;

    fn set_hyperparams(&mut self, params: HyperParams);

    /// Switch between training (explore and learn) and evaluation (greedy,
    /// table untouched).
    fn set_training(&mut self, training: bool);

    fn is_training(&self) -> bool;

    /// Pick a move for the controlled seat. In training mode this also
    /// performs the learning update for the previous decision. `terminal`
    /// marks the last observation of a game; the returned move is then
    /// ignored.
    fn decide(&mut self, obs: &Observation, game: &dyn Simulator, terminal: bool) -> Move;

    /// Forget per-game bookkeeping. Called once every game ends.
    fn reset_game(&mut self);

    /// Persist the learned table.
    fn save_table(&self, path: &Path) -> Result<(), ResultsError>;
}

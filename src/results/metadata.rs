use serde::{Deserialize, Serialize};

use crate::ai::HyperParams;
use crate::game::Seat;
use crate::training::WinRateRecord;

/// Settings and outcome of one training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub controlled_seat: Seat,
    pub hyperparameters: HyperParams,
    pub training_games: usize,
    pub eval_games: usize,
    pub eval_after: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_win_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_win_rate: Option<f64>,
}

/// Contents of a `Win_rates_<timestamp>.json` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinRateReport {
    pub timestamp: String,
    pub metadata: RunMetadata,
    pub win_rates: WinRateRecord,
}

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::ai::agent::{HyperParams, LearningAgent};
use crate::ai::state_encoding::{encode_state, progress, StateKey};
use crate::error::ResultsError;
use crate::game::{Move, Observation, Simulator, PIECES};

/// Bonus added to the reward of the move that wins the game.
const WIN_REWARD: f64 = 1.0;

/// One serialized table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QEntry {
    pub state: StateKey,
    pub values: [f64; PIECES],
}

/// Action values per encoded state, one value per piece. Unvisited entries
/// read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<QEntry>", into = "Vec<QEntry>")]
pub struct QTable {
    entries: BTreeMap<StateKey, [f64; PIECES]>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn value(&self, state: &StateKey, piece: u8) -> f64 {
        self.entries
            .get(state)
            .map_or(0.0, |values| values[piece as usize])
    }

    /// Highest value among `legal` pieces, or among all pieces if none are legal.
    pub fn best_value(&self, state: &StateKey, legal: &[u8]) -> f64 {
        if legal.is_empty() {
            return (0..PIECES as u8)
                .map(|p| self.value(state, p))
                .fold(f64::NEG_INFINITY, f64::max);
        }
        legal
            .iter()
            .map(|&p| self.value(state, p))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Legal piece with the highest value; ties go to the lowest index.
    pub fn best_piece(&self, state: &StateKey, legal: &[u8]) -> Option<u8> {
        let mut best: Option<(u8, f64)> = None;
        for &p in legal {
            let v = self.value(state, p);
            if best.map_or(true, |(_, bv)| v > bv) {
                best = Some((p, v));
            }
        }
        best.map(|(p, _)| p)
    }

    /// Move the value of (`state`, `piece`) toward `target` by `learning_rate`.
    pub fn update(&mut self, state: StateKey, piece: u8, target: f64, learning_rate: f64) {
        let values = self.entries.entry(state).or_insert([0.0; PIECES]);
        let q = &mut values[piece as usize];
        *q += learning_rate * (target - *q);
    }
}

impl From<Vec<QEntry>> for QTable {
    fn from(rows: Vec<QEntry>) -> Self {
        QTable {
            entries: rows.into_iter().map(|r| (r.state, r.values)).collect(),
        }
    }
}

impl From<QTable> for Vec<QEntry> {
    fn from(table: QTable) -> Self {
        table
            .entries
            .into_iter()
            .map(|(state, values)| QEntry { state, values })
            .collect()
    }
}

/// The decision awaiting its reward.
#[derive(Debug, Clone, Copy)]
struct Pending {
    state: StateKey,
    piece: u8,
    progress: f64,
}

/// Tabular one-step Q-learning agent with epsilon-greedy exploration.
///
/// States are the zones of the agent's own pieces; the reward of a move is
/// the change in overall progress toward the goal observed at the next
/// decision, plus a bonus for winning. Knocked pieces show up as negative
/// progress.
pub struct QLearningAgent {
    params: HyperParams,
    training: bool,
    table: QTable,
    rng: StdRng,
    pending: Option<Pending>,
}

impl QLearningAgent {
    pub fn new(params: HyperParams) -> Self {
        Self::with_rng(params, StdRng::from_os_rng())
    }

    /// An agent whose exploration draws are reproducible from `seed`.
    pub fn seeded(params: HyperParams, seed: u64) -> Self {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }

    fn with_rng(params: HyperParams, rng: StdRng) -> Self {
        QLearningAgent {
            params,
            training: true,
            table: QTable::new(),
            rng,
            pending: None,
        }
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    fn learn(&mut self, state: &StateKey, progress: f64, obs: &Observation, terminal: bool) {
        let Some(prev) = self.pending.take() else {
            return;
        };

        let mut reward = progress - prev.progress;
        if obs.player_is_a_winner {
            reward += WIN_REWARD;
        }
        let future = if terminal {
            0.0
        } else {
            self.table.best_value(state, &obs.legal_moves)
        };
        let target = reward + self.params.discount_factor * future;
        self.table
            .update(prev.state, prev.piece, target, self.params.learning_rate);
    }

    fn select(&mut self, state: &StateKey, legal: &[u8]) -> u8 {
        if self.training && self.rng.random::<f64>() < self.params.explore_rate {
            return legal[self.rng.random_range(0..legal.len())];
        }
        self.table.best_piece(state, legal).unwrap_or(legal[0])
    }
}

impl LearningAgent for QLearningAgent {
    fn hyperparams(&self) -> HyperParams {
        self.params
    }

    fn set_hyperparams(&mut self, params: HyperParams) {
        self.params = params;
    }

    fn set_training(&mut self, training: bool) {
        self.training = training;
        if !training {
            self.pending = None;
        }
    }

    fn is_training(&self) -> bool {
        self.training
    }

    fn decide(&mut self, obs: &Observation, game: &dyn Simulator, terminal: bool) -> Move {
        let goal = game.goal_index();
        let state = encode_state(&obs.own_pieces, goal);
        let progress = progress(&obs.own_pieces, goal);

        if self.training {
            self.learn(&state, progress, obs, terminal);
        }

        if terminal || obs.legal_moves.is_empty() {
            self.pending = None;
            return Move::NoMove;
        }

        let piece = self.select(&state, &obs.legal_moves);
        if self.training {
            self.pending = Some(Pending {
                state,
                piece,
                progress,
            });
        }
        Move::Piece(piece)
    }

    fn reset_game(&mut self) {
        self.pending = None;
    }

    fn save_table(&self, path: &Path) -> Result<(), ResultsError> {
        let write_err = |source: std::io::Error| ResultsError::Write {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.table)?;
        writer.flush().map_err(write_err)?;
        Ok(())
    }
}

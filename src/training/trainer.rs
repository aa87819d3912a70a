use std::path::PathBuf;

use crate::ai::{HyperParams, LearningAgent, RandomPolicy};
use crate::error::{ResultsError, TrainingError};
use crate::game::{Seat, Simulator};
use crate::results::{write_win_rate_chart, ResultsStore, RunMetadata, SavedResults, DEFAULT_RESULTS_DIR};
use crate::training::episode::run_game;
use crate::training::events::{EventSink, TrainingEvent};
use crate::training::win_rates::WinRateRecord;

/// Trainer configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Seat played by the learning agent.
    pub controlled_seat: Seat,
    pub training_games: usize,
    /// Games per evaluation batch.
    pub eval_games: usize,
    /// Evaluate after every training game whose index exceeds this.
    pub eval_after: usize,
    pub log_interval: usize,
    pub results_dir: PathBuf,
    /// Seed for the opponents' draws. Unseeded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            controlled_seat: Seat::default(),
            training_games: 1000,
            eval_games: 25,
            eval_after: 800,
            log_interval: 100,
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            seed: None,
        }
    }
}

/// Source of fresh games.
pub trait GameFactory {
    type Game: Simulator;

    fn new_game(&mut self) -> Self::Game;
}

impl<F, S> GameFactory for F
where
    F: FnMut() -> S,
    S: Simulator,
{
    type Game = S;

    fn new_game(&mut self) -> S {
        self()
    }
}

/// Trains one agent against random opponents and records its win rate.
pub struct Trainer<A, F, K> {
    config: TrainerConfig,
    agent: A,
    games: F,
    opponent: RandomPolicy,
    sink: K,
    store: ResultsStore,
    win_rates: WinRateRecord,
}

impl<A, F, K> Trainer<A, F, K>
where
    A: LearningAgent,
    F: GameFactory,
    K: EventSink,
{
    pub fn new(config: TrainerConfig, agent: A, games: F, sink: K) -> Self {
        let opponent = config
            .seed
            .map(RandomPolicy::seeded)
            .unwrap_or_default();
        let store = ResultsStore::new(config.results_dir.clone());
        Trainer {
            config,
            agent,
            games,
            opponent,
            sink,
            store,
            win_rates: WinRateRecord::new(),
        }
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn win_rates(&self) -> &WinRateRecord {
        &self.win_rates
    }

    /// Play `game` to completion with this trainer's agent and opponents.
    pub fn run_game<S: Simulator>(
        &mut self,
        game: &mut S,
        is_training: bool,
    ) -> Result<Seat, TrainingError> {
        run_game(
            game,
            &mut self.agent,
            &mut self.opponent,
            self.config.controlled_seat,
            is_training,
        )
    }

    /// Play a batch of non-learning games and return the fraction the
    /// controlled seat won.
    pub fn evaluate(&mut self) -> Result<f64, TrainingError> {
        let eval_games = self.config.eval_games;
        if eval_games == 0 {
            return Ok(0.0);
        }

        let mut wins = 0usize;
        for _ in 0..eval_games {
            let mut game = self.games.new_game();
            if self.run_game(&mut game, false)? == self.config.controlled_seat {
                wins += 1;
            }
        }
        Ok(wins as f64 / eval_games as f64)
    }

    /// Run the full training loop, then save the results.
    pub fn train(&mut self, params: HyperParams) -> Result<SavedResults, TrainingError> {
        self.agent.set_hyperparams(params);

        let total = self.config.training_games;
        self.sink.emit(TrainingEvent::Started {
            params,
            training_games: total,
        });

        for k in 0..total {
            if k % self.config.log_interval.max(1) == 0 {
                self.sink.emit(TrainingEvent::Progress { game: k, total });
            }

            let mut game = self.games.new_game();
            let winner = self.run_game(&mut game, true)?;
            self.sink.emit(TrainingEvent::GameFinished { game: k, winner });

            if k > self.config.eval_after {
                let win_rate = self.evaluate()?;
                self.win_rates.record(k, win_rate);
                self.sink.emit(TrainingEvent::Evaluated { game: k, win_rate });
            }
        }

        Ok(self.save_results()?)
    }

    /// Write the agent's table and the win-rate record to timestamped files.
    pub fn save_results(&mut self) -> Result<SavedResults, ResultsError> {
        let saved = self
            .store
            .save(&self.agent, &self.win_rates, &self.run_metadata())?;
        self.sink.emit(TrainingEvent::ResultsSaved {
            q_table: saved.q_table.clone(),
            win_rates: saved.win_rates.clone(),
        });
        Ok(saved)
    }

    /// Write the win-rate chart to the results directory. Returns `None` and
    /// emits a warning event when nothing was recorded.
    pub fn plot_win_rates(&mut self) -> Result<Option<PathBuf>, ResultsError> {
        if self.win_rates.is_empty() {
            self.sink.emit(TrainingEvent::NoPlotData);
            return Ok(None);
        }

        let path = self.store.plot_path();
        write_win_rate_chart(&self.win_rates, &path)?;
        self.sink.emit(TrainingEvent::PlotSaved { path: path.clone() });
        Ok(Some(path))
    }

    fn run_metadata(&self) -> RunMetadata {
        RunMetadata {
            controlled_seat: self.config.controlled_seat,
            hyperparameters: self.agent.hyperparams(),
            training_games: self.config.training_games,
            eval_games: self.config.eval_games,
            eval_after: self.config.eval_after,
            final_win_rate: self.win_rates.last().map(|s| s.win_rate),
            best_win_rate: self.win_rates.best().map(|s| s.win_rate),
        }
    }
}

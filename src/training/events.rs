use std::path::PathBuf;

use crate::ai::HyperParams;
use crate::game::Seat;

/// Progress reports emitted by the trainer.
#[derive(Debug, Clone, PartialEq)]
pub enum TrainingEvent {
    Started {
        params: HyperParams,
        training_games: usize,
    },
    Progress {
        game: usize,
        total: usize,
    },
    GameFinished {
        game: usize,
        winner: Seat,
    },
    Evaluated {
        game: usize,
        win_rate: f64,
    },
    ResultsSaved {
        q_table: PathBuf,
        win_rates: PathBuf,
    },
    PlotSaved {
        path: PathBuf,
    },
    /// A plot was requested but no win rate was ever recorded.
    NoPlotData,
}

/// Destination for training events.
pub trait EventSink {
    fn emit(&mut self, event: TrainingEvent);
}

impl EventSink for Vec<TrainingEvent> {
    fn emit(&mut self, event: TrainingEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: TrainingEvent) {
        (**self).emit(event);
    }
}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: TrainingEvent) {
        match event {
            TrainingEvent::Started {
                params,
                training_games,
            } => log::info!(
                "Starting training with LR={}, DF={}, ER={} for {} games",
                params.learning_rate,
                params.discount_factor,
                params.explore_rate,
                training_games
            ),
            TrainingEvent::Progress { game, total } => {
                log::info!("Training game {}/{}...", game, total)
            }
            TrainingEvent::GameFinished { game, winner } => {
                log::debug!("Game {} won by {}", game, winner)
            }
            TrainingEvent::Evaluated { game, win_rate } => {
                log::info!("Game {}: Win Rate = {:.2}", game, win_rate)
            }
            TrainingEvent::ResultsSaved { q_table, win_rates } => {
                log::info!("Q-table saved to {}", q_table.display());
                log::info!("Win rates saved to {}", win_rates.display());
            }
            TrainingEvent::PlotSaved { path } => {
                log::info!("Win rate plot saved to {}", path.display())
            }
            TrainingEvent::NoPlotData => log::warn!("No win rate data to plot."),
        }
    }
}

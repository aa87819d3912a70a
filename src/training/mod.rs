//! Training infrastructure: the game loop, the trainer with its evaluation
//! protocol, the win-rate record, and the events it reports.

pub mod episode;
pub mod events;
pub mod trainer;
pub mod win_rates;

#[cfg(test)]
pub(crate) mod fakes;

pub use episode::run_game;
pub use events::{EventSink, LogSink, TrainingEvent};
pub use trainer::{GameFactory, Trainer, TrainerConfig};
pub use win_rates::{WinRateRecord, WinRateSample};

//! # Ludo Trainer
//!
//! Trains a tabular Q-learning agent to play four-seat Ludo against
//! uniformly random opponents, evaluates its win rate as training
//! progresses, and saves the learned table and win-rate history.
//!
//! ## Modules
//!
//! - [`game`]: Seats, moves, observations, the `Simulator` trait and a Ludo simulator
//! - [`ai`]: Learning agent trait, Q-learning agent, random opponent policy
//! - [`training`]: Game loop, trainer and evaluation protocol, win-rate record, events
//! - [`results`]: Timestamped artifact files and the win-rate chart
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod results;
pub mod training;

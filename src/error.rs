use std::path::PathBuf;

use crate::game::Seat;

/// Moves the simulator refuses to apply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,

    #[error("piece {piece} cannot move with a roll of {dice} (legal: {legal:?})")]
    IllegalMove { piece: u8, dice: u8, legal: Vec<u8> },

    #[error("{seat} must move one of {legal:?}")]
    MustMove { seat: Seat, legal: Vec<u8> },
}

/// Errors that can occur while writing training results.
#[derive(Debug, thiserror::Error)]
pub enum ResultsError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur during training.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("agent selected illegal piece {piece} for {seat} (legal: {legal:?})")]
    IllegalMove { seat: Seat, piece: u8, legal: Vec<u8> },

    #[error("agent passed for {seat} although {legal:?} could move")]
    PassedWithLegalMoves { seat: Seat, legal: Vec<u8> },

    #[error("game reported a winner but none was recorded")]
    MissingWinner,

    #[error("simulator rejected move: {0}")]
    Game(#[from] GameError),

    #[error("results error: {0}")]
    Results(#[from] ResultsError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

//! Ludo game interface: seats, moves and observations, the `Simulator`
//! trait the trainer drives, and a compact simulator implementing it.

mod ludo;
mod seat;
mod simulator;
mod state;

pub use ludo::LudoGame;
pub use seat::{Seat, SEATS};
pub use simulator::Simulator;
pub use state::{Move, Observation, Pieces, GOAL, HOME, PIECES, START, TRACK_END};

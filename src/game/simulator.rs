use super::{Move, Observation, Seat, GOAL};
use crate::error::GameError;

/// Interface to a four-seat Ludo simulator.
///
/// The simulator owns the dice, the board and the turn order. The harness
/// only ever asks what the current seat sees and answers with a move.
pub trait Simulator {
    /// Observation for the seat whose turn it is, and that seat.
    fn get_observation(&mut self) -> (Observation, Seat);

    /// Submit the current seat's move. Returns the mover's view after the
    /// move was applied; the turn then passes on.
    fn answer_observation(&mut self, mv: Move) -> Result<Observation, GameError>;

    /// The first seat to bring all of its pieces home, once there is one.
    fn first_winner(&self) -> Option<Seat>;

    /// Relative position of the goal square.
    fn goal_index(&self) -> u8 {
        GOAL
    }
}

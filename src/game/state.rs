use std::fmt;

use super::SEATS;

/// Pieces each seat owns.
pub const PIECES: usize = 4;

/// Relative position of a piece that has not entered the track.
pub const HOME: u8 = 0;
/// Relative position a piece lands on when it leaves home.
pub const START: u8 = 1;
/// Last square of the shared track (relative).
pub const TRACK_END: u8 = 51;
/// Relative position of the goal; 52..GOAL is the seat's private home stretch.
pub const GOAL: u8 = 57;

/// Positions of one seat's pieces, relative to that seat's start square.
pub type Pieces = [u8; PIECES];

/// A move submitted to the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Move the piece with this index.
    Piece(u8),
    /// Pass: the seat has nothing it can move.
    NoMove,
}

impl Move {
    pub fn piece(self) -> Option<u8> {
        match self {
            Move::Piece(p) => Some(p),
            Move::NoMove => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Piece(p) => write!(f, "piece {p}"),
            Move::NoMove => write!(f, "no move"),
        }
    }
}

/// What a seat sees at its turn, or right after submitting its move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub dice: u8,
    /// Piece indices the seat may move with this roll. Empty after the move.
    pub legal_moves: Vec<u8>,
    pub own_pieces: Pieces,
    /// The other seats' pieces, in turn order after the observer, each
    /// relative to its owner's start square.
    pub enemy_pieces: [Pieces; SEATS - 1],
    pub player_is_a_winner: bool,
    pub there_is_a_winner: bool,
}

impl Observation {
    pub fn has_legal_move(&self) -> bool {
        !self.legal_moves.is_empty()
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        match mv {
            Move::Piece(p) => self.legal_moves.contains(&p),
            Move::NoMove => self.legal_moves.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(legal_moves: Vec<u8>) -> Observation {
        Observation {
            dice: 6,
            legal_moves,
            own_pieces: [HOME; PIECES],
            enemy_pieces: [[HOME; PIECES]; SEATS - 1],
            player_is_a_winner: false,
            there_is_a_winner: false,
        }
    }

    #[test]
    fn test_no_move_only_legal_without_options() {
        assert!(observation(vec![]).is_legal(Move::NoMove));
        assert!(!observation(vec![0, 2]).is_legal(Move::NoMove));
    }

    #[test]
    fn test_piece_legality() {
        let obs = observation(vec![0, 2]);
        assert!(obs.is_legal(Move::Piece(2)));
        assert!(!obs.is_legal(Move::Piece(1)));
    }

    #[test]
    fn test_move_display() {
        assert_eq!(Move::Piece(3).to_string(), "piece 3");
        assert_eq!(Move::NoMove.to_string(), "no move");
        assert_eq!(Move::NoMove.piece(), None);
    }
}

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Move, Observation, Pieces, Seat, Simulator, GOAL, HOME, PIECES, SEATS, START, TRACK_END};
use crate::error::GameError;

/// Squares on the shared ring.
const RING: usize = 52;
/// Distance between two neighbouring seats' start squares.
const SEAT_SPACING: usize = RING / SEATS;

/// A compact four-seat Ludo simulator.
///
/// Pieces leave home on a six, travel the shared track, then their seat's
/// private home stretch. A roll that overshoots the goal bounces back. Landing
/// on a single enemy piece on the shared track sends it home; landing on two
/// or more pieces of one enemy seat sends the mover home instead. Turns rotate
/// strictly and the first seat with every piece at the goal wins.
pub struct LudoGame {
    pieces: [Pieces; SEATS],
    current: Seat,
    dice: u8,
    rng: StdRng,
    first_winner: Option<Seat>,
}

impl LudoGame {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// A game whose dice are drawn from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        let mut game = LudoGame {
            pieces: [[HOME; PIECES]; SEATS],
            current: Seat::default(),
            dice: 1,
            rng,
            first_winner: None,
        };
        game.dice = game.roll();
        game
    }

    #[cfg(test)]
    pub(crate) fn with_position(pieces: [Pieces; SEATS], current: Seat, dice: u8) -> Self {
        LudoGame {
            pieces,
            current,
            dice,
            rng: StdRng::seed_from_u64(0),
            first_winner: None,
        }
    }

    pub fn current_seat(&self) -> Seat {
        self.current
    }

    pub fn pieces(&self, seat: Seat) -> &Pieces {
        &self.pieces[seat.index()]
    }

    /// Pieces the current seat may move with the current roll.
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.first_winner.is_some() {
            return Vec::new();
        }
        self.pieces[self.current.index()]
            .iter()
            .enumerate()
            .filter(|&(_, &pos)| pos != GOAL && (pos != HOME || self.dice == 6))
            .map(|(i, _)| i as u8)
            .collect()
    }

    fn roll(&mut self) -> u8 {
        self.rng.random_range(1..=6)
    }

    fn observe(&self, seat: Seat, legal_moves: Vec<u8>) -> Observation {
        Observation {
            dice: self.dice,
            legal_moves,
            own_pieces: self.pieces[seat.index()],
            enemy_pieces: std::array::from_fn(|i| self.pieces[seat.offset(i + 1).index()]),
            player_is_a_winner: self.first_winner == Some(seat),
            there_is_a_winner: self.first_winner.is_some(),
        }
    }

    fn move_piece(&mut self, seat: Seat, piece: usize) {
        let pos = self.pieces[seat.index()][piece];
        let target = if pos == HOME {
            START
        } else {
            let reach = pos + self.dice;
            if reach > GOAL {
                2 * GOAL - reach
            } else {
                reach
            }
        };
        self.pieces[seat.index()][piece] = target;

        if (START..=TRACK_END).contains(&target) {
            self.resolve_landing(seat, piece, target);
        }
    }

    fn resolve_landing(&mut self, seat: Seat, piece: usize, pos: u8) {
        let square = ring_square(seat, pos);
        let mut knocked = Vec::new();

        for step in 1..SEATS {
            let enemy = seat.offset(step);
            let hits: Vec<usize> = self.pieces[enemy.index()]
                .iter()
                .enumerate()
                .filter(|&(_, &q)| (START..=TRACK_END).contains(&q) && ring_square(enemy, q) == square)
                .map(|(i, _)| i)
                .collect();
            match hits.as_slice() {
                [] => {}
                [single] => knocked.push((enemy, *single)),
                _ => {
                    // blocked square
                    self.pieces[seat.index()][piece] = HOME;
                    return;
                }
            }
        }

        for (enemy, i) in knocked {
            self.pieces[enemy.index()][i] = HOME;
        }
    }
}

impl Default for LudoGame {
    fn default() -> Self {
        Self::new()
    }
}

fn ring_square(seat: Seat, pos: u8) -> usize {
    (pos as usize - 1 + SEAT_SPACING * seat.index()) % RING
}

impl Simulator for LudoGame {
    fn get_observation(&mut self) -> (Observation, Seat) {
        (self.observe(self.current, self.legal_moves()), self.current)
    }

    fn answer_observation(&mut self, mv: Move) -> Result<Observation, GameError> {
        if self.first_winner.is_some() {
            return Err(GameError::GameOver);
        }

        let seat = self.current;
        let legal = self.legal_moves();
        match mv {
            Move::NoMove if !legal.is_empty() => {
                return Err(GameError::MustMove { seat, legal });
            }
            Move::NoMove => {}
            Move::Piece(piece) => {
                if !legal.contains(&piece) {
                    return Err(GameError::IllegalMove {
                        piece,
                        dice: self.dice,
                        legal,
                    });
                }
                self.move_piece(seat, piece as usize);
            }
        }

        if self.pieces[seat.index()].iter().all(|&p| p == GOAL) {
            self.first_winner = Some(seat);
        }

        let after = self.observe(seat, Vec::new());
        self.current = seat.next();
        self.dice = self.roll();
        Ok(after)
    }

    fn first_winner(&self) -> Option<Seat> {
        self.first_winner
    }
}

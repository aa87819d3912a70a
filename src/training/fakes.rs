//! Scripted collaborators for exercising the trainer without real games.

use std::collections::VecDeque;
use std::path::Path;

use crate::ai::{HyperParams, LearningAgent};
use crate::error::{GameError, ResultsError};
use crate::game::{Move, Observation, Seat, Simulator, HOME, PIECES, SEATS};

pub(crate) fn seat(i: u8) -> Seat {
    Seat::new(i).unwrap()
}

fn observation(legal_moves: Vec<u8>, player_is_a_winner: bool, there_is_a_winner: bool) -> Observation {
    Observation {
        dice: 6,
        legal_moves,
        own_pieces: [HOME; PIECES],
        enemy_pieces: [[HOME; PIECES]; SEATS - 1],
        player_is_a_winner,
        there_is_a_winner,
    }
}

/// Plays a fixed list of turns, then declares `winner`.
pub(crate) struct ScriptedGame {
    turns: VecDeque<(Seat, Vec<u8>)>,
    winner: Seat,
    first_winner: Option<Seat>,
    after_end: Seat,
    pub submitted: Vec<(Seat, Move)>,
}

impl ScriptedGame {
    pub fn new(turns: Vec<(u8, Vec<u8>)>, winner: u8) -> Self {
        ScriptedGame {
            turns: turns.into_iter().map(|(s, legal)| (seat(s), legal)).collect(),
            winner: seat(winner),
            first_winner: None,
            after_end: seat(winner).next(),
            submitted: Vec::new(),
        }
    }

    /// A game that is already won, next observed by `observer`.
    pub fn finished(winner: u8, observer: u8) -> Self {
        ScriptedGame {
            turns: VecDeque::new(),
            winner: seat(winner),
            first_winner: Some(seat(winner)),
            after_end: seat(observer),
            submitted: Vec::new(),
        }
    }
}

impl Simulator for ScriptedGame {
    fn get_observation(&mut self) -> (Observation, Seat) {
        match self.turns.front() {
            Some((seat, legal)) => (observation(legal.clone(), false, false), *seat),
            None => {
                let observer = self.after_end;
                let won = self.first_winner == Some(observer);
                (observation(Vec::new(), won, true), observer)
            }
        }
    }

    fn answer_observation(&mut self, mv: Move) -> Result<Observation, GameError> {
        let Some((seat, legal)) = self.turns.pop_front() else {
            return Err(GameError::GameOver);
        };
        match mv {
            Move::NoMove if !legal.is_empty() => return Err(GameError::MustMove { seat, legal }),
            Move::Piece(piece) if !legal.contains(&piece) => {
                return Err(GameError::IllegalMove {
                    piece,
                    dice: 6,
                    legal,
                })
            }
            _ => {}
        }
        self.submitted.push((seat, mv));

        if self.turns.is_empty() {
            self.first_winner = Some(self.winner);
        }
        let won = self.first_winner == Some(seat);
        Ok(observation(Vec::new(), won, self.first_winner.is_some()))
    }

    fn first_winner(&self) -> Option<Seat> {
        self.first_winner
    }
}

/// One call into the agent's decision function.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Decision {
    pub legal_moves: Vec<u8>,
    pub terminal: bool,
    pub training: bool,
}

/// Agent that plays a fixed reply (or its first legal move) and counts
/// the learning updates it would have made.
#[derive(Default)]
pub(crate) struct ScriptedAgent {
    pub params: HyperParams,
    pub training: bool,
    pub reply: Option<Move>,
    pub decisions: Vec<Decision>,
    pub updates: usize,
    pub resets: usize,
    /// Make `save_table` fail after writing a partial file.
    pub fail_save: bool,
}

impl ScriptedAgent {
    pub fn replying(reply: Move) -> Self {
        ScriptedAgent {
            reply: Some(reply),
            ..Default::default()
        }
    }
}

impl LearningAgent for ScriptedAgent {
    fn hyperparams(&self) -> HyperParams {
        self.params
    }

    fn set_hyperparams(&mut self, params: HyperParams) {
        self.params = params;
    }

    fn set_training(&mut self, training: bool) {
        self.training = training;
    }

    fn is_training(&self) -> bool {
        self.training
    }

    fn decide(&mut self, obs: &Observation, _game: &dyn Simulator, terminal: bool) -> Move {
        self.decisions.push(Decision {
            legal_moves: obs.legal_moves.clone(),
            terminal,
            training: self.training,
        });
        if self.training {
            self.updates += 1;
        }
        self.reply.unwrap_or_else(|| {
            obs.legal_moves
                .first()
                .map_or(Move::NoMove, |&p| Move::Piece(p))
        })
    }

    fn reset_game(&mut self) {
        self.resets += 1;
    }

    fn save_table(&self, path: &Path) -> Result<(), ResultsError> {
        if self.fail_save {
            std::fs::write(path, b"{\"upd")?;
            return Err(std::io::Error::other("disk full").into());
        }
        let json = serde_json::json!({ "updates": self.updates });
        std::fs::write(path, serde_json::to_vec(&json)?)?;
        Ok(())
    }
}

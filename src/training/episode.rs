use crate::ai::{LearningAgent, RandomPolicy};
use crate::error::TrainingError;
use crate::game::{Move, Observation, Seat, Simulator};

/// Play one game to completion and return the winning seat.
///
/// The controlled seat's moves come from `agent`, which learns from them when
/// `is_training` is set; every other seat plays `opponent`. The agent's
/// per-game state is reset once the game is over, whether or not it finished
/// cleanly.
pub fn run_game<S, A>(
    game: &mut S,
    agent: &mut A,
    opponent: &mut RandomPolicy,
    controlled: Seat,
    is_training: bool,
) -> Result<Seat, TrainingError>
where
    S: Simulator,
    A: LearningAgent + ?Sized,
{
    agent.set_training(is_training);
    debug_assert_eq!(agent.is_training(), is_training);
    let winner = play_to_end(game, agent, opponent, controlled);
    agent.reset_game();
    winner
}

fn play_to_end<S, A>(
    game: &mut S,
    agent: &mut A,
    opponent: &mut RandomPolicy,
    controlled: Seat,
) -> Result<Seat, TrainingError>
where
    S: Simulator,
    A: LearningAgent + ?Sized,
{
    loop {
        let (obs, seat) = game.get_observation();

        if obs.there_is_a_winner {
            if seat == controlled {
                agent.decide(&obs, &*game, true);
            }
            break;
        }

        let mv = if seat == controlled {
            controlled_move(agent, &obs, &*game, seat)?
        } else {
            opponent.choose(&obs.legal_moves)
        };

        let after = game.answer_observation(mv)?;
        if after.there_is_a_winner {
            if seat == controlled {
                agent.decide(&after, &*game, true);
            }
            break;
        }
    }

    game.first_winner().ok_or(TrainingError::MissingWinner)
}

/// Ask the agent for a move, or pass without consulting it when nothing can move.
fn controlled_move<A>(
    agent: &mut A,
    obs: &Observation,
    game: &dyn Simulator,
    seat: Seat,
) -> Result<Move, TrainingError>
where
    A: LearningAgent + ?Sized,
{
    if !obs.has_legal_move() {
        return Ok(Move::NoMove);
    }

    match agent.decide(obs, game, false) {
        Move::NoMove => Err(TrainingError::PassedWithLegalMoves {
            seat,
            legal: obs.legal_moves.clone(),
        }),
        Move::Piece(piece) if !obs.legal_moves.contains(&piece) => Err(TrainingError::IllegalMove {
            seat,
            piece,
            legal: obs.legal_moves.clone(),
        }),
        mv => Ok(mv),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{HyperParams, QLearningAgent};
    use crate::game::{LudoGame, SEATS};
    use crate::training::fakes::{seat, ScriptedAgent, ScriptedGame};

    #[test]
    fn test_routes_seats_and_returns_winner() {
        let mut game = ScriptedGame::new(
            vec![(0, vec![1, 2]), (1, vec![0]), (2, vec![3]), (3, vec![])],
            2,
        );
        let mut agent = ScriptedAgent::default();
        let mut opponent = RandomPolicy::seeded(1);

        let winner = run_game(&mut game, &mut agent, &mut opponent, seat(0), true).unwrap();

        assert_eq!(winner, seat(2));
        assert_eq!(
            game.submitted,
            vec![
                (seat(0), Move::Piece(1)),
                (seat(1), Move::Piece(0)),
                (seat(2), Move::Piece(3)),
                (seat(3), Move::NoMove),
            ]
        );
        assert_eq!(agent.decisions.len(), 1);
        assert_eq!(agent.decisions[0].legal_moves, vec![1, 2]);
        assert!(agent.decisions[0].training);
        assert_eq!(agent.resets, 1);
    }

    #[test]
    fn test_controlled_seat_without_moves_passes_silently() {
        let mut game = ScriptedGame::new(vec![(1, vec![2]), (0, vec![]), (1, vec![0])], 1);
        let mut agent = ScriptedAgent::default();
        let mut opponent = RandomPolicy::seeded(1);

        run_game(&mut game, &mut agent, &mut opponent, seat(0), true).unwrap();

        assert!(game.submitted.contains(&(seat(0), Move::NoMove)));
        assert!(agent.decisions.is_empty());
        assert_eq!(agent.updates, 0);
    }

    #[test]
    fn test_agent_passing_with_legal_moves_is_an_error() {
        let mut game = ScriptedGame::new(vec![(0, vec![0, 1]), (1, vec![])], 1);
        let mut agent = ScriptedAgent::replying(Move::NoMove);
        let mut opponent = RandomPolicy::seeded(1);

        let err = run_game(&mut game, &mut agent, &mut opponent, seat(0), true).unwrap_err();

        assert!(matches!(err, TrainingError::PassedWithLegalMoves { legal, .. } if legal == vec![0, 1]));
        assert!(game.submitted.is_empty());
        assert_eq!(agent.resets, 1);
    }

    #[test]
    fn test_agent_choosing_illegal_piece_is_an_error() {
        let mut game = ScriptedGame::new(vec![(0, vec![0, 1]), (1, vec![])], 1);
        let mut agent = ScriptedAgent::replying(Move::Piece(3));
        let mut opponent = RandomPolicy::seeded(1);

        let err = run_game(&mut game, &mut agent, &mut opponent, seat(0), false).unwrap_err();
        assert!(matches!(err, TrainingError::IllegalMove { piece: 3, .. }));
    }

    #[test]
    fn test_winner_seen_by_controlled_seat_is_terminal() {
        let mut game = ScriptedGame::finished(3, 0);
        let mut agent = ScriptedAgent::default();
        let mut opponent = RandomPolicy::seeded(1);

        let winner = run_game(&mut game, &mut agent, &mut opponent, seat(0), true).unwrap();

        assert_eq!(winner, seat(3));
        assert_eq!(agent.decisions.len(), 1);
        assert!(agent.decisions[0].terminal);
        assert!(game.submitted.is_empty());
    }

    #[test]
    fn test_controlled_winning_move_reports_terminal() {
        let mut game = ScriptedGame::new(vec![(3, vec![]), (0, vec![2])], 0);
        let mut agent = ScriptedAgent::default();
        let mut opponent = RandomPolicy::seeded(1);

        let winner = run_game(&mut game, &mut agent, &mut opponent, seat(0), true).unwrap();

        assert_eq!(winner, seat(0));
        let terminal: Vec<bool> = agent.decisions.iter().map(|d| d.terminal).collect();
        assert_eq!(terminal, vec![false, true]);
    }

    #[test]
    fn test_evaluation_game_does_not_train() {
        let mut game = ScriptedGame::new(vec![(0, vec![0]), (1, vec![1])], 1);
        let mut agent = ScriptedAgent::default();
        let mut opponent = RandomPolicy::seeded(1);

        run_game(&mut game, &mut agent, &mut opponent, seat(0), false).unwrap();

        assert!(!agent.training);
        assert_eq!(agent.updates, 0);
        assert!(agent.decisions.iter().all(|d| !d.training));
    }

    #[test]
    fn test_training_flag_follows_each_game() {
        let mut agent = QLearningAgent::seeded(HyperParams::default(), 2);
        let mut opponent = RandomPolicy::seeded(3);

        run_game(&mut LudoGame::with_seed(1), &mut agent, &mut opponent, seat(0), true).unwrap();
        assert!(agent.is_training());

        let learned = agent.table().clone();
        run_game(&mut LudoGame::with_seed(2), &mut agent, &mut opponent, seat(0), false).unwrap();
        assert!(!agent.is_training());
        assert_eq!(agent.table(), &learned);
    }

    #[test]
    fn test_simulator_rejection_propagates() {
        struct Stuck;

        impl Simulator for Stuck {
            fn get_observation(&mut self) -> (Observation, Seat) {
                let (obs, _) = ScriptedGame::new(vec![(1, vec![0])], 1).get_observation();
                (obs, seat(1))
            }

            fn answer_observation(&mut self, _mv: Move) -> Result<Observation, crate::error::GameError> {
                Err(crate::error::GameError::GameOver)
            }

            fn first_winner(&self) -> Option<Seat> {
                None
            }
        }

        let mut agent = ScriptedAgent::default();
        let mut opponent = RandomPolicy::seeded(1);
        let err = run_game(&mut Stuck, &mut agent, &mut opponent, seat(0), true).unwrap_err();
        assert!(matches!(err, TrainingError::Game(_)));
    }

    #[test]
    fn test_real_game_terminates_with_valid_seat() {
        let mut agent = QLearningAgent::seeded(HyperParams::default(), 7);
        let mut opponent = RandomPolicy::seeded(8);

        for seed in 0..5 {
            let mut game = LudoGame::with_seed(seed);
            let winner = run_game(&mut game, &mut agent, &mut opponent, seat(0), true).unwrap();
            assert!(winner.index() < SEATS);
            assert_eq!(game.first_winner(), Some(winner));
        }
    }
}

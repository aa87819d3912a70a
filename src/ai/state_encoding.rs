use serde::{Deserialize, Serialize};

use crate::game::{Pieces, HOME, PIECES};

/// Squares in the private home stretch, goal excluded.
const STRETCH_LEN: u8 = 5;

/// Coarse location of a single piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    Home,
    /// First half of the shared track.
    Early,
    /// Second half of the shared track.
    Late,
    Stretch,
    Goal,
}

/// Table key: the zone of each own piece, in piece order.
pub type StateKey = [Zone; PIECES];

pub fn zone(pos: u8, goal: u8) -> Zone {
    let stretch_start = goal.saturating_sub(STRETCH_LEN);
    if pos == HOME {
        Zone::Home
    } else if pos >= goal {
        Zone::Goal
    } else if pos >= stretch_start {
        Zone::Stretch
    } else if pos <= stretch_start / 2 {
        Zone::Early
    } else {
        Zone::Late
    }
}

pub fn encode_state(own: &Pieces, goal: u8) -> StateKey {
    std::array::from_fn(|i| zone(own[i], goal))
}

/// Fraction of the total distance to the goal the pieces have covered, in [0, 1].
pub fn progress(own: &Pieces, goal: u8) -> f64 {
    let covered: u32 = own.iter().map(|&p| p.min(goal) as u32).sum();
    covered as f64 / (PIECES as u32 * goal as u32).max(1) as f64
}

use std::fmt;

use crate::error::ConfigError;

/// Number of seats at a Ludo table.
pub const SEATS: usize = 4;

/// One of the four player slots, indexed 0-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Seat(u8);

impl Seat {
    /// Get the seat at `index`, if it exists
    pub fn new(index: u8) -> Option<Seat> {
        if (index as usize) < SEATS {
            Some(Seat(index))
        } else {
            None
        }
    }

    /// Seat index as usize, for array access
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that plays after this one
    pub fn next(self) -> Seat {
        Seat((self.0 + 1) % SEATS as u8)
    }

    /// The seat `steps` places after this one
    pub fn offset(self, steps: usize) -> Seat {
        Seat(((self.index() + steps) % SEATS) as u8)
    }
}

impl Default for Seat {
    fn default() -> Self {
        Seat(0)
    }
}

impl TryFrom<u8> for Seat {
    type Error = ConfigError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Seat::new(index).ok_or_else(|| {
            ConfigError::Validation(format!("seat must be in 0..{SEATS}, got {index}"))
        })
    }
}

impl From<Seat> for u8 {
    fn from(seat: Seat) -> u8 {
        seat.0
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}", self.0)
    }
}

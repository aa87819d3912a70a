mod qlearning;

pub use qlearning::{QEntry, QLearningAgent, QTable};

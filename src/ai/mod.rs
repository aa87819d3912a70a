mod agent;
pub mod algorithms;
mod random;
pub mod state_encoding;

pub use agent::{HyperParams, LearningAgent};
pub use algorithms::{QLearningAgent, QTable};
pub use random::RandomPolicy;

pub mod approximator;
pub mod reward_model;

pub use approximator::Approximator;
pub use reward_model::RewardModel;

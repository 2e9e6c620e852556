pub mod counters;
pub mod state;

pub use counters::ReactionCounters;
pub use state::EngagementState;

// Analyzer module: requirement filtering and cross-source recommendation.

pub mod aggregator;
pub mod matcher;

pub use aggregator::Aggregator;
pub use matcher::{Rejection, RequirementMatcher, matches};

//! Error types for the trajectory grouping pipeline

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrajectoryError>;

/// Failures of the store, distance engine and clusterer
///
/// None of these are transient: they point at bad input or bad parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrajectoryError {
    #[error("malformed trajectory at index {index}: {reason}")]
    MalformedTrajectory { index: usize, reason: String },

    #[error("trajectory at index {index} has no points")]
    EmptyTrajectory { index: usize },

    #[error("not enough points to compute distance ({left} vs {right} points)")]
    InsufficientPoints { left: usize, right: usize },

    #[error("not enough trajectories: need at least 2, found {found}")]
    NotEnoughTrajectories { found: usize },

    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

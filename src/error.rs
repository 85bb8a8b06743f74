use thiserror::Error;

/// Errors raised while building a learning rate schedule.
///
/// Evaluating a schedule never fails, every variant here is produced at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// The policy name is not one of the recognized schedules.
    #[error("invalid policy `{value}`, expected one of: {}", .allowed.join(", "))]
    InvalidPolicy {
        /// The rejected name.
        value: String,
        /// The names that would have been accepted.
        allowed: &'static [&'static str],
    },

    /// The half-cycle length is zero or NaN, every evaluation would be NaN.
    #[error("stepsize must be a non-zero number, got {0}")]
    DegenerateStepsize(f32),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ScheduleError>;

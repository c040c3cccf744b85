use crate::timeseries::{Year, MAX_PERIODS};
use thiserror::Error;

/// Error type for invalid model configuration.
///
/// Numerical degeneracy during a run is not an error: non-finite values are
/// zeroed once the trajectory is complete.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiceError {
    #[error("Invalid time range: year_end ({year_end}) must be after year_start ({year_start})")]
    InvalidTimeRange { year_start: Year, year_end: Year },
    #[error("Invalid time step {0}: must be positive")]
    InvalidTimeStep(Year),
    #[error("Invalid period count {0}: a year axis holds between 1 and {max} periods with every year representable", max = MAX_PERIODS)]
    InvalidPeriodCount(usize),
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: String, reason: String },
    #[error("Missing exogenous value for `{variable}` in year {year}")]
    MissingExogenousData { variable: String, year: Year },
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type for `Result<T, DiceError>`.
pub type DiceResult<T> = Result<T, DiceError>;

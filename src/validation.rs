//! Validation helper functions for command-line filter arguments
//!
//! Unlike the URL decoder, which silently drops bad values, arguments typed
//! on the command line are rejected with a message naming the bad value.

use crate::deadline::Zone;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid year '{0}'. Use a comma-separated list of years (e.g., '2024,2025')")]
    InvalidYear(String),
    #[error("{0}")]
    UnknownTimezone(String),
}

/// Split a comma-separated argument, dropping blank items
///
/// # Arguments
/// * `value` - Argument text (e.g., "machine-learning, robotics")
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse and validate a comma-separated year list
///
/// # Returns
/// Result containing the years or the first invalid item
pub fn parse_year_list(value: &str) -> Result<Vec<i32>, ValidationError> {
    parse_list(value)
        .into_iter()
        .map(|y| y.parse::<i32>().map_err(|_| ValidationError::InvalidYear(y)))
        .collect()
}

/// Parse and validate a timezone argument
pub fn parse_zone(value: &str) -> Result<Zone, ValidationError> {
    value.parse::<Zone>().map_err(ValidationError::UnknownTimezone)
}

//! Errors raised while building business-day inputs.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur when validating dates, weekdays and calendars.
#[derive(Error, Debug)]
pub enum DayDiffError {
    /// A date that cannot be represented in the Gregorian calendar, or a
    /// holiday entry that does not parse.
    #[error("Invalid date: {0}")]
    InvalidDateInput(String),

    /// A weekday number outside the accepted domain
    #[error("Invalid weekday value: {0}")]
    InvalidWeekdayValue(u32),

    #[error("Invalid year range: {first} > {last}")]
    InvalidYearRange { first: i32, last: i32 },

    /// No business day could be found while rolling a date
    #[error("No business day within {limit} days of {from}")]
    NoBusinessDay { from: NaiveDate, limit: u32 },

    /// An environment variable that is set but not valid UTF-8
    #[error("Environment variable {0} is not valid unicode")]
    NotUnicode(&'static str),

    #[error("Invalid calendar configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Cannot read calendar configuration: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DayDiffError>;

//! Count business days between two dates, excluding chosen weekdays and
//! holiday dates.
//!
//! ```
//! use daydiff::{difference, from_ymd, HolidaySet, WeekdaySet};
//!
//! let start = from_ymd(2024, 1, 1).unwrap();
//! let end = from_ymd(2024, 1, 8).unwrap();
//! let holidays = HolidaySet::parse(&["2024-01-03"]).unwrap();
//! assert_eq!(difference(start, end, &WeekdaySet::weekend(), &holidays), 4);
//! ```

pub mod calendar;
pub mod config;
pub mod error;
pub mod holidays;
pub mod rules;
pub mod weekdays;

pub use calendar::{
    count_day_by_day, difference, from_ymd, parse_date, Calendar, CalendarDate, DifferenceRequest,
};
pub use config::CalendarConfig;
pub use error::{DayDiffError, Result};
pub use holidays::{HolidayEntry, HolidaySet};
pub use rules::{HolidayRule, Nth};
pub use weekdays::WeekdaySet;

//! Business-day counting between two dates.
//!
//! A day is a business day unless its weekday is in a [`WeekdaySet`] or the
//! date is in a [`HolidaySet`]. Counts cover the half-open interval
//! `(earlier, later]`: the earlier date is never counted, the later one is.

use crate::error::{DayDiffError, Result};
use crate::holidays::HolidaySet;
use crate::weekdays::WeekdaySet;
use chrono::{Datelike, NaiveDate};
use log::debug;

/// A date without time of day.
pub type CalendarDate = NaiveDate;

/// How far `next_business_day` and `prev_business_day` look before giving up.
pub const MAX_ROLL_DAYS: u32 = 3660;

pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<CalendarDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        DayDiffError::InvalidDateInput(format!("{:04}-{:02}-{:02}", year, month, day))
    })
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<CalendarDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| DayDiffError::InvalidDateInput(s.to_string()))
}

/// Count the business days in `(min(a, b), max(a, b)]`.
///
/// Full weeks contribute a fixed number of allowed weekdays each; the
/// remaining fewer-than-seven days are scanned, and holidays that land on an
/// otherwise allowed weekday are subtracted once each.
pub fn difference(
    a: CalendarDate,
    b: CalendarDate,
    weekdays: &WeekdaySet,
    holidays: &HolidaySet,
) -> u64 {
    let (lower, upper) = if a <= b { (a, b) } else { (b, a) };
    let Some(first) = lower.succ_opt() else {
        return 0;
    };
    if first > upper {
        return 0;
    }
    let span = (upper - lower).num_days() as u64;
    let allowed_per_week = u64::from(7 - weekdays.len());

    let mut count = span / 7 * allowed_per_week;
    let mut weekday = first.weekday();
    for _ in 0..span % 7 {
        if !weekdays.contains(weekday) {
            count += 1;
        }
        weekday = weekday.succ();
    }

    if !holidays.is_empty() {
        let on_allowed_days = holidays
            .dates_between(first, upper)
            .into_iter()
            .filter(|d| !weekdays.contains(d.weekday()))
            .count() as u64;
        count -= on_allowed_days;
    }
    count
}

/// Day-by-day reference for [`difference`]. Both must agree on every input;
/// this one is linear in the span.
pub fn count_day_by_day(
    a: CalendarDate,
    b: CalendarDate,
    weekdays: &WeekdaySet,
    holidays: &HolidaySet,
) -> u64 {
    let (lower, upper) = if a <= b { (a, b) } else { (b, a) };
    lower
        .iter_days()
        .skip(1)
        .take_while(|d| *d <= upper)
        .filter(|d| !weekdays.contains(d.weekday()) && !holidays.contains(*d))
        .count() as u64
}

/// The full input of one business-day count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifferenceRequest {
    pub start: CalendarDate,
    pub end: CalendarDate,
    pub excluded_weekdays: WeekdaySet,
    pub holidays: HolidaySet,
}

impl DifferenceRequest {
    pub fn new(
        start: CalendarDate,
        end: CalendarDate,
        excluded_weekdays: WeekdaySet,
        holidays: HolidaySet,
    ) -> DifferenceRequest {
        DifferenceRequest {
            start,
            end,
            excluded_weekdays,
            holidays,
        }
    }

    /// Build a request from raw values: `YYYY-MM-DD` dates, ISO weekday
    /// numbers (Monday = 1 .. Sunday = 7) and holiday entries.
    pub fn parse<S: AsRef<str>>(
        start: &str,
        end: &str,
        excluded_weekdays: &[u32],
        holidays: &[S],
    ) -> Result<DifferenceRequest> {
        Ok(DifferenceRequest {
            start: parse_date(start)?,
            end: parse_date(end)?,
            excluded_weekdays: WeekdaySet::from_iso_numbers(excluded_weekdays)?,
            holidays: HolidaySet::parse(holidays)?,
        })
    }

    pub fn difference(&self) -> u64 {
        difference(
            self.start,
            self.end,
            &self.excluded_weekdays,
            &self.holidays,
        )
    }
}

/// A reusable pair of weekday and holiday exclusions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calendar {
    weekdays: WeekdaySet,
    holidays: HolidaySet,
}

impl Calendar {
    pub fn new(weekdays: WeekdaySet, holidays: HolidaySet) -> Calendar {
        Calendar { weekdays, holidays }
    }

    /// Saturdays and Sundays off, no holidays
    pub fn weekend() -> Calendar {
        Calendar::new(WeekdaySet::weekend(), HolidaySet::new())
    }

    pub fn weekdays(&self) -> &WeekdaySet {
        &self.weekdays
    }

    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }

    /// Returns true if the date falls on an excluded weekday
    pub fn is_weekend(&self, date: CalendarDate) -> bool {
        self.weekdays.contains(date.weekday())
    }

    pub fn is_holiday(&self, date: CalendarDate) -> bool {
        self.holidays.contains(date)
    }

    pub fn is_business_day(&self, date: CalendarDate) -> bool {
        !self.is_weekend(date) && !self.is_holiday(date)
    }

    /// Business days in `(min(a, b), max(a, b)]`
    pub fn difference(&self, a: CalendarDate, b: CalendarDate) -> u64 {
        difference(a, b, &self.weekdays, &self.holidays)
    }

    /// First business day strictly after `date`
    pub fn next_business_day(&self, date: CalendarDate) -> Result<CalendarDate> {
        self.roll(date, NaiveDate::succ_opt)
    }

    /// Last business day strictly before `date`
    pub fn prev_business_day(&self, date: CalendarDate) -> Result<CalendarDate> {
        self.roll(date, NaiveDate::pred_opt)
    }

    fn roll(
        &self,
        from: CalendarDate,
        step: fn(&NaiveDate) -> Option<NaiveDate>,
    ) -> Result<CalendarDate> {
        let none = DayDiffError::NoBusinessDay {
            from,
            limit: MAX_ROLL_DAYS,
        };
        if self.weekdays.is_full() {
            debug!("every weekday is excluded, nothing to roll to from {}", from);
            return Err(none);
        }
        let mut date = from;
        for _ in 0..MAX_ROLL_DAYS {
            date = match step(&date) {
                Some(d) => d,
                None => break,
            };
            if self.is_business_day(date) {
                return Ok(date);
            }
        }
        Err(none)
    }
}

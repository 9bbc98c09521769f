//! Rule-based holiday calendars.
//! Rules are expanded once over a range of years into a plain [`Calendar`].

use crate::calendar::{from_ymd, Calendar};
use crate::error::{DayDiffError, Result};
use crate::holidays::HolidaySet;
use crate::weekdays::WeekdaySet;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use log::debug;
use serde::{Deserialize, Serialize};

/// Which occurrence of a weekday within a month
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nth {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

/// A rule producing non-business days.
///
/// `first` and `last` bound the years in which a rule applies (inclusively);
/// `None` leaves that side open.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum HolidayRule {
    /// Every occurrence of the weekday, e.g. `Sat`
    Weekly(Weekday),
    /// A single date
    Once(NaiveDate),
    /// The same month and day in every year, without weekend adjustment
    Yearly { month: u32, day: u32 },
    /// A fixed month and day, observed on the Friday before when it falls on
    /// a Saturday and on the Monday after when it falls on a Sunday.
    Observed {
        month: u32,
        day: u32,
        first: Option<i32>,
        last: Option<i32>,
    },
    /// Days relative to Easter Sunday, e.g. -2 for Good Friday
    Easter {
        offset: i32,
        first: Option<i32>,
        last: Option<i32>,
    },
    /// The nth (or last) weekday of a month, e.g. the first Monday in May
    NthWeekday {
        month: u32,
        weekday: Weekday,
        nth: Nth,
        first: Option<i32>,
        last: Option<i32>,
    },
}

impl Calendar {
    /// Expand `rules` for the years `first_year..=last_year`.
    pub fn from_rules(rules: &[HolidayRule], first_year: i32, last_year: i32) -> Result<Calendar> {
        if first_year > last_year {
            return Err(DayDiffError::InvalidYearRange {
                first: first_year,
                last: last_year,
            });
        }
        let mut weekdays = WeekdaySet::new();
        let mut holidays = HolidaySet::new();
        for rule in rules {
            rule.expand(first_year, last_year, &mut weekdays, &mut holidays)?;
        }
        debug!(
            "expanded {} holiday rules over {}..={}: {:?} weekly, {} holiday entries",
            rules.len(),
            first_year,
            last_year,
            weekdays,
            holidays.len()
        );
        Ok(Calendar::new(weekdays, holidays))
    }
}

impl HolidayRule {
    fn expand(
        &self,
        start: i32,
        end: i32,
        weekdays: &mut WeekdaySet,
        holidays: &mut HolidaySet,
    ) -> Result<()> {
        match self {
            HolidayRule::Weekly(weekday) => {
                weekdays.insert(*weekday);
            }
            HolidayRule::Once(date) => {
                if (start..=end).contains(&date.year()) {
                    holidays.insert(*date);
                }
            }
            HolidayRule::Yearly { month, day } => {
                holidays.insert_yearly(*month, *day)?;
            }
            HolidayRule::Observed {
                month,
                day,
                first,
                last,
            } => {
                for year in clip_years(start, end, *first, *last) {
                    let date = from_ymd(year, *month, *day)?;
                    let observed = match date.weekday() {
                        Weekday::Sat => date - Duration::days(1),
                        Weekday::Sun => date + Duration::days(1),
                        _ => date,
                    };
                    holidays.insert(observed);
                }
            }
            HolidayRule::Easter {
                offset,
                first,
                last,
            } => {
                for year in clip_years(start, end, *first, *last) {
                    let easter = computus::gregorian(year).map_err(|e| {
                        DayDiffError::InvalidDateInput(format!("Easter {}: {}", year, e))
                    })?;
                    let easter = from_ymd(easter.year, easter.month, easter.day)?;
                    let date = easter
                        .checked_add_signed(Duration::days(i64::from(*offset)))
                        .ok_or_else(|| {
                            DayDiffError::InvalidDateInput(format!(
                                "Easter {} {:+} days",
                                year, offset
                            ))
                        })?;
                    holidays.insert(date);
                }
            }
            HolidayRule::NthWeekday {
                month,
                weekday,
                nth,
                first,
                last,
            } => {
                for year in clip_years(start, end, *first, *last) {
                    holidays.insert(nth_weekday(year, *month, *weekday, *nth)?);
                }
            }
        }
        Ok(())
    }
}

fn clip_years(
    start: i32,
    end: i32,
    first: Option<i32>,
    last: Option<i32>,
) -> std::ops::RangeInclusive<i32> {
    let first = first.map_or(start, |y| y.max(start));
    let last = last.map_or(end, |y| y.min(end));
    first..=last
}

/// The `nth` occurrence of `weekday` in the given month
pub fn nth_weekday(year: i32, month: u32, weekday: Weekday, nth: Nth) -> Result<NaiveDate> {
    let first_of_month = from_ymd(year, month, 1)?;
    let target = weekday.num_days_from_monday();
    let weeks = match nth {
        Nth::First => 0,
        Nth::Second => 1,
        Nth::Third => 2,
        Nth::Fourth => 3,
        Nth::Last => {
            let last = last_day_of_month(first_of_month);
            let back = (7 + last.weekday().num_days_from_monday() - target) % 7;
            return Ok(last - Duration::days(i64::from(back)));
        }
    };
    let ahead = (7 + target - first_of_month.weekday().num_days_from_monday()) % 7;
    let date = first_of_month + Duration::days(i64::from(ahead + 7 * weeks));
    Ok(date)
}

/// Calculate the last day of the month containing `date`
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = (date.year(), date.month());
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    // Only the last representable December has no following month
    next_month
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

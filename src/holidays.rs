//! Explicit holiday dates, either pinned to a year or recurring every year.

use crate::calendar::parse_date;
use crate::error::{DayDiffError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A holiday entry as written in a holiday list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HolidayEntry {
    /// `YYYY-MM-DD`
    Date(NaiveDate),
    /// `*-MM-DD`, the same month and day in every year
    Yearly { month: u32, day: u32 },
}

impl HolidayEntry {
    /// Returns true if the entry falls on `date`
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            HolidayEntry::Date(d) => *d == date,
            HolidayEntry::Yearly { month, day } => date.month() == *month && date.day() == *day,
        }
    }
}

impl FromStr for HolidayEntry {
    type Err = DayDiffError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.strip_prefix("*-") {
            Some(month_day) => {
                let invalid = || DayDiffError::InvalidDateInput(s.to_string());
                let (month, day) = month_day.split_once('-').ok_or_else(invalid)?;
                let month: u32 = month.parse().map_err(|_| invalid())?;
                let day: u32 = day.parse().map_err(|_| invalid())?;
                // 2000 is a leap year, so Feb 29 is accepted here
                if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
                    return Err(invalid());
                }
                Ok(HolidayEntry::Yearly { month, day })
            }
            None => parse_date(s).map(HolidayEntry::Date),
        }
    }
}

impl fmt::Display for HolidayEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolidayEntry::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            HolidayEntry::Yearly { month, day } => write!(f, "*-{:02}-{:02}", month, day),
        }
    }
}

/// Dates excluded from a business-day count regardless of their weekday.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
    yearly: BTreeSet<(u32, u32)>,
}

impl HolidaySet {
    pub fn new() -> HolidaySet {
        HolidaySet::default()
    }

    /// Parse a list of `YYYY-MM-DD` and `*-MM-DD` entries. The first malformed
    /// entry aborts with [`DayDiffError::InvalidDateInput`].
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Result<HolidaySet> {
        let mut set = HolidaySet::new();
        for entry in entries {
            set.insert_entry(entry.as_ref().parse()?);
        }
        Ok(set)
    }

    pub fn insert(&mut self, date: NaiveDate) -> &mut Self {
        self.dates.insert(date);
        self
    }

    /// Add a month and day that is a holiday in every year
    pub fn insert_yearly(&mut self, month: u32, day: u32) -> Result<&mut Self> {
        if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
            return Err(DayDiffError::InvalidDateInput(format!(
                "*-{:02}-{:02}",
                month, day
            )));
        }
        self.yearly.insert((month, day));
        Ok(self)
    }

    pub fn insert_entry(&mut self, entry: HolidayEntry) -> &mut Self {
        match entry {
            HolidayEntry::Date(d) => {
                self.dates.insert(d);
            }
            HolidayEntry::Yearly { month, day } => {
                self.yearly.insert((month, day));
            }
        }
        self
    }

    pub fn extend(&mut self, other: &HolidaySet) -> &mut Self {
        self.dates.extend(other.dates.iter().copied());
        self.yearly.extend(other.yearly.iter().copied());
        self
    }

    /// Returns true if the specified day is a holiday
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date) || self.yearly.contains(&(date.month(), date.day()))
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() && self.yearly.is_empty()
    }

    /// Number of entries, counting a yearly entry once
    pub fn len(&self) -> usize {
        self.dates.len() + self.yearly.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = HolidayEntry> + '_ {
        self.dates
            .iter()
            .map(|d| HolidayEntry::Date(*d))
            .chain(
                self.yearly
                    .iter()
                    .map(|(month, day)| HolidayEntry::Yearly {
                        month: *month,
                        day: *day,
                    }),
            )
    }

    /// Every distinct holiday date in `first..=last`, in order. Yearly
    /// entries are materialised for each year of the range; a yearly entry
    /// that coincides with a pinned date is reported once.
    pub fn dates_between(&self, first: NaiveDate, last: NaiveDate) -> BTreeSet<NaiveDate> {
        let mut out: BTreeSet<NaiveDate> = BTreeSet::new();
        if first > last {
            return out;
        }
        out.extend(self.dates.range(first..=last).copied());
        if !self.yearly.is_empty() {
            for year in first.year()..=last.year() {
                for (month, day) in &self.yearly {
                    // Feb 29 has no date outside leap years
                    if let Some(d) = NaiveDate::from_ymd_opt(year, *month, *day) {
                        if d >= first && d <= last {
                            out.insert(d);
                        }
                    }
                }
            }
        }
        out
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        HolidaySet {
            dates: iter.into_iter().collect(),
            yearly: BTreeSet::new(),
        }
    }
}

impl TryFrom<Vec<String>> for HolidaySet {
    type Error = DayDiffError;

    fn try_from(entries: Vec<String>) -> Result<Self> {
        HolidaySet::parse(&entries)
    }
}

impl From<HolidaySet> for Vec<String> {
    fn from(set: HolidaySet) -> Self {
        set.entries().map(|e| e.to_string()).collect()
    }
}

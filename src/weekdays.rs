//! Sets of weekdays treated as non-business days.

use crate::error::{DayDiffError, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

const ALL_DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Weekdays excluded from a business-day count.
///
/// Stored as a bit mask indexed by days from Monday, so lookups are a single
/// shift and the set is `Copy`.
#[derive(Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(from = "Vec<Weekday>", into = "Vec<Weekday>")]
pub struct WeekdaySet {
    mask: u8,
}

impl WeekdaySet {
    /// An empty set: every day of the week is a business day
    pub fn new() -> WeekdaySet {
        WeekdaySet { mask: 0 }
    }

    /// Saturday and Sunday
    pub fn weekend() -> WeekdaySet {
        [Weekday::Sat, Weekday::Sun].into_iter().collect()
    }

    /// Build a set from ISO weekday numbers, Monday = 1 through Sunday = 7.
    pub fn from_iso_numbers(numbers: &[u32]) -> Result<WeekdaySet> {
        let mut set = WeekdaySet::new();
        for &n in numbers {
            if !(1..=7).contains(&n) {
                return Err(DayDiffError::InvalidWeekdayValue(n));
            }
            set.insert(ALL_DAYS[(n - 1) as usize]);
        }
        Ok(set)
    }

    /// Build a set from Sunday-based weekday numbers, Sunday = 0 through
    /// Saturday = 6 (the `%w` numbering of strftime).
    pub fn from_sunday_numbers(numbers: &[u32]) -> Result<WeekdaySet> {
        let mut set = WeekdaySet::new();
        for &n in numbers {
            if n > 6 {
                return Err(DayDiffError::InvalidWeekdayValue(n));
            }
            // 0 is Sunday, which sits at the end of the Monday-first table
            set.insert(ALL_DAYS[((n + 6) % 7) as usize]);
        }
        Ok(set)
    }

    pub fn insert(&mut self, weekday: Weekday) -> &mut Self {
        self.mask |= Self::bit(weekday);
        self
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.mask & Self::bit(weekday) != 0
    }

    /// The weekdays not in this set. Turns a list of allowed days into the
    /// excluded days and back.
    pub fn complement(&self) -> WeekdaySet {
        WeekdaySet {
            mask: !self.mask & 0x7f,
        }
    }

    pub fn len(&self) -> u32 {
        self.mask.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Returns true if every day of the week is excluded
    pub fn is_full(&self) -> bool {
        self.mask == 0x7f
    }

    /// Iterate over the members, Monday first
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        ALL_DAYS.into_iter().filter(move |d| self.contains(*d))
    }

    fn bit(weekday: Weekday) -> u8 {
        1 << weekday.num_days_from_monday()
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = WeekdaySet::new();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl From<Vec<Weekday>> for WeekdaySet {
    fn from(days: Vec<Weekday>) -> Self {
        days.into_iter().collect()
    }
}

impl From<WeekdaySet> for Vec<Weekday> {
    fn from(set: WeekdaySet) -> Self {
        set.iter().collect()
    }
}

impl fmt::Debug for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

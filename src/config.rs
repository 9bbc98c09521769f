//! JSON calendar configuration.

use crate::calendar::Calendar;
use crate::error::{DayDiffError, Result};
use crate::holidays::HolidaySet;
use crate::rules::HolidayRule;
use crate::weekdays::WeekdaySet;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Environment variable holding a JSON [`CalendarConfig`]
pub const CALENDAR_ENV: &str = "DAYDIFF_CALENDAR";

/// Years over which rules are expanded when a config does not say
pub const DEFAULT_FIRST_YEAR: i32 = 2000;
pub const DEFAULT_LAST_YEAR: i32 = 2050;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub first: i32,
    pub last: i32,
}

impl Default for YearRange {
    fn default() -> Self {
        YearRange {
            first: DEFAULT_FIRST_YEAR,
            last: DEFAULT_LAST_YEAR,
        }
    }
}

/// A calendar described as data. Every field may be omitted.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct CalendarConfig {
    pub excluded_weekdays: WeekdaySet,
    pub holidays: HolidaySet,
    pub rules: Vec<HolidayRule>,
    pub years: YearRange,
}

impl CalendarConfig {
    pub fn from_json_str(json: &str) -> Result<CalendarConfig> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CalendarConfig> {
        let path = path.as_ref();
        debug!("reading calendar configuration from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Read the configuration from `DAYDIFF_CALENDAR`. Returns `Ok(None)` when
    /// the variable is not set; a value that is not unicode is an error.
    pub fn from_env() -> Result<Option<CalendarConfig>> {
        match env::var(CALENDAR_ENV) {
            Ok(json) => {
                info!("using calendar configuration from {}", CALENDAR_ENV);
                Self::from_json_str(&json).map(Some)
            }
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(DayDiffError::NotUnicode(CALENDAR_ENV)),
        }
    }

    /// Merge the explicit exclusions with the expanded rules
    pub fn build(&self) -> Result<Calendar> {
        let mut weekdays = self.excluded_weekdays;
        let mut holidays = self.holidays.clone();
        if !self.rules.is_empty() {
            let expanded = Calendar::from_rules(&self.rules, self.years.first, self.years.last)?;
            for day in expanded.weekdays().iter() {
                weekdays.insert(day);
            }
            holidays.extend(expanded.holidays());
        }
        Ok(Calendar::new(weekdays, holidays))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::from_ymd;
    use chrono::Weekday;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn full_config() {
        init();
        let config = CalendarConfig::from_json_str(
            r#"{
                "excluded_weekdays": ["Sat", "Sun"],
                "holidays": ["2024-01-03", "*-12-25"],
                "rules": [{"Easter": {"offset": -2, "first": null, "last": null}}],
                "years": {"first": 2024, "last": 2024}
            }"#,
        )
        .unwrap();
        let cal = config.build().unwrap();
        assert!(cal.is_weekend(from_ymd(2024, 1, 6).unwrap()));
        assert!(cal.is_holiday(from_ymd(2024, 1, 3).unwrap()));
        assert!(cal.is_holiday(from_ymd(2031, 12, 25).unwrap()));
        // Good Friday 2024
        assert!(cal.is_holiday(from_ymd(2024, 3, 29).unwrap()));
        assert!(!cal.is_holiday(from_ymd(2025, 4, 18).unwrap()));
        assert_eq!(
            cal.difference(from_ymd(2024, 1, 1).unwrap(), from_ymd(2024, 1, 8).unwrap()),
            4
        );
    }

    #[test]
    fn empty_config() {
        init();
        let config = CalendarConfig::from_json_str("{}").unwrap();
        assert_eq!(config.years, YearRange::default());
        assert_eq!(config.build().unwrap(), Calendar::default());
    }

    #[test]
    fn rules_add_weekdays() {
        init();
        let config = CalendarConfig::from_json_str(
            r#"{"excluded_weekdays": ["Sun"], "rules": [{"Weekly": "Sat"}]}"#,
        )
        .unwrap();
        let cal = config.build().unwrap();
        assert_eq!(cal.weekdays(), &WeekdaySet::weekend());
        assert!(!cal.weekdays().contains(Weekday::Fri));
    }

    #[test]
    fn bad_configs() {
        init();
        assert!(matches!(
            CalendarConfig::from_json_str(r#"{"holidays": ["2023-02-30"]}"#),
            Err(DayDiffError::Config(_))
        ));
        assert!(matches!(
            CalendarConfig::from_json_str(r#"{"excluded_weekdays": ["Funday"]}"#),
            Err(DayDiffError::Config(_))
        ));
        let config = CalendarConfig::from_json_str(
            r#"{"rules": [{"Weekly": "Sat"}], "years": {"first": 2030, "last": 2020}}"#,
        )
        .unwrap();
        assert!(matches!(
            config.build(),
            Err(DayDiffError::InvalidYearRange { .. })
        ));
        assert!(matches!(
            CalendarConfig::from_path("/nonexistent/daydiff.json"),
            Err(DayDiffError::Io(_))
        ));
    }

    // All cases share one test since they mutate the same variable
    #[test]
    fn config_from_env() {
        init();
        env::set_var(CALENDAR_ENV, r#"{"holidays": ["*-01-01"]}"#);
        let config = CalendarConfig::from_env().unwrap().unwrap();
        env::remove_var(CALENDAR_ENV);
        assert!(config.build().unwrap().is_holiday(from_ymd(2030, 1, 1).unwrap()));
        assert!(CalendarConfig::from_env().unwrap().is_none());

        #[cfg(unix)]
        {
            use std::ffi::OsStr;
            use std::os::unix::ffi::OsStrExt;

            env::set_var(CALENDAR_ENV, OsStr::from_bytes(b"{\"holidays\": [\"\xff\"]}"));
            let result = CalendarConfig::from_env();
            env::remove_var(CALENDAR_ENV);
            assert!(matches!(
                result,
                Err(DayDiffError::NotUnicode(name)) if name == CALENDAR_ENV
            ));
        }
    }
}

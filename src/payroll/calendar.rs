//! Working-day calendar: weekend sets and holiday lists.

use chrono::{Datelike, NaiveDate, Weekday};
use strum_macros::{Display, EnumString};

/// Classification of a calendar date for rate purposes. Holiday takes
/// precedence over weekend when both apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum DayKind {
    Regular,
    Weekend,
    Holiday,
}

/// The jurisdiction's calendar. Weekend days are configurable (not every
/// jurisdiction rests on Saturday/Sunday); holidays are an externally
/// maintained date list and may be empty.
#[derive(Debug, Clone)]
pub struct WorkCalendar {
    pub weekend_days: Vec<Weekday>,
    pub holidays: Vec<NaiveDate>,
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self {
            weekend_days: vec![Weekday::Sat, Weekday::Sun],
            holidays: Vec::new(),
        }
    }
}

impl WorkCalendar {
    pub fn classify(&self, date: NaiveDate) -> DayKind {
        if self.holidays.contains(&date) {
            DayKind::Holiday
        } else if self.weekend_days.contains(&date.weekday()) {
            DayKind::Weekend
        } else {
            DayKind::Regular
        }
    }

    /// Number of non-weekend days in the given calendar month. Holidays
    /// are not excluded here: planned monthly hours are defined over the
    /// weekend-adjusted calendar only.
    pub fn working_days_in_month(&self, year: i32, month: u32) -> u32 {
        let Some(mut day) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return 0;
        };
        let mut count = 0;
        while day.month() == month {
            if !self.weekend_days.contains(&day.weekday()) {
                count += 1;
            }
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekday_is_regular() {
        let cal = WorkCalendar::default();
        // a Monday
        assert_eq!(cal.classify(date(2026, 3, 2)), DayKind::Regular);
    }

    #[test]
    fn saturday_and_sunday_are_weekend() {
        let cal = WorkCalendar::default();
        assert_eq!(cal.classify(date(2026, 3, 7)), DayKind::Weekend);
        assert_eq!(cal.classify(date(2026, 3, 8)), DayKind::Weekend);
    }

    #[test]
    fn holiday_beats_weekend() {
        let mut cal = WorkCalendar::default();
        cal.holidays.push(date(2026, 3, 8));
        assert_eq!(cal.classify(date(2026, 3, 8)), DayKind::Holiday);
    }

    #[test]
    fn custom_weekend_set() {
        let cal = WorkCalendar {
            weekend_days: vec![Weekday::Fri, Weekday::Sat],
            holidays: Vec::new(),
        };
        assert_eq!(cal.classify(date(2026, 3, 6)), DayKind::Weekend);
        assert_eq!(cal.classify(date(2026, 3, 8)), DayKind::Regular);
    }

    #[test]
    fn working_days_august_2025() {
        // August 2025: 31 days, 5 Saturdays and 5 Sundays
        assert_eq!(WorkCalendar::default().working_days_in_month(2025, 8), 21);
    }

    #[test]
    fn working_days_february_2026() {
        // February 2026: 28 days, 4 of each weekend day
        assert_eq!(WorkCalendar::default().working_days_in_month(2026, 2), 20);
    }

    #[test]
    fn working_days_ignore_holidays() {
        let mut cal = WorkCalendar::default();
        cal.holidays.push(date(2026, 2, 2));
        assert_eq!(cal.working_days_in_month(2026, 2), 20);
    }

    #[test]
    fn day_kind_round_trips_as_text() {
        assert_eq!(DayKind::Weekend.to_string(), "weekend");
        assert_eq!("holiday".parse::<DayKind>().unwrap(), DayKind::Holiday);
    }
}

//! Linear day/month/year calendar advanced one day per turn.
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::ConfigError;

/// Boundary crossed while advancing the calendar, in firing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockEvent {
    DayEnd(u32),
    MonthEnd(u32),
    YearEnd(u32),
}

pub type ClockEvents = SmallVec<[ClockEvent; 3]>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    date: NaiveDate,
    total_days: u32,
    total_months: u32,
    total_years: u32,
}

impl Clock {
    #[must_use]
    pub const fn new(start: NaiveDate) -> Self {
        Self {
            date: start,
            total_days: 0,
            total_months: 0,
            total_years: 0,
        }
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub const fn total_days(&self) -> u32 {
        self.total_days
    }

    #[must_use]
    pub const fn total_months(&self) -> u32 {
        self.total_months
    }

    #[must_use]
    pub const fn total_years(&self) -> u32 {
        self.total_years
    }

    /// Advance one day and report each boundary crossed.
    pub fn tick_day(&mut self) -> ClockEvents {
        let mut events = ClockEvents::new();
        let Some(next) = self.date.succ_opt() else {
            return events;
        };
        self.total_days += 1;
        events.push(ClockEvent::DayEnd(self.total_days));
        if next.month() != self.date.month() {
            self.total_months += 1;
            events.push(ClockEvent::MonthEnd(self.total_months));
        }
        if next.year() != self.date.year() {
            self.total_years += 1;
            events.push(ClockEvent::YearEnd(self.total_years));
        }
        self.date = next;
        events
    }

    /// Move to the first day of `month` in the current year without firing events.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMonth`] when `month` is outside `1..=12`.
    pub fn set_month(&mut self, month: u32) -> Result<(), ConfigError> {
        let date = NaiveDate::from_ymd_opt(self.date.year(), month, 1)
            .ok_or(ConfigError::InvalidMonth(month))?;
        self.date = date;
        Ok(())
    }

    /// Month name and day, for example `March 1, 1848`.
    #[must_use]
    pub fn long_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(year: i32, month: u32, day: u32) -> Clock {
        Clock::new(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }

    #[test]
    fn plain_day_fires_only_day_end() {
        let mut clock = clock(1848, 3, 1);
        assert_eq!(clock.tick_day().as_slice(), &[ClockEvent::DayEnd(1)]);
        assert_eq!(clock.long_date(), "March 2, 1848");
    }

    #[test]
    fn year_rollover_fires_all_three_in_order() {
        let mut clock = clock(1848, 12, 31);
        assert_eq!(
            clock.tick_day().as_slice(),
            &[
                ClockEvent::DayEnd(1),
                ClockEvent::MonthEnd(1),
                ClockEvent::YearEnd(1)
            ]
        );
        assert_eq!(clock.date().year(), 1849);
    }

    #[test]
    fn set_month_jumps_to_first_day() {
        let mut clock = clock(1848, 3, 1);
        clock.set_month(6).unwrap();
        assert_eq!(clock.long_date(), "June 1, 1848");
        assert_eq!(clock.set_month(13), Err(ConfigError::InvalidMonth(13)));
        assert_eq!(clock.total_days(), 0);
    }
}

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Flat day-index calendar: every calendar day counts, day 0 is the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCalendar {
    epoch: NaiveDate,
}

impl Default for ProjectCalendar {
    fn default() -> Self {
        Self::for_year(2025)
    }
}

impl ProjectCalendar {
    pub fn new(epoch: NaiveDate) -> Self {
        Self { epoch }
    }

    /// Calendar anchored on January 1st of `year`.
    ///
    /// Years outside chrono's supported range clamp to `NaiveDate::MIN`.
    pub fn for_year(year: i32) -> Self {
        let epoch = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
        Self { epoch }
    }

    pub fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    pub fn year(&self) -> i32 {
        self.epoch.year()
    }

    /// Signed number of whole days from the epoch to `date`.
    pub fn day_index(&self, date: NaiveDate) -> i64 {
        day_index(date, self.epoch)
    }

    /// Day index of an optional date; absent dates contribute 0.
    pub fn day_index_opt(&self, date: Option<NaiveDate>) -> i64 {
        date.map(|d| self.day_index(d)).unwrap_or(0)
    }

    /// Calendar date for a day offset. Saturates at chrono's date bounds.
    pub fn date_for_day(&self, day: i64) -> NaiveDate {
        Duration::try_days(day)
            .and_then(|offset| self.epoch.checked_add_signed(offset))
            .unwrap_or(if day < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
    }

    /// Render a day offset as weekday plus date, e.g. `Wed Jan 1, 2025`.
    pub fn format_day(&self, day: i64) -> String {
        self.date_for_day(day).format("%a %b %-d, %Y").to_string()
    }
}

/// Convert a calendar date to its day offset from `epoch`.
pub fn day_index(date: NaiveDate, epoch: NaiveDate) -> i64 {
    date.signed_duration_since(epoch).num_days()
}

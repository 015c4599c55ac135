//! Calendar-date helpers shared by the whole core.
//!
//! Every date the core reasons about is a [`NaiveDate`]: year, month and day,
//! with no time component and no time zone. Instants only appear at the edges
//! (the bounds reported in a month view).

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
  pub start: NaiveDate,
  pub end:   NaiveDate,
}

impl DateWindow {
  /// The window covering every day of `month` (1–12) in `year`.
  pub fn month(month: u32, year: i32) -> Result<Self> {
    if !(1..=12).contains(&month) {
      return Err(Error::InvalidArgument(format!(
        "month must be between 1 and 12, got {month}"
      )));
    }
    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
      Error::InvalidArgument(format!("year {year} is out of range"))
    })?;
    let end = last_day_of_month(start).ok_or_else(|| {
      Error::InvalidArgument(format!("year {year} is out of range"))
    })?;
    Ok(Self { start, end })
  }

  pub fn contains(&self, date: NaiveDate) -> bool {
    self.start <= date && date <= self.end
  }

  /// Midnight UTC at the start of the first day.
  pub fn first_instant(&self) -> DateTime<Utc> {
    self.start.and_time(NaiveTime::MIN).and_utc()
  }

  /// The last millisecond of the final day, UTC.
  pub fn last_instant(&self) -> DateTime<Utc> {
    let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
      .unwrap_or(NaiveTime::MIN);
    self.end.and_time(end_of_day).and_utc()
  }
}

/// First day of the month following `date`'s month.
pub fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
  let (year, month) = if date.month() == 12 {
    (date.year().checked_add(1)?, 1)
  } else {
    (date.year(), date.month() + 1)
  };
  NaiveDate::from_ymd_opt(year, month, 1)
}

/// Last day of `date`'s month.
pub fn last_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
  first_of_next_month(date)?.pred_opt()
}

/// Day of week numbered from Sunday = 0 through Saturday = 6.
pub fn weekday_from_sunday(date: NaiveDate) -> u8 {
  date.weekday().num_days_from_sunday() as u8
}

/// `date + days`, or `None` past the end of the representable range.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
  date.checked_add_signed(Duration::days(days))
}

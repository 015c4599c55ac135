//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Calendar dates are stored as `YYYY-MM-DD`, so string comparison in SQL is
//! date comparison. Timestamps are RFC 3339 strings, times of day `HH:MM`.

use agenda_core::{
  activity::{Activity, RecurrencePattern},
  birthday::BirthdayPerson,
  time_of_day::TimeOfDay,
};
use chrono::{DateTime, NaiveDate, Utc};

use crate::{Error, Result};

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

/// Birthdates may have been written as full timestamps by other tools. The
/// calendar day is taken in UTC so the result never depends on the server's
/// local zone.
pub fn decode_birthdate(s: &str) -> Result<NaiveDate> {
  if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
    return Ok(date);
  }
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc).date_naive())
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── TimeOfDay ───────────────────────────────────────────────────────────────

pub fn encode_time(t: TimeOfDay) -> String { t.to_string() }

pub fn decode_time(s: &str) -> Result<TimeOfDay> {
  s.parse()
    .map_err(|_| Error::InvalidColumn(format!("time of day {s:?}")))
}

// ─── RecurrencePattern ───────────────────────────────────────────────────────

pub fn encode_pattern(p: RecurrencePattern) -> &'static str { p.discriminant() }

pub fn decode_pattern(s: &str) -> Result<RecurrencePattern> {
  RecurrencePattern::from_discriminant(s).ok_or_else(|| {
    agenda_core::Error::ConsistencyViolation(format!(
      "unknown recurrence pattern {s:?}"
    ))
    .into()
  })
}

// ─── Small integers ──────────────────────────────────────────────────────────

fn decode_small(column: &str, v: Option<i64>) -> Result<Option<u8>> {
  v.map(|n| {
    u8::try_from(n).map_err(|_| Error::InvalidColumn(format!("{column} = {n}")))
  })
  .transpose()
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawActivity`].
pub const ACTIVITY_COLUMNS: &str = "id, title, description, date, start_time, end_time,
  color, icon, active, created_by, created_at, updated_at,
  is_recurring, recurrence_pattern, recurrence_end_date, weekday,
  nth_occurrence, parent_id";

/// Raw values read directly from an `activities` row.
pub struct RawActivity {
  pub id:                  i64,
  pub title:               String,
  pub description:         Option<String>,
  pub date:                String,
  pub start_time:          Option<String>,
  pub end_time:            Option<String>,
  pub color:               String,
  pub icon:                String,
  pub active:              bool,
  pub created_by:          i64,
  pub created_at:          String,
  pub updated_at:          String,
  pub is_recurring:        bool,
  pub recurrence_pattern:  String,
  pub recurrence_end_date: Option<String>,
  pub weekday:             Option<i64>,
  pub nth_occurrence:      Option<i64>,
  pub parent_id:           Option<i64>,
}

impl RawActivity {
  /// Read a row selected with [`ACTIVITY_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                  row.get(0)?,
      title:               row.get(1)?,
      description:         row.get(2)?,
      date:                row.get(3)?,
      start_time:          row.get(4)?,
      end_time:            row.get(5)?,
      color:               row.get(6)?,
      icon:                row.get(7)?,
      active:              row.get(8)?,
      created_by:          row.get(9)?,
      created_at:          row.get(10)?,
      updated_at:          row.get(11)?,
      is_recurring:        row.get(12)?,
      recurrence_pattern:  row.get(13)?,
      recurrence_end_date: row.get(14)?,
      weekday:             row.get(15)?,
      nth_occurrence:      row.get(16)?,
      parent_id:           row.get(17)?,
    })
  }

  pub fn into_activity(self) -> Result<Activity> {
    Ok(Activity {
      id:                  self.id,
      title:               self.title,
      description:         self.description,
      date:                decode_date(&self.date)?,
      start_time:          self.start_time.as_deref().map(decode_time).transpose()?,
      end_time:            self.end_time.as_deref().map(decode_time).transpose()?,
      color:               self.color,
      icon:                self.icon,
      active:              self.active,
      created_by:          self.created_by,
      created_at:          decode_dt(&self.created_at)?,
      updated_at:          decode_dt(&self.updated_at)?,
      is_recurring:        self.is_recurring,
      recurrence_pattern:  decode_pattern(&self.recurrence_pattern)?,
      recurrence_end_date: self
        .recurrence_end_date
        .as_deref()
        .map(decode_date)
        .transpose()?,
      weekday:             decode_small("weekday", self.weekday)?,
      nth_occurrence:      decode_small("nth_occurrence", self.nth_occurrence)?,
      parent_id:           self.parent_id,
    })
  }
}

/// Raw values read directly from a `users` row.
pub struct RawUser {
  pub id:        i64,
  pub name:      String,
  pub photo_url: Option<String>,
  pub birthdate: String,
}

impl RawUser {
  pub fn into_person(self) -> Result<BirthdayPerson> {
    Ok(BirthdayPerson {
      user_id:   self.id,
      name:      self.name,
      photo_url: self.photo_url,
      birthdate: decode_birthdate(&self.birthdate)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn birthdate_accepts_plain_and_timestamp_forms() {
    let expected = NaiveDate::from_ymd_opt(1995, 7, 22).unwrap();
    assert_eq!(decode_birthdate("1995-07-22").unwrap(), expected);
    assert_eq!(decode_birthdate("1995-07-22T00:00:00Z").unwrap(), expected);
    assert_eq!(decode_birthdate("1995-07-21T22:00:00-03:00").unwrap(), expected);
    assert!(decode_birthdate("22/07/1995").is_err());
  }

  #[test]
  fn unknown_pattern_is_consistency_violation() {
    let err = decode_pattern("DAILY").unwrap_err();
    assert!(matches!(
      err,
      Error::Core(agenda_core::Error::ConsistencyViolation(_))
    ));
  }
}

//! Birthday pseudo-events derived from the user directory.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{activity::UserId, calendar::last_day_of_month};

/// A directory entry that has a birthdate on file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayPerson {
  pub user_id:   UserId,
  pub name:      String,
  pub photo_url: Option<String>,
  pub birthdate: NaiveDate,
}

/// A user's birthday as it falls in the requested year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayEvent {
  pub user_id:   UserId,
  pub name:      String,
  pub photo_url: Option<String>,
  pub date:      NaiveDate,
}

/// One event per person whose birthdate falls in `month`, dated in `year`.
///
/// A 29 February birthdate is shown on the 28th in a common year.
pub fn derive(month: u32, year: i32, people: &[BirthdayPerson]) -> Vec<BirthdayEvent> {
  people
    .iter()
    .filter(|p| p.birthdate.month() == month)
    .filter_map(|p| {
      let date = birthday_in_year(p.birthdate, year)?;
      Some(BirthdayEvent {
        user_id: p.user_id,
        name: p.name.clone(),
        photo_url: p.photo_url.clone(),
        date,
      })
    })
    .collect()
}

fn birthday_in_year(birthdate: NaiveDate, year: i32) -> Option<NaiveDate> {
  NaiveDate::from_ymd_opt(year, birthdate.month(), birthdate.day()).or_else(|| {
    let first = NaiveDate::from_ymd_opt(year, birthdate.month(), 1)?;
    last_day_of_month(first)
  })
}

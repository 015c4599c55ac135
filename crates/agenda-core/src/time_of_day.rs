//! Wall-clock time of an activity, normalised to `HH:MM`.

use std::{fmt, str::FromStr};

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::Error;

/// A minute-precision time of day.
///
/// Always rendered as zero-padded `HH:MM`, so ordering values is the same as
/// ordering their rendered strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
  pub fn new(hour: u32, minute: u32) -> Option<Self> {
    NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
  }

  pub fn hour(&self) -> u32 { self.0.hour() }

  pub fn minute(&self) -> u32 { self.0.minute() }
}

impl fmt::Display for TimeOfDay {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:02}:{:02}", self.hour(), self.minute())
  }
}

impl FromStr for TimeOfDay {
  type Err = Error;

  /// Accepts `H:MM`, `HH:MM` and `HH:MM:SS`; seconds are dropped.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || Error::InvalidArgument(format!("invalid time of day: {s:?}"));

    let mut parts = s.trim().split(':');
    let hour = parts.next().ok_or_else(invalid)?;
    let minute = parts.next().ok_or_else(invalid)?;
    if let Some(second) = parts.next()
      && second.parse::<u32>().map_or(true, |sec| sec > 59)
    {
      return Err(invalid());
    }
    if parts.next().is_some() || minute.len() != 2 || hour.is_empty() {
      return Err(invalid());
    }

    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;
    Self::new(hour, minute).ok_or_else(invalid)
  }
}

impl Serialize for TimeOfDay {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for TimeOfDay {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(de::Error::custom)
  }
}

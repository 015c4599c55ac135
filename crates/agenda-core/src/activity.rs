//! Activities: stored one-off events and the root definitions of recurring
//! series.
//!
//! A single record type covers both: a root has `is_recurring = true` and no
//! parent, a materialised child instance points at its root through
//! `parent_id`, and anything else is a plain one-off event.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{patch::Patch, time_of_day::TimeOfDay};

pub type ActivityId = i64;
pub type UserId = i64;

pub const DEFAULT_COLOR: &str = "#3B82F6";
pub const DEFAULT_ICON: &str = "Calendar";

// ─── Recurrence pattern ──────────────────────────────────────────────────────

/// How a recurring root repeats.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecurrencePattern {
  #[default]
  None,
  Weekly,
  Biweekly,
  /// Same day of month, every month.
  Monthly,
  /// The n-th given weekday of every month (e.g. second Tuesday).
  MonthlyNthWeekday,
}

impl RecurrencePattern {
  /// The string stored in the database and sent over the wire.
  pub fn discriminant(&self) -> &'static str {
    match self {
      Self::None => "NONE",
      Self::Weekly => "WEEKLY",
      Self::Biweekly => "BIWEEKLY",
      Self::Monthly => "MONTHLY",
      Self::MonthlyNthWeekday => "MONTHLY_NTH_WEEKDAY",
    }
  }

  pub fn from_discriminant(s: &str) -> Option<Self> {
    match s {
      "NONE" => Some(Self::None),
      "WEEKLY" => Some(Self::Weekly),
      "BIWEEKLY" => Some(Self::Biweekly),
      "MONTHLY" => Some(Self::Monthly),
      "MONTHLY_NTH_WEEKDAY" => Some(Self::MonthlyNthWeekday),
      _ => None,
    }
  }
}

// ─── Activity ────────────────────────────────────────────────────────────────

/// A persisted activity as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
  pub id:                  ActivityId,
  #[serde(rename = "titulo")]
  pub title:               String,
  #[serde(rename = "descripcion")]
  pub description:         Option<String>,
  /// Anchor date; for a recurring root, the first occurrence.
  #[serde(rename = "fecha")]
  pub date:                NaiveDate,
  #[serde(rename = "hora")]
  pub start_time:          Option<TimeOfDay>,
  #[serde(rename = "horaFin")]
  pub end_time:            Option<TimeOfDay>,
  pub color:               String,
  #[serde(rename = "icono")]
  pub icon:                String,
  #[serde(rename = "activo")]
  pub active:              bool,
  #[serde(rename = "creadoPorId")]
  pub created_by:          UserId,
  #[serde(rename = "createdAt")]
  pub created_at:          DateTime<Utc>,
  #[serde(rename = "updatedAt")]
  pub updated_at:          DateTime<Utc>,

  // ── Recurrence ──────────────────────────────────────────────────────────
  #[serde(rename = "esRecurrente")]
  pub is_recurring:        bool,
  #[serde(rename = "patronRecurrencia")]
  pub recurrence_pattern:  RecurrencePattern,
  #[serde(rename = "fechaFinRecurrencia")]
  pub recurrence_end_date: Option<NaiveDate>,
  /// 0 = Sunday … 6 = Saturday.
  #[serde(rename = "diaSemana")]
  pub weekday:             Option<u8>,
  /// 1-based ordinal of `weekday` within the month.
  #[serde(rename = "semanaDelMes")]
  pub nth_occurrence:      Option<u8>,
  /// Set on materialised child instances; points at the series root.
  #[serde(rename = "actividadPadreId")]
  pub parent_id:           Option<ActivityId>,
}

impl Activity {
  /// A root is the definition of a recurring series.
  pub fn is_root(&self) -> bool { self.is_recurring && self.parent_id.is_none() }

  /// The id of the series this activity belongs to.
  pub fn series_root_id(&self) -> ActivityId { self.parent_id.unwrap_or(self.id) }
}

// ─── ActivityDraft ───────────────────────────────────────────────────────────

/// Fully-resolved input to [`crate::store::ActivityStore::create_activity`].
/// Ids and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityDraft {
  pub title:               String,
  pub description:         Option<String>,
  pub date:                NaiveDate,
  pub start_time:          Option<TimeOfDay>,
  pub end_time:            Option<TimeOfDay>,
  pub color:               String,
  pub icon:                String,
  pub active:              bool,
  pub created_by:          UserId,
  pub is_recurring:        bool,
  pub recurrence_pattern:  RecurrencePattern,
  pub recurrence_end_date: Option<NaiveDate>,
  pub weekday:             Option<u8>,
  pub nth_occurrence:      Option<u8>,
  pub parent_id:           Option<ActivityId>,
}

// ─── NewActivity ─────────────────────────────────────────────────────────────

/// Caller input for creating an activity. Omitted presentation and
/// recurrence fields take their defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct NewActivity {
  #[serde(rename = "titulo")]
  pub title:               String,
  #[serde(rename = "descripcion", default)]
  pub description:         Option<String>,
  #[serde(rename = "fecha")]
  pub date:                NaiveDate,
  #[serde(rename = "hora", default)]
  pub start_time:          Option<TimeOfDay>,
  #[serde(rename = "horaFin", default)]
  pub end_time:            Option<TimeOfDay>,
  #[serde(default)]
  pub color:               Option<String>,
  #[serde(rename = "icono", default)]
  pub icon:                Option<String>,
  #[serde(rename = "esRecurrente", default)]
  pub is_recurring:        Option<bool>,
  #[serde(rename = "patronRecurrencia", default)]
  pub recurrence_pattern:  Option<RecurrencePattern>,
  #[serde(rename = "fechaFinRecurrencia", default)]
  pub recurrence_end_date: Option<NaiveDate>,
  #[serde(rename = "diaSemana", default)]
  pub weekday:             Option<u8>,
  #[serde(rename = "semanaDelMes", default)]
  pub nth_occurrence:      Option<u8>,
  #[serde(rename = "actividadPadreId", default)]
  pub parent_id:           Option<ActivityId>,
}

impl NewActivity {
  /// Convenience constructor for a one-off activity with every optional
  /// field left to its default.
  pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
    Self {
      title: title.into(),
      description: None,
      date,
      start_time: None,
      end_time: None,
      color: None,
      icon: None,
      is_recurring: None,
      recurrence_pattern: None,
      recurrence_end_date: None,
      weekday: None,
      nth_occurrence: None,
      parent_id: None,
    }
  }

  /// Resolve defaults and attach the creator.
  pub fn into_draft(self, created_by: UserId) -> ActivityDraft {
    ActivityDraft {
      title:               self.title,
      description:         self.description,
      date:                self.date,
      start_time:          self.start_time,
      end_time:            self.end_time,
      color:               self.color.unwrap_or_else(|| DEFAULT_COLOR.to_owned()),
      icon:                self.icon.unwrap_or_else(|| DEFAULT_ICON.to_owned()),
      active:              true,
      created_by,
      is_recurring:        self.is_recurring.unwrap_or(false),
      recurrence_pattern:  self.recurrence_pattern.unwrap_or_default(),
      recurrence_end_date: self.recurrence_end_date,
      weekday:             self.weekday,
      nth_occurrence:      self.nth_occurrence,
      parent_id:           self.parent_id,
    }
  }
}

// ─── ActivityPatch ───────────────────────────────────────────────────────────

/// A partial update. `Option` fields cannot be cleared, so `None` (absent or
/// `null`) keeps the old value; [`Patch`] fields distinguish absent from
/// `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityPatch {
  #[serde(rename = "titulo", default)]
  pub title:               Option<String>,
  #[serde(rename = "descripcion", default)]
  pub description:         Patch<String>,
  #[serde(rename = "fecha", default)]
  pub date:                Option<NaiveDate>,
  #[serde(rename = "hora", default)]
  pub start_time:          Patch<TimeOfDay>,
  #[serde(rename = "horaFin", default)]
  pub end_time:            Patch<TimeOfDay>,
  #[serde(default)]
  pub color:               Option<String>,
  #[serde(rename = "icono", default)]
  pub icon:                Option<String>,
  #[serde(rename = "activo", default)]
  pub active:              Option<bool>,
  #[serde(rename = "esRecurrente", default)]
  pub is_recurring:        Option<bool>,
  #[serde(rename = "patronRecurrencia", default)]
  pub recurrence_pattern:  Option<RecurrencePattern>,
  #[serde(rename = "fechaFinRecurrencia", default)]
  pub recurrence_end_date: Patch<NaiveDate>,
  #[serde(rename = "diaSemana", default)]
  pub weekday:             Patch<u8>,
  #[serde(rename = "semanaDelMes", default)]
  pub nth_occurrence:      Patch<u8>,
}

impl ActivityPatch {
  /// Write every field this patch touches into `activity`.
  pub fn apply_to(self, activity: &mut Activity) {
    if let Some(title) = self.title {
      activity.title = title;
    }
    activity.description = self.description.apply(activity.description.take());
    if let Some(date) = self.date {
      activity.date = date;
    }
    activity.start_time = self.start_time.apply(activity.start_time);
    activity.end_time = self.end_time.apply(activity.end_time);
    if let Some(color) = self.color {
      activity.color = color;
    }
    if let Some(icon) = self.icon {
      activity.icon = icon;
    }
    if let Some(active) = self.active {
      activity.active = active;
    }
    if let Some(is_recurring) = self.is_recurring {
      activity.is_recurring = is_recurring;
    }
    if let Some(pattern) = self.recurrence_pattern {
      activity.recurrence_pattern = pattern;
    }
    activity.recurrence_end_date =
      self.recurrence_end_date.apply(activity.recurrence_end_date);
    activity.weekday = self.weekday.apply(activity.weekday);
    activity.nth_occurrence = self.nth_occurrence.apply(activity.nth_occurrence);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> Activity {
    let now = Utc::now();
    Activity {
      id:                  7,
      title:               "Reunión de jóvenes".into(),
      description:         Some("Salón principal".into()),
      date:                NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(),
      start_time:          "19:00".parse().ok(),
      end_time:            "21:00".parse().ok(),
      color:               DEFAULT_COLOR.into(),
      icon:                DEFAULT_ICON.into(),
      active:              true,
      created_by:          1,
      created_at:          now,
      updated_at:          now,
      is_recurring:        true,
      recurrence_pattern:  RecurrencePattern::Weekly,
      recurrence_end_date: NaiveDate::from_ymd_opt(2026, 6, 30),
      weekday:             None,
      nth_occurrence:      None,
      parent_id:           None,
    }
  }

  #[test]
  fn new_activity_defaults() {
    let input: NewActivity =
      serde_json::from_str(r#"{"titulo":"Culto","fecha":"2026-03-01"}"#).unwrap();
    let draft = input.into_draft(42);

    assert_eq!(draft.color, "#3B82F6");
    assert_eq!(draft.icon, "Calendar");
    assert_eq!(draft.recurrence_pattern, RecurrencePattern::None);
    assert!(!draft.is_recurring);
    assert!(draft.active);
    assert_eq!(draft.created_by, 42);
  }

  #[test]
  fn omitted_end_date_is_preserved() {
    let mut activity = sample();
    let patch: ActivityPatch = serde_json::from_str(r#"{"titulo":"Nuevo"}"#).unwrap();
    patch.apply_to(&mut activity);

    assert_eq!(activity.title, "Nuevo");
    assert_eq!(activity.recurrence_end_date, NaiveDate::from_ymd_opt(2026, 6, 30));
    assert_eq!(activity.description.as_deref(), Some("Salón principal"));
  }

  #[test]
  fn null_end_date_clears_it() {
    let mut activity = sample();
    let patch: ActivityPatch =
      serde_json::from_str(r#"{"fechaFinRecurrencia":null,"hora":null}"#).unwrap();
    patch.apply_to(&mut activity);

    assert_eq!(activity.recurrence_end_date, None);
    assert_eq!(activity.start_time, None);
    assert_eq!(activity.end_time, "21:00".parse().ok());
  }

  #[test]
  fn pattern_wire_names() {
    assert_eq!(
      serde_json::to_string(&RecurrencePattern::MonthlyNthWeekday).unwrap(),
      "\"MONTHLY_NTH_WEEKDAY\""
    );
    for p in [
      RecurrencePattern::None,
      RecurrencePattern::Weekly,
      RecurrencePattern::Biweekly,
      RecurrencePattern::Monthly,
      RecurrencePattern::MonthlyNthWeekday,
    ] {
      assert_eq!(RecurrencePattern::from_discriminant(p.discriminant()), Some(p));
    }
    assert_eq!(RecurrencePattern::from_discriminant("DAILY"), None);
  }

  #[test]
  fn series_root_resolution() {
    let mut child = sample();
    child.id = 9;
    child.parent_id = Some(7);
    assert_eq!(child.series_root_id(), 7);
    assert!(!child.is_root());
    assert_eq!(sample().series_root_id(), 7);
    assert!(sample().is_root());
  }
}

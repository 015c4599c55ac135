//! The single event shape shown on the calendar, and the three sources that
//! feed it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  activity::{Activity, ActivityId, UserId},
  birthday::BirthdayEvent,
  expand::VirtualInstance,
  time_of_day::TimeOfDay,
};

pub const BIRTHDAY_COLOR: &str = "#EC4899";
pub const BIRTHDAY_ICON: &str = "Cake";

/// Where a calendar event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
  Stored,
  Virtual,
  Birthday,
}

/// Anything that can be placed on the calendar, before normalisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarEntry {
  Stored(Activity),
  Virtual(VirtualInstance),
  Birthday(BirthdayEvent),
}

impl CalendarEntry {
  pub fn date(&self) -> NaiveDate {
    match self {
      Self::Stored(a) => a.date,
      Self::Virtual(v) => v.date,
      Self::Birthday(b) => b.date,
    }
  }

  pub fn start_time(&self) -> Option<TimeOfDay> {
    match self {
      Self::Stored(a) => a.start_time,
      Self::Virtual(v) => v.start_time,
      Self::Birthday(_) => None,
    }
  }

  /// Flatten into the common [`Event`] shape.
  pub fn into_event(self) -> Event {
    match self {
      Self::Stored(a) => Event {
        id:                    a.id,
        kind:                  EventKind::Stored,
        title:                 a.title,
        description:           a.description,
        date:                  a.date,
        start_time:            a.start_time,
        end_time:              a.end_time,
        color:                 a.color,
        icon:                  a.icon,
        is_recurring:          a.is_recurring,
        parent_id:             a.parent_id,
        is_recurring_instance: None,
        is_birthday:           None,
        birthday_user:         None,
      },
      Self::Virtual(v) => Event {
        id:                    v.root_id,
        kind:                  EventKind::Virtual,
        title:                 v.title,
        description:           v.description,
        date:                  v.date,
        start_time:            v.start_time,
        end_time:              v.end_time,
        color:                 v.color,
        icon:                  v.icon,
        is_recurring:          true,
        parent_id:             Some(v.root_id),
        is_recurring_instance: Some(true),
        is_birthday:           None,
        birthday_user:         None,
      },
      Self::Birthday(b) => Event {
        // Negative so it can never collide with a stored activity id.
        id:                    -b.user_id,
        kind:                  EventKind::Birthday,
        title:                 format!("Cumpleaños de {}", b.name),
        description:           None,
        date:                  b.date,
        start_time:            None,
        end_time:              None,
        color:                 BIRTHDAY_COLOR.to_owned(),
        icon:                  BIRTHDAY_ICON.to_owned(),
        is_recurring:          false,
        parent_id:             None,
        is_recurring_instance: None,
        is_birthday:           Some(true),
        birthday_user:         Some(BirthdayUser {
          id:        b.user_id,
          name:      b.name,
          photo_url: b.photo_url,
        }),
      },
    }
  }
}

/// The user behind a birthday event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayUser {
  pub id:        UserId,
  #[serde(rename = "nombre")]
  pub name:      String,
  #[serde(rename = "fotoUrl")]
  pub photo_url: Option<String>,
}

/// A calendar event in its wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
  pub id:                    ActivityId,
  #[serde(rename = "tipo")]
  pub kind:                  EventKind,
  #[serde(rename = "titulo")]
  pub title:                 String,
  #[serde(rename = "descripcion")]
  pub description:           Option<String>,
  #[serde(rename = "fecha")]
  pub date:                  NaiveDate,
  #[serde(rename = "hora")]
  pub start_time:            Option<TimeOfDay>,
  #[serde(rename = "horaFin")]
  pub end_time:              Option<TimeOfDay>,
  pub color:                 String,
  #[serde(rename = "icono")]
  pub icon:                  String,
  #[serde(rename = "esRecurrente")]
  pub is_recurring:          bool,
  #[serde(rename = "actividadPadreId")]
  pub parent_id:             Option<ActivityId>,
  #[serde(
    rename = "esInstanciaRecurrente",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub is_recurring_instance: Option<bool>,
  #[serde(rename = "esCumpleanos", default, skip_serializing_if = "Option::is_none")]
  pub is_birthday:           Option<bool>,
  #[serde(
    rename = "usuarioCumpleanos",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub birthday_user:         Option<BirthdayUser>,
}

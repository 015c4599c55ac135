//! The month view: stored activities, expanded recurrences and birthdays for
//! one calendar month, merged into date order and grouped by day.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  activity::Activity,
  birthday::{self, BirthdayEvent},
  calendar::DateWindow,
  event::{CalendarEntry, Event},
  expand::{self, VirtualInstance},
  store::{ActivityQuery, ActivityStore, UserDirectory},
};

/// Every event of one month, computed on read and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthView {
  #[serde(rename = "mes")]
  pub month:      u32,
  #[serde(rename = "anio")]
  pub year:       i32,
  #[serde(rename = "primerDia")]
  pub first_day:  DateTime<Utc>,
  #[serde(rename = "ultimoDia")]
  pub last_day:   DateTime<Utc>,
  /// All events ordered by date, then start time.
  #[serde(rename = "actividades")]
  pub events:     Vec<Event>,
  /// The same events keyed by `YYYY-MM-DD`, keeping their relative order.
  #[serde(rename = "actividadesPorDia")]
  pub by_day:     BTreeMap<String, Vec<Event>>,
  #[serde(rename = "totalActividades")]
  pub total:      usize,
}

/// Build the view for `month` (1–12) of `year`.
///
/// Rejects an out-of-range month before touching either collaborator. The
/// three reads are independent and run concurrently.
pub async fn month_view<S, D>(
  activities: &S,
  directory: &D,
  month: u32,
  year: i32,
) -> Result<MonthView>
where
  S: ActivityStore,
  D: UserDirectory,
{
  let window = DateWindow::month(month, year)?;
  let query = ActivityQuery { window, include_inactive: false };

  let (stored, roots, people) = tokio::try_join!(
    async { activities.find_activities(query).await.map_err(Error::store) },
    async { activities.find_recurring_roots(window).await.map_err(Error::store) },
    async {
      directory
        .find_active_users_with_birthdate()
        .await
        .map_err(Error::store)
    },
  )?;

  let instances = expand::expand(&roots, window)?;
  let birthdays = birthday::derive(month, year, &people);

  tracing::debug!(
    month,
    year,
    stored = stored.len(),
    roots = roots.len(),
    instances = instances.len(),
    birthdays = birthdays.len(),
    "assembling month view"
  );

  Ok(assemble(month, year, window, stored, instances, birthdays))
}

/// Merge, sort and group the three event sources.
///
/// Materialised children are dropped from `stored`. Entries without a start
/// time come first within their day; the sort is stable, so ties keep the
/// stored → virtual → birthday order.
pub fn assemble(
  month: u32,
  year: i32,
  window: DateWindow,
  stored: Vec<Activity>,
  instances: Vec<VirtualInstance>,
  birthdays: Vec<BirthdayEvent>,
) -> MonthView {
  let mut entries: Vec<CalendarEntry> = stored
    .into_iter()
    .filter(|a| a.parent_id.is_none())
    .map(CalendarEntry::Stored)
    .chain(instances.into_iter().map(CalendarEntry::Virtual))
    .chain(birthdays.into_iter().map(CalendarEntry::Birthday))
    .collect();

  entries.sort_by_key(|e| (e.date(), e.start_time()));

  let events: Vec<Event> = entries.into_iter().map(CalendarEntry::into_event).collect();

  let mut by_day: BTreeMap<String, Vec<Event>> = BTreeMap::new();
  for event in &events {
    by_day
      .entry(event.date.format("%Y-%m-%d").to_string())
      .or_default()
      .push(event.clone());
  }

  MonthView {
    month,
    year,
    first_day: window.first_instant(),
    last_day: window.last_instant(),
    total: events.len(),
    events,
    by_day,
  }
}

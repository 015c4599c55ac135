//! Creating, editing and deleting activities and recurring series.
//!
//! These operations validate input and enforce series invariants, then
//! delegate to an [`ActivityStore`]. Multi-row deletes are atomic inside the
//! store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  activity::{
    Activity, ActivityDraft, ActivityId, ActivityPatch, NewActivity, UserId,
  },
  store::ActivityStore,
};

/// Outcome of a delete, reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionSummary {
  pub message: String,
  /// Total rows removed, including the target itself.
  pub count:   u64,
}

/// Fetch one activity.
pub async fn get<S: ActivityStore>(store: &S, id: ActivityId) -> Result<Activity> {
  store
    .get_activity(id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::ActivityNotFound(id))
}

/// Persist a new activity created by `created_by`.
pub async fn create<S: ActivityStore>(
  store: &S,
  input: NewActivity,
  created_by: UserId,
) -> Result<Activity> {
  let draft = input.into_draft(created_by);
  validate_draft(&draft)?;

  if let Some(parent_id) = draft.parent_id {
    let parent = get(store, parent_id).await?;
    if !parent.is_root() {
      return Err(Error::InvalidArgument(format!(
        "activity {parent_id} is not the root of a recurring series"
      )));
    }
  }

  let activity = store.create_activity(draft).await.map_err(Error::store)?;
  tracing::info!(id = activity.id, date = %activity.date, "created activity");
  Ok(activity)
}

/// Apply a partial update. Fields the patch leaves untouched keep their
/// stored values.
pub async fn update<S: ActivityStore>(
  store: &S,
  id: ActivityId,
  patch: ActivityPatch,
) -> Result<Activity> {
  let mut activity = get(store, id).await?;
  patch.apply_to(&mut activity);
  validate_activity(&activity)?;

  let updated = store
    .update_activity(activity)
    .await
    .map_err(Error::store)?
    .ok_or(Error::ActivityNotFound(id))?;
  tracing::info!(id, "updated activity");
  Ok(updated)
}

/// Delete one activity along with any materialised children.
pub async fn delete<S: ActivityStore>(store: &S, id: ActivityId) -> Result<DeletionSummary> {
  let count = store
    .delete_activity(id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::ActivityNotFound(id))?;

  tracing::info!(id, count, "deleted activity");
  let message = match count {
    0 | 1 => "Actividad eliminada".to_owned(),
    n => format!("Actividad eliminada junto con {} instancias", n - 1),
  };
  Ok(DeletionSummary { message, count })
}

/// Delete a whole series: its root and every materialised child. `id` may
/// name either the root or one of its children.
pub async fn delete_series<S: ActivityStore>(
  store: &S,
  id: ActivityId,
) -> Result<DeletionSummary> {
  let root_id = get(store, id).await?.series_root_id();
  let count = store.delete_series(root_id).await.map_err(Error::store)?;
  if count == 0 {
    return Err(Error::ActivityNotFound(root_id));
  }

  tracing::info!(id, root_id, count, "deleted activity series");
  Ok(DeletionSummary {
    message: format!("Serie eliminada: {count} actividades"),
    count,
  })
}

// ─── Validation ──────────────────────────────────────────────────────────────

fn validate_draft(draft: &ActivityDraft) -> Result<()> {
  validate_fields(
    &draft.title,
    draft.date,
    draft.recurrence_end_date,
    draft.weekday,
    draft.nth_occurrence,
  )
}

fn validate_activity(activity: &Activity) -> Result<()> {
  validate_fields(
    &activity.title,
    activity.date,
    activity.recurrence_end_date,
    activity.weekday,
    activity.nth_occurrence,
  )
}

fn validate_fields(
  title: &str,
  date: NaiveDate,
  recurrence_end_date: Option<NaiveDate>,
  weekday: Option<u8>,
  nth_occurrence: Option<u8>,
) -> Result<()> {
  if title.trim().is_empty() {
    return Err(Error::InvalidArgument("title must not be empty".into()));
  }
  if let Some(end) = recurrence_end_date
    && end < date
  {
    return Err(Error::InvalidArgument(format!(
      "recurrence end date {end} is before the activity date {date}"
    )));
  }
  if let Some(weekday) = weekday
    && weekday > 6
  {
    return Err(Error::InvalidArgument(format!(
      "weekday must be between 0 (Sunday) and 6 (Saturday), got {weekday}"
    )));
  }
  if let Some(nth) = nth_occurrence
    && !(1..=5).contains(&nth)
  {
    return Err(Error::InvalidArgument(format!(
      "week of month must be between 1 and 5, got {nth}"
    )));
  }
  Ok(())
}

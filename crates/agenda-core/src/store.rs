//! The collaborator traits the core reads from and writes through.
//!
//! Storage backends (e.g. `agenda-store-sqlite`) implement them. The core and
//! the HTTP layer depend only on these abstractions.

use std::future::Future;

use crate::{
  activity::{Activity, ActivityDraft, ActivityId},
  birthday::BirthdayPerson,
  calendar::DateWindow,
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`ActivityStore::find_activities`].
#[derive(Debug, Clone, Copy)]
pub struct ActivityQuery {
  /// Only activities whose anchor date lies in this window.
  pub window:           DateWindow,
  /// If `false`, only activities with `active = true`.
  pub include_inactive: bool,
}

// ─── Activities ──────────────────────────────────────────────────────────────

/// Persistence for activities and recurring-series roots.
///
/// All methods return `Send` futures so implementations can be shared across
/// a multi-threaded runtime.
pub trait ActivityStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Activities anchored inside the query window, ordered by date, start
  /// time, then id. Includes roots and materialised children.
  fn find_activities(
    &self,
    query: ActivityQuery,
  ) -> impl Future<Output = Result<Vec<Activity>, Self::Error>> + Send + '_;

  /// Active recurring roots (no parent) whose span overlaps `window`: anchor
  /// on or before `window.end`, and no end date or one on or after
  /// `window.start`.
  fn find_recurring_roots(
    &self,
    window: DateWindow,
  ) -> impl Future<Output = Result<Vec<Activity>, Self::Error>> + Send + '_;

  /// Retrieve an activity by id. Returns `None` if not found.
  fn get_activity(
    &self,
    id: ActivityId,
  ) -> impl Future<Output = Result<Option<Activity>, Self::Error>> + Send + '_;

  /// Persist a new activity. The store assigns the id and both timestamps.
  fn create_activity(
    &self,
    draft: ActivityDraft,
  ) -> impl Future<Output = Result<Activity, Self::Error>> + Send + '_;

  /// Overwrite every mutable column of an existing activity and refresh
  /// `updated_at`. Returns `None` if the id no longer exists.
  fn update_activity(
    &self,
    activity: Activity,
  ) -> impl Future<Output = Result<Option<Activity>, Self::Error>> + Send + '_;

  /// Delete an activity together with its materialised children, atomically.
  /// Returns the number of rows removed, or `None` if `id` does not exist.
  fn delete_activity(
    &self,
    id: ActivityId,
  ) -> impl Future<Output = Result<Option<u64>, Self::Error>> + Send + '_;

  /// Delete `root_id` and every activity whose parent is `root_id`, in one
  /// transaction. Returns the number of rows removed.
  fn delete_series(
    &self,
    root_id: ActivityId,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}

// ─── Users ───────────────────────────────────────────────────────────────────

/// Read-only view of the user directory.
pub trait UserDirectory: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every active user with a birthdate on file.
  fn find_active_users_with_birthdate(
    &self,
  ) -> impl Future<Output = Result<Vec<BirthdayPerson>, Self::Error>> + Send + '_;
}

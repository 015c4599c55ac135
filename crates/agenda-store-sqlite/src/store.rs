//! [`SqliteStore`], the SQLite implementation of [`ActivityStore`] and
//! [`UserDirectory`].

use std::path::Path;

use chrono::{NaiveDate, Utc};
use rusqlite::{OptionalExtension as _, types::Value};

use agenda_core::{
  activity::{Activity, ActivityDraft, ActivityId, UserId},
  birthday::BirthdayPerson,
  calendar::DateWindow,
  store::{ActivityQuery, ActivityStore, UserDirectory},
};

use crate::{
  Result,
  encode::{
    ACTIVITY_COLUMNS, RawActivity, RawUser, encode_date, encode_dt, encode_pattern,
    encode_time,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An activity store and user directory backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// A directory entry for [`SqliteStore::insert_user`]. User management is
/// out of scope for this store; this exists for seeding and tests.
#[derive(Debug, Clone)]
pub struct NewUser {
  pub name:      String,
  pub photo_url: Option<String>,
  pub birthdate: Option<NaiveDate>,
  pub active:    bool,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("sqlite schema initialised");
    Ok(())
  }

  /// Add a user to the directory and return the assigned id.
  pub async fn insert_user(&self, user: NewUser) -> Result<UserId> {
    let birthdate = user.birthdate.map(encode_date);

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (name, photo_url, birthdate, active) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![user.name, user.photo_url, birthdate, user.active],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(id)
  }

  /// Run `SELECT <activity columns> FROM activities <tail>` and decode rows.
  async fn select_activities(
    &self,
    tail: &'static str,
    params: Vec<Value>,
  ) -> Result<Vec<Activity>> {
    let raws: Vec<RawActivity> = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {ACTIVITY_COLUMNS} FROM activities {tail}");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawActivity::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawActivity::into_activity).collect()
  }
}

fn date_value(d: NaiveDate) -> Value { Value::Text(encode_date(d)) }

// ─── ActivityStore impl ──────────────────────────────────────────────────────

impl ActivityStore for SqliteStore {
  type Error = crate::Error;

  async fn find_activities(&self, query: ActivityQuery) -> Result<Vec<Activity>> {
    self
      .select_activities(
        "WHERE date BETWEEN ?1 AND ?2
           AND (?3 OR active = 1)
         ORDER BY date, start_time, id",
        vec![
          date_value(query.window.start),
          date_value(query.window.end),
          Value::Integer(i64::from(query.include_inactive)),
        ],
      )
      .await
  }

  async fn find_recurring_roots(&self, window: DateWindow) -> Result<Vec<Activity>> {
    self
      .select_activities(
        "WHERE active = 1
           AND is_recurring = 1
           AND parent_id IS NULL
           AND date <= ?2
           AND (recurrence_end_date IS NULL OR recurrence_end_date >= ?1)
         ORDER BY date, start_time, id",
        vec![date_value(window.start), date_value(window.end)],
      )
      .await
  }

  async fn get_activity(&self, id: ActivityId) -> Result<Option<Activity>> {
    let raw: Option<RawActivity> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = ?1"),
            rusqlite::params![id],
            RawActivity::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawActivity::into_activity).transpose()
  }

  async fn create_activity(&self, draft: ActivityDraft) -> Result<Activity> {
    let now = Utc::now();

    let date_str     = encode_date(draft.date);
    let start_str    = draft.start_time.map(encode_time);
    let end_str      = draft.end_time.map(encode_time);
    let at_str       = encode_dt(now);
    let pattern_str  = encode_pattern(draft.recurrence_pattern);
    let rec_end_str  = draft.recurrence_end_date.map(encode_date);
    let title        = draft.title.clone();
    let description  = draft.description.clone();
    let color        = draft.color.clone();
    let icon         = draft.icon.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO activities (
             title, description, date, start_time, end_time, color, icon,
             active, created_by, created_at, updated_at, is_recurring,
             recurrence_pattern, recurrence_end_date, weekday, nth_occurrence,
             parent_id
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
          rusqlite::params![
            title,
            description,
            date_str,
            start_str,
            end_str,
            color,
            icon,
            draft.active,
            draft.created_by,
            at_str,
            draft.is_recurring,
            pattern_str,
            rec_end_str,
            draft.weekday,
            draft.nth_occurrence,
            draft.parent_id,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Activity {
      id,
      title:               draft.title,
      description:         draft.description,
      date:                draft.date,
      start_time:          draft.start_time,
      end_time:            draft.end_time,
      color:               draft.color,
      icon:                draft.icon,
      active:              draft.active,
      created_by:          draft.created_by,
      created_at:          now,
      updated_at:          now,
      is_recurring:        draft.is_recurring,
      recurrence_pattern:  draft.recurrence_pattern,
      recurrence_end_date: draft.recurrence_end_date,
      weekday:             draft.weekday,
      nth_occurrence:      draft.nth_occurrence,
      parent_id:           draft.parent_id,
    })
  }

  async fn update_activity(&self, mut activity: Activity) -> Result<Option<Activity>> {
    activity.updated_at = Utc::now();

    let id           = activity.id;
    let title        = activity.title.clone();
    let description  = activity.description.clone();
    let date_str     = encode_date(activity.date);
    let start_str    = activity.start_time.map(encode_time);
    let end_str      = activity.end_time.map(encode_time);
    let color        = activity.color.clone();
    let icon         = activity.icon.clone();
    let active       = activity.active;
    let at_str       = encode_dt(activity.updated_at);
    let is_recurring = activity.is_recurring;
    let pattern_str  = encode_pattern(activity.recurrence_pattern);
    let rec_end_str  = activity.recurrence_end_date.map(encode_date);
    let weekday      = activity.weekday;
    let nth          = activity.nth_occurrence;

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE activities SET
             title = ?2, description = ?3, date = ?4, start_time = ?5,
             end_time = ?6, color = ?7, icon = ?8, active = ?9,
             updated_at = ?10, is_recurring = ?11, recurrence_pattern = ?12,
             recurrence_end_date = ?13, weekday = ?14, nth_occurrence = ?15
           WHERE id = ?1",
          rusqlite::params![
            id,
            title,
            description,
            date_str,
            start_str,
            end_str,
            color,
            icon,
            active,
            at_str,
            is_recurring,
            pattern_str,
            rec_end_str,
            weekday,
            nth,
          ],
        )?)
      })
      .await?;

    Ok((changed > 0).then_some(activity))
  }

  async fn delete_activity(&self, id: ActivityId) -> Result<Option<u64>> {
    let removed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let exists = tx
          .query_row(
            "SELECT 1 FROM activities WHERE id = ?1",
            rusqlite::params![id],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if !exists {
          return Ok(None);
        }

        let children = tx.execute(
          "DELETE FROM activities WHERE parent_id = ?1",
          rusqlite::params![id],
        )?;
        let own = tx.execute("DELETE FROM activities WHERE id = ?1", rusqlite::params![id])?;
        tx.commit()?;
        Ok(Some((children + own) as u64))
      })
      .await?;

    Ok(removed)
  }

  async fn delete_series(&self, root_id: ActivityId) -> Result<u64> {
    let removed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let children = tx.execute(
          "DELETE FROM activities WHERE parent_id = ?1",
          rusqlite::params![root_id],
        )?;
        let root = tx.execute(
          "DELETE FROM activities WHERE id = ?1",
          rusqlite::params![root_id],
        )?;
        tx.commit()?;
        Ok((children + root) as u64)
      })
      .await?;

    Ok(removed)
  }
}

// ─── UserDirectory impl ──────────────────────────────────────────────────────

impl UserDirectory for SqliteStore {
  type Error = crate::Error;

  async fn find_active_users_with_birthdate(&self) -> Result<Vec<BirthdayPerson>> {
    let raws: Vec<RawUser> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, photo_url, birthdate
           FROM users
           WHERE active = 1 AND birthdate IS NOT NULL
           ORDER BY id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawUser {
              id:        row.get(0)?,
              name:      row.get(1)?,
              photo_url: row.get(2)?,
              birthdate: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_person).collect()
  }
}

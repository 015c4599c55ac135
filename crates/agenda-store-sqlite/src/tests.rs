//! Integration tests for `SqliteStore` against an in-memory database.

use agenda_core::{
  activity::{ActivityPatch, NewActivity, RecurrencePattern},
  calendar::DateWindow,
  event::EventKind,
  lifecycle,
  month_view,
  patch::Patch,
  store::{ActivityQuery, ActivityStore, UserDirectory},
};
use chrono::NaiveDate;

use crate::{NewUser, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn one_off(title: &str, date: NaiveDate, time: Option<&str>) -> NewActivity {
  NewActivity {
    start_time: time.and_then(|t| t.parse().ok()),
    ..NewActivity::new(title, date)
  }
}

fn recurring(title: &str, date: NaiveDate, pattern: RecurrencePattern) -> NewActivity {
  NewActivity {
    is_recurring: Some(true),
    recurrence_pattern: Some(pattern),
    start_time: "19:00".parse().ok(),
    ..NewActivity::new(title, date)
  }
}

fn user(name: &str, birthdate: Option<NaiveDate>, active: bool) -> NewUser {
  NewUser {
    name: name.into(),
    photo_url: Some(format!("/fotos/{name}.jpg")),
    birthdate,
    active,
  }
}

// ─── Activities ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_roundtrip() {
  let s = store().await;

  let input = NewActivity {
    description: Some("Traer Biblia".into()),
    end_time: "21:30".parse().ok(),
    color: Some("#F59E0B".into()),
    weekday: Some(2),
    nth_occurrence: Some(2),
    recurrence_end_date: Some(d(2026, 12, 31)),
    ..recurring("Estudio bíblico", d(2026, 1, 13), RecurrencePattern::MonthlyNthWeekday)
  };
  let created = lifecycle::create(&s, input, 5).await.unwrap();
  assert!(created.id > 0);

  let fetched = s.get_activity(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.title, "Estudio bíblico");
  assert_eq!(fetched.description.as_deref(), Some("Traer Biblia"));
  assert_eq!(fetched.start_time.unwrap().to_string(), "19:00");
  assert_eq!(fetched.end_time.unwrap().to_string(), "21:30");
  assert_eq!(fetched.color, "#F59E0B");
  assert_eq!(fetched.icon, "Calendar");
  assert_eq!(fetched.recurrence_pattern, RecurrencePattern::MonthlyNthWeekday);
  assert_eq!(fetched.weekday, Some(2));
  assert_eq!(fetched.nth_occurrence, Some(2));
  assert_eq!(fetched.recurrence_end_date, Some(d(2026, 12, 31)));
  assert_eq!(fetched.created_by, 5);
  assert!(fetched.is_root());
}

#[tokio::test]
async fn get_activity_missing_returns_none() {
  let s = store().await;
  assert!(s.get_activity(123).await.unwrap().is_none());
}

#[tokio::test]
async fn find_activities_filters_window_and_active() {
  let s = store().await;
  lifecycle::create(&s, one_off("Dentro", d(2026, 2, 14), Some("10:00")), 1).await.unwrap();
  lifecycle::create(&s, one_off("Temprano", d(2026, 2, 14), Some("08:00")), 1).await.unwrap();
  lifecycle::create(&s, one_off("Fuera", d(2026, 3, 1), None), 1).await.unwrap();
  let hidden = lifecycle::create(&s, one_off("Oculta", d(2026, 2, 20), None), 1)
    .await
    .unwrap();
  lifecycle::update(
    &s,
    hidden.id,
    ActivityPatch { active: Some(false), ..Default::default() },
  )
  .await
  .unwrap();

  let window = DateWindow::month(2, 2026).unwrap();
  let active = s
    .find_activities(ActivityQuery { window, include_inactive: false })
    .await
    .unwrap();
  let titles: Vec<&str> = active.iter().map(|a| a.title.as_str()).collect();
  assert_eq!(titles, ["Temprano", "Dentro"]);

  let all = s
    .find_activities(ActivityQuery { window, include_inactive: true })
    .await
    .unwrap();
  assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn recurring_roots_respect_span() {
  let s = store().await;
  let window = DateWindow::month(2, 2026).unwrap();

  let ongoing = lifecycle::create(&s, recurring("Sigue", d(2025, 9, 2), RecurrencePattern::Weekly), 1)
    .await
    .unwrap();
  let ended = NewActivity {
    recurrence_end_date: Some(d(2026, 1, 31)),
    ..recurring("Terminó", d(2025, 9, 2), RecurrencePattern::Weekly)
  };
  lifecycle::create(&s, ended, 1).await.unwrap();
  lifecycle::create(&s, recurring("Futura", d(2026, 3, 3), RecurrencePattern::Weekly), 1)
    .await
    .unwrap();
  let child = NewActivity { parent_id: Some(ongoing.id), ..one_off("Hija", d(2026, 2, 3), None) };
  lifecycle::create(&s, child, 1).await.unwrap();

  let roots = s.find_recurring_roots(window).await.unwrap();
  assert_eq!(roots.len(), 1);
  assert_eq!(roots[0].id, ongoing.id);
}

#[tokio::test]
async fn update_preserves_omitted_and_clears_null() {
  let s = store().await;
  let input = NewActivity {
    recurrence_end_date: Some(d(2026, 6, 30)),
    ..recurring("Coro", d(2026, 2, 4), RecurrencePattern::Biweekly)
  };
  let a = lifecycle::create(&s, input, 1).await.unwrap();

  let patch: ActivityPatch = serde_json::from_str(r#"{"icono":"Music"}"#).unwrap();
  lifecycle::update(&s, a.id, patch).await.unwrap();
  let after = s.get_activity(a.id).await.unwrap().unwrap();
  assert_eq!(after.icon, "Music");
  assert_eq!(after.recurrence_end_date, Some(d(2026, 6, 30)));
  assert!(after.updated_at >= a.updated_at);

  lifecycle::update(
    &s,
    a.id,
    ActivityPatch { recurrence_end_date: Patch::Clear, ..Default::default() },
  )
  .await
  .unwrap();
  let cleared = s.get_activity(a.id).await.unwrap().unwrap();
  assert_eq!(cleared.recurrence_end_date, None);
  assert_eq!(cleared.icon, "Music");
}

// ─── Deletes ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_cascades_to_children() {
  let s = store().await;
  let root = lifecycle::create(&s, recurring("Serie", d(2026, 2, 3), RecurrencePattern::Weekly), 1)
    .await
    .unwrap();
  for day in [10, 17] {
    let child = NewActivity { parent_id: Some(root.id), ..one_off("Serie", d(2026, 2, day), None) };
    lifecycle::create(&s, child, 1).await.unwrap();
  }

  let summary = lifecycle::delete(&s, root.id).await.unwrap();
  assert_eq!(summary.count, 3);

  let window = DateWindow::month(2, 2026).unwrap();
  let left = s
    .find_activities(ActivityQuery { window, include_inactive: true })
    .await
    .unwrap();
  assert!(left.is_empty());
}

#[tokio::test]
async fn delete_missing_is_not_found() {
  let s = store().await;
  let err = lifecycle::delete(&s, 42).await.unwrap_err();
  assert!(matches!(err, agenda_core::Error::ActivityNotFound(42)));
}

#[tokio::test]
async fn delete_series_from_child() {
  let s = store().await;
  let root = lifecycle::create(&s, recurring("Jóvenes", d(2026, 2, 6), RecurrencePattern::Weekly), 1)
    .await
    .unwrap();
  let mut children = Vec::new();
  for day in [13, 20, 27] {
    let child = NewActivity { parent_id: Some(root.id), ..one_off("Jóvenes", d(2026, 2, day), None) };
    children.push(lifecycle::create(&s, child, 1).await.unwrap());
  }
  let other = lifecycle::create(&s, one_off("Otra", d(2026, 2, 14), None), 1).await.unwrap();

  let summary = lifecycle::delete_series(&s, children[0].id).await.unwrap();
  assert_eq!(summary.count, children.len() as u64 + 1);

  assert!(s.get_activity(root.id).await.unwrap().is_none());
  for child in &children {
    assert!(s.get_activity(child.id).await.unwrap().is_none());
  }
  assert!(s.get_activity(other.id).await.unwrap().is_some());
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn directory_lists_active_users_with_birthdate() {
  let s = store().await;
  let ana = s.insert_user(user("ana", Some(d(1995, 7, 22)), true)).await.unwrap();
  s.insert_user(user("beto", None, true)).await.unwrap();
  s.insert_user(user("carla", Some(d(1990, 1, 1)), false)).await.unwrap();

  let people = s.find_active_users_with_birthdate().await.unwrap();
  assert_eq!(people.len(), 1);
  assert_eq!(people[0].user_id, ana);
  assert_eq!(people[0].birthdate, d(1995, 7, 22));
}

// ─── Month view end to end ───────────────────────────────────────────────────

#[tokio::test]
async fn weekly_series_in_february() {
  let s = store().await;
  let root = lifecycle::create(&s, recurring("Culto de oración", d(2026, 2, 3), RecurrencePattern::Weekly), 1)
    .await
    .unwrap();

  let view = month_view(&s, &s, 2, 2026).await.unwrap();
  let days: Vec<(String, EventKind)> = view
    .events
    .iter()
    .map(|e| (e.date.to_string(), e.kind))
    .collect();
  assert_eq!(
    days,
    vec![
      ("2026-02-03".to_string(), EventKind::Stored),
      ("2026-02-10".to_string(), EventKind::Virtual),
      ("2026-02-17".to_string(), EventKind::Virtual),
      ("2026-02-24".to_string(), EventKind::Virtual),
    ]
  );
  assert!(view.events.iter().all(|e| e.id == root.id));
  assert_eq!(view.total, 4);
}

#[tokio::test]
async fn second_tuesday_series_in_february() {
  let s = store().await;
  let input = NewActivity {
    weekday: Some(2),
    nth_occurrence: Some(2),
    ..recurring("Reunión de líderes", d(2026, 1, 13), RecurrencePattern::MonthlyNthWeekday)
  };
  lifecycle::create(&s, input, 1).await.unwrap();

  let view = month_view(&s, &s, 2, 2026).await.unwrap();
  assert_eq!(view.total, 1);
  assert_eq!(view.events[0].date, d(2026, 2, 10));
  assert_eq!(view.events[0].is_recurring_instance, Some(true));
}

#[tokio::test]
async fn birthday_appears_with_negative_id() {
  let s = store().await;
  let id = s.insert_user(user("ana", Some(d(1995, 7, 22)), true)).await.unwrap();

  let view = month_view(&s, &s, 7, 2026).await.unwrap();
  assert_eq!(view.total, 1);
  let event = &view.events[0];
  assert_eq!(event.id, -id);
  assert_eq!(event.date, d(2026, 7, 22));
  assert_eq!(event.kind, EventKind::Birthday);
  assert_eq!(view.by_day["2026-07-22"].len(), 1);
}

#[tokio::test]
async fn materialised_children_are_not_shown() {
  let s = store().await;
  let root = lifecycle::create(&s, recurring("Ensayo", d(2026, 2, 3), RecurrencePattern::Weekly), 1)
    .await
    .unwrap();
  let child = NewActivity { parent_id: Some(root.id), ..one_off("Ensayo especial", d(2026, 2, 10), None) };
  lifecycle::create(&s, child, 1).await.unwrap();

  let view = month_view(&s, &s, 2, 2026).await.unwrap();
  assert!(view.events.iter().all(|e| e.title == "Ensayo"));
  assert_eq!(view.by_day["2026-02-10"].len(), 1);
}

#[tokio::test]
async fn month_view_is_idempotent() {
  let s = store().await;
  lifecycle::create(&s, recurring("Semanal", d(2026, 1, 6), RecurrencePattern::Weekly), 1)
    .await
    .unwrap();
  lifecycle::create(&s, one_off("Retiro", d(2026, 2, 21), Some("07:00")), 1).await.unwrap();
  s.insert_user(user("ana", Some(d(2000, 2, 29)), true)).await.unwrap();

  let first = month_view(&s, &s, 2, 2026).await.unwrap();
  let second = month_view(&s, &s, 2, 2026).await.unwrap();
  assert_eq!(
    serde_json::to_string(&first).unwrap(),
    serde_json::to_string(&second).unwrap()
  );
  assert!(first.by_day.contains_key("2026-02-28"));
}

#[tokio::test]
async fn month_view_rejects_invalid_month() {
  let s = store().await;
  for month in [0, 13] {
    let err = month_view(&s, &s, month, 2026).await.unwrap_err();
    assert!(matches!(err, agenda_core::Error::InvalidArgument(_)));
  }
}

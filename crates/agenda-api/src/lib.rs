//! JSON REST API for the activity calendar.
//!
//! Exposes an axum [`Router`] backed by any store implementing both
//! [`ActivityStore`] and [`UserDirectory`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", agenda_api::api_router(store.clone()))
//! ```

pub mod activities;
pub mod calendar;
pub mod error;

use std::sync::Arc;

use agenda_core::store::{ActivityStore, UserDirectory};
use axum::{
  Router,
  routing::{delete, get, post},
};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ActivityStore + UserDirectory + 'static,
{
  Router::new()
    // Calendar
    .route("/activities/month-view", get(calendar::month_view::<S>))
    // Activities
    .route("/activities", post(activities::create::<S>))
    .route(
      "/activities/{id}",
      get(activities::get_one::<S>)
        .put(activities::update::<S>)
        .delete(activities::delete_one::<S>),
    )
    .route("/activities/{id}/series", delete(activities::delete_series::<S>))
    .with_state(store)
}

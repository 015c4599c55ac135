//! Handlers for `/activities` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/activities/{id}` | 404 if not found |
//! | `POST`   | `/activities` | Body: [`CreateBody`]; returns 201 + stored activity |
//! | `PUT`    | `/activities/{id}` | Body: [`ActivityPatch`]; omitted fields are kept, `null` clears |
//! | `DELETE` | `/activities/{id}` | Also removes materialised children |
//! | `DELETE` | `/activities/{id}/series` | `id` may be the root or any child |

use std::sync::Arc;

use agenda_core::{
  activity::{Activity, ActivityId, ActivityPatch, NewActivity, UserId},
  lifecycle::{self, DeletionSummary},
  store::ActivityStore,
};
use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /activities/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<ActivityId>,
) -> Result<Json<Activity>, ApiError>
where
  S: ActivityStore,
{
  Ok(Json(lifecycle::get(&*store, id).await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /activities`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  /// The user recorded as the activity's creator.
  #[serde(rename = "creadoPorId")]
  pub created_by: UserId,
  #[serde(flatten)]
  pub activity:   NewActivity,
}

/// `POST /activities`: returns 201 + the stored [`Activity`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ActivityStore,
{
  let activity = lifecycle::create(&*store, body.activity, body.created_by).await?;
  Ok((StatusCode::CREATED, Json(activity)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /activities/{id}`: partial update.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<ActivityId>,
  Json(patch): Json<ActivityPatch>,
) -> Result<Json<Activity>, ApiError>
where
  S: ActivityStore,
{
  Ok(Json(lifecycle::update(&*store, id, patch).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /activities/{id}`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<ActivityId>,
) -> Result<Json<DeletionSummary>, ApiError>
where
  S: ActivityStore,
{
  Ok(Json(lifecycle::delete(&*store, id).await?))
}

/// `DELETE /activities/{id}/series`
pub async fn delete_series<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<ActivityId>,
) -> Result<Json<DeletionSummary>, ApiError>
where
  S: ActivityStore,
{
  Ok(Json(lifecycle::delete_series(&*store, id).await?))
}

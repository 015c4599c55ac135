//! Handler for `GET /activities/month-view`.

use std::sync::Arc;

use agenda_core::{
  MonthView,
  store::{ActivityStore, UserDirectory},
};
use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct MonthParams {
  /// Month, 1–12.
  pub mes:  u32,
  pub anio: i32,
}

/// `GET /activities/month-view?mes=<1-12>&anio=<year>`
pub async fn month_view<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<MonthParams>,
) -> Result<Json<MonthView>, ApiError>
where
  S: ActivityStore + UserDirectory,
{
  let view = agenda_core::month_view(&*store, &*store, params.mes, params.anio).await?;
  Ok(Json(view))
}

//! Error type for `agenda-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] agenda_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A column held a value outside its domain (bad time, negative ordinal).
  #[error("invalid column value: {0}")]
  InvalidColumn(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

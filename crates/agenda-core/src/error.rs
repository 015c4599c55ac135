//! Error types for `agenda-core`.

use thiserror::Error;

use crate::activity::ActivityId;

#[derive(Debug, Error)]
pub enum Error {
  /// Caller-supplied input was rejected before touching the store.
  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  #[error("activity not found: {0}")]
  ActivityNotFound(ActivityId),

  /// Stored data broke an invariant the core relies on. Should not surface
  /// in practice.
  #[error("consistency violation: {0}")]
  ConsistencyViolation(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box a collaborator error so it can cross into the core.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

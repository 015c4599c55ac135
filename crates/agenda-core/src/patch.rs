//! Three-state field used by partial updates.

use serde::{Deserialize, Deserializer};

/// One nullable field of a partial update.
///
/// JSON maps onto it as: key absent → [`Patch::Unchanged`], `null` →
/// [`Patch::Clear`], any value → [`Patch::Set`]. Fields must carry
/// `#[serde(default)]` for the absent case to work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
  #[default]
  Unchanged,
  Clear,
  Set(T),
}

impl<T> Patch<T> {
  /// The value after applying this patch to `current`.
  pub fn apply(self, current: Option<T>) -> Option<T> {
    match self {
      Self::Unchanged => current,
      Self::Clear => None,
      Self::Set(value) => Some(value),
    }
  }
}

impl<T> From<Option<T>> for Patch<T> {
  fn from(value: Option<T>) -> Self {
    value.map_or(Self::Clear, Self::Set)
  }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
  T: Deserialize<'de>,
{
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Option::<T>::deserialize(deserializer).map(Self::from)
  }
}

//! SQLite backend for the Agenda activity calendar.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. One [`SqliteStore`] serves as both the
//! activity store and the user directory.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{NewUser, SqliteStore};

#[cfg(test)]
mod tests;

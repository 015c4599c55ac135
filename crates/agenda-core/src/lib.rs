//! Core types and calendar logic for the Agenda activity calendar.
//!
//! Recurring series are stored as a single root definition and expanded on
//! read; birthdays are derived from the user directory. This crate is free of
//! HTTP and database dependencies; storage is reached through the traits in
//! [`store`].

pub mod activity;
pub mod birthday;
pub mod calendar;
pub mod error;
pub mod event;
pub mod expand;
pub mod lifecycle;
pub mod month;
pub mod patch;
pub mod recurrence;
pub mod store;
pub mod time_of_day;

pub use error::{Error, Result};
pub use month::{MonthView, month_view};

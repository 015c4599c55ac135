//! Stepping a recurring series from one occurrence to the next.

use chrono::{Datelike, NaiveDate};

use crate::{
  activity::RecurrencePattern,
  calendar::{add_days, first_of_next_month, weekday_from_sunday},
};

/// The occurrence after `date` for `pattern`.
///
/// Returns `None` for [`RecurrencePattern::None`], and when the next date
/// would leave chrono's representable range. Every `Some` result is strictly
/// later than `date`.
///
/// `weekday` (0 = Sunday) and `nth` only matter for
/// [`RecurrencePattern::MonthlyNthWeekday`]; if either is missing or out of
/// range that pattern behaves like [`RecurrencePattern::Monthly`].
pub fn advance(
  date: NaiveDate,
  pattern: RecurrencePattern,
  weekday: Option<u8>,
  nth: Option<u8>,
) -> Option<NaiveDate> {
  match pattern {
    RecurrencePattern::None => None,
    RecurrencePattern::Weekly => add_days(date, 7),
    RecurrencePattern::Biweekly => add_days(date, 14),
    RecurrencePattern::Monthly => same_day_next_month(date),
    RecurrencePattern::MonthlyNthWeekday => match (weekday, nth) {
      (Some(weekday), Some(nth)) if weekday <= 6 && nth >= 1 => {
        nth_weekday_after_month_start(date, weekday, nth)
      }
      _ => same_day_next_month(date),
    },
  }
}

/// Same day-of-month in the following month. A day the target month lacks
/// spills over into the month after (Jan 31 → Mar 3 in a common year).
fn same_day_next_month(date: NaiveDate) -> Option<NaiveDate> {
  let first = first_of_next_month(date)?;
  add_days(first, i64::from(date.day()) - 1)
}

/// Counting from the first day of the month after `date`, the `nth`
/// occurrence of `weekday`. Counting carries on past the month end when the
/// month has fewer than `nth` matches.
fn nth_weekday_after_month_start(
  date: NaiveDate,
  weekday: u8,
  nth: u8,
) -> Option<NaiveDate> {
  let first = first_of_next_month(date)?;
  let offset = (i64::from(weekday) - i64::from(weekday_from_sunday(first)))
    .rem_euclid(7);
  add_days(first, offset + 7 * (i64::from(nth) - 1))
}

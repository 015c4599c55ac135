//! Materialising the occurrences of recurring roots inside a date window.
//!
//! Occurrences are computed on the fly and never written back; the store
//! only holds the root definition (plus any explicitly saved children).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  activity::{Activity, ActivityId},
  calendar::DateWindow,
  recurrence::advance,
  time_of_day::TimeOfDay,
};

/// One computed occurrence of a recurring root. Carries the root's display
/// attributes with the occurrence date substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualInstance {
  pub root_id:     ActivityId,
  pub date:        NaiveDate,
  pub title:       String,
  pub description: Option<String>,
  pub start_time:  Option<TimeOfDay>,
  pub end_time:    Option<TimeOfDay>,
  pub color:       String,
  pub icon:        String,
}

impl VirtualInstance {
  fn of(root: &Activity, date: NaiveDate) -> Self {
    Self {
      root_id: root.id,
      date,
      title: root.title.clone(),
      description: root.description.clone(),
      start_time: root.start_time,
      end_time: root.end_time,
      color: root.color.clone(),
      icon: root.icon.clone(),
    }
  }
}

/// Expand every root into the occurrences that fall inside `window`.
///
/// The anchor date itself is never emitted: the root is already a stored
/// activity on that day. Output order is root order, then date order.
pub fn expand(roots: &[Activity], window: DateWindow) -> Result<Vec<VirtualInstance>> {
  let mut instances = Vec::new();
  for root in roots {
    expand_root(root, window, &mut instances)?;
  }
  Ok(instances)
}

fn expand_root(
  root: &Activity,
  window: DateWindow,
  out: &mut Vec<VirtualInstance>,
) -> Result<()> {
  if root.parent_id.is_some() {
    return Err(Error::ConsistencyViolation(format!(
      "activity {} has a parent and cannot be expanded as a series root",
      root.id
    )));
  }

  // Fixed before the loop; every step below moves strictly forward, so the
  // loop runs at most once per day between the anchor and the ceiling.
  let ceiling = root
    .recurrence_end_date
    .map_or(window.end, |end| end.min(window.end));

  let mut current = root.date;
  while let Some(next) = advance(
    current,
    root.recurrence_pattern,
    root.weekday,
    root.nth_occurrence,
  ) {
    if next <= current {
      return Err(Error::ConsistencyViolation(format!(
        "recurrence of activity {} did not advance past {current}",
        root.id
      )));
    }
    if next > ceiling {
      break;
    }
    if window.contains(next) && next != root.date {
      out.push(VirtualInstance::of(root, next));
    }
    current = next;
  }

  Ok(())
}

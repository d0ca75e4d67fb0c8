//! Worked-time and end-time arithmetic over a [`SessionState`].

use chrono::{NaiveDateTime, TimeDelta};

use crate::domain::engine::session::SessionState;
use crate::domain::entity::break_entry::minutes_between;
use crate::domain::entity::{Break, BreakSpan, Status};

/// Worked minutes of `session` at `now`.
///
/// A stopped session keeps the value it had when it was stopped. Otherwise
/// the whole minutes since the start are reduced by the breaks taken within
/// the session; breaks without a concrete interval count in full, and the
/// break of a paused session counts up to `now`.
pub fn worked_minutes(session: &SessionState, now: NaiveDateTime) -> u32 {
    if session.status == Status::Stopped {
        return session.worked_minutes;
    }
    let Some(start) = session.start_time else {
        return 0;
    };

    let elapsed = (now - start).num_minutes().max(0);
    let last = session.breaks.len().checked_sub(1);
    let taken: i64 = session
        .breaks
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let open = session.status == Status::Paused && Some(index) == last;
            i64::from(counted_minutes(entry, start, now, open))
        })
        .sum();

    u32::try_from((elapsed - taken).max(0)).unwrap_or(u32::MAX)
}

fn counted_minutes(entry: &Break, start: NaiveDateTime, now: NaiveDateTime, open: bool) -> u32 {
    match (entry.start(), entry.end()) {
        (Some(from), None) if open && entry.is_open() => {
            if from >= start {
                minutes_between(from, now)
            } else {
                0
            }
        }
        (Some(from), Some(to)) => {
            if from >= start && to <= now {
                entry.duration()
            } else {
                0
            }
        }
        _ => entry.duration(),
    }
}

/// Projected end of work: the start plus the planned minutes plus every
/// break minute recorded so far. `None` if the session never started.
pub fn end_time(session: &SessionState) -> Option<NaiveDateTime> {
    let start = session.start_time?;
    let minutes = i64::from(session.planned_work) + i64::from(session.breaks.total_minutes());
    Some(start + TimeDelta::minutes(minutes))
}

/// Minutes worked beyond the plan. Negative while the plan is not met.
pub fn overtime(session: &SessionState) -> i64 {
    i64::from(session.worked_minutes) - i64::from(session.planned_work)
}

//! Compliance checks over one session snapshot.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::domain::engine::ledger::{
    FIRST_BREAK_AFTER, FIRST_BREAK_MINUTES, SECOND_BREAK_AFTER, SECOND_BREAK_MINUTES,
};
use crate::domain::entity::{Plan, Status, TimeOfDay, Warning};

/// Everything the checks look at.
#[derive(Debug, Clone)]
pub struct ComplianceInput<'a> {
    pub now: NaiveDateTime,
    pub status: Status,
    pub start_requested: bool,
    pub manual_start: TimeOfDay,
    /// Planned minutes of the current weekday.
    pub quota: u32,
    pub plan: &'a Plan,
    pub worked_minutes: u32,
    pub total_break_minutes: u32,
    pub start_date: Option<NaiveDate>,
    pub end_time: Option<NaiveDateTime>,
}

/// Evaluate every check and report all warnings that apply, in check order.
pub fn evaluate(input: &ComplianceInput<'_>) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if input.quota == 0 && (input.status.is_active() || input.start_requested) {
        let weekend = matches!(input.now.weekday(), Weekday::Sat | Weekday::Sun);
        warnings.push(Warning::NonWorkingDay { weekend });
    }

    if input.status == Status::Stopped
        && input.start_requested
        && input.manual_start.on(input.now.date()) > input.now
    {
        warnings.push(Warning::FutureStart {
            start: input.manual_start,
        });
    }

    if input.worked_minutes > input.plan.max_duration() {
        warnings.push(Warning::MaxDurationExceeded {
            plan: input.plan.name().to_owned(),
            max: input.plan.max_duration(),
        });
    }

    if input.worked_minutes > FIRST_BREAK_AFTER && input.total_break_minutes < FIRST_BREAK_MINUTES
    {
        warnings.push(Warning::InsufficientBreak {
            worked_over: FIRST_BREAK_AFTER,
            required: FIRST_BREAK_MINUTES,
        });
    }

    if input.worked_minutes > SECOND_BREAK_AFTER
        && input.total_break_minutes < SECOND_BREAK_MINUTES
    {
        warnings.push(Warning::InsufficientBreak {
            worked_over: SECOND_BREAK_AFTER,
            required: SECOND_BREAK_MINUTES,
        });
    }

    if let (Some(date), Some(end)) = (input.start_date, input.end_time) {
        let minutes = (end - date.and_time(NaiveTime::MIN)).num_minutes();
        if !input.plan.frames(minutes) {
            warnings.push(Warning::EndOutsideFrame {
                end: TimeOfDay::of(end),
                earliest: input.plan.earliest_start(),
                latest: input.plan.latest_end(),
            });
        }
    }

    warnings
}

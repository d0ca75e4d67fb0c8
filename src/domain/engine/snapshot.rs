use serde::Serialize;

use crate::domain::engine::calculator;
use crate::domain::engine::ledger::BreakLedger;
use crate::domain::engine::session::SessionState;
use crate::domain::entity::{PlanKey, Status, TimeOfDay, Warning};

/// Read-only view of the engine pushed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub plan: PlanKey,
    pub status: Status,
    pub worked_minutes: u32,
    pub planned_work: u32,
    pub overtime: i64,
    pub breaks: BreakLedger,
    pub end_time: Option<TimeOfDay>,
    pub warnings: Vec<Warning>,
}

impl Snapshot {
    /// The reduced view for a secondary display.
    pub fn feed(&self) -> Feed {
        Feed {
            worked_minutes: self.worked_minutes,
            planned_work: self.planned_work,
            end_time: self.end_time,
        }
    }
}

impl From<&SessionState> for Snapshot {
    fn from(session: &SessionState) -> Self {
        Self {
            plan: session.plan.clone(),
            status: session.status,
            worked_minutes: session.worked_minutes,
            planned_work: session.planned_work,
            overtime: calculator::overtime(session),
            breaks: session.breaks.clone(),
            end_time: calculator::end_time(session).map(TimeOfDay::of),
            warnings: session.warnings.clone(),
        }
    }
}

/// Live progress figures; consumers never write back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    pub worked_minutes: u32,
    pub planned_work: u32,
    pub end_time: Option<TimeOfDay>,
}

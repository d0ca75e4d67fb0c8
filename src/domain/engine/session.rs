use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::engine::ledger::BreakLedger;
use crate::domain::entity::{PlanKey, Settings, Status, TimeOfDay, Warning};

/// The single mutable aggregate of the tracking engine, persisted as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub plan: PlanKey,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveDateTime>,
    pub manual_start_input: TimeOfDay,
    pub planned_work: u32,
    #[serde(default)]
    pub worked_minutes: u32,
    #[serde(default)]
    pub breaks: BreakLedger,
    #[serde(default)]
    pub warnings: Vec<Warning>,
    /// Whether a start was attempted since the last stop or reset.
    #[serde(default)]
    pub start_requested: bool,
}

impl SessionState {
    /// A fresh stopped session for the day of `now`.
    pub fn initial(settings: &Settings, now: NaiveDateTime) -> Self {
        Self {
            plan: settings.default_plan().clone(),
            status: Status::Stopped,
            start_time: None,
            manual_start_input: TimeOfDay::of(now),
            planned_work: settings.quota(now.weekday()),
            worked_minutes: 0,
            breaks: BreakLedger::from_template(settings.default_breaks(), now.date()),
            warnings: Vec::new(),
            start_requested: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use crate::domain::entity::settings;
    use crate::domain::entity::Break;

    #[test]
    fn session_initial() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(7, 45, 12)
            .unwrap();
        let session = SessionState::initial(&settings::sample(), now);
        assert_eq!(session.plan, "flex");
        assert_eq!(session.status, Status::Stopped);
        assert_eq!(session.manual_start_input, "07:45".parse().unwrap());
        assert_eq!(session.planned_work, 480);
        assert_eq!(session.worked_minutes, 0);
        assert!(session.breaks.is_empty());
    }

    #[test]
    fn session_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let at = |h, m| date.and_hms_opt(h, m, 0).unwrap();
        let session = SessionState {
            plan: "core".into(),
            status: Status::Paused,
            start_time: Some(at(8, 0)),
            manual_start_input: "08:00".parse().unwrap(),
            planned_work: 480,
            worked_minutes: 120,
            breaks: BreakLedger::new(vec![
                Break::from_parts(Some(at(9, 0)), Some(at(9, 15)), 0),
                Break::from_parts(None, Some(at(11, 0)), 10),
                Break::planned(30),
                Break::open(at(10, 0)),
            ]),
            warnings: vec![Warning::NonWorkingDay { weekend: true }],
            start_requested: true,
        };

        let json = serde_json::to_string(&session).unwrap();
        assert_eq!(serde_json::from_str::<SessionState>(&json).unwrap(), session);
    }

    #[test]
    fn session_record_shape() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut session =
            SessionState::initial(&settings::sample(), date.and_hms_opt(8, 0, 0).unwrap());
        session.start_time = Some(date.and_hms_opt(8, 0, 0).unwrap());

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["startTime"], "2024-01-15T08:00:00");
        assert_eq!(value["manualStartInput"], "08:00");
        assert_eq!(value["status"], "stopped");
        assert_eq!(value["plannedWork"], 480);
    }
}

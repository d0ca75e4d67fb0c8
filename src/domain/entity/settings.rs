use std::collections::BTreeMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use crate::domain::entity::plan::{Plan, PlanKey};
use crate::domain::entity::time_of_day::TimeOfDay;

/// One slot of the default break template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakTemplate {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub duration: u32,
}

/// How minute amounts are rendered for the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    Minutes,
    #[default]
    Hours,
}

impl DisplayFormat {
    /// Render a signed amount of minutes.
    pub fn format(self, minutes: i64) -> String {
        match self {
            Self::Minutes => format!("{minutes} min"),
            Self::Hours => {
                let sign = if minutes < 0 { "-" } else { "" };
                let minutes = minutes.unsigned_abs();
                format!("{sign}{}:{:02} h", minutes / 60, minutes % 60)
            }
        }
    }
}

/// User preferences the engine reads but never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    daily_work: [u32; 7],
    default_breaks: Vec<BreakTemplate>,
    plans: BTreeMap<PlanKey, Plan>,
    default_plan: PlanKey,
    display_format: DisplayFormat,
}

impl Settings {
    /// Try to create [`Settings`]. `daily_work` holds the quota in minutes
    /// for every weekday, starting with Sunday.
    ///
    /// # Errors
    ///
    /// This function will return an error if `default_plan` names no
    /// configured plan.
    pub fn try_new(
        daily_work: [u32; 7],
        default_breaks: Vec<BreakTemplate>,
        plans: BTreeMap<PlanKey, Plan>,
        default_plan: PlanKey,
        display_format: DisplayFormat,
    ) -> Result<Self, TryNewSettingsError> {
        ensure!(
            plans.contains_key(&default_plan),
            UnknownDefaultPlanSnafu { key: default_plan }
        );
        Ok(Self {
            daily_work,
            default_breaks,
            plans,
            default_plan,
            display_format,
        })
    }

    /// Planned working minutes on `weekday`. Zero marks a day off.
    pub fn quota(&self, weekday: Weekday) -> u32 {
        self.daily_work[weekday.num_days_from_sunday() as usize]
    }

    pub fn default_breaks(&self) -> &[BreakTemplate] {
        &self.default_breaks
    }

    pub fn default_plan(&self) -> &PlanKey {
        &self.default_plan
    }

    pub fn has_plan(&self, key: &str) -> bool {
        self.plans.contains_key(key)
    }

    /// Look up the plan stored under `key`, falling back to the default plan
    /// for unknown keys.
    pub fn plan(&self, key: &str) -> &Plan {
        match self.plans.get(key) {
            Some(plan) => plan,
            None => &self.plans[&self.default_plan],
        }
    }

    pub fn plans(&self) -> impl Iterator<Item = (&PlanKey, &Plan)> {
        self.plans.iter()
    }

    pub fn display_format(&self) -> DisplayFormat {
        self.display_format
    }
}

/// An error type of creating [`Settings`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum TryNewSettingsError {
    #[snafu(display("Default plan {key:?} is not configured"))]
    #[non_exhaustive]
    UnknownDefaultPlan { key: PlanKey },
}

#[cfg(test)]
pub(crate) fn sample() -> Settings {
    let time = |s: &str| s.parse::<TimeOfDay>().unwrap();
    let mut plans = BTreeMap::new();
    plans.insert(
        "flex".to_owned(),
        Plan::try_new("Gleitzeit".into(), time("06:00"), time("20:00"), 600).unwrap(),
    );
    plans.insert(
        "core".to_owned(),
        Plan::try_new("Kernzeit".into(), time("07:00"), time("18:00"), 540).unwrap(),
    );
    Settings::try_new(
        [0, 480, 480, 480, 480, 480, 0],
        Vec::new(),
        plans,
        "flex".to_owned(),
        DisplayFormat::Hours,
    )
    .unwrap()
}

use snafu::prelude::*;

use crate::domain::entity::time_of_day::TimeOfDay;

/// Key under which a [`Plan`] is configured.
pub type PlanKey = String;

/// An attendance plan: the frame in which work may end and the longest
/// allowed working day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    name: String,
    earliest_start: TimeOfDay,
    latest_end: TimeOfDay,
    max_duration: u32,
}

impl Plan {
    /// Try to create a [`Plan`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the name is empty or the frame
    /// ends before it starts.
    pub fn try_new(
        name: String,
        earliest_start: TimeOfDay,
        latest_end: TimeOfDay,
        max_duration: u32,
    ) -> Result<Self, TryNewPlanError> {
        ensure!(!name.is_empty(), EmptyNameSnafu);
        ensure!(
            earliest_start <= latest_end,
            InvertedFrameSnafu {
                earliest_start,
                latest_end,
            }
        );
        Ok(Self {
            name,
            earliest_start,
            latest_end,
            max_duration,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn earliest_start(&self) -> TimeOfDay {
        self.earliest_start
    }

    pub fn latest_end(&self) -> TimeOfDay {
        self.latest_end
    }

    /// Longest allowed working day in minutes.
    pub fn max_duration(&self) -> u32 {
        self.max_duration
    }

    /// Returns `true` if a point `minutes` after midnight lies within the
    /// frame of this plan. Points past the end of the day are outside.
    pub fn frames(&self, minutes: i64) -> bool {
        let earliest = i64::from(self.earliest_start.minutes());
        let latest = i64::from(self.latest_end.minutes());
        (earliest..=latest).contains(&minutes)
    }
}

/// An error type of creating a [`Plan`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum TryNewPlanError {
    #[snafu(display("Name of a plan must be non-empty"))]
    #[non_exhaustive]
    EmptyName,
    #[snafu(display("Plan frame ends at {latest_end} before it starts at {earliest_start}"))]
    #[non_exhaustive]
    InvertedFrame {
        earliest_start: TimeOfDay,
        latest_end: TimeOfDay,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn plan_try_new() {
        let plan = Plan::try_new("Gleitzeit".into(), time("06:00"), time("20:00"), 600).unwrap();
        assert_eq!(plan.name(), "Gleitzeit");
        assert_eq!(plan.max_duration(), 600);

        assert_eq!(
            Plan::try_new("".into(), time("06:00"), time("20:00"), 600),
            Err(TryNewPlanError::EmptyName)
        );
        assert!(matches!(
            Plan::try_new("x".into(), time("20:00"), time("06:00"), 600),
            Err(TryNewPlanError::InvertedFrame { .. })
        ));
    }

    #[test]
    fn plan_frames() {
        let plan = Plan::try_new("Kernzeit".into(), time("07:00"), time("19:00"), 600).unwrap();
        assert!(plan.frames(7 * 60));
        assert!(plan.frames(19 * 60));
        assert!(!plan.frames(19 * 60 + 1));
        assert!(!plan.frames(6 * 60 + 59));
        assert!(!plan.frames(24 * 60 + 8 * 60));
    }
}

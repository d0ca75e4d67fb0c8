use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Common accessors over every shape a [`Break`] can take.
#[enum_dispatch::enum_dispatch]
pub trait BreakSpan {
    /// When the break began, if known.
    fn start(&self) -> Option<NaiveDateTime>;

    /// When the break ended, if known.
    fn end(&self) -> Option<NaiveDateTime>;

    /// Length of the break in minutes.
    fn duration(&self) -> u32;
}

/// One rest interval.
///
/// A break is always built through [`Break::from_parts`], so a break with
/// both ends known carries exactly the duration of its interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BreakRecord", into = "BreakRecord")]
#[enum_dispatch::enum_dispatch(BreakSpan)]
pub enum Break {
    Planned(PlannedBreak),
    Partial(PartialBreak),
    Complete(CompleteBreak),
}

impl Break {
    /// Build a break from optional interval ends and a fallback duration.
    /// The duration is derived from the interval when both ends are present.
    pub fn from_parts(
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        duration: u32,
    ) -> Self {
        match (start, end) {
            (Some(start), Some(end)) => CompleteBreak::new(start, end).into(),
            (None, None) => PlannedBreak { duration }.into(),
            (start, end) => PartialBreak {
                start,
                end,
                duration,
            }
            .into(),
        }
    }

    /// A break with neither times nor duration.
    pub fn empty() -> Self {
        Self::planned(0)
    }

    /// A break which only reserves `duration` minutes.
    pub fn planned(duration: u32) -> Self {
        PlannedBreak { duration }.into()
    }

    /// A break which began at `start` and is still going on.
    pub fn open(start: NaiveDateTime) -> Self {
        Self::from_parts(Some(start), None, 0)
    }

    /// Returns a copy with the start replaced.
    pub fn with_start(&self, start: NaiveDateTime) -> Self {
        Self::from_parts(Some(start), self.end(), self.duration())
    }

    /// Returns a copy with the end replaced.
    pub fn with_end(&self, end: NaiveDateTime) -> Self {
        Self::from_parts(self.start(), Some(end), self.duration())
    }

    /// Returns a copy with the duration replaced. The interval keeps
    /// precedence on a complete break.
    pub fn with_duration(&self, duration: u32) -> Self {
        Self::from_parts(self.start(), self.end(), duration)
    }

    /// Returns `true` if both ends of the interval are known.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    /// Returns `true` if the break has a start but no end.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            Self::Partial(PartialBreak {
                start: Some(_),
                end: None,
                ..
            })
        )
    }
}

/// A break known only by its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedBreak {
    duration: u32,
}

impl BreakSpan for PlannedBreak {
    fn start(&self) -> Option<NaiveDateTime> {
        None
    }

    fn end(&self) -> Option<NaiveDateTime> {
        None
    }

    fn duration(&self) -> u32 {
        self.duration
    }
}

/// A break with exactly one end of its interval known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialBreak {
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    duration: u32,
}

impl BreakSpan for PartialBreak {
    fn start(&self) -> Option<NaiveDateTime> {
        self.start
    }

    fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }

    fn duration(&self) -> u32 {
        self.duration
    }
}

/// A break with a concrete interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompleteBreak {
    start: NaiveDateTime,
    end: NaiveDateTime,
    duration: u32,
}

impl CompleteBreak {
    fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            duration: minutes_between(start, end),
        }
    }
}

impl BreakSpan for CompleteBreak {
    fn start(&self) -> Option<NaiveDateTime> {
        Some(self.start)
    }

    fn end(&self) -> Option<NaiveDateTime> {
        Some(self.end)
    }

    fn duration(&self) -> u32 {
        self.duration
    }
}

/// Whole minutes from `start` to `end`, rounded to the nearest minute and
/// floored at zero.
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> u32 {
    let seconds = (end - start).num_seconds();
    if seconds <= 0 {
        0
    } else {
        u32::try_from((seconds + 30) / 60).unwrap_or(u32::MAX)
    }
}

/// Serialized shape of a [`Break`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BreakRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end: Option<NaiveDateTime>,
    #[serde(default)]
    duration: u32,
}

impl From<BreakRecord> for Break {
    fn from(value: BreakRecord) -> Self {
        Self::from_parts(value.start, value.end, value.duration)
    }
}

impl From<Break> for BreakRecord {
    fn from(value: Break) -> Self {
        Self {
            start: value.start(),
            end: value.end(),
            duration: value.duration(),
        }
    }
}

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::domain::entity::time_of_day::TimeOfDay;

/// A compliance problem of the current session. Warnings are advisory; the
/// session keeps running.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Warning {
    /// Work on a day whose quota is zero.
    NonWorkingDay { weekend: bool },
    /// The manually entered start lies after the current time.
    FutureStart { start: TimeOfDay },
    /// The plan's longest working day is exceeded.
    #[serde(rename_all = "camelCase")]
    MaxDurationExceeded { plan: String, max: u32 },
    /// Not enough break time for the minutes worked so far.
    #[serde(rename_all = "camelCase")]
    InsufficientBreak { worked_over: u32, required: u32 },
    /// The projected end of work leaves the plan's frame.
    EndOutsideFrame {
        end: TimeOfDay,
        earliest: TimeOfDay,
        latest: TimeOfDay,
    },
}

impl Display for Warning {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::NonWorkingDay { weekend: true } => {
                f.write_str("Samstag und Sonntag sind arbeitsfrei!")
            }
            Self::NonWorkingDay { weekend: false } => {
                f.write_str("Heute ist laut Einstellungen ein arbeitsfreier Tag!")
            }
            Self::FutureStart { start } => {
                write!(f, "Die Startzeit {start} liegt in der Zukunft!")
            }
            Self::MaxDurationExceeded { plan, max } => write!(
                f,
                "Die maximale Arbeitszeit von {max} Minuten ({plan}) ist überschritten!"
            ),
            Self::InsufficientBreak {
                worked_over,
                required,
            } => write!(
                f,
                "Nach mehr als {} Stunden Arbeit sind mindestens {required} Minuten Pause vorgeschrieben!",
                worked_over / 60
            ),
            Self::EndOutsideFrame {
                end,
                earliest,
                latest,
            } => write!(
                f,
                "Das Arbeitsende {end} liegt außerhalb des Rahmens {earliest} bis {latest}!"
            ),
        }
    }
}

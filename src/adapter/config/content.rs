use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::entity::DisplayFormat;

/// The parsed `config.toml`. Times of day are kept as written and checked
/// when the settings are built from them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub display_format: DisplayFormat,
    pub default_plan: String,
    #[serde(default)]
    pub daily_work: DailyWorkContent,
    #[serde(default)]
    pub default_breaks: Vec<BreakContent>,
    pub plans: BTreeMap<String, PlanContent>,
    #[serde(default)]
    pub storage: StorageContent,
}

/// Planned working minutes per weekday. Omitted days are days off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DailyWorkContent {
    pub monday: u32,
    pub tuesday: u32,
    pub wednesday: u32,
    pub thursday: u32,
    pub friday: u32,
    pub saturday: u32,
    pub sunday: u32,
}

impl DailyWorkContent {
    /// The quotas indexed from Sunday.
    pub fn by_weekday(&self) -> [u32; 7] {
        [
            self.sunday,
            self.monday,
            self.tuesday,
            self.wednesday,
            self.thursday,
            self.friday,
            self.saturday,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BreakContent {
    pub start: String,
    pub end: String,
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlanContent {
    pub name: String,
    pub earliest_start: String,
    pub latest_end: String,
    pub max_duration: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StorageContent {
    /// Directory of the saved session.
    pub data: Option<PathBuf>,
}

use std::collections::BTreeMap;
use std::sync::Arc;

use snafu::prelude::*;

use crate::adapter::config::Configuration;
use crate::domain::entity::{BreakTemplate, Plan, Settings, TimeOfDay};
use crate::domain::repository::settings::{
    GetSettingsError, InvalidSnafu, PlanSnafu, TimeSnafu,
};
use crate::domain::repository::SettingsRepository;

/// A [`SettingsRepository`] implementation which reads configuration files.
pub struct SettingsConfiguration {
    config: Arc<Configuration>,
}

impl SettingsConfiguration {
    /// Creates a new [`SettingsConfiguration`].
    pub fn new(config: Arc<Configuration>) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl SettingsRepository for SettingsConfiguration {
    async fn settings(&self) -> Result<Settings, GetSettingsError> {
        let config = &self.config;

        let default_breaks = config
            .default_breaks
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                Ok(BreakTemplate {
                    start: time(&slot.start, format!("default_breaks[{index}].start"))?,
                    end: time(&slot.end, format!("default_breaks[{index}].end"))?,
                    duration: slot.duration,
                })
            })
            .collect::<Result<Vec<_>, GetSettingsError>>()?;

        let mut plans = BTreeMap::new();
        for (key, plan) in &config.plans {
            let earliest_start = time(
                &plan.earliest_start,
                format!("plans.{key}.earliest_start"),
            )?;
            let latest_end = time(&plan.latest_end, format!("plans.{key}.latest_end"))?;
            let plan = Plan::try_new(
                plan.name.clone(),
                earliest_start,
                latest_end,
                plan.max_duration,
            )
            .context(PlanSnafu { key })?;
            plans.insert(key.clone(), plan);
        }

        Settings::try_new(
            config.daily_work.by_weekday(),
            default_breaks,
            plans,
            config.default_plan.clone(),
            config.display_format,
        )
        .context(InvalidSnafu)
    }
}

fn time(value: &str, field: String) -> Result<TimeOfDay, GetSettingsError> {
    value.parse().context(TimeSnafu { field })
}

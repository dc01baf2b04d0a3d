use std::path::Path;

use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{DEFAULT_MAX_MONTHS, ENV_PREFIX};
use crate::error::{CoreError, CoreResult};
use crate::types::TimePerspectiveFilter;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Calendar months covered by recurrence expansion.
    pub max_months: u32,
    pub default_perspective: TimePerspectiveFilter,
    /// Drop single events whose invite the user declined.
    pub filter_declined_invites: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
            default_perspective: TimePerspectiveFilter::Future,
            filter_declined_invites: true,
        }
    }
}

impl ScheduleConfig {
    /// ## Summary
    /// Checks that the schedule settings describe a usable expansion window.
    ///
    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` if `max_months` is zero.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_months == 0 {
            return Err(CoreError::InvalidConfiguration(
                "schedule.max_months must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, an optional `config.toml` and
    /// `OPENTALK_*` environment variables into a `Settings`.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it or
    /// validating it fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// ## Summary
    /// Like [`Settings::load`], but reads the given file instead of `config.toml`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it or
    /// validating it fails.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config.toml").required(false),
        };

        let settings = Config::builder()
            .set_default("logging.level", "debug")?
            .set_default("schedule.max_months", i64::from(DEFAULT_MAX_MONTHS))?
            .set_default(
                "schedule.default_perspective",
                TimePerspectiveFilter::Future.as_str(),
            )?
            .set_default("schedule.filter_declined_invites", true)?
            // TOML file
            .add_source(file)
            // Env
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        settings.schedule.validate()?;
        tracing::debug!(?settings, "Settings loaded");
        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config(path: Option<&Path>) -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load_from(path)
}

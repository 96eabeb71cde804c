use std::path::Path;

use anyhow::Result;
use config::{Config, ConfigBuilder, Environment, builder::DefaultState};
use serde::Deserialize;

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_HORIZON_DAYS, DEFAULT_LOG_LEVEL, DEFAULT_MAX_ITERATIONS,
    ENV_PREFIX, ENV_SEPARATOR,
};
use crate::error::{CoreError, CoreResult};
use crate::types::Locale;


#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub recurrence: RecurrenceConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Safety bounds applied to every recurrence expansion.
#[derive(Debug, Clone, Deserialize)]
pub struct RecurrenceConfig {
    pub horizon_days: u32,
    pub max_iterations: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    pub locale: Locale,
    /// IANA zone used to decide what "today" is. System local time when unset.
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, environment variables and an optional TOML file.
    /// Later sources win: the file overrides the environment, which overrides defaults.
    ///
    /// When `path` is `None`, `kairos.toml` in the working directory is read if present.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it, or validating it fails.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        tracing::debug!(path = ?path, "Loading configuration");

        let file = match path {
            Some(path) => config::File::from(path.to_path_buf()).required(true),
            None => config::File::with_name(CONFIG_FILE_NAME).required(false),
        };

        let settings = defaults()?
            .add_source(environment())
            .add_source(file)
            .build()?
            .try_deserialize::<Self>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks that the loaded values can drive the engine.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` when a safety bound is zero.
    pub fn validate(&self) -> CoreResult<()> {
        if self.recurrence.horizon_days == 0 {
            return Err(CoreError::ConfigError(
                "recurrence.horizon_days must be at least 1".to_string(),
            ));
        }
        if self.recurrence.max_iterations == 0 {
            return Err(CoreError::ConfigError(
                "recurrence.max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recurrence: RecurrenceConfig {
                horizon_days: DEFAULT_HORIZON_DAYS,
                max_iterations: DEFAULT_MAX_ITERATIONS,
            },
            display: DisplayConfig {
                locale: Locale::default(),
                timezone: None,
            },
            logging: LoggingConfig {
                level: DEFAULT_LOG_LEVEL.to_string(),
            },
        }
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>> {
    Ok(Config::builder()
        .set_default("recurrence.horizon_days", i64::from(DEFAULT_HORIZON_DAYS))?
        .set_default("recurrence.max_iterations", i64::from(DEFAULT_MAX_ITERATIONS))?
        .set_default("display.locale", Locale::default().as_str())?
        .set_default("logging.level", DEFAULT_LOG_LEVEL)?)
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator(ENV_SEPARATOR)
        .ignore_empty(true)
        .try_parsing(true)
}

/// ## Summary
/// Loads configuration from the `.env` file, environment variables and `kairos.toml`.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config(path: Option<&Path>) -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load(path)
}

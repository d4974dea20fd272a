//! Configuration loading.
//!
//! [`AppConfig`] is the deserialization target for the merged sources:
//! checked-in TOML files plus `TASKHUB_`-prefixed environment variables.
//! Each section lives in its own sub-module.

pub mod app;
pub mod logging;
pub mod realtime;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::logging::LoggingConfig;
use self::realtime::RealtimeConfig;

use crate::error::AppError;

/// Root of the configuration tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub realtime: RealtimeConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the named environment.
    ///
    /// Sources merge in order, later over earlier: `config/default.toml`,
    /// `config/{env}.toml`, then `TASKHUB_`-prefixed environment
    /// variables with `__` separating nesting levels
    /// (`TASKHUB_SERVER__PORT=9000`). Every source is optional, so a
    /// bare process starts on built-in defaults.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("TASKHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

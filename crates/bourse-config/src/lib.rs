//! Configuration management.

mod settings;

pub use settings::{
    AnalysisSettings, AppConfig, AppSettings, LoggingConfig, RetrySettings, SourceSettings,
    StorageSettings, SyncSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Prefix of environment overrides, e.g. `BOURSE__SYNC__CONCURRENCY=8`.
pub const ENV_PREFIX: &str = "BOURSE";

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

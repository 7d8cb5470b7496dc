//! Configuration structures.

use std::path::PathBuf;
use std::time::Duration;

use bourse_core::error::BourseError;
use bourse_core::types::TimePeriod;
use bourse_data::{MseConfig, SymbolFilter, DEFAULT_EXCLUDED_CODES};
use bourse_signals::SignalThresholds;
use bourse_sync::{RetryPolicy, SyncPolicy};
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub sync: SyncSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub signals: SignalThresholds,
}

impl AppConfig {
    /// Check value ranges that the types alone cannot express.
    pub fn validate(&self) -> Result<(), BourseError> {
        self.logging.validate()?;
        self.source.validate()?;
        self.sync.validate()?;
        self.signals.validate()
    }

    /// Effective configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String, BourseError> {
        toml::to_string_pretty(self).map_err(|e| BourseError::Serialization(e.to_string()))
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "bourse".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Directory for daily rolling log files
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }

    fn validate(&self) -> Result<(), BourseError> {
        match self.format.to_ascii_lowercase().as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(BourseError::Config(format!(
                "logging.format must be \"pretty\" or \"json\", got {other:?}"
            ))),
        }
    }
}

/// Remote exchange settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub skip_zero_turnover: bool,
    /// Codes never synced, in addition to codes containing digits
    pub excluded_codes: Vec<String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        let mse = MseConfig::default();
        Self {
            base_url: mse.base_url,
            timeout_secs: mse.timeout.as_secs(),
            user_agent: mse.user_agent,
            skip_zero_turnover: mse.skip_zero_turnover,
            excluded_codes: DEFAULT_EXCLUDED_CODES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl SourceSettings {
    pub fn mse_config(&self) -> MseConfig {
        MseConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
            skip_zero_turnover: self.skip_zero_turnover,
        }
    }

    pub fn symbol_filter(&self) -> SymbolFilter {
        SymbolFilter {
            exclude_digits: true,
            excluded: self.excluded_codes.clone(),
        }
    }

    fn validate(&self) -> Result<(), BourseError> {
        if self.base_url.trim().is_empty() {
            return Err(BourseError::Config("source.base_url must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(BourseError::Config("source.timeout_secs must be at least 1".into()));
        }
        Ok(())
    }
}

/// Retry settings for failed chunks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
        }
    }
}

/// Synchronization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    pub backfill_chunks: usize,
    pub stride_months: u32,
    pub concurrency: usize,
    /// Fixed symbol list; when absent the exchange directory is used
    pub symbols: Option<Vec<String>>,
    pub retry: RetrySettings,
}

impl Default for SyncSettings {
    fn default() -> Self {
        let policy = SyncPolicy::default();
        Self {
            backfill_chunks: policy.backfill_chunks,
            stride_months: policy.stride_months,
            concurrency: 4,
            symbols: None,
            retry: RetrySettings::default(),
        }
    }
}

impl SyncSettings {
    pub fn policy(&self) -> SyncPolicy {
        SyncPolicy {
            backfill_chunks: self.backfill_chunks,
            stride_months: self.stride_months,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::exponential(
            self.retry.max_retries,
            Duration::from_millis(self.retry.base_delay_ms),
            Duration::from_millis(self.retry.max_delay_ms),
        )
    }

    fn validate(&self) -> Result<(), BourseError> {
        if self.backfill_chunks == 0 {
            return Err(BourseError::Config("sync.backfill_chunks must be at least 1".into()));
        }
        if self.stride_months == 0 {
            return Err(BourseError::Config("sync.stride_months must be at least 1".into()));
        }
        if self.concurrency == 0 {
            return Err(BourseError::Config("sync.concurrency must be at least 1".into()));
        }
        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            return Err(BourseError::Config(
                "sync.retry.base_delay_ms must not exceed max_delay_ms".into(),
            ));
        }
        Ok(())
    }
}

/// Where history files live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub data_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

/// Analysis defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub default_period: TimePeriod,
}

//! Pool configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use pospool_types::{PoolError, PoolParams, RATIO_BASE};

use crate::logging::LogFormat;

/// Configuration for a pool host.
///
/// Can be loaded from a TOML file via [`PoolConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Whole CFX per vote.
    #[serde(default = "default_cfx_count_of_one_vote")]
    pub cfx_count_of_one_vote: u64,

    /// Unlock delay in blocks after a stake decrease.
    #[serde(default = "default_lock_period")]
    pub lock_period: u64,

    /// Pool fee taken from each reward section (basis points).
    #[serde(default = "default_fee_rate_bps")]
    pub fee_rate_bps: u32,

    /// APY lookback window in blocks.
    #[serde(default = "default_apy_window_blocks")]
    pub apy_window_blocks: u64,

    /// Blocks per year, used to annualize yield.
    #[serde(default = "default_blocks_per_year")]
    pub blocks_per_year: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_cfx_count_of_one_vote() -> u64 {
    PoolParams::mainnet_defaults().cfx_count_of_one_vote
}

fn default_lock_period() -> u64 {
    PoolParams::mainnet_defaults().lock_period
}

fn default_fee_rate_bps() -> u32 {
    PoolParams::mainnet_defaults().fee_rate_bps
}

fn default_apy_window_blocks() -> u64 {
    PoolParams::mainnet_defaults().apy_window_blocks
}

fn default_blocks_per_year() -> u64 {
    PoolParams::mainnet_defaults().blocks_per_year
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PoolConfig {
    fn default() -> Self {
        toml::from_str("").expect("empty config uses serde defaults")
    }
}

impl PoolConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PoolError> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| PoolError::Config(format!("read config: {e}")))?;
        let config: Self =
            toml::from_str(&text).map_err(|e| PoolError::Config(format!("parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the accounting core cannot operate under.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.cfx_count_of_one_vote == 0 {
            return Err(PoolError::Config(
                "cfx_count_of_one_vote must be non-zero".into(),
            ));
        }
        if self.fee_rate_bps > RATIO_BASE {
            return Err(PoolError::Config(format!(
                "fee_rate_bps {} exceeds {}",
                self.fee_rate_bps, RATIO_BASE
            )));
        }
        if self.blocks_per_year == 0 {
            return Err(PoolError::Config("blocks_per_year must be non-zero".into()));
        }
        Ok(())
    }

    /// The pool parameters this configuration describes.
    pub fn params(&self) -> PoolParams {
        PoolParams {
            cfx_count_of_one_vote: self.cfx_count_of_one_vote,
            lock_period: self.lock_period,
            fee_rate_bps: self.fee_rate_bps,
            apy_window_blocks: self.apy_window_blocks,
            blocks_per_year: self.blocks_per_year,
        }
    }

    /// Parsed log format, defaulting to human output.
    pub fn log_format(&self) -> LogFormat {
        match self.log_format.as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_matches_mainnet_params() {
        let config = PoolConfig::default();
        let params = config.params();
        assert_eq!(params.cfx_count_of_one_vote, 1000);
        assert_eq!(params.fee_rate_bps, 1000);
        assert_eq!(config.log_format(), LogFormat::Human);
    }

    #[test]
    fn from_toml_file_with_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "cfx_count_of_one_vote = 100\nlock_period = 600\nlog_format = \"json\""
        )
        .unwrap();

        let config = PoolConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.cfx_count_of_one_vote, 100);
        assert_eq!(config.lock_period, 600);
        assert_eq!(config.log_format(), LogFormat::Json);
        // untouched fields keep their defaults
        assert_eq!(config.fee_rate_bps, 1000);
    }

    #[test]
    fn invalid_fee_rate_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fee_rate_bps = 20000").unwrap();
        assert!(matches!(
            PoolConfig::from_toml_file(file.path()),
            Err(PoolError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_config_error() {
        assert!(matches!(
            PoolConfig::from_toml_file("/nonexistent/pool.toml"),
            Err(PoolError::Config(_))
        ));
    }
}

//! Serializable run configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use oddslab_core::domain::Timeframe;
use oddslab_core::EngineParams;

/// Unique identifier for a run (content-addressable hash of the config).
pub type RunId = String;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// One instrument to backtest: the exchange symbol plus its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolConfig {
    pub symbol: String,
    pub label: String,
}

impl SymbolConfig {
    pub fn new(symbol: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            label: label.into(),
        }
    }
}

/// Full configuration for one calibration run.
///
/// Captures everything needed to reproduce the run: instruments, candle
/// durations, lookback window, and all engine parameters. Two identical
/// configs hash to the same [`RunId`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_symbols")]
    pub symbols: Vec<SymbolConfig>,

    #[serde(default = "default_timeframes")]
    pub timeframes: Vec<Timeframe>,

    /// How far back to fetch 1-minute bars.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    /// Sampling interval requested from the bar source.
    #[serde(default = "default_interval")]
    pub interval: String,

    #[serde(default)]
    pub params: EngineParams,
}

fn default_symbols() -> Vec<SymbolConfig> {
    vec![
        SymbolConfig::new("BTCUSDT", "BTC"),
        SymbolConfig::new("ETHUSDT", "ETH"),
        SymbolConfig::new("SOLUSDT", "SOL"),
        SymbolConfig::new("XRPUSDT", "XRP"),
    ]
}

fn default_timeframes() -> Vec<Timeframe> {
    vec![
        Timeframe::new(5, "5M"),
        Timeframe::new(15, "15M"),
        Timeframe::new(60, "1H"),
    ]
}

fn default_lookback_days() -> u32 {
    30
}

fn default_interval() -> String {
    "1m".to_string()
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            symbols: default_symbols(),
            timeframes: default_timeframes(),
            lookback_days: default_lookback_days(),
            interval: default_interval(),
            params: EngineParams::default(),
        }
    }
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols.is_empty() {
            return Err(ConfigError::Invalid("no symbols configured".into()));
        }
        if self.timeframes.is_empty() {
            return Err(ConfigError::Invalid("no timeframes configured".into()));
        }
        if let Some(tf) = self.timeframes.iter().find(|tf| tf.minutes == 0) {
            return Err(ConfigError::Invalid(format!(
                "timeframe '{}' has zero duration",
                tf.label
            )));
        }
        if self.lookback_days == 0 {
            return Err(ConfigError::Invalid("lookback_days must be positive".into()));
        }
        Ok(())
    }

    /// Deterministic hash ID for this configuration.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_id_is_deterministic() {
        let config = RunConfig::default();
        assert_eq!(config.run_id(), config.run_id());
        assert!(!config.run_id().is_empty());
    }

    #[test]
    fn run_id_changes_with_params() {
        let config1 = RunConfig::default();
        let mut config2 = config1.clone();
        config2.lookback_days = 60;
        assert_ne!(config1.run_id(), config2.run_id());
    }

    #[test]
    fn minimal_toml_falls_back_to_defaults() {
        let config = RunConfig::from_toml("").unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn toml_overrides_apply() {
        let config = RunConfig::from_toml(
            r#"
lookback_days = 7

[[symbols]]
symbol = "BTCUSDT"
label = "BTC"

[[timeframes]]
minutes = 15
label = "15M"
"#,
        )
        .unwrap();
        assert_eq!(config.lookback_days, 7);
        assert_eq!(config.symbols.len(), 1);
        assert_eq!(config.timeframes.len(), 1);
        // Engine params stay at reference defaults.
        assert_eq!(config.params, EngineParams::default());
    }

    #[test]
    fn empty_symbol_list_is_rejected() {
        let err = RunConfig::from_toml("symbols = []").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_duration_timeframe_is_rejected() {
        let err = RunConfig::from_toml(
            r#"
[[timeframes]]
minutes = 0
label = "0M"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn config_serialization_roundtrip() {
        let config = RunConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let deser: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deser);
    }
}

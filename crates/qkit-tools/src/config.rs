//! Configuration for the qkit tools.
//!
//! Defaults match the library behaviour. Values can be loaded from a YAML
//! file or overridden from environment variables.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Top-level tools configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Random circuit generation defaults.
    pub random: RandomConfig,
    /// Display formatting defaults.
    pub display: DisplayConfig,
}

/// Defaults for random circuit generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    /// Circuit width when none is given.
    pub num_qubits: u32,
    /// Lower bound (inclusive) of the drawn gate count.
    pub min_gates: usize,
    /// Upper bound (exclusive) of the drawn gate count.
    pub max_gates: usize,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            num_qubits: 5,
            min_gates: 5,
            max_gates: 10,
        }
    }
}

/// Defaults for display formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decimal places kept by `clean_1d_array` and `clean_matrix`.
    pub precision: u32,
    /// Decimal places used when deciding and printing ket amplitudes.
    pub ket_precision: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            precision: 7,
            ket_precision: 3,
        }
    }
}

/// Largest precision that still means something for an `f64`.
const MAX_PRECISION: u32 = 15;

impl ToolsConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: ToolsConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables on top of the defaults.
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        let mut config = ToolsConfig::default();

        if let Some(val) = env_parse("QKIT_NUM_QUBITS") {
            config.random.num_qubits = val;
        }
        if let Some(val) = env_parse("QKIT_MIN_GATES") {
            config.random.min_gates = val;
        }
        if let Some(val) = env_parse("QKIT_MAX_GATES") {
            config.random.max_gates = val;
        }
        if let Some(val) = env_parse("QKIT_PRECISION") {
            config.display.precision = val;
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.random.num_qubits == 0 {
            return Err(ConfigError::ValidationError(
                "random.num_qubits must be at least 1".into(),
            ));
        }
        if self.random.min_gates >= self.random.max_gates {
            return Err(ConfigError::ValidationError(format!(
                "random.min_gates ({}) must be below random.max_gates ({})",
                self.random.min_gates, self.random.max_gates
            )));
        }
        for (key, value) in [
            ("display.precision", self.display.precision),
            ("display.ket_precision", self.display.ket_precision),
        ] {
            if value > MAX_PRECISION {
                return Err(ConfigError::ValidationError(format!(
                    "{key} must be at most {MAX_PRECISION}, got {value}"
                )));
            }
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

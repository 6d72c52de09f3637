//! Configuration for tincture
//!
//! Loaded from a TOML file such as:
//!
//! ```toml
//! [conversion]
//! precision = 4
//!
//! [output]
//! preset = "css-color"
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```
//!
//! Every section and field is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::convert::{Context, DEFAULT_PRECISION, MAX_PRECISION, MIN_PRECISION};
use crate::error::{ConfigError, Result};
use crate::format::Preset;
use crate::logging::LogConfig;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub conversion: ConversionConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LogConfig,
}

/// Numeric conversion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Decimal digits kept when channels are rounded
    #[serde(default = "default_precision")]
    pub precision: u32,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
        }
    }
}

fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

/// How colors are written out
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Explicit template; wins over `preset`
    #[serde(default)]
    pub template: Option<String>,

    #[serde(default)]
    pub preset: Preset,
}

impl Config {
    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let shown = path.display().to_string();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(shown).into());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadFailed(shown, e.to_string()))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&self.conversion.precision) {
            return Err(ConfigError::ValidationError(format!(
                "conversion.precision must be between {MIN_PRECISION} and {MAX_PRECISION}, got {}",
                self.conversion.precision
            ))
            .into());
        }
        if self.logging.level.parse::<crate::logging::LogLevel>().is_err() {
            return Err(ConfigError::ValidationError(format!(
                "logging.level {:?} is not a log level",
                self.logging.level
            ))
            .into());
        }
        Ok(())
    }

    /// Rounding context for new colors.
    #[must_use]
    pub fn context(&self) -> Context {
        Context::new(self.conversion.precision)
    }

    /// The output template in effect.
    #[must_use]
    pub fn template(&self) -> &str {
        self.output
            .template
            .as_deref()
            .unwrap_or_else(|| self.output.preset.template())
    }
}

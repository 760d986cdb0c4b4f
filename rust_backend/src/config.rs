//! Calculator configuration file support.
//!
//! Settings are read from a `tools.toml` file:
//!
//! ```toml
//! [pulse_time]
//! advisory_threshold_minutes = 60.0
//!
//! [defaults]
//! k = 1.1
//! c = 1000.0
//! wiring = "single-phase"
//! un = 230.0
//! ib = 5.0
//! iq_percent = 0.4
//! ```
//!
//! Every key is optional. The process-wide settings are loaded once, either
//! explicitly through [`init_config`] or lazily on the first call to [`settings`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use qtty::Minutes;

use crate::algorithms::PulseTimeCalculator;
use crate::core::PulseTimeInput;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "METER_TOOLS_CONFIG";

/// File name searched for in the standard locations.
pub const CONFIG_FILE_NAME: &str = "tools.toml";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Calculator configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub pulse_time: PulseTimeSettings,
    /// Initial values of the pulse-time form
    pub defaults: PulseTimeInput,
}

/// Pulse-time calculator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseTimeSettings {
    pub advisory_threshold_minutes: f64,
}

impl Default for PulseTimeSettings {
    fn default() -> Self {
        Self {
            advisory_threshold_minutes: 60.0,
        }
    }
}

impl ToolsConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ToolsConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ToolsConfig)` if successful
    /// * `Err(ConfigError)` if the file cannot be read, parsed or fails validation
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from the default location.
    ///
    /// Uses the file named by `METER_TOOLS_CONFIG` if set, otherwise searches for
    /// `tools.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(Some(ToolsConfig))` if found and parsed successfully
    /// * `Ok(None)` if no config file exists
    /// * `Err(ConfigError)` on read or parse errors
    pub fn from_default_location() -> Result<Option<Self>, ConfigError> {
        if let Ok(explicit) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(explicit).map(Some);
        }

        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("rust_backend").join(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading calculator config from {}", path.display());
                return Self::from_file(&path).map(Some);
            }
        }

        Ok(None)
    }

    /// Load from the default location, falling back to built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::from_default_location()? {
            Some(config) => Ok(config),
            None => {
                log::info!("No {} found, using built-in defaults", CONFIG_FILE_NAME);
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.pulse_time.advisory_threshold_minutes;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "pulse_time.advisory_threshold_minutes must be a positive number, got {}",
                threshold
            )));
        }
        self.defaults
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("defaults: {}", e)))
    }

    pub fn advisory_threshold(&self) -> Minutes {
        Minutes::new(self.pulse_time.advisory_threshold_minutes)
    }

    /// Pulse-time calculator configured with these settings.
    pub fn calculator(&self) -> PulseTimeCalculator {
        PulseTimeCalculator::new(self.advisory_threshold())
    }
}

/// Global settings initialized once per process.
static SETTINGS: OnceLock<ToolsConfig> = OnceLock::new();

/// Initialize the global settings.
///
/// With `path`, that file is loaded; otherwise the default location is searched.
/// Settings are write-once: after the first successful initialization later calls
/// return the existing settings.
pub fn init_config(path: Option<&Path>) -> Result<&'static ToolsConfig, ConfigError> {
    if let Some(existing) = SETTINGS.get() {
        if let Some(path) = path {
            log::debug!(
                "Config already initialized, ignoring {}",
                path.display()
            );
        }
        return Ok(existing);
    }

    let config = match path {
        Some(path) => ToolsConfig::from_file(path)?,
        None => ToolsConfig::load()?,
    };
    Ok(SETTINGS.get_or_init(|| config))
}

/// Get the global settings, loading them on first use.
///
/// A broken configuration file is logged and replaced by the built-in defaults so
/// the calculators keep working.
pub fn settings() -> &'static ToolsConfig {
    SETTINGS.get_or_init(|| {
        ToolsConfig::load().unwrap_or_else(|e| {
            log::warn!("{}; using built-in defaults", e);
            ToolsConfig::default()
        })
    })
}

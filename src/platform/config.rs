// Logtally - platform/config.rs
//
// config.toml loading with startup validation. Invalid values produce
// actionable warnings and fall back to defaults; a missing file is a
// normal first run, not an error.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::GroupKeyPolicy;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolve the default config.toml path from the platform config directory.
/// Falls back to the current directory if platform dirs cannot be
/// determined.
pub fn default_config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
        proj_dirs.config_dir().join(constants::CONFIG_FILE_NAME)
    } else {
        tracing::warn!("Could not determine platform directories, using current directory");
        PathBuf::from(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml shapes
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[analysis]` section.
    pub analysis: AnalysisSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[analysis]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Maximum number of ranked groups returned.
    pub group_limit: Option<usize>,
    /// Grouping key policy: "full-message" or "first-line".
    pub group_key: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Maximum number of ranked groups returned by the aggregator.
    pub group_limit: usize,

    /// Grouping key policy.
    pub group_key: GroupKeyPolicy,

    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            group_limit: constants::DEFAULT_GROUP_LIMIT,
            group_key: GroupKeyPolicy::default(),
            log_level: None,
        }
    }
}

/// Load and validate the config file at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// warnings. If the file does not exist, returns defaults with no warnings
/// (first-run). If the file is unparseable, returns defaults with a
/// warning -- the application still starts but the user is informed.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            };
            let msg = format!("{err}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            };
            let msg = format!("{err}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    // Validate each field against named constants, accumulating warnings.
    let mut config = AppConfig::default();

    // -- Analysis: group_limit --
    if let Some(limit) = raw.analysis.group_limit {
        if (constants::MIN_GROUP_LIMIT..=constants::MAX_GROUP_LIMIT).contains(&limit) {
            config.group_limit = limit;
        } else {
            let err = ConfigError::ValueOutOfRange {
                field: "[analysis] group_limit".to_string(),
                value: limit.to_string(),
                expected: format!(
                    "{}-{}",
                    constants::MIN_GROUP_LIMIT,
                    constants::MAX_GROUP_LIMIT
                ),
            };
            warnings.push(format!(
                "{err}. Using default ({}).",
                constants::DEFAULT_GROUP_LIMIT
            ));
        }
    }

    // -- Analysis: group_key --
    if let Some(ref key) = raw.analysis.group_key {
        match key.to_lowercase().as_str() {
            "full-message" => config.group_key = GroupKeyPolicy::FullMessage,
            "first-line" => config.group_key = GroupKeyPolicy::FirstLine,
            other => {
                warnings.push(format!(
                    "[analysis] group_key = \"{other}\" is not recognised. \
                     Expected \"full-message\" or \"first-line\". Using default (full-message).",
                ));
            }
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}

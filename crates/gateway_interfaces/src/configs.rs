//! Settings of the gateway crates.
//!
//! Loaded from `config/<env>.toml` (the environment comes from `RUN_ENV`), with any
//! `GATEWAY__SECTION__KEY` environment variable overriding the matching file value.

use std::path::{Path, PathBuf};

use common_utils::{consts, errors::CustomResult};
use error_stack::{report, ResultExt};
use gateway_env::{config::Log, logger};
use serde::Deserialize;

/// Prefix of environment variables overriding file settings
pub const ENV_PREFIX: &str = "GATEWAY";
/// Separator between the nesting levels of an overriding environment variable
pub const ENV_SEPARATOR: &str = "__";

/// Errors raised while loading settings
#[allow(missing_docs)]
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Unable to read configuration file {0}")]
    FileReadFailed(String),
    #[error("Configuration file {0} is not valid TOML")]
    InvalidFile(String),
    #[error("Configuration does not match the expected settings")]
    DeserializationFailed,
}

/// Settings of the whole gateway
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
    /// Logging
    pub log: Log,
    /// Connector endpoints
    pub connectors: Connectors,
    /// Outgoing HTTP client
    pub http_client: HttpClientSettings,
}

/// Endpoints of every connector
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Connectors {
    /// eWAY
    pub eway: ConnectorParams,
}

/// Endpoint of one connector
#[derive(Debug, Deserialize, Clone)]
pub struct ConnectorParams {
    /// base url
    pub base_url: String,
}

impl Default for ConnectorParams {
    fn default() -> Self {
        Self {
            base_url: "https://www.eway.com.au/".to_string(),
        }
    }
}

/// Settings of the outgoing HTTP client
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HttpClientSettings {
    /// Whole-request timeout, in seconds
    pub timeout_secs: u64,
}

impl Default for HttpClientSettings {
    fn default() -> Self {
        Self {
            timeout_secs: consts::REQUEST_TIME_OUT,
        }
    }
}

impl Settings {
    /// Settings for the environment named by `RUN_ENV`
    pub fn new() -> CustomResult<Self, ConfigurationError> {
        Self::with_config_path(None)
    }

    /// Settings read from `config_path`, or from `config/<env>.toml` when no path is given.
    ///
    /// An explicit path must exist. A missing environment file leaves every value at its default.
    pub fn with_config_path(config_path: Option<PathBuf>) -> CustomResult<Self, ConfigurationError> {
        let environment = gateway_env::which();
        let (path, required) = match config_path {
            Some(path) => (path, true),
            None => (
                PathBuf::from("config").join(environment.config_file_name()),
                false,
            ),
        };

        let mut value = read_toml_file(&path, required)?;
        apply_env_overrides(&mut value, std::env::vars());
        logger::debug!(%environment, config_path = %path.display(), "loading settings");

        value
            .try_into()
            .change_context(ConfigurationError::DeserializationFailed)
            .attach_printable_lazy(|| format!("Invalid settings in {}", path.display()))
    }
}

fn read_toml_file(path: &Path, required: bool) -> CustomResult<toml::Value, ConfigurationError> {
    let display = path.display().to_string();
    if !path.exists() {
        return if required {
            Err(report!(ConfigurationError::FileReadFailed(display)))
        } else {
            Ok(toml::Value::Table(toml::Table::new()))
        };
    }

    let content = std::fs::read_to_string(path)
        .change_context_lazy(|| ConfigurationError::FileReadFailed(display.clone()))?;
    toml::from_str(&content).change_context(ConfigurationError::InvalidFile(display))
}

/// Overlay every `GATEWAY__A__B=value` variable onto `value` as `a.b = value`.
/// Values that parse as integers or booleans are stored as such.
pub fn apply_env_overrides(
    value: &mut toml::Value,
    vars: impl IntoIterator<Item = (String, String)>,
) {
    let prefix = format!("{ENV_PREFIX}{ENV_SEPARATOR}");
    for (key, raw) in vars {
        let Some(path) = key.strip_prefix(&prefix) else {
            continue;
        };
        let segments: Vec<String> = path
            .split(ENV_SEPARATOR)
            .map(str::to_lowercase)
            .filter(|segment| !segment.is_empty())
            .collect();
        if let Some((leaf, parents)) = segments.split_last() {
            set_nested(value, parents, leaf, parse_env_value(raw));
        }
    }
}

fn parse_env_value(raw: String) -> toml::Value {
    if let Ok(integer) = raw.parse::<i64>() {
        toml::Value::Integer(integer)
    } else if let Ok(boolean) = raw.parse::<bool>() {
        toml::Value::Boolean(boolean)
    } else {
        toml::Value::String(raw)
    }
}

fn set_nested(value: &mut toml::Value, parents: &[String], leaf: &str, new_value: toml::Value) {
    if !value.is_table() {
        *value = toml::Value::Table(toml::Table::new());
    }
    let toml::Value::Table(table) = value else {
        return;
    };
    match parents.split_first() {
        Some((head, rest)) => {
            let child = table
                .entry(head.clone())
                .or_insert_with(|| toml::Value::Table(toml::Table::new()));
            set_nested(child, rest, leaf, new_value);
        }
        None => {
            table.insert(leaf.to_string(), new_value);
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn defaults_point_at_the_live_eway_host() {
        let settings = Settings::default();

        assert_eq!(settings.connectors.eway.base_url, "https://www.eway.com.au/");
        assert_eq!(settings.http_client.timeout_secs, consts::REQUEST_TIME_OUT);
        assert!(settings.log.console.enabled);
    }

    #[test]
    fn environment_variables_override_file_values() {
        let mut value: toml::Value = toml::from_str(
            r#"
            [connectors.eway]
            base_url = "https://file.example/"

            [http_client]
            timeout_secs = 10
            "#,
        )
        .unwrap();

        apply_env_overrides(
            &mut value,
            [
                (
                    "GATEWAY__CONNECTORS__EWAY__BASE_URL".to_string(),
                    "https://env.example/".to_string(),
                ),
                ("GATEWAY__LOG__CONSOLE__ENABLED".to_string(), "false".to_string()),
                ("OTHER__HTTP_CLIENT__TIMEOUT_SECS".to_string(), "99".to_string()),
            ],
        );
        let settings: Settings = value.try_into().unwrap();

        assert_eq!(settings.connectors.eway.base_url, "https://env.example/");
        assert!(!settings.log.console.enabled);
        assert_eq!(settings.http_client.timeout_secs, 10);
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let missing = std::env::temp_dir().join("gateway-settings-that-do-not-exist.toml");

        let error = Settings::with_config_path(Some(missing)).unwrap_err();
        assert!(matches!(
            error.current_context(),
            ConfigurationError::FileReadFailed(_)
        ));
    }

    #[test]
    fn reads_explicit_config_file() {
        let path = std::env::temp_dir().join(format!(
            "gateway-settings-{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            "[connectors.eway]\nbase_url = \"https://sandbox.example/\"\n\n[log.console]\nlevel = \"WARN\"\n",
        )
        .unwrap();

        let settings = Settings::with_config_path(Some(path.clone())).unwrap();
        std::fs::remove_file(path).unwrap();

        assert_eq!(settings.connectors.eway.base_url, "https://sandbox.example/");
        assert_eq!(
            settings.log.console.level.into_level(),
            gateway_env::logger::Level::WARN
        );
    }
}

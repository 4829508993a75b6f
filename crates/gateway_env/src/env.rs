//!
//! Current environment related stuff.
//!

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Env variable that sets Development/Sandbox/Production env
pub const RUN_ENV: &str = "RUN_ENV";

///
/// Current environment.
///
#[derive(
    Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Display, EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Env {
    /// Development environment.
    #[default]
    Development,
    /// Sandbox environment.
    Sandbox,
    /// Production environment.
    Production,
}

impl Env {
    /// Base name of the configuration file for this environment, e.g. `development.toml`
    pub fn config_file_name(self) -> String {
        format!("{self}.toml")
    }

    /// Whether transactions should hit the connector's test endpoints
    pub fn is_test_mode(self) -> bool {
        !matches!(self, Self::Production)
    }
}

/// Name of current environment. Either "Development", "Sandbox" or "Production".
pub fn which() -> Env {
    #[cfg(debug_assertions)]
    let default_env = Env::Development;
    #[cfg(not(debug_assertions))]
    let default_env = Env::Production;

    std::env::var(RUN_ENV).map_or_else(|_| default_env, |v| v.parse().unwrap_or(default_env))
}

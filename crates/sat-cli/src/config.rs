//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml};
use sat_core::{Rule, RuleSpec, ValidationError, parse_rules};
use serde::{Deserialize, Serialize};

/// Redmine user filter meaning "the owner of the API key".
const DEFAULT_USER: &str = "me";

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the Redmine instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Hex API key, XOR-masked with the passphrase digest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Whose time entries to report on.
    pub user: String,
    /// Weighting rules, most specific first.
    pub rules: Vec<RuleSpec>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .field("rules", &self.rules)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: None,
            api_key: None,
            user: DEFAULT_USER.to_string(),
            rules: Vec::new(),
        }
    }
}

impl Config {
    /// Loads configuration, layering the given file over the user config.
    ///
    /// Later sources win: defaults, `<config dir>/sat/config.toml`, the
    /// given file, then `SAT_*` environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = if path.extension().is_some_and(|ext| ext == "json") {
                figment.merge(Json::file(path))
            } else {
                figment.merge(Toml::file(path))
            };
        }

        figment = figment.merge(Env::prefixed("SAT_"));

        figment.extract()
    }

    /// Validates the configured rules, keeping their order.
    pub fn rules(&self) -> Result<Vec<Rule>, ValidationError> {
        parse_rules(self.rules.iter().cloned())
    }
}

/// Returns the platform-specific config directory for sat.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sat"))
}

//! `brokerxp.toml` loading. Flags and env vars override file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use brokerxp_core::EngineConfig;
use serde::Deserialize;
use tracing::{debug, info};

pub const DEFAULT_CONFIG_FILE: &str = "brokerxp.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: Option<String>,
    pub token: Option<String>,
}

impl AppConfig {
    /// Load from `path`, or from `./brokerxp.toml` if present, or defaults.
    ///
    /// An explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !path.exists() {
            if explicit {
                bail!("config file not found: {}", path.display());
            }
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse without validating: overrides may still replace bad values,
    /// so callers validate `engine` after applying them.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `--timezone` / `BROKERXP_TIMEZONE`.
    pub fn override_timezone(&mut self, timezone: Option<String>) {
        if let Some(tz) = timezone {
            self.engine.timezone = tz;
        }
    }

    /// Apply `--api-url` / `--token` and their env vars.
    pub fn override_api(&mut self, base_url: Option<String>, token: Option<String>) {
        if base_url.is_some() {
            self.api.base_url = base_url;
        }
        if token.is_some() {
            self.api.token = token;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert!(config.api.base_url.is_none());
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn full_file() {
        let toml = r#"
            [api]
            base_url = "https://crm.example.com"
            token = "secret"

            [engine]
            timezone = "America/Chicago"
            follow_up_actions = ["phone_call", "email"]
            lead_agent_bonus = 100

            [engine.goals]
            prospecting = 300
        "#;
        let config = AppConfig::from_toml(toml).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("https://crm.example.com"));
        assert_eq!(config.engine.timezone, "America/Chicago");
        assert_eq!(config.engine.follow_up_actions, ["phone_call", "email"]);
        assert_eq!(config.engine.lead_agent_bonus, 100);
        assert_eq!(config.engine.goals.prospecting, 300);
        assert_eq!(config.engine.goals.follow_up, 400);
    }

    #[test]
    fn bad_file_timezone_is_caught_by_validate() {
        let config = AppConfig::from_toml("[engine]\ntimezone = \"Atlantis/Central\"").unwrap();
        let err = config.engine.validate().unwrap_err();
        assert!(err.to_string().contains("Atlantis/Central"));
    }

    #[test]
    fn timezone_override_repairs_bad_file_value() {
        let mut config = AppConfig::from_toml("[engine]\ntimezone = \"US/Eastrn\"").unwrap();
        config.override_timezone(Some("America/New_York".into()));
        assert_eq!(
            config.engine.validate().unwrap(),
            brokerxp_core::parse_timezone("America/New_York").unwrap()
        );
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = AppConfig::from_toml("[api]\nbase_url = \"http://a\"").unwrap();
        config.override_api(Some("http://b".into()), None);
        config.override_timezone(Some("Europe/Paris".into()));
        assert_eq!(config.api.base_url.as_deref(), Some("http://b"));
        assert!(config.api.token.is_none());
        assert_eq!(config.engine.timezone, "Europe/Paris");

        config.override_api(None, None);
        assert_eq!(config.api.base_url.as_deref(), Some("http://b"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let missing = Path::new("/definitely/not/here/brokerxp.toml");
        assert!(AppConfig::load(Some(missing)).is_err());
    }
}

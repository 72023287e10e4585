//! Strategy configuration
//!
//! Settings applied when a validator is built: the message language and
//! display names for fields. Loaded from the environment, a `.env` file, or a
//! TOML/JSON file.
//!
//! ```toml
//! locale = "de"
//!
//! [attribute_names]
//! email = "E-Mail-Adresse"
//! ```

use formwork_log::debug;
use formwork_rules::{BuildOptions, Lang};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variable holding the locale tag.
pub const ENV_LOCALE: &str = "FORMWORK_LOCALE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Settings shared by every validation run of a strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Language of default messages
    pub locale: Lang,
    /// Field display names used in messages
    pub attribute_names: HashMap<String, String>,
}

impl StrategyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(mut self, locale: Lang) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_attribute_name(mut self, field: impl Into<String>, name: impl Into<String>) -> Self {
        self.attribute_names.insert(field.into(), name.into());
        self
    }

    /// Read `FORMWORK_LOCALE`. Unset means the default language.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`StrategyConfig::from_env`] over an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(tag) = lookup(ENV_LOCALE) {
            config.locale = Lang::parse(&tag).map_err(|_| ConfigError::InvalidLocale(tag))?;
        }
        debug!("strategy locale '{}' from environment", config.locale);
        Ok(config)
    }

    /// Load variables from a `.env` file, then read the environment.
    ///
    /// Without a path, a missing `.env` in the working directory is ignored.
    pub fn from_dotenv(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::Load(e.to_string()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        Self::from_env()
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(format!("TOML parse error: {}", e)))
    }

    /// Parse a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("JSON parse error: {}", e)))
    }

    /// Load a `.toml` or `.json` file, chosen by extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| ConfigError::Load("No file extension found".to_string()))?;

        let parse: fn(&str) -> Result<Self> = match ext.as_str() {
            "toml" => Self::from_toml_str,
            "json" => Self::from_json_str,
            other => return Err(ConfigError::Load(format!("Unsupported format: {}", other))),
        };
        let config = parse(&fs::read_to_string(path)?)?;

        debug!("strategy configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Options handed to the engine for each build.
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            lang: self.locale,
            attribute_names: self.attribute_names.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StrategyConfig::new();
        assert_eq!(config.locale, Lang::En);
        assert!(config.attribute_names.is_empty());
    }

    #[test]
    fn test_from_lookup() {
        let config = StrategyConfig::from_lookup(|key| {
            (key == ENV_LOCALE).then(|| "it-IT".to_string())
        })
        .unwrap();
        assert_eq!(config.locale, Lang::It);

        let config = StrategyConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.locale, Lang::En);
    }

    #[test]
    fn test_from_lookup_rejects_unknown_locale() {
        let err = StrategyConfig::from_lookup(|_| Some("tlh".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLocale(tag) if tag == "tlh"));
    }

    #[test]
    fn test_from_toml() {
        let config = StrategyConfig::from_toml_str(
            r#"
            locale = "de-DE"

            [attribute_names]
            email = "E-Mail-Adresse"
            "#,
        )
        .unwrap();

        assert_eq!(config.locale, Lang::De);
        assert_eq!(
            config.attribute_names.get("email").map(String::as_str),
            Some("E-Mail-Adresse")
        );
        assert!(StrategyConfig::from_toml_str("locale = \"xx\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let path = env::temp_dir().join(format!("formwork-config-{}.json", std::process::id()));
        fs::write(&path, r#"{ "locale": "fr" }"#).unwrap();

        let config = StrategyConfig::from_file(&path).unwrap();
        assert_eq!(config.locale, Lang::Fr);
        fs::remove_file(&path).unwrap();

        assert!(matches!(
            StrategyConfig::from_file("missing-settings.toml"),
            Err(ConfigError::Io(_))
        ));
        assert!(matches!(
            StrategyConfig::from_file("settings"),
            Err(ConfigError::Load(_))
        ));
    }

    #[test]
    fn test_from_file_rejects_unsupported_format_before_reading() {
        let path = env::temp_dir().join(format!("formwork-config-{}.yaml", std::process::id()));
        fs::write(&path, "locale: fr\n").unwrap();

        let err = StrategyConfig::from_file(&path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(matches!(err, ConfigError::Load(msg) if msg == "Unsupported format: yaml"));

        let err = StrategyConfig::from_file("does-not-exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn test_from_dotenv_and_env() {
        let dir = env::temp_dir().join(format!("formwork-dotenv-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let path = dir.join(".env");
        fs::write(&path, format!("{}=de-DE\n", ENV_LOCALE)).unwrap();
        let config = StrategyConfig::from_dotenv(path.to_str()).unwrap();
        assert_eq!(config.locale, Lang::De);

        // Variables loaded by dotenvy are now part of the process environment
        assert_eq!(StrategyConfig::from_env().unwrap().locale, Lang::De);

        let bad = dir.join("bad.env");
        fs::write(&bad, format!("{}=tlh\n", ENV_LOCALE)).unwrap();
        // dotenvy does not override variables that are already set
        unsafe { env::remove_var(ENV_LOCALE) };
        let err = StrategyConfig::from_dotenv(bad.to_str()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLocale(tag) if tag == "tlh"));

        unsafe { env::remove_var(ENV_LOCALE) };
        assert_eq!(StrategyConfig::from_env().unwrap().locale, Lang::En);

        assert!(matches!(
            StrategyConfig::from_dotenv(dir.join("missing.env").to_str()),
            Err(ConfigError::Load(_))
        ));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_build_options() {
        let options = StrategyConfig::new()
            .with_locale(Lang::Ru)
            .with_attribute_name("email", "почта")
            .build_options();
        assert_eq!(options.lang, Lang::Ru);
        assert_eq!(options.attribute_names.len(), 1);
    }
}

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::github::{DEFAULT_API_URL, MAX_PER_PAGE};

pub const DEFAULT_CONFIG_FILE: &str = ".review-stats.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration loaded from .review-stats.toml.
/// All fields are optional; the tool works with zero config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// GitHub-specific settings
    #[serde(default)]
    pub github: GitHubConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubConfig {
    /// GitHub API token. If None, falls back to GITHUB_TOKEN env var.
    pub token: Option<String>,
    /// REST API root, e.g. `https://ghe.example.com/api/v3`
    pub api_url: Option<String>,
    /// Page size for listings; clamped to 1..=100
    pub per_page: Option<u8>,
}

impl Config {
    /// Load configuration from `path`, or from .review-stats.toml in the
    /// current directory when `path` is None.
    /// A missing default file yields the default config; an explicitly
    /// named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load_from(path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    /// Load from a specific path (useful for testing).
    pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Resolve the GitHub token: config file value takes precedence,
    /// falls back to GITHUB_TOKEN env var. Empty tokens mean anonymous access.
    pub fn github_token(&self) -> Option<String> {
        self.github
            .token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .filter(|token| !token.is_empty())
    }

    pub fn api_url(&self) -> &str {
        self.github.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn per_page(&self) -> u8 {
        self.github
            .per_page
            .unwrap_or(MAX_PER_PAGE)
            .clamp(1, MAX_PER_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.github.token.is_none());
        assert_eq!(config.api_url(), "https://api.github.com");
        assert_eq!(config.per_page(), 100);
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_str = r#"
[github]
token = "abc"
api_url = "https://ghe.example.com/api/v3"
per_page = 50
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.github_token().as_deref(), Some("abc"));
        assert_eq!(config.api_url(), "https://ghe.example.com/api/v3");
        assert_eq!(config.per_page(), 50);
    }

    #[test]
    fn test_per_page_is_clamped() {
        let mut config = Config::default();
        config.github.per_page = Some(250);
        assert_eq!(config.per_page(), 100);
        config.github.per_page = Some(0);
        assert_eq!(config.per_page(), 1);
    }

    #[test]
    fn test_empty_token_is_anonymous() {
        let mut config = Config::default();
        config.github.token = Some(String::new());
        assert_eq!(config.github_token(), None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[github]\nper_page = 20").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.per_page(), 20);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[github\nper_page = ").unwrap();
        let result = Config::load_from(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}

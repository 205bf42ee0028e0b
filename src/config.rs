use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::i18n::Locale;
use crate::models::DEFAULT_ARTICLE_COUNT;

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "medinsight.toml";
pub const ENV_PREFIX: &str = "MEDINSIGHT";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub search: SearchDefaults,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDefaults {
    pub article_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub locale: Locale,
    pub tick_rate_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
    /// Where the TUI writes its log files; defaults to the user data dir
    pub directory: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8000".to_string(),
                timeout_secs: 300,
            },
            search: SearchDefaults {
                article_count: DEFAULT_ARTICLE_COUNT,
            },
            ui: UiConfig {
                locale: Locale::En,
                tick_rate_ms: 100,
            },
            logging: LoggingConfig {
                filter: "medinsight=info".to_string(),
                directory: None,
            },
        }
    }
}

/// `MEDINSIGHT_` prefix, `__` between nested keys
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl Config {
    /// Load configuration, layering (lowest first): built-in defaults, the
    /// config file, then environment variables such as `MEDINSIGHT_API__BASE_URL`.
    ///
    /// An explicitly passed file must exist; the implicit one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_layered(path, environment())
    }

    fn load_layered(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Config::default())?)
            .add_source(file)
            .add_source(env)
            .build()
            .context("Failed to read configuration")?;

        let config: Config = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let base = self.api.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            anyhow::bail!("api.base_url must be an http(s) URL, got '{}'", self.api.base_url);
        }
        if self.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be greater than zero");
        }
        Ok(())
    }

    /// Replace the backend origin, e.g. from a command-line flag
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        self.api.base_url = base_url.into();
        self.validate()?;
        Ok(self)
    }

    pub fn log_directory(&self) -> PathBuf {
        self.logging.directory.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("medinsight")
                .join("logs")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "https://medinsight.example.org"
timeout_secs = 45

[search]
article_count = 12

[ui]
locale = "tr"
"#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.api.base_url, "https://medinsight.example.org");
        assert_eq!(config.api.timeout_secs, 45);
        assert_eq!(config.search.article_count, 12);
        assert_eq!(config.ui.locale, Locale::Tr);
        assert_eq!(config.ui.tick_rate_ms, 100);
        assert_eq!(config.logging.filter, "medinsight=info");
    }

    fn env_from(vars: &[(&str, &str)]) -> config::Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        environment().source(Some(map))
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://localhost:8000\"").unwrap();

        let env = env_from(&[
            ("MEDINSIGHT_API__BASE_URL", "http://x:1"),
            ("MEDINSIGHT_API__TIMEOUT_SECS", "60"),
            ("MEDINSIGHT_SEARCH__ARTICLE_COUNT", "20"),
            ("OTHERAPP_API__BASE_URL", "http://ignored:2"),
        ]);
        let config = Config::load_layered(Some(file.path()), env).unwrap();
        assert_eq!(config.api.base_url, "http://x:1");
        assert_eq!(config.api.timeout_secs, 60);
        assert_eq!(config.search.article_count, 20);
    }

    #[test]
    fn test_env_with_double_prefix_separator_is_ignored() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://localhost:8000\"").unwrap();

        let env = env_from(&[("MEDINSIGHT__API__BASE_URL", "http://x:1")]);
        let config = Config::load_layered(Some(file.path()), env).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(Config::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[api]\nbase_url = \"ftp://example.org\"").unwrap();
        assert!(Config::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_with_base_url_override() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://localhost:8000\"").unwrap();
        let config = Config::load(Some(file.path()))
            .unwrap()
            .with_base_url("http://10.0.0.5:9000")
            .unwrap();
        assert_eq!(config.api.base_url, "http://10.0.0.5:9000");
        assert!(Config::load(Some(file.path()))
            .unwrap()
            .with_base_url("not a url")
            .is_err());
    }
}

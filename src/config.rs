use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_gamma_url")]
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3000 }
fn default_gamma_url() -> String { "https://gamma-api.polymarket.com".to_string() }
fn default_page_size() -> usize { 50 }
fn default_timeout() -> u64 { 10 }
fn default_ttl() -> u64 { 60 }
fn default_level() -> String { "info".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_gamma_url(),
            page_size: default_page_size(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: default_ttl() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_level(), json: false }
    }
}

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Overrides pulled from the process environment (and `.env`).
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub config_path: String,
    pub gamma_api_url: Option<String>,
    pub port: Option<u16>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path))
    }

    /// Like `load`, but a missing file yields the defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn apply_env(&mut self, env: &EnvConfig) {
        if let Some(url) = &env.gamma_api_url {
            self.upstream.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(port) = env.port {
            self.server.port = port;
        }
    }
}

impl EnvConfig {
    /// Loads `.env` first, so every variable below may come from it.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => Some(
                raw.parse::<u16>()
                    .with_context(|| format!("PORT is not a valid port: {}", raw))?,
            ),
            None => None,
        };

        Ok(Self {
            config_path: lookup("SWIPE_MARKETS_CONFIG")
                .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string()),
            gamma_api_url: lookup("GAMMA_API_URL"),
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.upstream.base_url, "https://gamma-api.polymarket.com");
        assert_eq!(config.upstream.page_size, 50);
        assert_eq!(config.cache.ttl_secs, 60);
        assert!(!config.logging.json);
    }

    #[test]
    fn test_partial_section() {
        let config = Config::parse(
            r#"
            [upstream]
            timeout_secs = 3

            [logging]
            json = true
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.timeout_secs, 3);
        assert_eq!(config.upstream.page_size, 50);
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_env(&EnvConfig {
            config_path: DEFAULT_CONFIG_PATH.to_string(),
            gamma_api_url: Some("http://localhost:9000/".to_string()),
            port: Some(8080),
        });

        assert_eq!(config.upstream.base_url, "http://localhost:9000");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = Config::load_or_default("does-not-exist.toml").unwrap();
        assert_eq!(config.cache.ttl_secs, 60);
    }

    #[test]
    fn test_env_lookup() {
        let vars: HashMap<&str, &str> = [
            ("SWIPE_MARKETS_CONFIG", "/etc/swipe/markets.toml"),
            ("GAMMA_API_URL", "http://gamma.local"),
            ("PORT", "8081"),
        ]
        .into_iter()
        .collect();

        let env = EnvConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(env.config_path, "/etc/swipe/markets.toml");
        assert_eq!(env.gamma_api_url.as_deref(), Some("http://gamma.local"));
        assert_eq!(env.port, Some(8081));
    }

    #[test]
    fn test_env_lookup_defaults() {
        let env = EnvConfig::from_lookup(|_| None).unwrap();

        assert_eq!(env.config_path, DEFAULT_CONFIG_PATH);
        assert!(env.gamma_api_url.is_none());
        assert!(env.port.is_none());
    }

    #[test]
    fn test_env_lookup_rejects_bad_port() {
        assert!(EnvConfig::from_lookup(|k| (k == "PORT").then(|| "http".to_string())).is_err());
    }
}

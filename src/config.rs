use crate::feed::{dashboard, espn, odds_api, BookmakerFilter};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const ENV_FILE: &str = ".env";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub odds_api: OddsApiConfig,
    #[serde(default)]
    pub espn: EspnConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OddsApiConfig {
    #[serde(default = "default_odds_base_url")]
    pub base_url: String,
    /// Allow list of bookmaker keys. Absent means every bookmaker passes.
    #[serde(default)]
    pub bookmakers: Option<Vec<String>>,
    #[serde(default = "default_bookmakers_limit")]
    pub bookmakers_limit: usize,
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_odds_base_url() -> String {
    odds_api::DEFAULT_BASE_URL.to_string()
}
fn default_bookmakers_limit() -> usize {
    crate::feed::bookmakers::DEFAULT_BOOKMAKERS_LIMIT
}
fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for OddsApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_odds_base_url(),
            bookmakers: None,
            bookmakers_limit: default_bookmakers_limit(),
            request_timeout_ms: default_timeout_ms(),
        }
    }
}

impl OddsApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// `ODDS_BOOKMAKERS` (comma separated) overrides the file's allow list.
    pub fn bookmaker_filter(&self) -> BookmakerFilter {
        let allow = std::env::var("ODDS_BOOKMAKERS")
            .ok()
            .map(|raw| split_list(&raw))
            .filter(|list| !list.is_empty())
            .or_else(|| self.bookmakers.clone());
        BookmakerFilter::new(allow, self.bookmakers_limit)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct EspnConfig {
    #[serde(default = "default_site_api")]
    pub site_api: String,
    #[serde(default = "default_web_api")]
    pub web_api: String,
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_site_api() -> String {
    espn::SITE_API.to_string()
}
fn default_web_api() -> String {
    espn::WEB_API.to_string()
}

impl Default for EspnConfig {
    fn default() -> Self {
        Self {
            site_api: default_site_api(),
            web_api: default_web_api(),
            request_timeout_ms: default_timeout_ms(),
        }
    }
}

impl EspnConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default = "default_dashboard_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_dashboard_url() -> String {
    dashboard::DEFAULT_BASE_URL.to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: default_dashboard_url(),
            request_timeout_ms: default_timeout_ms(),
        }
    }
}

impl DashboardConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// `DASHBOARD_API_URL` overrides the file's base URL.
    pub fn base_url(&self) -> String {
        std::env::var("DASHBOARD_API_URL")
            .ok()
            .map(|raw| sanitize_key(&raw))
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.base_url.clone())
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Defaults when `path` does not exist; a present but broken file is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse config TOML")
    }

    /// Load .env file into process environment. Real env vars take precedence.
    pub fn load_env_file() {
        let content = match std::fs::read_to_string(ENV_FILE) {
            Ok(c) => c,
            Err(_) => return,
        };
        for (key, value) in parse_env(&content) {
            if std::env::var(&key).is_err() {
                std::env::set_var(key, value);
            }
        }
    }

    /// Odds API keys from `ODDS_API_KEYS` (comma separated), else the single
    /// `ODDS_API_KEY`. Empty when neither is set.
    pub fn odds_api_keys() -> Vec<String> {
        let from_var = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|raw| split_list(&sanitize_key(&raw)))
                .unwrap_or_default()
        };
        let keys = from_var("ODDS_API_KEYS");
        if !keys.is_empty() {
            return keys;
        }
        from_var("ODDS_API_KEY")
    }

    /// Bearer key for the betting dashboard. `None` disables the dashboard tools.
    pub fn dashboard_api_key() -> Option<String> {
        std::env::var("DASHBOARD_API_KEY")
            .ok()
            .map(|raw| sanitize_key(&raw))
            .filter(|key| !key.is_empty())
    }
}

fn parse_env(content: &str) -> Vec<(String, String)> {
    // Strip BOM if present (common on Windows-created files)
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    content
        .lines()
        .map(|line| line.trim().trim_matches('\r'))
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip carriage returns, BOM, and other invisible chars from a key value.
fn sanitize_key(raw: &str) -> String {
    raw.replace(['\r', '\u{feff}', '\u{200b}'], "")
        .trim()
        .to_string()
}

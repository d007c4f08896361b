use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://api.unsplash.com";
pub const DEFAULT_OAUTH_URL: &str = "https://unsplash.com";
pub const DEFAULT_DUMMY_LATENCY: Duration = Duration::from_millis(500);

/// On-disk configuration. Every field is optional so that several files can
/// be layered on top of each other.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PagebuilderConfig {
    #[serde(default, rename = "dummyMode")]
    pub dummy_mode: Option<bool>,
    #[serde(default, rename = "sessionFile")]
    pub session_file: Option<String>,
    #[serde(default)]
    pub unsplash: UnsplashConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsplashConfig {
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    #[serde(default)]
    pub redirect_uri: Option<String>,
    #[serde(default)]
    pub oauth_enabled: Option<bool>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub oauth_url: Option<String>,
}

/// Fully resolved settings handed to the auth helper and the photo client.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub dummy_mode: bool,
    pub session_file: Option<PathBuf>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub redirect_uri: Option<String>,
    pub oauth_enabled: bool,
    pub api_url: String,
    pub oauth_url: String,
    pub dummy_latency: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        PagebuilderConfig::default().resolve()
    }
}

impl PagebuilderConfig {
    /// Apply defaults. Empty strings count as unset, the way an unset
    /// `${VAR:-}` reference expands.
    pub fn resolve(&self) -> Settings {
        let u = &self.unsplash;
        Settings {
            dummy_mode: self.dummy_mode.unwrap_or(true),
            session_file: non_empty(&self.session_file).map(expand_home),
            access_key: non_empty(&u.access_key).map(str::to_string),
            secret_key: non_empty(&u.secret_key).map(str::to_string),
            redirect_uri: non_empty(&u.redirect_uri).map(str::to_string),
            oauth_enabled: u.oauth_enabled.unwrap_or(false),
            api_url: non_empty(&u.api_url)
                .unwrap_or(DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            oauth_url: non_empty(&u.oauth_url)
                .unwrap_or(DEFAULT_OAUTH_URL)
                .trim_end_matches('/')
                .to_string(),
            dummy_latency: DEFAULT_DUMMY_LATENCY,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest),
        None => PathBuf::from(path),
    }
}

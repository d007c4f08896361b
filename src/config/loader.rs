use std::path::{Path, PathBuf};

use crate::error::PagebuilderError;

use super::env::expand_config;
use super::types::{PagebuilderConfig, UnsplashConfig};

/// Strip JSONC comments (// line comments and /* */ block comments) from input.
pub fn strip_jsonc_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape_next = false;

    while let Some(ch) = chars.next() {
        if in_string {
            result.push(ch);
            if escape_next {
                escape_next = false;
            } else if ch == '\\' {
                escape_next = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        let next = chars.peek().copied();
        match (ch, next) {
            ('"', _) => {
                in_string = true;
                result.push(ch);
            }
            ('/', Some('/')) => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        result.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = ' ';
                for c in chars.by_ref() {
                    if prev == '*' && c == '/' {
                        break;
                    }
                    // keep line numbers stable for serde error positions
                    if c == '\n' {
                        result.push('\n');
                    }
                    prev = c;
                }
            }
            _ => result.push(ch),
        }
    }

    result
}

/// Discover config files in precedence order (highest first).
///
/// 1. `--config` CLI flag
/// 2. `PAGEBUILDER_CONFIG` env var
/// 3. `./config/pagebuilder.json` (project-level)
/// 4. `~/.pagebuilder/pagebuilder.json` or `~/.pagebuilder/pagebuilder.jsonc`
pub fn discover_config_files(cli_config: Option<&str>) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();

    if let Some(path) = cli_config {
        candidates.push(PathBuf::from(path));
    }
    if let Ok(env_path) = std::env::var("PAGEBUILDER_CONFIG") {
        candidates.push(PathBuf::from(env_path));
    }
    candidates.push(PathBuf::from("./config/pagebuilder.json"));
    if let Some(home) = dirs::home_dir() {
        let dir = home.join(".pagebuilder");
        let json = dir.join("pagebuilder.json");
        if json.exists() {
            candidates.push(json);
        } else {
            candidates.push(dir.join("pagebuilder.jsonc"));
        }
    }

    let mut files = Vec::new();
    for path in candidates {
        if path.exists() && !files.contains(&path) {
            files.push(path);
        }
    }
    files
}

/// Load a single config file, stripping JSONC comments before parsing.
fn load_config_file(path: &Path) -> Result<PagebuilderConfig, PagebuilderError> {
    let content = std::fs::read_to_string(path).map_err(|e| PagebuilderError::ConfigError {
        path: path.to_path_buf(),
        detail: format!("Cannot read file: {e}"),
    })?;

    let stripped = strip_jsonc_comments(&content);
    serde_json::from_str::<PagebuilderConfig>(&stripped).map_err(|e| {
        PagebuilderError::ConfigError {
            path: path.to_path_buf(),
            detail: format!("Invalid JSON: {e}"),
        }
    })
}

/// Fill fields unset in `target` from `source`. Fields already set in
/// `target` are NOT overridden (earlier sources win).
fn merge_config(target: &mut PagebuilderConfig, source: PagebuilderConfig) {
    fill(&mut target.dummy_mode, source.dummy_mode);
    fill(&mut target.session_file, source.session_file);

    let UnsplashConfig {
        access_key,
        secret_key,
        redirect_uri,
        oauth_enabled,
        api_url,
        oauth_url,
    } = source.unsplash;
    let t = &mut target.unsplash;
    fill(&mut t.access_key, access_key);
    fill(&mut t.secret_key, secret_key);
    fill(&mut t.redirect_uri, redirect_uri);
    fill(&mut t.oauth_enabled, oauth_enabled);
    fill(&mut t.api_url, api_url);
    fill(&mut t.oauth_url, oauth_url);
}

fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
    if slot.is_none() {
        *slot = value;
    }
}

/// Load, merge, and expand all configuration.
///
/// A missing config is not an error: the defaults run in dummy mode.
pub fn load_config(cli_config: Option<&str>) -> Result<PagebuilderConfig, PagebuilderError> {
    if let Some(path) = cli_config {
        if !Path::new(path).exists() {
            return Err(PagebuilderError::ConfigError {
                path: PathBuf::from(path),
                detail: "File not found".to_string(),
            });
        }
    }

    let mut merged = PagebuilderConfig::default();
    for path in discover_config_files(cli_config) {
        tracing::debug!("Loading config from {}", path.display());
        let cfg = load_config_file(&path)?;
        merge_config(&mut merged, cfg);
    }

    expand_config(&mut merged)?;
    Ok(merged)
}

// src/config.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

pub const ENV_SOURCES_PATH: &str = "REMOTEMAP_SOURCES_PATH";
pub const ENV_CACHE_TTL_SECS: &str = "REMOTEMAP_CACHE_TTL_SECS";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "REMOTEMAP_FETCH_TIMEOUT_SECS";
pub const ENV_BIND: &str = "REMOTEMAP_BIND";

const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
const DEFAULT_BIND: &str = "0.0.0.0:8000";

/// Runtime knobs, all env-overridable with sane defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// How long an aggregation result stays fresh before a background
    /// refresh kicks in. Performance policy, not correctness.
    pub cache_ttl: Duration,
    /// Upper bound on each upstream request; a timed-out fetch is treated
    /// like any other failed fetch.
    pub fetch_timeout: Duration,
    pub bind: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

fn env_secs(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            cache_ttl: Duration::from_secs(env_secs(ENV_CACHE_TTL_SECS, DEFAULT_CACHE_TTL_SECS)),
            fetch_timeout: Duration::from_secs(env_secs(
                ENV_FETCH_TIMEOUT_SECS,
                DEFAULT_FETCH_TIMEOUT_SECS,
            )),
            bind: std::env::var(ENV_BIND).unwrap_or_else(|_| DEFAULT_BIND.to_string()),
        }
    }
}

/// Load the enabled-source list from an explicit path. Supports TOML
/// (`sources = [...]`) or a bare JSON array.
pub fn load_sources_from(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading source list from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_sources(&content, ext.as_str())
}

/// Load the enabled-source list using env var + fallbacks:
/// 1) $REMOTEMAP_SOURCES_PATH
/// 2) config/sources.toml
/// 3) config/sources.json
/// An empty result means "all sources enabled".
pub fn load_sources_default() -> Result<Vec<String>> {
    if let Ok(p) = std::env::var(ENV_SOURCES_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_sources_from(&pb);
        } else {
            return Err(anyhow!("REMOTEMAP_SOURCES_PATH points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/sources.toml");
    if toml_p.exists() {
        return load_sources_from(&toml_p);
    }
    let json_p = PathBuf::from("config/sources.json");
    if json_p.exists() {
        return load_sources_from(&json_p);
    }
    Ok(Vec::new())
}

fn parse_sources(s: &str, hint_ext: &str) -> Result<Vec<String>> {
    let try_toml = hint_ext == "toml" || s.contains("sources");
    if try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    if let Ok(v) = parse_json(s) {
        return Ok(v);
    }
    if !try_toml {
        if let Ok(v) = parse_toml(s) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported source list format"))
}

fn parse_toml(s: &str) -> Result<Vec<String>> {
    #[derive(serde::Deserialize)]
    struct TomlSources {
        sources: Vec<String>,
    }
    let v: TomlSources = toml::from_str(s)?;
    Ok(clean_list(v.sources))
}

fn parse_json(s: &str) -> Result<Vec<String>> {
    let v: Vec<String> = serde_json::from_str(s)?;
    Ok(clean_list(v))
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    use std::collections::BTreeSet;
    let mut set = BTreeSet::new();
    for it in items {
        let t = it.trim();
        if !t.is_empty() {
            set.insert(t.to_string());
        }
    }
    set.into_iter().collect()
}

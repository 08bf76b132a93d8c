use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::paginate::ITEMS_PER_PAGE;

pub const DEFAULT_SOURCE: &str = "movies.json";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL or file path of the JSON record array.
    pub source: String,
    pub page_size: usize,
    /// 0 disables the timeout.
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            page_size: ITEMS_PER_PAGE,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            user_agent: format!("vitrine/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Explicit file, else the per-user config file if present, else defaults.
    /// Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path() {
                Some(p) if p.is_file() => Self::from_file(&p)?,
                _ => Self::default(),
            },
        };
        cfg.apply_env_overrides(|k| std::env::var(k).ok());
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config file: {}", path.display()))
    }

    /// `VITRINE_SOURCE`, `VITRINE_PAGE_SIZE`, `VITRINE_FETCH_TIMEOUT_SECS`.
    /// Unparseable numbers are ignored.
    pub fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(s) = var("VITRINE_SOURCE").filter(|s| !s.trim().is_empty()) {
            self.source = s;
        }
        if let Some(n) = var("VITRINE_PAGE_SIZE").and_then(|s| s.parse().ok()) {
            self.page_size = n;
        }
        if let Some(n) = var("VITRINE_FETCH_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            self.fetch_timeout_secs = n;
        }
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        (self.fetch_timeout_secs > 0).then(|| Duration::from_secs(self.fetch_timeout_secs))
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "vitrine", "vitrine").map(|p| p.config_dir().join("vitrine.toml"))
}

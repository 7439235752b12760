use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use sentinel_bank::ArchiveConfig;
use sentinel_core::{ClassifierConfig, SearchConfig};
use sentinel_github::GitHubConfig;
use sentinel_store::SnapshotConfig;

/// Effective configuration, read from `.sentinel/config.json`.
/// Every section is optional; missing keys take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SentinelConfig {
    pub classifier: ClassifierConfig,
    pub search: SearchConfig,
    pub snapshot: SnapshotConfig,
    pub archive: ArchiveConfig,
    pub github: GitHubConfig,
}

impl SentinelConfig {
    /// `<root>/.sentinel/config.json`
    pub fn default_path(root: &Path) -> PathBuf {
        root.join(".sentinel").join("config.json")
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))?;
        Ok(config)
    }

    /// Apply `REPO_OWNER` / `REPO_NAME` overrides.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    fn apply_env_from(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(owner) = get("REPO_OWNER").filter(|v| !v.is_empty()) {
            self.github.owner = Some(owner);
        }
        if let Some(repo) = get("REPO_NAME").filter(|v| !v.is_empty()) {
            self.github.repo = Some(repo);
        }
    }
}

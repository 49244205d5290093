//! Engine configuration, loadable from TOML.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PathTracking {
    /// Track paths only when a step requires it.
    #[default]
    Auto,
    /// Always track full paths, e.g. for debugging.
    Always,
}

/// Knobs shared by every traversal built with this configuration.
///
/// Missing fields default to the values below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Drop path labels that no downstream step reads.
    pub prune_labels: bool,

    /// Bulk given to traversers created by `Traversal::inject`.
    pub initial_bulk: u64,

    pub path_tracking: PathTracking,

    /// Reject label references that no upstream step binds when locking.
    pub validate_labels: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            prune_labels: true,
            initial_bulk: 1,
            path_tracking: PathTracking::Auto,
            validate_labels: true,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.initial_bulk == 0 {
            return Err(anyhow!("initial_bulk must be > 0"));
        }
        Ok(())
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let cfg: EngineConfig = toml::from_str(contents).context("parse engine config")?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `EngineConfig::default()`.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    if !path.exists() {
        return Ok(EngineConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    EngineConfig::from_toml_str(&contents).with_context(|| format!("load {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("engine.toml");
        fs::write(&path, "prune_labels = false\npath_tracking = \"always\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert!(!cfg.prune_labels);
        assert_eq!(cfg.path_tracking, PathTracking::Always);
        assert_eq!(cfg.initial_bulk, 1);
        assert!(cfg.validate_labels);
    }

    #[test]
    fn zero_bulk_is_rejected() {
        let err = EngineConfig::from_toml_str("initial_bulk = 0").unwrap_err();
        assert!(err.to_string().contains("initial_bulk"));
    }
}

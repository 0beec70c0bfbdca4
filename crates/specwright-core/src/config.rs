use crate::error::Result;
use crate::paths;
use crate::types::{Delivery, Profile, WorkflowId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// GlobalConfig
// ---------------------------------------------------------------------------

/// Process-wide settings persisted in the user's config directory.
///
/// Values are kept as raw strings so that an absent key can be told apart
/// from a defaulted one (the profile migration depends on this) and so an
/// unrecognised value never makes the file unreadable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflows: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<String>,
    #[serde(
        default,
        rename = "featureFlags",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub feature_flags: BTreeMap<String, bool>,
}

impl GlobalConfig {
    /// True once a profile has ever been written, whatever its value.
    pub fn has_profile(&self) -> bool {
        self.profile.is_some()
    }

    /// Persisted profile; missing or unrecognised values resolve to `core`.
    pub fn profile(&self) -> Profile {
        self.profile
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or(Profile::Core)
    }

    /// Persisted delivery; missing or unrecognised values resolve to `both`.
    pub fn delivery(&self) -> Delivery {
        self.delivery
            .as_deref()
            .and_then(|d| d.parse().ok())
            .unwrap_or_default()
    }

    /// The custom workflow list, skipping unknown ids and duplicates.
    pub fn custom_workflows(&self) -> Vec<WorkflowId> {
        let mut out = Vec::new();
        for raw in self.workflows.iter().flatten() {
            match raw.parse::<WorkflowId>() {
                Ok(w) if !out.contains(&w) => out.push(w),
                Ok(_) => {}
                Err(_) => tracing::debug!(workflow = %raw, "ignoring unknown workflow in config"),
            }
        }
        out
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = Some(profile.as_str().to_string());
    }

    pub fn set_delivery(&mut self, delivery: Delivery) {
        self.delivery = Some(delivery.as_str().to_string());
    }

    pub fn set_workflows(&mut self, workflows: &[WorkflowId]) {
        self.workflows = Some(workflows.iter().map(|w| w.as_str().to_string()).collect());
    }
}

// ---------------------------------------------------------------------------
// ConfigStore
// ---------------------------------------------------------------------------

/// Narrow read/write capability over the persisted [`GlobalConfig`].
pub trait ConfigStore {
    /// Current config, or defaults when nothing has been persisted yet.
    fn read(&self) -> Result<GlobalConfig>;

    fn write(&self, config: &GlobalConfig) -> Result<()>;
}

/// YAML file backed store.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the resolved global config location (see [`paths::global_config_dir`]).
    pub fn locate(explicit_dir: Option<&Path>) -> Result<Self> {
        Ok(Self::new(paths::global_config_path(explicit_dir)?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileConfigStore {
    fn read(&self) -> Result<GlobalConfig> {
        if !self.path.exists() {
            return Ok(GlobalConfig::default());
        }
        let data = std::fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(GlobalConfig::default());
        }
        let cfg: GlobalConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    fn write(&self, config: &GlobalConfig) -> Result<()> {
        let data = serde_yaml::to_string(config)?;
        crate::io::atomic_write(&self.path, data.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> FileConfigStore {
        FileConfigStore::new(dir.path().join("config.yaml"))
    }

    #[test]
    fn missing_file_reads_defaults_without_creating_it() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let cfg = s.read().unwrap();
        assert_eq!(cfg, GlobalConfig::default());
        assert!(!cfg.has_profile());
        assert_eq!(cfg.profile(), Profile::Core);
        assert_eq!(cfg.delivery(), Delivery::Both);
        assert!(!s.path().exists());
    }

    #[test]
    fn roundtrip_keeps_absent_keys_absent() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        let mut cfg = GlobalConfig::default();
        cfg.set_delivery(Delivery::Skills);
        s.write(&cfg).unwrap();

        let yaml = std::fs::read_to_string(s.path()).unwrap();
        assert!(!yaml.contains("profile"));
        let back = s.read().unwrap();
        assert!(!back.has_profile());
        assert_eq!(back.delivery(), Delivery::Skills);
    }

    #[test]
    fn feature_flags_use_camel_case_key() {
        let cfg: GlobalConfig =
            serde_yaml::from_str("profile: custom\nfeatureFlags:\n  beta: true\n").unwrap();
        assert_eq!(cfg.feature_flags.get("beta"), Some(&true));
        assert!(serde_yaml::to_string(&cfg).unwrap().contains("featureFlags"));
    }

    #[test]
    fn invalid_values_resolve_leniently() {
        let cfg: GlobalConfig = serde_yaml::from_str(
            "profile: expanded\ndelivery: carrier-pigeon\nworkflows: [apply, bogus, apply, explore]\n",
        )
        .unwrap();
        assert!(cfg.has_profile());
        assert_eq!(cfg.profile(), Profile::Core);
        assert_eq!(cfg.delivery(), Delivery::Both);
        assert_eq!(
            cfg.custom_workflows(),
            vec![WorkflowId::Apply, WorkflowId::Explore]
        );
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let s = store(&dir);
        std::fs::write(s.path(), "profile: [unterminated\n").unwrap();
        assert!(s.read().is_err());
    }
}

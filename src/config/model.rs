// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration as read from `.ci.yml`:
///
/// ```yaml
/// target: admin:secret@10.0.0.6:25555
/// skip_merge: true
/// deployments:
///   - name: cf
///     apply_patch: patches/cf.yml
///     errands: [smoke_tests]
/// ```
///
/// `target` is the only required key.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCiConfig {
    /// Compact director connection string, `[user[:password]@]host:port`.
    pub target: String,

    /// Deployments in the order they should be processed.
    #[serde(default)]
    pub deployments: Vec<DeploymentConfig>,

    /// Passed through to `bosh deploy` as `--skip-merge`.
    #[serde(default)]
    pub skip_merge: bool,

    /// Directory holding `<name>.yml` deployment descriptors.
    #[serde(default = "default_deployments_dir")]
    pub deployments_dir: PathBuf,

    /// Name or path of the bosh executable.
    #[serde(default = "default_bosh_bin")]
    pub bosh_bin: String,
}

fn default_deployments_dir() -> PathBuf {
    PathBuf::from("deployments")
}

fn default_bosh_bin() -> String {
    "bosh".to_string()
}

/// One entry of `deployments:`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeploymentConfig {
    pub name: String,

    /// Write the manual changes of the current manifest to this file.
    #[serde(default)]
    pub create_patch: Option<PathBuf>,

    /// Apply this patch file to the deployment manifest.
    #[serde(default)]
    pub apply_patch: Option<PathBuf>,

    /// Errands to run, in order, during `verify`.
    #[serde(default)]
    pub errands: Vec<String>,
}

impl DeploymentConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            create_patch: None,
            apply_patch: None,
            errands: Vec::new(),
        }
    }
}

/// Validated configuration.
///
/// Constructed via `TryFrom<RawCiConfig>` (see `validate.rs`), so every
/// instance has a non-empty target and uniquely named deployments.
#[derive(Debug, Clone)]
pub struct CiConfig {
    pub target: String,
    pub deployments: Vec<DeploymentConfig>,
    pub skip_merge: bool,
    pub deployments_dir: PathBuf,
    pub bosh_bin: String,
}

impl CiConfig {
    pub(crate) fn new_unchecked(raw: RawCiConfig) -> Self {
        Self {
            target: raw.target,
            deployments: raw.deployments,
            skip_merge: raw.skip_merge,
            deployments_dir: raw.deployments_dir,
            bosh_bin: raw.bosh_bin,
        }
    }

    /// Names of all configured deployments, in configuration order.
    pub fn deployment_names(&self) -> impl Iterator<Item = &str> {
        self.deployments.iter().map(|d| d.name.as_str())
    }
}

/// A per-deployment descriptor file (`deployments/<name>.yml`).
///
/// Only the `name` key matters here; the rest of the manifest is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentDescriptor {
    pub name: String,
}

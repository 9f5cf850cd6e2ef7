#![allow(dead_code)]

use std::path::PathBuf;

use bosh_ci::config::{CiConfig, DeploymentConfig, EnvOverrides, RawCiConfig};

/// Builder for `CiConfig` to simplify test setup.
pub struct CiConfigBuilder {
    config: RawCiConfig,
}

impl CiConfigBuilder {
    /// Starts from the target used throughout the tests,
    /// `foo:bar@localhost:25555`, with no deployments.
    pub fn new() -> Self {
        Self {
            config: RawCiConfig {
                target: "foo:bar@localhost:25555".to_string(),
                deployments: Vec::new(),
                skip_merge: false,
                deployments_dir: PathBuf::from("deployments"),
                bosh_bin: "bosh".to_string(),
            },
        }
    }

    pub fn target(mut self, target: &str) -> Self {
        self.config.target = target.to_string();
        self
    }

    pub fn with_deployment(mut self, deployment: DeploymentConfig) -> Self {
        self.config.deployments.push(deployment);
        self
    }

    pub fn skip_merge(mut self, val: bool) -> Self {
        self.config.skip_merge = val;
        self
    }

    pub fn deployments_dir(mut self, dir: &str) -> Self {
        self.config.deployments_dir = PathBuf::from(dir);
        self
    }

    pub fn build(self) -> CiConfig {
        CiConfig::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for CiConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `DeploymentConfig`.
pub struct DeploymentBuilder {
    deployment: DeploymentConfig,
}

impl DeploymentBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            deployment: DeploymentConfig::new(name),
        }
    }

    pub fn create_patch(mut self, path: &str) -> Self {
        self.deployment.create_patch = Some(PathBuf::from(path));
        self
    }

    pub fn apply_patch(mut self, path: &str) -> Self {
        self.deployment.apply_patch = Some(PathBuf::from(path));
        self
    }

    pub fn errand(mut self, name: &str) -> Self {
        self.deployment.errands.push(name.to_string());
        self
    }

    pub fn build(self) -> DeploymentConfig {
        self.deployment
    }
}

/// Environment with nothing set.
pub fn empty_env() -> EnvOverrides {
    EnvOverrides::default()
}

/// Environment with `DESTROY_DEPLOYMENTS=true`.
pub fn destroy_env() -> EnvOverrides {
    EnvOverrides {
        destroy_deployments: true,
        ..EnvOverrides::default()
    }
}

// src/workflow/resolver.rs

//! Decides whether a deployment found on the director still belongs to the
//! configuration.
//!
//! Live names don't have to match configured names literally (a configured
//! `foo` may be deployed as `foo-z1`), so the link goes through the
//! descriptor file `<deployments_dir>/<live name>.yml`, whose `name` key must
//! be one of the configured deployments.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::config::{CiConfig, ConfigFormat, DeploymentDescriptor, parse_str};
use crate::errors::{CiError, Result};
use crate::fs::FileSystem;

/// How a live deployment relates to the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Belongs to the configured deployment `name`; must be left alone.
    Configured { name: String },
    /// Not resolvable to any configured deployment.
    Orphaned,
}

#[derive(Debug)]
pub struct DeploymentResolver {
    fs: Arc<dyn FileSystem>,
    dir: PathBuf,
    configured: HashSet<String>,
}

impl DeploymentResolver {
    pub fn new(fs: Arc<dyn FileSystem>, config: &CiConfig) -> Self {
        Self {
            fs,
            dir: config.deployments_dir.clone(),
            configured: config.deployment_names().map(str::to_string).collect(),
        }
    }

    pub fn descriptor_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.yml"))
    }

    /// Read `<dir>/<name>.yml`. `Ok(None)` if there is no such file.
    pub fn load_descriptor(&self, name: &str) -> Result<Option<DeploymentDescriptor>> {
        let path = self.descriptor_path(name);
        if !self.fs.is_file(&path) {
            return Ok(None);
        }

        let contents = self.fs.read_to_string(&path)?;
        parse_descriptor(&path, &contents).map(Some)
    }

    /// Resolve a live deployment name.
    ///
    /// Configured if the name itself is configured, or if its descriptor
    /// declares a configured name. A missing descriptor means orphaned; an
    /// unreadable or invalid one is an error.
    pub fn resolve(&self, live_name: &str) -> Result<Resolution> {
        if self.configured.contains(live_name) {
            return Ok(Resolution::Configured {
                name: live_name.to_string(),
            });
        }

        match self.load_descriptor(live_name)? {
            Some(descriptor) if self.configured.contains(&descriptor.name) => {
                Ok(Resolution::Configured {
                    name: descriptor.name,
                })
            }
            Some(descriptor) => {
                debug!(live = %live_name, declared = %descriptor.name, "descriptor names an unconfigured deployment");
                Ok(Resolution::Orphaned)
            }
            None => Ok(Resolution::Orphaned),
        }
    }
}

fn parse_descriptor(path: &Path, contents: &str) -> Result<DeploymentDescriptor> {
    parse_str(contents, ConfigFormat::Yaml).map_err(|e| {
        CiError::Config(format!(
            "invalid deployment descriptor {}: {e}",
            path.display()
        ))
    })
}

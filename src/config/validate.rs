// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{CiConfig, RawCiConfig};
use crate::errors::{CiError, Result};

impl TryFrom<RawCiConfig> for CiConfig {
    type Error = CiError;

    fn try_from(raw: RawCiConfig) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(CiConfig::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawCiConfig) -> Result<()> {
    validate_target(cfg)?;
    validate_deployment_names(cfg)?;
    validate_errands(cfg)?;
    Ok(())
}

fn validate_target(cfg: &RawCiConfig) -> Result<()> {
    if cfg.target.trim().is_empty() {
        return Err(CiError::Config("`target` must not be empty".to_string()));
    }
    if cfg.bosh_bin.trim().is_empty() {
        return Err(CiError::Config("`bosh_bin` must not be empty".to_string()));
    }
    Ok(())
}

fn validate_deployment_names(cfg: &RawCiConfig) -> Result<()> {
    let mut seen = HashSet::new();
    for (idx, deployment) in cfg.deployments.iter().enumerate() {
        if deployment.name.trim().is_empty() {
            return Err(CiError::Config(format!(
                "deployment #{} has an empty `name`",
                idx + 1
            )));
        }
        if !seen.insert(deployment.name.as_str()) {
            return Err(CiError::Config(format!(
                "deployment '{}' is configured more than once",
                deployment.name
            )));
        }
    }
    Ok(())
}

fn validate_errands(cfg: &RawCiConfig) -> Result<()> {
    for deployment in cfg.deployments.iter() {
        if deployment.errands.iter().any(|e| e.trim().is_empty()) {
            return Err(CiError::Config(format!(
                "deployment '{}' has an empty errand name",
                deployment.name
            )));
        }
    }
    Ok(())
}

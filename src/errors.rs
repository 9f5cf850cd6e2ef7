// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

/// Exit status used when the deploy task itself reports an error.
pub const DEPLOY_FAILED_EXIT_CODE: i32 = 2;

#[derive(Error, Debug)]
pub enum CiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Malformed target '{input}': {reason}")]
    MalformedTarget { input: String, reason: String },

    #[error("Command failed (exit code {exit_code}): {command}\n{output}")]
    CommandFailed {
        command: String,
        exit_code: i32,
        output: String,
    },

    #[error("Deploy task {} reported an error: {output}", task_label(.task_id))]
    DeployTaskFailed { task_id: Option<u64>, output: String },

    #[error("Refusing to delete deployments: set {flag}=true to allow destructive cleanup")]
    DestructiveActionNotConfirmed { flag: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CiError {
    /// Process exit status this error should terminate with.
    pub fn exit_code(&self) -> i32 {
        match self {
            CiError::DeployTaskFailed { .. } => DEPLOY_FAILED_EXIT_CODE,
            _ => 1,
        }
    }
}

fn task_label(task_id: &Option<u64>) -> String {
    match task_id {
        Some(id) => id.to_string(),
        None => "<unknown>".to_string(),
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, CiError>;

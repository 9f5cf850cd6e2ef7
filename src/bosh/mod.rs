// src/bosh/mod.rs

//! Boundary with the bosh CLI.
//!
//! - [`command`] models each bosh action as a typed request and renders it
//!   to the exact command-line syntax bosh expects.
//! - [`shell`] runs rendered commands and applies failure/truncation options.
//! - [`output`] turns captured text into typed facts (deploy outcome,
//!   deployment inventory).

pub mod command;
pub mod output;
pub mod shell;

pub use command::BoshCommand;
pub use output::{
    DeployOutcome, DeploymentInventoryEntry, interpret_deploy_output, interpret_deployment_table,
};
pub use shell::{CommandResult, ProcessShell, RunOptions, Shell, finish_invocation};

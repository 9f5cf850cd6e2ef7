// src/lib.rs

pub mod bosh;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod target;
pub mod workflow;

use std::sync::Arc;

use tracing::{debug, info};

use crate::bosh::ProcessShell;
use crate::cli::{CliArgs, Workflow};
use crate::config::{CiConfig, EnvOverrides, load_and_validate};
use crate::errors::Result;
use crate::fs::RealFileSystem;
use crate::target::TargetSpec;
use crate::workflow::Orchestrator;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the environment snapshot
/// - the bosh process shell
/// - the requested workflow
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)?;
    let env = EnvOverrides::from_env();

    if args.print_config {
        print_plan(&cfg, &env);
        return Ok(());
    }

    let shell = ProcessShell::new(cfg.bosh_bin.clone());
    let mut orchestrator = Orchestrator::new(shell, cfg, env, Arc::new(RealFileSystem));
    run_workflow(&mut orchestrator, args.command).await
}

/// Dispatch a single workflow on an already constructed orchestrator.
pub async fn run_workflow<S: bosh::Shell>(
    orchestrator: &mut Orchestrator<S>,
    workflow: Workflow,
) -> Result<()> {
    info!(?workflow, "starting workflow");
    match workflow {
        Workflow::Target => {
            orchestrator.target().await?;
        }
        Workflow::Patch => orchestrator.patch().await?,
        Workflow::Deploy => {
            let outcomes = orchestrator.deploy().await?;
            debug!(?outcomes, "deploy outcomes");
        }
        Workflow::Verify => orchestrator.verify().await?,
        Workflow::Clean => {
            let deleted = orchestrator.clean().await?;
            info!(?deleted, "clean finished");
        }
    }
    info!(?workflow, "workflow finished");
    Ok(())
}

/// Print the resolved plan without running bosh. Passwords are never printed.
fn print_plan(cfg: &CiConfig, env: &EnvOverrides) {
    println!("bosh-ci plan");
    match TargetSpec::parse(&cfg.target, env) {
        Ok(target) => {
            println!("  target = {}", target.endpoint());
            match target.username {
                Some(ref user) => println!("  user = {user}"),
                None => println!("  user = (none, login skipped)"),
            }
        }
        Err(err) => println!("  target = INVALID ({err})"),
    }
    println!("  skip_merge = {}", cfg.skip_merge);
    println!("  deployments_dir = {}", cfg.deployments_dir.display());
    println!("  destroy_deployments = {}", env.destroy_deployments);
    println!();

    println!("deployments ({}):", cfg.deployments.len());
    for deployment in cfg.deployments.iter() {
        println!("  - {}", deployment.name);
        if let Some(ref path) = deployment.create_patch {
            println!("      create_patch: {}", path.display());
        }
        if let Some(ref path) = deployment.apply_patch {
            println!("      apply_patch: {}", path.display());
        }
        if !deployment.errands.is_empty() {
            println!("      errands: {:?}", deployment.errands);
        }
    }

    debug!("plan printed (no bosh commands run)");
}

// src/workflow/orchestrator.rs

//! Sequencing of bosh commands for each workflow.
//!
//! Every workflow is a fixed, strictly sequential list of bosh invocations.
//! A deployment-scoped command always directly follows the `bosh deployment`
//! that selects its deployment. Any failing step aborts the workflow.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::bosh::{
    BoshCommand, CommandResult, DeployOutcome, RunOptions, Shell, interpret_deploy_output,
    interpret_deployment_table,
};
use crate::config::env::DESTROY_DEPLOYMENTS_VAR;
use crate::config::{CiConfig, DeploymentConfig, EnvOverrides};
use crate::errors::{CiError, Result};
use crate::fs::FileSystem;
use crate::target::TargetSpec;
use crate::workflow::resolver::{DeploymentResolver, Resolution};

pub struct Orchestrator<S: Shell> {
    shell: S,
    config: CiConfig,
    env: EnvOverrides,
    fs: Arc<dyn FileSystem>,
}

impl<S: Shell> Orchestrator<S> {
    pub fn new(shell: S, config: CiConfig, env: EnvOverrides, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            shell,
            config,
            env,
            fs,
        }
    }

    /// Point bosh at the director and log in.
    pub async fn target(&mut self) -> Result<TargetSpec> {
        let target = TargetSpec::parse(&self.config.target, &self.env)?;

        self.bosh(BoshCommand::Target {
            host: target.host.clone(),
            port: target.port,
        })
        .await?;

        match target.username {
            Some(ref username) => {
                self.bosh(BoshCommand::Login {
                    username: username.clone(),
                    password: target.password.clone(),
                })
                .await?;
                info!(endpoint = %target.endpoint(), user = %username, "targeted and logged in");
            }
            None => {
                warn!(endpoint = %target.endpoint(), "no username configured; skipping login");
            }
        }

        Ok(target)
    }

    /// Create and/or apply the configured patch files, per deployment.
    pub async fn patch(&mut self) -> Result<()> {
        for deployment in self.deployments() {
            self.select(&deployment).await?;

            if let Some(path) = deployment.create_patch {
                self.bosh(BoshCommand::CreatePatch { path }).await?;
            }
            if let Some(path) = deployment.apply_patch {
                self.bosh(BoshCommand::ApplyPatch { path }).await?;
            }
        }
        Ok(())
    }

    /// Prepare and deploy every deployment.
    ///
    /// The deploy command's exit status is not enough: bosh can print a task
    /// error on its last line, which is turned into
    /// [`CiError::DeployTaskFailed`] and stops before the next deployment.
    pub async fn deploy(&mut self) -> Result<Vec<DeployOutcome>> {
        let skip_merge = self.config.skip_merge;
        let mut outcomes = Vec::new();

        for deployment in self.deployments() {
            self.select(&deployment).await?;
            self.bosh(BoshCommand::PrepareDeployment).await?;

            let result = self
                .bosh_with(
                    BoshCommand::Deploy { skip_merge },
                    RunOptions::default().last_number(1),
                )
                .await?;

            let outcome = interpret_deploy_output(&result.raw_output);
            match outcome {
                DeployOutcome::Succeeded { task_id } => {
                    info!(deployment = %deployment.name, task_id, "deploy task finished");
                }
                DeployOutcome::Failed { task_id } => {
                    error!(deployment = %deployment.name, ?task_id, output = %result.raw_output, "deploy task failed");
                    return Err(CiError::DeployTaskFailed {
                        task_id,
                        output: result.raw_output,
                    });
                }
                DeployOutcome::Unrecognized => {
                    warn!(
                        deployment = %deployment.name,
                        output = %result.raw_output,
                        "could not find a task id in deploy output; assuming success"
                    );
                }
            }
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    /// Run each deployment's errands in order.
    pub async fn verify(&mut self) -> Result<()> {
        for deployment in self.deployments() {
            self.select(&deployment).await?;

            for errand in deployment.errands {
                self.bosh(BoshCommand::RunErrand { name: errand }).await?;
            }
        }
        Ok(())
    }

    /// Delete every deployment on the director that no longer belongs to the
    /// configuration. Returns the names that were deleted.
    ///
    /// Refuses to do anything unless `DESTROY_DEPLOYMENTS` is set.
    pub async fn clean(&mut self) -> Result<Vec<String>> {
        if !self.env.destroy_deployments {
            return Err(CiError::DestructiveActionNotConfirmed {
                flag: DESTROY_DEPLOYMENTS_VAR.to_string(),
            });
        }

        let resolver = DeploymentResolver::new(Arc::clone(&self.fs), &self.config);

        // bosh exits non-zero when there are no deployments.
        let listing = self
            .bosh_with(BoshCommand::Deployments, RunOptions::default().ignoring_failures())
            .await?;
        let inventory = interpret_deployment_table(&listing.raw_output);
        info!(count = inventory.len(), "deployments found on director");

        // Resolve everything first so a bad descriptor stops us before any delete.
        let mut orphans = Vec::new();
        for entry in inventory {
            match resolver.resolve(&entry.name)? {
                Resolution::Configured { name } => {
                    info!(deployment = %entry.name, configured = %name, "keeping configured deployment");
                }
                Resolution::Orphaned => orphans.push(entry.name),
            }
        }

        for name in orphans.iter() {
            self.bosh(BoshCommand::DeleteDeployment {
                name: name.clone(),
                force: true,
            })
            .await?;
        }

        Ok(orphans)
    }

    fn deployments(&self) -> Vec<DeploymentConfig> {
        self.config.deployments.clone()
    }

    async fn select(&mut self, deployment: &DeploymentConfig) -> Result<CommandResult> {
        self.bosh(BoshCommand::Deployment {
            name: deployment.name.clone(),
        })
        .await
    }

    async fn bosh(&mut self, command: BoshCommand) -> Result<CommandResult> {
        let options = if command.is_sensitive() {
            RunOptions::default().quiet()
        } else {
            RunOptions::default()
        };
        self.bosh_with(command, options).await
    }

    async fn bosh_with(&mut self, command: BoshCommand, options: RunOptions) -> Result<CommandResult> {
        self.shell.run(&command, options).await
    }
}

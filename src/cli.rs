// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `bosh-ci`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bosh-ci",
    version,
    about = "Drive bosh deployments from a CI pipeline.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the CI config file (YAML or TOML).
    #[arg(long, value_name = "PATH", default_value = ".ci.yml", global = true)]
    pub config: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `BOSH_CI_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Parse + validate the config, print the plan, but don't run bosh.
    #[arg(long, global = true)]
    pub print_config: bool,

    #[command(subcommand)]
    pub command: Workflow,
}

/// The workflows exposed as subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Workflow {
    /// Target the director and log in.
    Target,
    /// Create and/or apply deployment patches.
    Patch,
    /// Prepare and deploy every configured deployment.
    Deploy,
    /// Run the configured errands of every deployment.
    Verify,
    /// Delete deployments that are no longer configured (requires DESTROY_DEPLOYMENTS).
    Clean,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_workflow_with_global_flags() {
        let args = CliArgs::try_parse_from(["bosh-ci", "deploy", "--config", "ci/pipeline.yml"])
            .unwrap();
        assert_eq!(args.command, Workflow::Deploy);
        assert_eq!(args.config, "ci/pipeline.yml");
        assert!(!args.print_config);
    }

    #[test]
    fn config_defaults_to_dot_ci_yml() {
        let args = CliArgs::try_parse_from(["bosh-ci", "clean"]).unwrap();
        assert_eq!(args.config, ".ci.yml");
        assert_eq!(args.command, Workflow::Clean);
    }
}

#![allow(dead_code)]

use std::sync::Arc;

use bosh_ci::config::{CiConfig, EnvOverrides};
use bosh_ci::fs::mock::MockFileSystem;
use bosh_ci::workflow::Orchestrator;
use bosh_ci_test_utils::fake_shell::{FakeShell, InvocationLog};

/// Wire a fake shell into an orchestrator, returning the invocation log.
pub fn orchestrator(
    shell: FakeShell,
    cfg: CiConfig,
    env: EnvOverrides,
    fs: MockFileSystem,
) -> (Orchestrator<FakeShell>, InvocationLog) {
    let log = shell.log();
    (Orchestrator::new(shell, cfg, env, Arc::new(fs)), log)
}

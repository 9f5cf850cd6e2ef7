// src/bosh/shell.rs

//! Execution of bosh commands.
//!
//! The orchestrator talks to a [`Shell`] instead of spawning processes
//! itself. [`ProcessShell`] is the production implementation; tests provide
//! a scripted fake that records the commands it was asked to run.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::bosh::command::BoshCommand;
use crate::bosh::output::last_lines;
use crate::errors::{CiError, Result};

/// Per-invocation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Return the output even when the command exits non-zero.
    pub ignore_failures: bool,
    /// Echo the command line before running it.
    pub output_command: bool,
    /// Only keep the last N lines of output.
    pub last_number: Option<usize>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            ignore_failures: false,
            output_command: true,
            last_number: None,
        }
    }
}

impl RunOptions {
    pub fn ignoring_failures(mut self) -> Self {
        self.ignore_failures = true;
        self
    }

    pub fn quiet(mut self) -> Self {
        self.output_command = false;
        self
    }

    pub fn last_number(mut self, n: usize) -> Self {
        self.last_number = Some(n);
        self
    }
}

/// Captured output of one bosh invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub raw_output: String,
    /// Always `true` when failures were ignored.
    pub succeeded: bool,
}

/// Apply [`RunOptions`] to a finished invocation.
///
/// Non-zero exit becomes [`CiError::CommandFailed`] unless failures are
/// ignored. `last_number` truncation applies to the returned output only; the
/// error carries everything that was captured.
pub fn finish_invocation(
    command_line: &str,
    output: String,
    exit_code: i32,
    options: RunOptions,
) -> Result<CommandResult> {
    if exit_code != 0 && !options.ignore_failures {
        return Err(CiError::CommandFailed {
            command: command_line.to_string(),
            exit_code,
            output,
        });
    }
    if exit_code != 0 {
        warn!(command = %command_line, exit_code, "command failed; ignoring as requested");
    }

    let raw_output = match options.last_number {
        Some(n) => last_lines(&output, n),
        None => output,
    };

    Ok(CommandResult {
        raw_output,
        succeeded: true,
    })
}

/// Trait abstracting how bosh commands are executed.
pub trait Shell: Send {
    fn run<'a>(
        &'a mut self,
        command: &'a BoshCommand,
        options: RunOptions,
    ) -> Pin<Box<dyn Future<Output = Result<CommandResult>> + Send + 'a>>;
}

/// Runs bosh as a subprocess through the platform shell.
///
/// stderr is folded into stdout so the captured text matches what an
/// operator sees in a terminal. Each line is streamed to our stdout as it
/// arrives unless `stream_output` is off.
#[derive(Debug, Clone)]
pub struct ProcessShell {
    bosh_bin: String,
    stream_output: bool,
}

impl ProcessShell {
    pub fn new(bosh_bin: impl Into<String>) -> Self {
        Self {
            bosh_bin: bosh_bin.into(),
            stream_output: true,
        }
    }

    pub fn with_stream_output(mut self, stream: bool) -> Self {
        self.stream_output = stream;
        self
    }

    async fn run_inner(&self, command: &BoshCommand, options: RunOptions) -> Result<CommandResult> {
        let line = command.render(&self.bosh_bin);
        let shown = command.redacted(&self.bosh_bin);

        if options.output_command && !command.is_sensitive() {
            info!(command = %shown, "running");
        } else {
            debug!(command = %shown, "running");
        }

        let script = format!("{line} 2>&1");
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&script);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&script);
            c
        };

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .with_context(|| format!("spawning `{shown}`"))?;

        // bosh output is not guaranteed to be UTF-8; decode lossily per line.
        let mut output = String::new();
        if let Some(stdout) = child.stdout.take() {
            let mut reader = BufReader::new(stdout);
            let mut buf = Vec::new();
            loop {
                buf.clear();
                let n = reader
                    .read_until(b'\n', &mut buf)
                    .await
                    .with_context(|| format!("reading output of `{shown}`"))?;
                if n == 0 {
                    break;
                }
                let l = String::from_utf8_lossy(&buf);
                let l = l.trim_end_matches(['\n', '\r']);
                if self.stream_output {
                    println!("{l}");
                }
                output.push_str(l);
                output.push('\n');
            }
        }

        let status = child
            .wait()
            .await
            .with_context(|| format!("waiting for `{shown}`"))?;
        let code = status.code().unwrap_or(-1);

        debug!(command = %shown, exit_code = code, "command exited");

        finish_invocation(&shown, output, code, options)
    }
}

impl Shell for ProcessShell {
    fn run<'a>(
        &'a mut self,
        command: &'a BoshCommand,
        options: RunOptions,
    ) -> Pin<Box<dyn Future<Output = Result<CommandResult>> + Send + 'a>> {
        Box::pin(self.run_inner(command, options))
    }
}

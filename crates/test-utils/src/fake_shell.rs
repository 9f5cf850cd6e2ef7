use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use bosh_ci::bosh::{BoshCommand, CommandResult, RunOptions, Shell, finish_invocation};
use bosh_ci::errors::Result;

/// One recorded call to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Rendered command line, e.g. `bosh -n deployment foo`.
    pub command: String,
    pub options: RunOptions,
}

/// Shared handle on the invocations a [`FakeShell`] has seen.
#[derive(Debug, Clone, Default)]
pub struct InvocationLog(Arc<Mutex<Vec<Invocation>>>);

impl InvocationLog {
    pub fn invocations(&self) -> Vec<Invocation> {
        self.0.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.invocations().into_iter().map(|i| i.command).collect()
    }

    /// Recorded invocation whose command line contains `needle`.
    pub fn find(&self, needle: &str) -> Option<Invocation> {
        self.invocations()
            .into_iter()
            .find(|i| i.command.contains(needle))
    }

    fn push(&self, invocation: Invocation) {
        self.0.lock().unwrap().push(invocation);
    }
}

#[derive(Debug, Clone)]
struct Scripted {
    pattern: String,
    output: String,
    exit_code: i32,
}

/// `pattern` occurs in `line` and is not followed by more of the same word,
/// so `"-n deploy"` matches `bosh -n deploy` but not `bosh -n deployment foo`.
fn contains_words(line: &str, pattern: &str) -> bool {
    line.match_indices(pattern).any(|(idx, _)| {
        line[idx + pattern.len()..]
            .chars()
            .next()
            .is_none_or(char::is_whitespace)
    })
}

/// A fake shell that:
/// - records every command it is asked to run
/// - answers with scripted output (first pattern found in the command line
///   wins, see [`contains_words`]), or empty
///   output and exit code 0 when nothing matches
/// - applies the same failure/truncation rules as the real shell.
#[derive(Debug, Clone, Default)]
pub struct FakeShell {
    log: InvocationLog,
    scripted: Vec<Scripted>,
}

impl FakeShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, pattern: &str, output: &str) -> Self {
        self.scripted.push(Scripted {
            pattern: pattern.to_string(),
            output: output.to_string(),
            exit_code: 0,
        });
        self
    }

    pub fn fail(mut self, pattern: &str, output: &str, exit_code: i32) -> Self {
        self.scripted.push(Scripted {
            pattern: pattern.to_string(),
            output: output.to_string(),
            exit_code,
        });
        self
    }

    pub fn log(&self) -> InvocationLog {
        self.log.clone()
    }
}

impl Shell for FakeShell {
    fn run<'a>(
        &'a mut self,
        command: &'a BoshCommand,
        options: RunOptions,
    ) -> Pin<Box<dyn Future<Output = Result<CommandResult>> + Send + 'a>> {
        let line = command.render("bosh");
        let shown = command.redacted("bosh");
        self.log.push(Invocation {
            command: line.clone(),
            options,
        });

        let (output, exit_code) = self
            .scripted
            .iter()
            .find(|s| contains_words(&line, &s.pattern))
            .map(|s| (s.output.clone(), s.exit_code))
            .unwrap_or_default();

        Box::pin(async move { finish_invocation(&shown, output, exit_code, options) })
    }
}

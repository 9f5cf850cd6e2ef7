// src/bosh/output.rs

//! Interpreters for the human-readable output of the bosh CLI.
//!
//! These never fail: output the parsers don't recognise yields an
//! "unknown"/empty result and the orchestrator decides what that means.

use std::sync::LazyLock;

use regex::Regex;

static TASK_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\btask\s+(\d+)").expect("valid task id regex"));

static ERROR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\berror\b").expect("valid error token regex"));

/// Result of interpreting the last line(s) of `bosh deploy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployOutcome {
    Succeeded { task_id: u64 },
    Failed { task_id: Option<u64> },
    /// Neither a task id nor an error token was found.
    Unrecognized,
}

impl DeployOutcome {
    pub fn failed(&self) -> bool {
        matches!(self, DeployOutcome::Failed { .. })
    }

    pub fn task_id(&self) -> Option<u64> {
        match *self {
            DeployOutcome::Succeeded { task_id } => Some(task_id),
            DeployOutcome::Failed { task_id } => task_id,
            DeployOutcome::Unrecognized => None,
        }
    }
}

/// Classify deploy output: an `error` token anywhere means failure, otherwise
/// a `task <n>` means success.
pub fn interpret_deploy_output(text: &str) -> DeployOutcome {
    let task_id = TASK_ID
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok());

    if ERROR_TOKEN.is_match(text) {
        return DeployOutcome::Failed { task_id };
    }

    match task_id {
        Some(task_id) => DeployOutcome::Succeeded { task_id },
        None => DeployOutcome::Unrecognized,
    }
}

/// One row of `bosh deployments`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentInventoryEntry {
    pub name: String,
}

/// Extract deployment names from the bordered table printed by
/// `bosh deployments`:
///
/// ```text
/// +--------+------------+--------------+
/// | Name   | Release(s) | Stemcell(s)  |
/// +--------+------------+--------------+
/// | foo-z1 | foo/1      | stemcell/123 |
/// +--------+------------+--------------+
///
/// Deployments total: 1
/// ```
///
/// The first `|` row is the header. Lines that are not `|` rows (borders,
/// blanks, the summary) are skipped. Continuation rows with an empty first
/// cell (multiple releases per deployment) are skipped too.
pub fn interpret_deployment_table(text: &str) -> Vec<DeploymentInventoryEntry> {
    let mut entries = Vec::new();
    let mut seen_header = false;

    for line in text.lines().map(str::trim) {
        if line.is_empty() || is_border(line) || !line.starts_with('|') {
            continue;
        }
        if !seen_header {
            seen_header = true;
            continue;
        }

        let name = line.split('|').nth(1).map(str::trim).unwrap_or_default();
        if !name.is_empty() {
            entries.push(DeploymentInventoryEntry {
                name: name.to_string(),
            });
        }
    }

    entries
}

fn is_border(line: &str) -> bool {
    line.chars().all(|c| c == '+' || c == '-')
}

/// Keep only the last `n` lines of `output`.
pub fn last_lines(output: &str, n: usize) -> String {
    let lines: Vec<&str> = output.lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_DEPLOYMENT: &str = "
        +------------+-------------+-------------------------------+
        | Name       | Release(s)  | Stemcell(s)                   |
        +------------+-------------+-------------------------------+
        | foo-z1     | foo/1       | stemcell-trusty-go_agent/1234 |
        +------------+-------------+-------------------------------+

        Deployments total: 1
        ";

    #[test]
    fn deploy_task_success() {
        assert_eq!(
            interpret_deploy_output("task 100"),
            DeployOutcome::Succeeded { task_id: 100 }
        );
        assert_eq!(
            interpret_deploy_output("Task 42 done"),
            DeployOutcome::Succeeded { task_id: 42 }
        );
    }

    #[test]
    fn deploy_task_error() {
        let outcome = interpret_deploy_output("Task 101 error");
        assert!(outcome.failed());
        assert_eq!(outcome.task_id(), Some(101));

        let outcome = interpret_deploy_output("Error 100: something went wrong");
        assert_eq!(outcome, DeployOutcome::Failed { task_id: None });

        assert!(interpret_deploy_output("TASK 7 ERROR").failed());
    }

    #[test]
    fn deploy_unrecognized_output() {
        assert_eq!(interpret_deploy_output(""), DeployOutcome::Unrecognized);
        assert_eq!(
            interpret_deploy_output("Deployed `foo' to `bosh-lite'"),
            DeployOutcome::Unrecognized
        );
        assert!(!DeployOutcome::Unrecognized.failed());
    }

    #[test]
    fn error_must_be_a_word() {
        assert_eq!(
            interpret_deploy_output("task 5 errorless"),
            DeployOutcome::Succeeded { task_id: 5 }
        );
    }

    #[test]
    fn table_with_one_row() {
        let entries = interpret_deployment_table(ONE_DEPLOYMENT);
        assert_eq!(
            entries,
            vec![DeploymentInventoryEntry { name: "foo-z1".into() }]
        );
    }

    #[test]
    fn table_with_several_rows_and_continuations() {
        let table = "\
+--------+------------+--------------+
| Name   | Release(s) | Stemcell(s)  |
+--------+------------+--------------+
| cf     | cf/200     | stemcell/1   |
|        | diego/1    |              |
+--------+------------+--------------+
| redis  | redis/9    | stemcell/1   |
+--------+------------+--------------+

Deployments total: 2
";
        let names: Vec<String> = interpret_deployment_table(table)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["cf", "redis"]);
    }

    #[test]
    fn empty_table_and_garbage() {
        assert!(interpret_deployment_table("No deployments\n\nDeployments total: 0\n").is_empty());
        assert!(interpret_deployment_table("").is_empty());
        let header_only = "\
+------+------------+-------------+
| Name | Release(s) | Stemcell(s) |
+------+------------+-------------+

Deployments total: 0
";
        assert!(interpret_deployment_table(header_only).is_empty());
    }

    #[test]
    fn last_lines_keeps_tail() {
        assert_eq!(last_lines("a\nb\nTask 100 done\n", 1), "Task 100 done");
        assert_eq!(last_lines("a\nb", 5), "a\nb");
        assert_eq!(last_lines("", 1), "");
    }
}

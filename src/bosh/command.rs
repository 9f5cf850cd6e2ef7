// src/bosh/command.rs

//! Typed bosh CLI requests and their translation to command lines.
//!
//! Every invocation goes through [`BoshCommand::render`], so the exact
//! argument syntax of the bosh CLI lives in this file only.

use std::fmt;
use std::path::PathBuf;

/// Flags prepended to every invocation (`-n`: non-interactive).
const GLOBAL_FLAGS: &str = "-n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoshCommand {
    Target { host: String, port: u16 },
    Login { username: String, password: String },
    Deployment { name: String },
    CreatePatch { path: PathBuf },
    ApplyPatch { path: PathBuf },
    PrepareDeployment,
    Deploy { skip_merge: bool },
    RunErrand { name: String },
    Deployments,
    DeleteDeployment { name: String, force: bool },
}

impl BoshCommand {
    /// Arguments after `bosh -n`, unquoted.
    fn args(&self) -> Vec<String> {
        match self {
            BoshCommand::Target { host, port } => {
                vec!["target".into(), format!("{host}:{port}")]
            }
            BoshCommand::Login { username, password } => {
                vec!["login".into(), username.clone(), password.clone()]
            }
            BoshCommand::Deployment { name } => vec!["deployment".into(), name.clone()],
            BoshCommand::CreatePatch { path } => vec![
                "create".into(),
                "deployment".into(),
                "patch".into(),
                path.display().to_string(),
            ],
            BoshCommand::ApplyPatch { path } => vec![
                "apply".into(),
                "deployment".into(),
                "patch".into(),
                path.display().to_string(),
            ],
            BoshCommand::PrepareDeployment => vec!["prepare".into(), "deployment".into()],
            BoshCommand::Deploy { skip_merge } => {
                let mut args = vec!["deploy".to_string()];
                if *skip_merge {
                    args.push("--skip-merge".into());
                }
                args
            }
            BoshCommand::RunErrand { name } => {
                vec!["run".into(), "errand".into(), name.clone()]
            }
            BoshCommand::Deployments => vec!["deployments".into()],
            BoshCommand::DeleteDeployment { name, force } => {
                let mut args = vec!["delete".into(), "deployment".into(), name.clone()];
                if *force {
                    args.push("--force".into());
                }
                args
            }
        }
    }

    /// Full shell command line for the given bosh executable.
    pub fn render(&self, bosh_bin: &str) -> String {
        let mut line = format!("{} {GLOBAL_FLAGS}", shell_quote(bosh_bin));
        for arg in self.args() {
            line.push(' ');
            line.push_str(&shell_quote(&arg));
        }
        line
    }

    /// Whether the command line may be echoed verbatim.
    pub fn is_sensitive(&self) -> bool {
        matches!(self, BoshCommand::Login { .. })
    }

    /// Command line suitable for logs: like [`render`](Self::render) but with
    /// secrets masked.
    pub fn redacted(&self, bosh_bin: &str) -> String {
        match self {
            BoshCommand::Login { username, .. } => BoshCommand::Login {
                username: username.clone(),
                password: "********".into(),
            }
            .render(bosh_bin),
            other => other.render(bosh_bin),
        }
    }
}

impl fmt::Display for BoshCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted("bosh"))
    }
}

/// Quote `arg` for `sh` when it contains anything but plain word characters.
pub fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:@%+=,".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_wire_syntax() {
        let cases = [
            (
                BoshCommand::Target { host: "example.com".into(), port: 25555 },
                "bosh -n target example.com:25555",
            ),
            (
                BoshCommand::Login { username: "foo".into(), password: "bar".into() },
                "bosh -n login foo bar",
            ),
            (BoshCommand::Deployment { name: "foo".into() }, "bosh -n deployment foo"),
            (
                BoshCommand::CreatePatch { path: "foo/bar.yml".into() },
                "bosh -n create deployment patch foo/bar.yml",
            ),
            (
                BoshCommand::ApplyPatch { path: "foo/bar.yml".into() },
                "bosh -n apply deployment patch foo/bar.yml",
            ),
            (BoshCommand::PrepareDeployment, "bosh -n prepare deployment"),
            (BoshCommand::Deploy { skip_merge: false }, "bosh -n deploy"),
            (BoshCommand::Deploy { skip_merge: true }, "bosh -n deploy --skip-merge"),
            (BoshCommand::RunErrand { name: "smoke_tests".into() }, "bosh -n run errand smoke_tests"),
            (BoshCommand::Deployments, "bosh -n deployments"),
            (
                BoshCommand::DeleteDeployment { name: "foo-z1".into(), force: true },
                "bosh -n delete deployment foo-z1 --force",
            ),
        ];
        for (cmd, expected) in cases {
            assert_eq!(cmd.render("bosh"), expected);
        }
    }

    #[test]
    fn quotes_arguments_with_metacharacters() {
        assert_eq!(shell_quote("plain-name_1.yml"), "plain-name_1.yml");
        assert_eq!(shell_quote("with space"), "'with space'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote("$(rm -rf /)"), "'$(rm -rf /)'");
        assert_eq!(shell_quote(""), "''");

        let login = BoshCommand::Login { username: "ci".into(), password: "p@ss word".into() };
        assert_eq!(login.render("bosh"), "bosh -n login ci 'p@ss word'");
    }

    #[test]
    fn login_is_redacted_for_display() {
        let login = BoshCommand::Login { username: "ci".into(), password: "secret".into() };
        assert!(login.is_sensitive());
        assert_eq!(login.to_string(), "bosh -n login ci '********'");
        assert!(!login.to_string().contains("secret"));
        assert!(!BoshCommand::Deployments.is_sensitive());
    }
}

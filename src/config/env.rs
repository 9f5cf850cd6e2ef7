// src/config/env.rs

//! Environment inputs, captured once at process start.
//!
//! Nothing below the CLI entry point reads `std::env` directly; the
//! orchestrator receives an [`EnvOverrides`] value instead, which also lets
//! tests supply credentials and the destroy flag explicitly.

pub const BOSH_USER_VAR: &str = "BOSH_USER";
pub const BOSH_PASSWORD_VAR: &str = "BOSH_PASSWORD";
pub const DESTROY_DEPLOYMENTS_VAR: &str = "DESTROY_DEPLOYMENTS";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub bosh_user: Option<String>,
    pub bosh_password: Option<String>,
    /// Allows the `clean` workflow to delete deployments.
    pub destroy_deployments: bool,
}

impl EnvOverrides {
    /// Snapshot the relevant variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary lookup function. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            bosh_user: non_empty(BOSH_USER_VAR),
            bosh_password: non_empty(BOSH_PASSWORD_VAR),
            destroy_deployments: non_empty(DESTROY_DEPLOYMENTS_VAR)
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "yes" | "1" | "on"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn reads_credentials() {
        let env = EnvOverrides::from_lookup(lookup(&[
            ("BOSH_USER", "env_user"),
            ("BOSH_PASSWORD", "env_pw"),
        ]));
        assert_eq!(env.bosh_user.as_deref(), Some("env_user"));
        assert_eq!(env.bosh_password.as_deref(), Some("env_pw"));
        assert!(!env.destroy_deployments);
    }

    #[test]
    fn destroy_flag_accepts_boolean_like_values() {
        for value in ["true", "TRUE", "yes", "1", "on"] {
            let env = EnvOverrides::from_lookup(lookup(&[("DESTROY_DEPLOYMENTS", value)]));
            assert!(env.destroy_deployments, "{value} should enable destroy");
        }
        for value in ["false", "0", "no", ""] {
            let env = EnvOverrides::from_lookup(lookup(&[("DESTROY_DEPLOYMENTS", value)]));
            assert!(!env.destroy_deployments, "{value} should not enable destroy");
        }
    }

    #[test]
    fn empty_credentials_are_ignored() {
        let env = EnvOverrides::from_lookup(lookup(&[("BOSH_USER", "  ")]));
        assert_eq!(env.bosh_user, None);
    }
}

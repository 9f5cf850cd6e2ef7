// src/target.rs

//! Parsing of the compact director connection string
//! `[user[:password]@]host:port`.

use std::fmt;

use crate::config::EnvOverrides;
use crate::errors::{CiError, Result};

pub const DEFAULT_PASSWORD: &str = "admin";

/// Director endpoint plus the credentials used to log in to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    /// `None` when neither the string nor the environment names a user; the
    /// target is then set without logging in.
    pub username: Option<String>,
    pub password: String,
    pub host: String,
    pub port: u16,
}

impl TargetSpec {
    /// Parse `raw`, filling missing credentials from `env`.
    ///
    /// Username: value in the string, then `BOSH_USER`. Once the string has
    /// an `@` a username is mandatory.
    /// Password: value in the string, then `BOSH_PASSWORD`, then `"admin"`.
    pub fn parse(raw: &str, env: &EnvOverrides) -> Result<Self> {
        let raw = raw.trim();
        let malformed = |reason: &str| CiError::MalformedTarget {
            input: raw.to_string(),
            reason: reason.to_string(),
        };

        let (credentials, endpoint) = match raw.rsplit_once('@') {
            Some((creds, endpoint)) => (Some(creds), endpoint),
            None => (None, raw),
        };

        let (host, port) = endpoint
            .rsplit_once(':')
            .ok_or_else(|| malformed("expected host:port"))?;
        if host.is_empty() {
            return Err(malformed("host is empty"));
        }
        let port: u16 = port
            .parse()
            .map_err(|_| malformed("port must be an integer between 1 and 65535"))?;
        if port == 0 {
            return Err(malformed("port must be an integer between 1 and 65535"));
        }

        let (user, password) = match credentials {
            Some(creds) => match creds.split_once(':') {
                Some((user, password)) => (non_empty(user), non_empty(password)),
                None => (non_empty(creds), None),
            },
            None => (None, None),
        };

        let username = user.or_else(|| env.bosh_user.clone());
        if credentials.is_some() && username.is_none() {
            return Err(malformed("username is missing and BOSH_USER is not set"));
        }

        let password = password
            .or_else(|| env.bosh_password.clone())
            .unwrap_or_else(|| DEFAULT_PASSWORD.to_string());

        Ok(Self {
            username,
            password,
            host: host.to_string(),
            port,
        })
    }

    /// `host:port`, as passed to `bosh target`.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Renders back to the connection-string form, password included.
impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref user) = self.username {
            write!(f, "{user}:{}@", self.password)?;
        }
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env() -> EnvOverrides {
        EnvOverrides::default()
    }

    #[test]
    fn parses_full_string() {
        let t = TargetSpec::parse("foo:bar@example.com:25555", &no_env()).unwrap();
        assert_eq!(t.username.as_deref(), Some("foo"));
        assert_eq!(t.password, "bar");
        assert_eq!(t.host, "example.com");
        assert_eq!(t.port, 25555);
        assert_eq!(t.endpoint(), "example.com:25555");
    }

    #[test]
    fn password_defaults_to_admin() {
        let t = TargetSpec::parse("foo@example.com:25555", &no_env()).unwrap();
        assert_eq!(t.username.as_deref(), Some("foo"));
        assert_eq!(t.password, DEFAULT_PASSWORD);
    }

    #[test]
    fn env_fills_missing_credentials() {
        let env = EnvOverrides {
            bosh_user: Some("env_user".into()),
            bosh_password: Some("env_pw".into()),
            destroy_deployments: false,
        };
        let t = TargetSpec::parse("example.com:25555", &env).unwrap();
        assert_eq!(t.username.as_deref(), Some("env_user"));
        assert_eq!(t.password, "env_pw");

        let t = TargetSpec::parse("foo@example.com:25555", &env).unwrap();
        assert_eq!(t.username.as_deref(), Some("foo"));
        assert_eq!(t.password, "env_pw");
    }

    #[test]
    fn string_credentials_beat_environment() {
        let env = EnvOverrides {
            bosh_user: Some("env_user".into()),
            bosh_password: Some("env_pw".into()),
            destroy_deployments: false,
        };
        let t = TargetSpec::parse("foo:bar@example.com:25555", &env).unwrap();
        assert_eq!(t.username.as_deref(), Some("foo"));
        assert_eq!(t.password, "bar");
    }

    #[test]
    fn host_only_has_no_login() {
        let t = TargetSpec::parse("10.0.0.6:25555", &no_env()).unwrap();
        assert_eq!(t.username, None);
        assert_eq!(t.to_string(), "10.0.0.6:25555");
    }

    #[test]
    fn at_sign_without_user_is_malformed() {
        let err = TargetSpec::parse("@example.com:25555", &no_env()).unwrap_err();
        assert!(matches!(err, CiError::MalformedTarget { .. }));
    }

    #[test]
    fn password_may_contain_colons() {
        let t = TargetSpec::parse("foo:a:b@example.com:25555", &no_env()).unwrap();
        assert_eq!(t.password, "a:b");
    }

    #[test]
    fn rejects_missing_or_bad_port() {
        for input in [
            "example.com",
            "foo@example.com",
            "example.com:",
            "example.com:abc",
            "example.com:0",
            "example.com:70000",
            ":25555",
        ] {
            let err = TargetSpec::parse(input, &no_env()).unwrap_err();
            assert!(
                matches!(err, CiError::MalformedTarget { .. }),
                "{input} should be malformed"
            );
        }
    }
}

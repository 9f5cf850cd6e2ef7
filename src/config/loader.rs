// src/config/loader.rs

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::config::model::{CiConfig, RawCiConfig};
use crate::errors::Result;

/// Document formats accepted for configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from the file extension; anything that isn't `.toml`
    /// is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Yaml,
        }
    }
}

/// Deserialize a document in the given format.
pub fn parse_str<T: DeserializeOwned>(contents: &str, format: ConfigFormat) -> Result<T> {
    let value = match format {
        ConfigFormat::Yaml => serde_yaml_ng::from_str(contents)?,
        ConfigFormat::Toml => toml::from_str(contents)?,
    };
    Ok(value)
}

/// Load a configuration file and return the raw `RawCiConfig`.
///
/// This only performs deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawCiConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    parse_str(&contents, ConfigFormat::from_path(path))
}

/// Load a configuration file from path and run validation.
///
/// This is the recommended entry point for the rest of the application.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<CiConfig> {
    let raw_config = load_from_path(&path)?;
    let config = CiConfig::try_from(raw_config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("ci.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new(".ci.yml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("ci.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("ci")), ConfigFormat::Yaml);
    }

    #[test]
    fn parses_yaml_with_defaults() {
        let raw: RawCiConfig = parse_str(
            "target: foo:bar@localhost:25555\ndeployments:\n  - name: foo\n",
            ConfigFormat::Yaml,
        )
        .unwrap();
        assert_eq!(raw.target, "foo:bar@localhost:25555");
        assert!(!raw.skip_merge);
        assert_eq!(raw.deployments_dir, PathBuf::from("deployments"));
        assert_eq!(raw.bosh_bin, "bosh");
        assert!(raw.deployments[0].errands.is_empty());
    }

    #[test]
    fn parses_toml() {
        let raw: RawCiConfig = parse_str(
            r#"
target = "localhost:25555"
skip_merge = true

[[deployments]]
name = "foo"
errands = ["smoke"]
"#,
            ConfigFormat::Toml,
        )
        .unwrap();
        assert!(raw.skip_merge);
        assert_eq!(raw.deployments[0].errands, vec!["smoke".to_string()]);
    }
}

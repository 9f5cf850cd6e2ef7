// src/config/mod.rs

//! Configuration loading and validation for bosh-ci.
//!
//! Responsibilities:
//! - Define the YAML/TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate basic invariants like unique deployment names (`validate.rs`).
//! - Capture environment overrides once (`env.rs`).

pub mod env;
pub mod loader;
pub mod model;
pub mod validate;

pub use env::EnvOverrides;
pub use loader::{ConfigFormat, load_and_validate, load_from_path, parse_str};
pub use model::{CiConfig, DeploymentConfig, DeploymentDescriptor, RawCiConfig};

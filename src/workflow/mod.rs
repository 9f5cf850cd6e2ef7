// src/workflow/mod.rs

//! The CI workflows (`target`, `patch`, `deploy`, `verify`, `clean`) and the
//! resolution of live deployments against the configuration used by `clean`.

pub mod orchestrator;
pub mod resolver;

pub use orchestrator::Orchestrator;
pub use resolver::{DeploymentResolver, Resolution};

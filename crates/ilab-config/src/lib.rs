//! Invoice-lab provisioner configuration.
//!
//! This crate provides:
//! - The typed run configuration collected at startup
//! - Validation of operator-supplied values
//! - The function env-vars file writer (the hand-off artifact consumed by
//!   the deployed function at cold start)

pub mod env_file;
pub mod run_config;

pub use env_file::FunctionEnvVars;
pub use run_config::RunConfig;

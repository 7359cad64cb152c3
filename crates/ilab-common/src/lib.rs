//! Shared types for the invoice-lab provisioner.
//!
//! This crate holds what every other crate needs: the unified error type
//! and the derived naming scheme for the cloud resources the orchestrator
//! creates. Names are an interop contract with the deployed function and
//! must stay bit-exact.

pub mod error;
pub mod naming;

pub use error::{Error, Result};
pub use naming::BucketRole;

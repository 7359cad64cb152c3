//! The provisioning steps, in pipeline order.
//!
//! Each step takes the control plane and the context, does its work, and
//! returns a [`crate::report::StepReport`]. A step returns `Err` only for
//! conditions the taxonomy marks fatal; everything else degrades the step
//! with a warning and lets the run continue.

pub mod buckets;
pub mod deploy;
pub mod handoff;
pub mod iam;
pub mod processor;
pub mod samples;
pub mod services;
pub mod warehouse;

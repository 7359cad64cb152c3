//! Core of the invoice-lab provisioner.
//!
//! The orchestrator runs a fixed, strictly sequential pipeline of
//! provisioning steps against the Google Cloud control plane: enable the
//! service APIs, create the Document AI processor, create the three
//! pipeline buckets, create the BigQuery dataset and table, apply IAM
//! bindings, write the function env-vars file, deploy the trigger function
//! (with a bounded retry loop), and upload sample invoices.
//!
//! Every control-plane call goes through the [`gcloud::ControlPlane`] trait
//! so the whole pipeline runs against a scripted double in tests. Steps
//! report their outcome (succeeded / skipped / degraded) into a
//! [`report::RunReport`]; only a handful of conditions are fatal.

pub mod context;
pub mod exit_codes;
pub mod extract;
pub mod gcloud;
pub mod orchestrator;
pub mod prompts;
pub mod report;
pub mod retry;
pub mod steps;

pub use context::{LocalPaths, ProvisionContext};
pub use exit_codes::ExitCode;
pub use gcloud::{ControlPlane, GcloudCli};
pub use report::RunReport;
pub use retry::{RetryPolicy, Sleeper, ThreadSleeper};

//! State threaded through the provisioning pipeline.

use std::path::PathBuf;

use ilab_common::naming::{bucket_name, BucketRole};
use ilab_config::RunConfig;

/// Identifiers accumulated as the pipeline progresses.
///
/// Each step's inputs are produced entirely by earlier steps, so the
/// context flows forward by `&mut` in a fixed total order. This replaces
/// the ambient process-environment threading the lab script used.
#[derive(Debug, Clone)]
pub struct ProvisionContext {
    pub config: RunConfig,
    /// Set by the processor step on successful id extraction; `None` means
    /// the operator must fill `PROCESSOR_ID` in manually.
    pub processor_id: Option<String>,
    /// Resolved lazily by the IAM step; only needed for the compute
    /// default service account binding.
    pub project_number: Option<String>,
    pub input_bucket: String,
    pub output_bucket: String,
    pub archive_bucket: String,
}

impl ProvisionContext {
    pub fn new(config: RunConfig) -> Self {
        let input_bucket = bucket_name(&config.project_id, BucketRole::Input);
        let output_bucket = bucket_name(&config.project_id, BucketRole::Output);
        let archive_bucket = bucket_name(&config.project_id, BucketRole::Archive);
        Self {
            config,
            processor_id: None,
            project_number: None,
            input_bucket,
            output_bucket,
            archive_bucket,
        }
    }

    /// Bucket name for a role.
    pub fn bucket(&self, role: BucketRole) -> &str {
        match role {
            BucketRole::Input => &self.input_bucket,
            BucketRole::Output => &self.output_bucket,
            BucketRole::Archive => &self.archive_bucket,
        }
    }
}

/// Local filesystem paths the orchestrator reads and writes.
///
/// Defaults match the lab checkout layout; tests point them into a tempdir.
#[derive(Debug, Clone)]
pub struct LocalPaths {
    /// BigQuery table schema, staged by an external step. May be absent.
    pub schema_file: PathBuf,
    /// Env-vars file consumed by `gcloud functions deploy`.
    pub env_vars_file: PathBuf,
    /// Function source directory passed to the deploy call.
    pub function_source: PathBuf,
    /// Sample invoices to seed the input bucket. May be absent.
    pub samples_dir: PathBuf,
}

impl Default for LocalPaths {
    fn default() -> Self {
        Self {
            schema_file: PathBuf::from("table-schema.json"),
            env_vars_file: PathBuf::from("function/.env.yaml"),
            function_source: PathBuf::from("function"),
            samples_dir: PathBuf::from("sample-invoices"),
        }
    }
}

//! The control-plane seam.
//!
//! Every external management call the orchestrator makes goes through
//! [`ControlPlane`], so the pipeline is testable against a scripted double
//! and the production implementation ([`GcloudCli`]) stays in one place.

mod cli;
mod scripted;

pub use cli::GcloudCli;
pub use scripted::ScriptedControlPlane;

use std::path::Path;

use thiserror::Error;

/// Errors from control-plane calls.
///
/// Whether a failed call aborts the run is decided by the step that made
/// it, not here; most steps degrade to a warning.
#[derive(Debug, Error)]
pub enum ControlPlaneError {
    #[error("failed to launch {tool}: {source}")]
    Launch {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited {status}: {stderr}")]
    CallFailed {
        tool: &'static str,
        status: String,
        stderr: String,
    },

    #[error("request to {url} failed: {detail}")]
    Http { url: String, detail: String },

    #[error("local I/O error: {0}")]
    LocalIo(#[from] std::io::Error),
}

impl From<ControlPlaneError> for ilab_common::Error {
    fn from(err: ControlPlaneError) -> Self {
        ilab_common::Error::ControlPlane(err.to_string())
    }
}

/// Specification for one bucket create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSpec {
    pub project_id: String,
    pub name: String,
    pub region: String,
}

/// One best-effort IAM role binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IamBinding {
    /// Service account email, without the `serviceAccount:` prefix.
    pub member: String,
    pub role: String,
}

/// Specification for the function deploy call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    pub project_id: String,
    pub name: String,
    pub region: String,
    pub runtime: String,
    pub entry_point: String,
    pub source_dir: std::path::PathBuf,
    pub env_vars_file: std::path::PathBuf,
    /// Object-finalize events on this bucket trigger the function.
    pub trigger_bucket: String,
}

/// Synchronous management-plane operations the orchestrator depends on.
///
/// Each call blocks until the external operation returns. Existence checks
/// are separate from creates so steps can stay idempotent by construction.
pub trait ControlPlane {
    /// Resolve the active project id from the ambient CLI configuration.
    /// May return the empty string or the `(unset)` sentinel; callers
    /// validate.
    fn resolve_project(&self) -> Result<String, ControlPlaneError>;

    /// Resolve the numeric project number for `project_id`.
    fn resolve_project_number(&self, project_id: &str) -> Result<String, ControlPlaneError>;

    /// Enable the given service APIs in one batch call.
    fn enable_services(&self, project_id: &str, services: &[&str])
        -> Result<(), ControlPlaneError>;

    /// Create a Document AI processor; returns the raw response body for
    /// best-effort id extraction. An HTTP error status still yields the
    /// body, since callers treat unparseable responses as a soft failure.
    fn create_processor(
        &self,
        project_id: &str,
        location: &str,
        display_name: &str,
    ) -> Result<String, ControlPlaneError>;

    fn bucket_exists(&self, bucket: &str) -> Result<bool, ControlPlaneError>;

    fn create_bucket(&self, spec: &BucketSpec) -> Result<(), ControlPlaneError>;

    fn dataset_exists(&self, project_id: &str, dataset: &str) -> Result<bool, ControlPlaneError>;

    fn create_dataset(
        &self,
        project_id: &str,
        dataset: &str,
        location: &str,
    ) -> Result<(), ControlPlaneError>;

    fn table_exists(
        &self,
        project_id: &str,
        dataset: &str,
        table: &str,
    ) -> Result<bool, ControlPlaneError>;

    fn create_table(
        &self,
        project_id: &str,
        dataset: &str,
        table: &str,
        schema_file: &Path,
    ) -> Result<(), ControlPlaneError>;

    fn add_iam_binding(
        &self,
        project_id: &str,
        binding: &IamBinding,
    ) -> Result<(), ControlPlaneError>;

    fn deploy_function(&self, spec: &FunctionSpec) -> Result<(), ControlPlaneError>;

    /// Copy the files in `dir` (non-recursively) to `gs://{bucket}/`.
    fn upload_samples(&self, dir: &Path, bucket: &str) -> Result<(), ControlPlaneError>;
}

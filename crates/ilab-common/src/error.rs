//! Error types for the invoice-lab provisioner.

use thiserror::Error;

/// Result type alias for provisioner operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the provisioner.
///
/// Only fatal conditions become `Error`s. Soft failures (a bucket create
/// racing an existing bucket, a failed IAM binding, an unparseable
/// processor response) are recorded as warnings on the run report and
/// never abort the run.
#[derive(Error, Debug)]
pub enum Error {
    /// Operator-side configuration is unusable (no active project, bad
    /// prompt input). Remediation is external; the run aborts immediately.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required CLI tool is not on PATH.
    #[error("required tool not found: {0} (install the Google Cloud SDK and re-run)")]
    MissingTool(String),

    /// A control-plane call that must succeed did not.
    #[error("control-plane call failed: {0}")]
    ControlPlane(String),

    /// The function deployment retry budget ran out.
    #[error("function deployment failed after {attempts} attempts")]
    DeployExhausted { attempts: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

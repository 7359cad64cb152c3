//! Production control plane backed by the Google Cloud SDK CLIs.
//!
//! `gcloud` covers project config, service enablement, IAM, and function
//! deployment; `gsutil` covers buckets; `bq` covers the warehouse. The one
//! exception is processor creation, which has no stable CLI surface and
//! goes straight to the Document AI REST endpoint with a token minted by
//! `gcloud auth print-access-token`.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use ilab_common::naming::PROCESSOR_TYPE;
use ilab_common::{Error, Result};

use super::{BucketSpec, ControlPlane, ControlPlaneError, FunctionSpec, IamBinding};

const GCLOUD: &str = "gcloud";
const GSUTIL: &str = "gsutil";
const BQ: &str = "bq";

/// Storage class for every pipeline bucket.
const BUCKET_STORAGE_CLASS: &str = "STANDARD";

/// Check whether a tool binary is available on the system.
fn tool_available(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Run a tool and capture stdout, failing on a non-zero exit.
fn run_tool(tool: &'static str, args: &[&str]) -> std::result::Result<String, ControlPlaneError> {
    debug!(tool, ?args, "invoking");
    let output = Command::new(tool)
        .args(args)
        .output()
        .map_err(|source| ControlPlaneError::Launch { tool, source })?;

    if !output.status.success() {
        return Err(ControlPlaneError::CallFailed {
            tool,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Interpret an existence probe: a clean exit means the resource exists, a
/// tool-level failure means it does not (ambiguity is resolved toward
/// "create and see"). Launch failures still propagate.
fn probe(result: std::result::Result<String, ControlPlaneError>) -> std::result::Result<bool, ControlPlaneError> {
    match result {
        Ok(_) => Ok(true),
        Err(ControlPlaneError::CallFailed { .. }) => Ok(false),
        Err(err) => Err(err),
    }
}

/// Control plane backed by the ambient `gcloud` / `gsutil` / `bq` CLIs.
#[derive(Debug, Default)]
pub struct GcloudCli;

impl GcloudCli {
    pub fn new() -> Self {
        Self
    }

    /// Verify the required CLIs are on PATH before the run starts.
    pub fn preflight(&self) -> Result<()> {
        for tool in [GCLOUD, GSUTIL, BQ] {
            if !tool_available(tool) {
                return Err(Error::MissingTool(tool.to_string()));
            }
        }
        Ok(())
    }

    fn access_token(&self) -> std::result::Result<String, ControlPlaneError> {
        Ok(run_tool(GCLOUD, &["auth", "print-access-token", "--quiet"])?
            .trim()
            .to_string())
    }
}

impl ControlPlane for GcloudCli {
    fn resolve_project(&self) -> std::result::Result<String, ControlPlaneError> {
        Ok(run_tool(GCLOUD, &["config", "get-value", "project", "--quiet"])?
            .trim()
            .to_string())
    }

    fn resolve_project_number(
        &self,
        project_id: &str,
    ) -> std::result::Result<String, ControlPlaneError> {
        Ok(run_tool(
            GCLOUD,
            &[
                "projects",
                "describe",
                project_id,
                "--format=value(projectNumber)",
            ],
        )?
        .trim()
        .to_string())
    }

    fn enable_services(
        &self,
        project_id: &str,
        services: &[&str],
    ) -> std::result::Result<(), ControlPlaneError> {
        let project_flag = format!("--project={project_id}");
        let mut args = vec!["services", "enable"];
        args.extend_from_slice(services);
        args.push(&project_flag);
        run_tool(GCLOUD, &args)?;
        Ok(())
    }

    fn create_processor(
        &self,
        project_id: &str,
        location: &str,
        display_name: &str,
    ) -> std::result::Result<String, ControlPlaneError> {
        let token = self.access_token()?;
        let url = format!(
            "https://{location}-documentai.googleapis.com/v1/projects/{project_id}/locations/{location}/processors"
        );
        let request = ureq::post(&url)
            .set("Authorization", &format!("Bearer {token}"))
            .set("Content-Type", "application/json");

        match request.send_json(serde_json::json!({
            "type": PROCESSOR_TYPE,
            "displayName": display_name,
        })) {
            Ok(response) => response.into_string().map_err(|err| ControlPlaneError::Http {
                url,
                detail: err.to_string(),
            }),
            // An HTTP error status still carries a body worth scanning
            // (e.g. ALREADY_EXISTS); hand it back for best-effort parsing.
            Err(ureq::Error::Status(_, response)) => {
                Ok(response.into_string().unwrap_or_default())
            }
            Err(err) => Err(ControlPlaneError::Http {
                url,
                detail: err.to_string(),
            }),
        }
    }

    fn bucket_exists(&self, bucket: &str) -> std::result::Result<bool, ControlPlaneError> {
        let uri = format!("gs://{bucket}");
        probe(run_tool(GSUTIL, &["ls", "-b", &uri]))
    }

    fn create_bucket(&self, spec: &BucketSpec) -> std::result::Result<(), ControlPlaneError> {
        let uri = format!("gs://{}", spec.name);
        run_tool(
            GSUTIL,
            &[
                "mb",
                "-p",
                &spec.project_id,
                "-l",
                &spec.region,
                "-c",
                BUCKET_STORAGE_CLASS,
                "-b",
                "on", // uniform bucket-level access
                &uri,
            ],
        )?;
        Ok(())
    }

    fn dataset_exists(
        &self,
        project_id: &str,
        dataset: &str,
    ) -> std::result::Result<bool, ControlPlaneError> {
        let dataset_ref = format!("{project_id}:{dataset}");
        probe(run_tool(BQ, &["show", "--format=none", &dataset_ref]))
    }

    fn create_dataset(
        &self,
        project_id: &str,
        dataset: &str,
        location: &str,
    ) -> std::result::Result<(), ControlPlaneError> {
        let location_flag = format!("--location={location}");
        let dataset_ref = format!("{project_id}:{dataset}");
        run_tool(BQ, &[&location_flag, "mk", "--dataset", &dataset_ref])?;
        Ok(())
    }

    fn table_exists(
        &self,
        project_id: &str,
        dataset: &str,
        table: &str,
    ) -> std::result::Result<bool, ControlPlaneError> {
        let table_ref = format!("{project_id}:{dataset}.{table}");
        probe(run_tool(BQ, &["show", "--format=none", &table_ref]))
    }

    fn create_table(
        &self,
        project_id: &str,
        dataset: &str,
        table: &str,
        schema_file: &Path,
    ) -> std::result::Result<(), ControlPlaneError> {
        let table_ref = format!("{project_id}:{dataset}.{table}");
        let schema = schema_file.display().to_string();
        run_tool(BQ, &["mk", "--table", &table_ref, &schema])?;
        Ok(())
    }

    fn add_iam_binding(
        &self,
        project_id: &str,
        binding: &IamBinding,
    ) -> std::result::Result<(), ControlPlaneError> {
        let member_flag = format!("--member=serviceAccount:{}", binding.member);
        let role_flag = format!("--role={}", binding.role);
        run_tool(
            GCLOUD,
            &[
                "projects",
                "add-iam-policy-binding",
                project_id,
                &member_flag,
                &role_flag,
                "--quiet",
            ],
        )?;
        Ok(())
    }

    fn deploy_function(&self, spec: &FunctionSpec) -> std::result::Result<(), ControlPlaneError> {
        let project_flag = format!("--project={}", spec.project_id);
        let region_flag = format!("--region={}", spec.region);
        let runtime_flag = format!("--runtime={}", spec.runtime);
        let entry_point_flag = format!("--entry-point={}", spec.entry_point);
        let source_flag = format!("--source={}", spec.source_dir.display());
        let env_flag = format!("--env-vars-file={}", spec.env_vars_file.display());
        let trigger_flag = format!("--trigger-resource={}", spec.trigger_bucket);
        run_tool(
            GCLOUD,
            &[
                "functions",
                "deploy",
                &spec.name,
                &project_flag,
                &region_flag,
                &runtime_flag,
                &entry_point_flag,
                &source_flag,
                &env_flag,
                "--trigger-event=google.storage.object.finalize",
                &trigger_flag,
                "--quiet",
            ],
        )?;
        Ok(())
    }

    fn upload_samples(&self, dir: &Path, bucket: &str) -> std::result::Result<(), ControlPlaneError> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path().display().to_string());
            }
        }
        if files.is_empty() {
            return Ok(());
        }

        let destination = format!("gs://{bucket}/");
        let mut args: Vec<&str> = vec!["-m", "cp"];
        args.extend(files.iter().map(String::as_str));
        args.push(&destination);
        run_tool(GSUTIL, &args)?;
        Ok(())
    }
}

//! Scripted control plane (used for tests and scaffolding).

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::path::Path;

use super::{BucketSpec, ControlPlane, ControlPlaneError, FunctionSpec, IamBinding};

/// In-memory control plane with configurable ambient state.
///
/// Records every call in order so tests can assert what was (and was not)
/// issued. Creates mutate the in-memory state, so idempotence across a
/// simulated re-run is observable.
#[derive(Debug)]
pub struct ScriptedControlPlane {
    /// Returned verbatim by `resolve_project`; may be `(unset)`.
    pub project: String,
    /// `None` makes `resolve_project_number` fail like a denied describe.
    pub project_number: Option<String>,
    /// Body returned by `create_processor`.
    pub processor_body: String,
    pub buckets: RefCell<HashSet<String>>,
    pub dataset_present: Cell<bool>,
    pub table_present: Cell<bool>,
    /// Number of leading deploy attempts that fail.
    pub deploy_failures: u32,
    deploy_attempts: Cell<u32>,
    calls: RefCell<Vec<String>>,
}

impl ScriptedControlPlane {
    pub fn new(project: &str) -> Self {
        Self {
            project: project.to_string(),
            project_number: Some("123456".to_string()),
            processor_body:
                r#"{"name": "projects/123456/locations/us/processors/ABCDEF", "displayName": "lab-parser"}"#
                    .to_string(),
            buckets: RefCell::new(HashSet::new()),
            dataset_present: Cell::new(false),
            table_present: Cell::new(false),
            deploy_failures: 0,
            deploy_attempts: Cell::new(0),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Calls issued so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Whether any recorded call starts with `prefix`.
    pub fn issued(&self, prefix: &str) -> bool {
        self.calls.borrow().iter().any(|c| c.starts_with(prefix))
    }

    pub fn deploy_attempts(&self) -> u32 {
        self.deploy_attempts.get()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    fn failed(tool: &'static str, stderr: &str) -> ControlPlaneError {
        ControlPlaneError::CallFailed {
            tool,
            status: "exit status: 1".to_string(),
            stderr: stderr.to_string(),
        }
    }
}

impl ControlPlane for ScriptedControlPlane {
    fn resolve_project(&self) -> Result<String, ControlPlaneError> {
        self.record("resolve_project");
        Ok(self.project.clone())
    }

    fn resolve_project_number(&self, _project_id: &str) -> Result<String, ControlPlaneError> {
        self.record("resolve_project_number");
        match &self.project_number {
            Some(number) => Ok(number.clone()),
            None => Err(Self::failed("gcloud", "permission denied on describe")),
        }
    }

    fn enable_services(
        &self,
        _project_id: &str,
        services: &[&str],
    ) -> Result<(), ControlPlaneError> {
        self.record(format!("enable_services:{}", services.len()));
        Ok(())
    }

    fn create_processor(
        &self,
        _project_id: &str,
        _location: &str,
        _display_name: &str,
    ) -> Result<String, ControlPlaneError> {
        self.record("create_processor");
        Ok(self.processor_body.clone())
    }

    fn bucket_exists(&self, bucket: &str) -> Result<bool, ControlPlaneError> {
        self.record(format!("bucket_exists:{bucket}"));
        Ok(self.buckets.borrow().contains(bucket))
    }

    fn create_bucket(&self, spec: &BucketSpec) -> Result<(), ControlPlaneError> {
        self.record(format!("create_bucket:{}", spec.name));
        self.buckets.borrow_mut().insert(spec.name.clone());
        Ok(())
    }

    fn dataset_exists(&self, _project_id: &str, dataset: &str) -> Result<bool, ControlPlaneError> {
        self.record(format!("dataset_exists:{dataset}"));
        Ok(self.dataset_present.get())
    }

    fn create_dataset(
        &self,
        _project_id: &str,
        dataset: &str,
        _location: &str,
    ) -> Result<(), ControlPlaneError> {
        self.record(format!("create_dataset:{dataset}"));
        self.dataset_present.set(true);
        Ok(())
    }

    fn table_exists(
        &self,
        _project_id: &str,
        _dataset: &str,
        table: &str,
    ) -> Result<bool, ControlPlaneError> {
        self.record(format!("table_exists:{table}"));
        Ok(self.table_present.get())
    }

    fn create_table(
        &self,
        _project_id: &str,
        _dataset: &str,
        table: &str,
        _schema_file: &Path,
    ) -> Result<(), ControlPlaneError> {
        self.record(format!("create_table:{table}"));
        self.table_present.set(true);
        Ok(())
    }

    fn add_iam_binding(
        &self,
        _project_id: &str,
        binding: &IamBinding,
    ) -> Result<(), ControlPlaneError> {
        self.record(format!("add_iam_binding:{}:{}", binding.member, binding.role));
        Ok(())
    }

    fn deploy_function(&self, spec: &FunctionSpec) -> Result<(), ControlPlaneError> {
        let attempt = self.deploy_attempts.get() + 1;
        self.deploy_attempts.set(attempt);
        self.record(format!("deploy_function:{}", spec.name));
        if attempt <= self.deploy_failures {
            Err(Self::failed("gcloud", "service account not ready"))
        } else {
            Ok(())
        }
    }

    fn upload_samples(&self, _dir: &Path, bucket: &str) -> Result<(), ControlPlaneError> {
        self.record(format!("upload_samples:{bucket}"));
        Ok(())
    }
}

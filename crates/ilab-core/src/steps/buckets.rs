//! Bucket provisioning: check-then-create for the three pipeline roles.

use tracing::{info, warn};

use ilab_common::naming::BucketRole;
use ilab_common::Result;

use crate::context::ProvisionContext;
use crate::gcloud::{BucketSpec, ControlPlane};
use crate::report::StepReport;

pub const STEP: &str = "create-buckets";

/// Create each absent bucket. Idempotent by construction: the existence
/// check precedes every create. An ambiguous existence check is resolved
/// toward "create and see"; a create that then loses a race is a soft
/// failure and is not retried.
pub fn run(plane: &dyn ControlPlane, ctx: &ProvisionContext) -> Result<StepReport> {
    let mut report = StepReport::succeeded(STEP);

    for role in BucketRole::ALL {
        let name = ctx.bucket(role);
        let exists = match plane.bucket_exists(name) {
            Ok(exists) => exists,
            Err(err) => {
                report.warn(format!(
                    "existence check for {name} ambiguous ({err}); attempting create"
                ));
                false
            }
        };
        if exists {
            report = report.with_note(format!("{role} bucket {name} already exists"));
            continue;
        }

        let spec = BucketSpec {
            project_id: ctx.config.project_id.clone(),
            name: name.to_string(),
            region: ctx.config.region.clone(),
        };
        match plane.create_bucket(&spec) {
            Ok(()) => {
                info!(bucket = %name, %role, "bucket created");
                report = report.with_note(format!("{role} bucket {name} created"));
            }
            Err(err) => {
                warn!(bucket = %name, "bucket create failed: {err}");
                report.warn(format!("could not create {role} bucket {name}: {err}"));
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcloud::ScriptedControlPlane;
    use crate::report::StepStatus;
    use ilab_config::RunConfig;

    fn ctx() -> ProvisionContext {
        let config = RunConfig::new("my-proj", "us-central1", "lab-parser", "us").expect("config");
        ProvisionContext::new(config)
    }

    #[test]
    fn creates_all_three_roles_when_absent() {
        let plane = ScriptedControlPlane::new("my-proj");
        let report = run(&plane, &ctx()).expect("step");
        assert_eq!(report.status, StepStatus::Succeeded);
        assert!(plane.issued("create_bucket:my-proj-input-invoices"));
        assert!(plane.issued("create_bucket:my-proj-output-invoices"));
        assert!(plane.issued("create_bucket:my-proj-archived-invoices"));
    }

    #[test]
    fn existing_buckets_are_not_recreated() {
        let plane = ScriptedControlPlane::new("my-proj");
        plane
            .buckets
            .borrow_mut()
            .insert("my-proj-input-invoices".to_string());
        let report = run(&plane, &ctx()).expect("step");
        assert_eq!(report.status, StepStatus::Succeeded);
        assert!(!plane.issued("create_bucket:my-proj-input-invoices"));
        assert!(plane.issued("create_bucket:my-proj-output-invoices"));
    }
}

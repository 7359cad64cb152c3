//! Best-effort IAM role bindings.

use tracing::{info, warn};

use ilab_common::naming::{appspot_service_account, compute_service_account};
use ilab_common::Result;

use crate::context::ProvisionContext;
use crate::gcloud::{ControlPlane, IamBinding};
use crate::report::StepReport;

pub const STEP: &str = "bind-iam-roles";

/// Role for the function's runtime identity.
const PUBLISHER_ROLE: &str = "roles/pubsub.publisher";

/// Role for the Compute Engine default identity.
const READER_ROLE: &str = "roles/storage.objectViewer";

/// Apply the fixed bindings; each one independently best-effort. The
/// compute-default binding needs the project number, which is itself
/// resolved best-effort.
pub fn run(plane: &dyn ControlPlane, ctx: &mut ProvisionContext) -> Result<StepReport> {
    let project = &ctx.config.project_id;
    let mut report = StepReport::succeeded(STEP);

    let mut bindings = vec![IamBinding {
        member: appspot_service_account(project),
        role: PUBLISHER_ROLE.to_string(),
    }];

    match plane.resolve_project_number(project) {
        Ok(number) => {
            bindings.push(IamBinding {
                member: compute_service_account(&number),
                role: READER_ROLE.to_string(),
            });
            ctx.project_number = Some(number);
        }
        Err(err) => {
            warn!("could not resolve project number: {err}");
            report.warn(format!(
                "project number unresolved ({err}); compute default binding skipped"
            ));
        }
    }

    for binding in &bindings {
        match plane.add_iam_binding(project, binding) {
            Ok(()) => {
                info!(member = %binding.member, role = %binding.role, "IAM binding applied");
                report = report.with_note(format!("{} -> {}", binding.member, binding.role));
            }
            Err(err) => {
                warn!(member = %binding.member, "IAM binding failed: {err}");
                report.warn(format!(
                    "binding {} -> {} failed: {err}",
                    binding.member, binding.role
                ));
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
    fn applies_both_bindings() {
        let plane = ScriptedControlPlane::new("my-proj");
        let mut ctx = ctx();
        let report = run(&plane, &mut ctx).expect("step");
        assert_eq!(report.status, StepStatus::Succeeded);
        assert!(plane.issued(
            "add_iam_binding:my-proj@appspot.gserviceaccount.com:roles/pubsub.publisher"
        ));
        assert!(plane.issued(
            "add_iam_binding:123456-compute@developer.gserviceaccount.com:roles/storage.objectViewer"
        ));
        assert_eq!(ctx.project_number.as_deref(), Some("123456"));
    }

    #[test]
    fn unresolved_project_number_skips_only_the_compute_binding() {
        let mut plane = ScriptedControlPlane::new("my-proj");
        plane.project_number = None;
        let mut ctx = ctx();
        let report = run(&plane, &mut ctx).expect("step");
        assert_eq!(report.status, StepStatus::Degraded);
        assert!(plane.issued("add_iam_binding:my-proj@appspot.gserviceaccount.com"));
        assert!(!plane.issued("add_iam_binding:123456-compute"));
    }
}

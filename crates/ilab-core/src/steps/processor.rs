//! Document AI processor creation and best-effort id extraction.

use tracing::{info, warn};

use ilab_common::Result;

use crate::context::ProvisionContext;
use crate::extract;
use crate::gcloud::ControlPlane;
use crate::report::StepReport;

pub const STEP: &str = "create-processor";

/// Manual follow-up named in the degraded-path warning.
const REMEDIATION: &str =
    "set PROCESSOR_ID in the env-vars file manually before the function deploys";

/// Issue the creation call and extract the processor id from the response.
///
/// Both the call and the extraction are best-effort: an error body (for
/// example an ALREADY_EXISTS conflict) is indistinguishable from other
/// failure shapes, so the step degrades with a warning instead of
/// aborting, and the operator recovers manually.
pub fn run(plane: &dyn ControlPlane, ctx: &mut ProvisionContext) -> Result<StepReport> {
    let body = match plane.create_processor(
        &ctx.config.project_id,
        &ctx.config.parser_location,
        &ctx.config.display_name,
    ) {
        Ok(body) => body,
        Err(err) => {
            warn!("processor creation call failed: {err}");
            let mut report = StepReport::succeeded(STEP);
            report.warn(format!("processor creation call failed ({err}); {REMEDIATION}"));
            return Ok(report);
        }
    };

    match extract::processor_id(&body) {
        Some(id) => {
            info!(processor_id = %id, "processor created");
            let report = StepReport::succeeded(STEP).with_note(format!("processor id {id}"));
            ctx.processor_id = Some(id);
            Ok(report)
        }
        None => {
            warn!("could not extract a processor id from the creation response");
            let mut report = StepReport::succeeded(STEP);
            report.warn(format!(
                "no processor id found in the creation response; {REMEDIATION}"
            ));
            Ok(report)
        }
    }
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
    fn stores_the_extracted_id() {
        let plane = ScriptedControlPlane::new("my-proj");
        let mut ctx = ctx();
        let report = run(&plane, &mut ctx).expect("step");
        assert_eq!(report.status, StepStatus::Succeeded);
        assert_eq!(ctx.processor_id.as_deref(), Some("ABCDEF"));
    }

    #[test]
    fn unparseable_response_degrades_without_aborting() {
        let mut plane = ScriptedControlPlane::new("my-proj");
        plane.processor_body = r#"{"error": {"code": 409, "message": "exists"}}"#.to_string();
        let mut ctx = ctx();
        let report = run(&plane, &mut ctx).expect("step");
        assert_eq!(report.status, StepStatus::Degraded);
        assert!(ctx.processor_id.is_none());
        assert!(report.warnings[0].contains("manually"));
    }
}

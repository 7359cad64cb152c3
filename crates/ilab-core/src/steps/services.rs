//! Batch service-API enablement.

use tracing::info;

use ilab_common::naming::ENABLED_SERVICES;
use ilab_common::Result;

use crate::context::ProvisionContext;
use crate::gcloud::ControlPlane;
use crate::report::StepReport;

pub const STEP: &str = "enable-services";

/// Enable the fixed service list in one call. Nothing downstream can work
/// without these, so failure here is fatal.
pub fn run(plane: &dyn ControlPlane, ctx: &ProvisionContext) -> Result<StepReport> {
    plane.enable_services(&ctx.config.project_id, &ENABLED_SERVICES)?;
    info!(count = ENABLED_SERVICES.len(), "service APIs enabled");
    Ok(StepReport::succeeded(STEP).with_note(format!("{} APIs enabled", ENABLED_SERVICES.len())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcloud::ScriptedControlPlane;
    use ilab_config::RunConfig;

    #[test]
    fn enables_all_five_services_in_one_call() {
        let plane = ScriptedControlPlane::new("my-proj");
        let config = RunConfig::new("my-proj", "us-central1", "lab-parser", "us").expect("config");
        let ctx = ProvisionContext::new(config);

        let report = run(&plane, &ctx).expect("step");
        assert_eq!(report.status, crate::report::StepStatus::Succeeded);
        assert_eq!(plane.calls(), vec!["enable_services:5".to_string()]);
    }
}

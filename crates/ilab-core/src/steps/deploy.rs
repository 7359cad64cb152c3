//! Function deployment through the bounded retry loop.

use ilab_common::naming::{FUNCTION_ENTRY_POINT, FUNCTION_NAME, FUNCTION_RUNTIME};
use ilab_common::Result;

use crate::context::{LocalPaths, ProvisionContext};
use crate::gcloud::{ControlPlane, FunctionSpec};
use crate::report::StepReport;
use crate::retry::{deploy_with_retry, RetryPolicy, Sleeper};

pub const STEP: &str = "deploy-function";

/// Deploy the trigger function. The only retried call in the pipeline;
/// exhausting the budget is fatal and ends the run with its own exit
/// status.
pub fn run(
    plane: &dyn ControlPlane,
    ctx: &ProvisionContext,
    paths: &LocalPaths,
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
) -> Result<StepReport> {
    let spec = FunctionSpec {
        project_id: ctx.config.project_id.clone(),
        name: FUNCTION_NAME.to_string(),
        region: ctx.config.region.clone(),
        runtime: FUNCTION_RUNTIME.to_string(),
        entry_point: FUNCTION_ENTRY_POINT.to_string(),
        source_dir: paths.function_source.clone(),
        env_vars_file: paths.env_vars_file.clone(),
        trigger_bucket: ctx.input_bucket.clone(),
    };
    let attempt = deploy_with_retry(plane, &spec, policy, sleeper)?;
    Ok(StepReport::succeeded(STEP)
        .with_note(format!("{FUNCTION_NAME} deployed on attempt {attempt}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcloud::ScriptedControlPlane;
    use crate::retry::RecordingSleeper;
    use ilab_config::RunConfig;

    #[test]
    fn deploy_targets_the_input_bucket_trigger() {
        let plane = ScriptedControlPlane::new("my-proj");
        let config = RunConfig::new("my-proj", "us-central1", "lab-parser", "us").expect("config");
        let ctx = ProvisionContext::new(config);
        let sleeper = RecordingSleeper::default();

        let report = run(
            &plane,
            &ctx,
            &LocalPaths::default(),
            &RetryPolicy::default(),
            &sleeper,
        )
        .expect("step");
        assert_eq!(plane.deploy_attempts(), 1);
        assert!(report.notes[0].contains("attempt 1"));
    }
}

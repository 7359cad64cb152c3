//! The fixed provisioning pipeline.

use tracing::info;

use ilab_common::Result;
use ilab_config::RunConfig;

use crate::context::{LocalPaths, ProvisionContext};
use crate::gcloud::ControlPlane;
use crate::report::RunReport;
use crate::retry::{RetryPolicy, Sleeper, ENABLEMENT_SETTLE};
use crate::steps;

/// Run every step in order and aggregate the report.
///
/// Step ordering is a correctness property: each step may assume the
/// observable effects of all earlier steps (enabled APIs, existing
/// buckets, the written env-vars file) because every control-plane call is
/// synchronous. A fatal error stops the pipeline where it happened; no
/// later step runs.
pub fn provision(
    plane: &dyn ControlPlane,
    config: RunConfig,
    paths: &LocalPaths,
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
) -> Result<RunReport> {
    let mut ctx = ProvisionContext::new(config);
    let mut report = RunReport::new();

    report.push(steps::services::run(plane, &ctx)?);
    // Give freshly enabled APIs time to propagate before using them.
    sleeper.sleep(ENABLEMENT_SETTLE);

    report.push(steps::processor::run(plane, &mut ctx)?);
    report.push(steps::buckets::run(plane, &ctx)?);
    report.push(steps::warehouse::run(plane, &ctx, paths)?);
    report.push(steps::iam::run(plane, &mut ctx)?);
    report.push(steps::handoff::run(&ctx, paths)?);
    report.push(steps::deploy::run(plane, &ctx, paths, policy, sleeper)?);
    report.push(steps::samples::run(plane, &ctx, paths)?);

    report.finish();
    info!(
        steps = report.steps.len(),
        warnings = report.warnings().count(),
        "provisioning pipeline finished"
    );
    Ok(report)
}

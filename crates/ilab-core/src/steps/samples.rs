//! Sample-invoice upload: a convenience step, never fatal.

use tracing::{info, warn};

use ilab_common::Result;

use crate::context::{LocalPaths, ProvisionContext};
use crate::gcloud::ControlPlane;
use crate::report::StepReport;

pub const STEP: &str = "upload-samples";

/// Copy local sample invoices to the input bucket if the directory is
/// present; otherwise skip with a note.
pub fn run(
    plane: &dyn ControlPlane,
    ctx: &ProvisionContext,
    paths: &LocalPaths,
) -> Result<StepReport> {
    if !paths.samples_dir.is_dir() {
        info!(dir = %paths.samples_dir.display(), "no sample invoices; skipping upload");
        return Ok(StepReport::skipped(
            STEP,
            format!("{} not present", paths.samples_dir.display()),
        ));
    }

    match plane.upload_samples(&paths.samples_dir, &ctx.input_bucket) {
        Ok(()) => {
            info!(bucket = %ctx.input_bucket, "sample invoices uploaded");
            Ok(StepReport::succeeded(STEP)
                .with_note(format!("samples uploaded to {}", ctx.input_bucket)))
        }
        Err(err) => {
            warn!("sample upload failed: {err}");
            let mut report = StepReport::succeeded(STEP);
            report.warn(format!("sample upload failed: {err}"));
            Ok(report)
        }
    }
}

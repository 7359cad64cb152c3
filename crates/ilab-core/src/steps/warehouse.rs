//! Warehouse provisioning: dataset, then table from the staged schema.

use tracing::{info, warn};

use ilab_common::naming::{BQ_DATASET, BQ_LOCATION, BQ_TABLE};
use ilab_common::Result;

use crate::context::{LocalPaths, ProvisionContext};
use crate::gcloud::ControlPlane;
use crate::report::StepReport;

pub const STEP: &str = "create-warehouse";

/// Create the dataset if absent, then the table if the schema file is
/// staged. The schema comes from a step outside this orchestrator's
/// control, so its absence skips table creation with a warning rather than
/// failing the run.
pub fn run(
    plane: &dyn ControlPlane,
    ctx: &ProvisionContext,
    paths: &LocalPaths,
) -> Result<StepReport> {
    let project = &ctx.config.project_id;
    let mut report = StepReport::succeeded(STEP);

    let dataset_exists = match plane.dataset_exists(project, BQ_DATASET) {
        Ok(exists) => exists,
        Err(err) => {
            report.warn(format!(
                "dataset existence check ambiguous ({err}); attempting create"
            ));
            false
        }
    };
    if dataset_exists {
        report = report.with_note(format!("dataset {BQ_DATASET} already exists"));
    } else {
        match plane.create_dataset(project, BQ_DATASET, BQ_LOCATION) {
            Ok(()) => {
                info!(dataset = BQ_DATASET, "dataset created");
                report = report.with_note(format!("dataset {BQ_DATASET} created"));
            }
            Err(err) => {
                warn!("dataset create failed: {err}");
                report.warn(format!("could not create dataset {BQ_DATASET}: {err}"));
            }
        }
    }

    if !paths.schema_file.exists() {
        warn!(schema = %paths.schema_file.display(), "schema file absent; skipping table");
        report.warn(format!(
            "schema file {} not found; table {BQ_TABLE} not created",
            paths.schema_file.display()
        ));
        return Ok(report);
    }

    let table_exists = match plane.table_exists(project, BQ_DATASET, BQ_TABLE) {
        Ok(exists) => exists,
        Err(err) => {
            report.warn(format!(
                "table existence check ambiguous ({err}); attempting create"
            ));
            false
        }
    };
    if table_exists {
        report = report.with_note(format!("table {BQ_TABLE} already exists"));
    } else {
        match plane.create_table(project, BQ_DATASET, BQ_TABLE, &paths.schema_file) {
            Ok(()) => {
                info!(table = BQ_TABLE, "table created");
                report = report.with_note(format!("table {BQ_TABLE} created"));
            }
            Err(err) => {
                warn!("table create failed: {err}");
                report.warn(format!("could not create table {BQ_TABLE}: {err}"));
            }
        }
    }

    Ok(report)
}

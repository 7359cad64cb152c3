//! Env-vars file emission: the hand-off to the deployed function.

use tracing::info;

use ilab_common::naming::{BQ_DATASET, BQ_TABLE};
use ilab_common::Result;

use crate::context::{LocalPaths, ProvisionContext};
use crate::report::StepReport;
use ilab_config::FunctionEnvVars;

pub const STEP: &str = "write-env-file";

/// Overwrite the env-vars file with the accumulated configuration. The
/// deploy call consumes this file, so a write failure is fatal. An empty
/// processor id is written as-is; the processor step already warned about
/// the manual follow-up.
pub fn run(ctx: &ProvisionContext, paths: &LocalPaths) -> Result<StepReport> {
    let vars = FunctionEnvVars {
        project_id: ctx.config.project_id.clone(),
        processor_id: ctx.processor_id.clone().unwrap_or_default(),
        parser_location: ctx.config.parser_location.clone(),
        input_bucket: ctx.input_bucket.clone(),
        output_bucket: ctx.output_bucket.clone(),
        archive_bucket: ctx.archive_bucket.clone(),
        bq_dataset: BQ_DATASET.to_string(),
        bq_table: BQ_TABLE.to_string(),
    };
    vars.write(&paths.env_vars_file)?;
    info!(path = %paths.env_vars_file.display(), "env-vars file written");
    Ok(StepReport::succeeded(STEP)
        .with_note(format!("wrote {}", paths.env_vars_file.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ilab_config::RunConfig;
    use tempfile::tempdir;

    #[test]
    fn writes_context_values_including_empty_processor_id() {
        let dir = tempdir().expect("tempdir");
        let config = RunConfig::new("my-proj", "us-central1", "lab-parser", "us").expect("config");
        let ctx = ProvisionContext::new(config);
        let paths = LocalPaths {
            schema_file: dir.path().join("table-schema.json"),
            env_vars_file: dir.path().join("function/.env.yaml"),
            function_source: dir.path().join("function"),
            samples_dir: dir.path().join("sample-invoices"),
        };

        run(&ctx, &paths).expect("step");
        let contents = std::fs::read_to_string(&paths.env_vars_file).expect("read");
        assert!(contents.contains("PROJECT_ID: my-proj"));
        assert!(contents.contains("INPUT_BUCKET: my-proj-input-invoices"));
        assert!(contents.contains("BQ_DATASET: invoice_parser_results"));
        // Extraction failed upstream; the key is still present.
        assert!(contents.contains("PROCESSOR_ID:"));
    }
}

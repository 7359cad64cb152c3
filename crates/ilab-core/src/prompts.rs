//! Interactive collection of the run configuration.

use std::io::{BufRead, Write};

use tracing::info;

use ilab_common::{Error, Result};
use ilab_config::RunConfig;

use crate::gcloud::ControlPlane;

/// Ask one question and read one trimmed line. An empty answer falls back
/// to `default` when one is given.
fn ask(
    output: &mut impl Write,
    input: &mut impl BufRead,
    label: &str,
    default: Option<&str>,
) -> std::io::Result<String> {
    match default {
        Some(d) => write!(output, "{label} [{d}]: ")?,
        None => write!(output, "{label}: ")?,
    }
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    if answer.is_empty() {
        Ok(default.unwrap_or_default().to_string())
    } else {
        Ok(answer.to_string())
    }
}

/// Run the three prompts and resolve the ambient project id.
///
/// The project id comes first: without one, nothing else matters and the
/// run must abort before any provisioning call.
pub fn collect_run_config(
    plane: &dyn ControlPlane,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<RunConfig> {
    let project_id = plane
        .resolve_project()
        .map_err(|err| Error::Config(format!("could not resolve active project: {err}")))?;
    RunConfig::validate_project_id(&project_id)?;

    let region = ask(output, input, "Region for buckets and function (e.g. us-central1)", None)?;
    let display_name = ask(output, input, "Document AI processor display name", None)?;
    let parser_location = ask(
        output,
        input,
        "Document AI location",
        Some(ilab_common::naming::DEFAULT_PARSER_LOCATION),
    )?;

    let config = RunConfig::new(&project_id, &region, &display_name, &parser_location)?;
    info!(
        project = %config.project_id,
        region = %config.region,
        "run configuration collected"
    );
    Ok(config)
}

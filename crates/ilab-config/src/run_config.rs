//! The run configuration collected before provisioning starts.

use ilab_common::naming::DEFAULT_PARSER_LOCATION;
use ilab_common::{Error, Result};

/// Sentinel gcloud prints when no project is configured.
const UNSET_PROJECT: &str = "(unset)";

/// Immutable inputs for one provisioning run.
///
/// Collected once at startup (three prompts plus the ambient project id)
/// and passed by reference through every step; steps never mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Active project id resolved from the ambient gcloud configuration.
    pub project_id: String,
    /// Region for buckets and the deployed function, e.g. `us-central1`.
    pub region: String,
    /// Display name for the Document AI processor.
    pub display_name: String,
    /// Document AI location, defaults to `us`.
    pub parser_location: String,
}

impl RunConfig {
    /// Reject an empty or `(unset)` project id.
    ///
    /// Called before the interactive prompts as well: an unusable project
    /// is fatal and the orchestrator must not issue a single provisioning
    /// call (or waste the operator's answers) without one.
    pub fn validate_project_id(project_id: &str) -> Result<&str> {
        let project_id = project_id.trim();
        if project_id.is_empty() || project_id == UNSET_PROJECT {
            return Err(Error::Config(
                "no active project; run `gcloud config set project <PROJECT_ID>` first"
                    .to_string(),
            ));
        }
        Ok(project_id)
    }

    /// Build a validated config from raw collected values.
    ///
    /// Inputs are trimmed; an empty parser location falls back to the
    /// default.
    pub fn new(
        project_id: &str,
        region: &str,
        display_name: &str,
        parser_location: &str,
    ) -> Result<Self> {
        let project_id = Self::validate_project_id(project_id)?;

        let region = region.trim();
        if region.is_empty() {
            return Err(Error::Config("region must not be empty".to_string()));
        }

        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(Error::Config(
                "processor display name must not be empty".to_string(),
            ));
        }

        let parser_location = parser_location.trim();
        let parser_location = if parser_location.is_empty() {
            DEFAULT_PARSER_LOCATION
        } else {
            parser_location
        };

        Ok(Self {
            project_id: project_id.to_string(),
            region: region.to_string(),
            display_name: display_name.to_string(),
            parser_location: parser_location.to_string(),
        })
    }
}

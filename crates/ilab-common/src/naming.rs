//! Derived names for every resource the orchestrator touches.
//!
//! These are interop contracts: the deployed function resolves its buckets,
//! dataset, and table from the same scheme, so a renamed constant here
//! silently breaks the hand-off. Keep them bit-exact.

use serde::Serialize;

/// Service APIs enabled in one batch before any resource is created.
pub const ENABLED_SERVICES: [&str; 5] = [
    "documentai.googleapis.com",
    "storage.googleapis.com",
    "cloudfunctions.googleapis.com",
    "cloudbuild.googleapis.com",
    "bigquery.googleapis.com",
];

/// Document AI processor type created by the orchestrator.
pub const PROCESSOR_TYPE: &str = "INVOICE_PROCESSOR";

/// Default processor location when the operator accepts the prompt default.
pub const DEFAULT_PARSER_LOCATION: &str = "us";

/// BigQuery dataset receiving extracted entities.
pub const BQ_DATASET: &str = "invoice_parser_results";

/// BigQuery table receiving extracted entities.
pub const BQ_TABLE: &str = "doc_ai_extracted_entities";

/// BigQuery dataset location (fixed, independent of the bucket region).
pub const BQ_LOCATION: &str = "US";

/// Name of the deployed function.
pub const FUNCTION_NAME: &str = "process-invoices";

/// Runtime the function deploys with.
pub const FUNCTION_RUNTIME: &str = "python312";

/// Entry point inside the function source.
pub const FUNCTION_ENTRY_POINT: &str = "process_invoice";

/// Role a bucket plays in the invoice pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketRole {
    /// Incoming invoices; the function trigger watches this bucket.
    Input,
    /// Structured processor output.
    Output,
    /// Processed originals.
    Archive,
}

impl BucketRole {
    /// All roles in provisioning order.
    pub const ALL: [BucketRole; 3] = [BucketRole::Input, BucketRole::Output, BucketRole::Archive];

    /// The segment embedded in the bucket name. Note: `Archive` maps to
    /// `archived`, not `archive`.
    pub fn name_segment(self) -> &'static str {
        match self {
            BucketRole::Input => "input",
            BucketRole::Output => "output",
            BucketRole::Archive => "archived",
        }
    }
}

impl std::fmt::Display for BucketRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BucketRole::Input => write!(f, "input"),
            BucketRole::Output => write!(f, "output"),
            BucketRole::Archive => write!(f, "archive"),
        }
    }
}

/// Derive the globally-unique bucket name for a role.
pub fn bucket_name(project_id: &str, role: BucketRole) -> String {
    format!("{}-{}-invoices", project_id, role.name_segment())
}

/// App Engine default service account, used as the function runtime identity.
pub fn appspot_service_account(project_id: &str) -> String {
    format!("{project_id}@appspot.gserviceaccount.com")
}

/// Compute Engine default service account (keyed by project *number*).
pub fn compute_service_account(project_number: &str) -> String {
    format!("{project_number}-compute@developer.gserviceaccount.com")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_names_are_bit_exact() {
        assert_eq!(
            bucket_name("qwiklabs-gcp-01", BucketRole::Input),
            "qwiklabs-gcp-01-input-invoices"
        );
        assert_eq!(
            bucket_name("qwiklabs-gcp-01", BucketRole::Output),
            "qwiklabs-gcp-01-output-invoices"
        );
        // The archive bucket uses "archived", not "archive".
        assert_eq!(
            bucket_name("qwiklabs-gcp-01", BucketRole::Archive),
            "qwiklabs-gcp-01-archived-invoices"
        );
    }

    #[test]
    fn warehouse_names_are_fixed() {
        assert_eq!(BQ_DATASET, "invoice_parser_results");
        assert_eq!(BQ_TABLE, "doc_ai_extracted_entities");
        assert_eq!(BQ_LOCATION, "US");
        assert_eq!(FUNCTION_NAME, "process-invoices");
    }

    #[test]
    fn service_accounts_derive_from_project() {
        assert_eq!(
            appspot_service_account("my-proj"),
            "my-proj@appspot.gserviceaccount.com"
        );
        assert_eq!(
            compute_service_account("123456"),
            "123456-compute@developer.gserviceaccount.com"
        );
    }
}

//! The function env-vars file: the single hand-off artifact between the
//! orchestrator and the deployed function.
//!
//! `gcloud functions deploy --env-vars-file` consumes a flat YAML mapping.
//! The key set below is a contract with the function's cold-start code and
//! must never be renamed without updating both sides.

use std::fs;
use std::path::Path;

use serde::Serialize;

use ilab_common::Result;

/// The eight environment variables the deployed function reads.
///
/// `PROCESSOR_ID` may legitimately be empty: processor-id extraction is
/// best-effort and the operator can fill it in manually before deploying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct FunctionEnvVars {
    pub project_id: String,
    pub processor_id: String,
    pub parser_location: String,
    pub input_bucket: String,
    pub output_bucket: String,
    pub archive_bucket: String,
    pub bq_dataset: String,
    pub bq_table: String,
}

impl FunctionEnvVars {
    /// Render the YAML document written to disk.
    pub fn render(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Overwrite `path` with the rendered mapping, creating the parent
    /// directory if needed. Always a full rewrite, never an append.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.render()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> FunctionEnvVars {
        FunctionEnvVars {
            project_id: "my-proj".to_string(),
            processor_id: "ABCDEF".to_string(),
            parser_location: "us".to_string(),
            input_bucket: "my-proj-input-invoices".to_string(),
            output_bucket: "my-proj-output-invoices".to_string(),
            archive_bucket: "my-proj-archived-invoices".to_string(),
            bq_dataset: "invoice_parser_results".to_string(),
            bq_table: "doc_ai_extracted_entities".to_string(),
        }
    }

    #[test]
    fn renders_exactly_the_eight_keys() {
        let yaml = sample().render().expect("render");
        let doc: serde_yaml::Value = serde_yaml::from_str(&yaml).expect("parse");
        let keys: Vec<&str> = doc
            .as_mapping()
            .expect("mapping")
            .keys()
            .map(|k| k.as_str().expect("string key"))
            .collect();
        assert_eq!(
            keys,
            [
                "PROJECT_ID",
                "PROCESSOR_ID",
                "PARSER_LOCATION",
                "INPUT_BUCKET",
                "OUTPUT_BUCKET",
                "ARCHIVE_BUCKET",
                "BQ_DATASET",
                "BQ_TABLE",
            ]
        );
        assert_eq!(doc["PROCESSOR_ID"], "ABCDEF");
    }

    #[test]
    fn empty_processor_id_is_still_emitted() {
        let mut vars = sample();
        vars.processor_id = String::new();
        let yaml = vars.render().expect("render");
        let doc: serde_yaml::Value = serde_yaml::from_str(&yaml).expect("parse");
        assert_eq!(doc["PROCESSOR_ID"], "");
    }

    #[test]
    fn write_overwrites_rather_than_appends() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("function").join(".env.yaml");

        sample().write(&path).expect("first write");
        let mut changed = sample();
        changed.processor_id = "XYZ".to_string();
        changed.write(&path).expect("second write");

        let contents = std::fs::read_to_string(&path).expect("read");
        assert!(contents.contains("PROCESSOR_ID: XYZ"));
        assert!(!contents.contains("ABCDEF"));
        let doc: serde_yaml::Value = serde_yaml::from_str(&contents).expect("parse");
        assert_eq!(doc.as_mapping().expect("mapping").len(), 8);
    }
}

//! Best-effort processor-id extraction from the creation response.
//!
//! The response is semi-trusted: its shape is not validated against a
//! schema, and an "already exists" conflict arrives as an error body we
//! cannot reliably distinguish from other failures. So extraction is
//! two-tier and total-failure is fine: the caller records a warning and
//! the operator can set the id manually before deployment.

use serde_json::Value;

/// Extract the processor id from a creation response body.
///
/// Two field paths are tried in order: `name` at the top level, then
/// `processor.name`. The id is the path segment after `processors/` in the
/// fully-qualified resource name
/// (`projects/{p}/locations/{l}/processors/{id}`).
pub fn processor_id(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let name = value
        .pointer("/name")
        .and_then(Value::as_str)
        .or_else(|| value.pointer("/processor/name").and_then(Value::as_str))?;
    id_from_resource_name(name)
}

fn id_from_resource_name(name: &str) -> Option<String> {
    let (_, id) = name.rsplit_once("processors/")?;
    let id = id.trim_matches('/');
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_top_level_name() {
        let body = r#"{
            "name": "projects/123/locations/us/processors/ABCDEF",
            "displayName": "lab-parser",
            "type": "INVOICE_PROCESSOR"
        }"#;
        assert_eq!(processor_id(body).as_deref(), Some("ABCDEF"));
    }

    #[test]
    fn falls_back_to_nested_processor_name() {
        let body = r#"{"processor": {"name": "projects/123/locations/us/processors/XYZ789"}}"#;
        assert_eq!(processor_id(body).as_deref(), Some("XYZ789"));
    }

    #[test]
    fn prefers_top_level_over_nested() {
        let body = r#"{
            "name": "projects/123/locations/us/processors/TOP",
            "processor": {"name": "projects/123/locations/us/processors/NESTED"}
        }"#;
        assert_eq!(processor_id(body).as_deref(), Some("TOP"));
    }

    #[test]
    fn error_body_yields_none_without_panicking() {
        let body = r#"{"error": {"code": 409, "message": "processor already exists"}}"#;
        assert_eq!(processor_id(body), None);
    }

    #[test]
    fn malformed_body_yields_none() {
        assert_eq!(processor_id("not json at all"), None);
        assert_eq!(processor_id(""), None);
    }

    #[test]
    fn name_without_processor_segment_yields_none() {
        let body = r#"{"name": "projects/123/locations/us"}"#;
        assert_eq!(processor_id(body), None);
    }

    #[test]
    fn trailing_slash_is_tolerated() {
        let body = r#"{"name": "projects/123/locations/us/processors/ABCDEF/"}"#;
        assert_eq!(processor_id(body).as_deref(), Some("ABCDEF"));
    }
}

//! Per-step outcomes aggregated into a run report.
//!
//! Soft failures never abort the run; they degrade the step and surface as
//! warnings in the post-run diagnostics, together with the remediation the
//! operator should perform.

use serde::Serialize;

/// Outcome of one provisioning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Succeeded,
    /// Nothing to do (resource already present, optional input absent).
    Skipped,
    /// Completed with warnings; the run continues in a degraded state.
    Degraded,
}

/// Report for one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: &'static str,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl StepReport {
    pub fn succeeded(step: &'static str) -> Self {
        Self {
            step,
            status: StepStatus::Succeeded,
            notes: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn skipped(step: &'static str, note: impl Into<String>) -> Self {
        Self {
            step,
            status: StepStatus::Skipped,
            notes: vec![note.into()],
            warnings: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Record a warning and degrade the step. Skipped steps stay skipped.
    pub fn warn(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
        if self.status == StepStatus::Succeeded {
            self.status = StepStatus::Degraded;
        }
    }
}

/// Aggregated outcome of a full provisioning run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: String,
    pub finished_at: Option<String>,
    pub steps: Vec<StepReport>,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            started_at: chrono::Utc::now().to_rfc3339(),
            finished_at: None,
            steps: Vec::new(),
        }
    }

    pub fn push(&mut self, step: StepReport) {
        self.steps.push(step);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(chrono::Utc::now().to_rfc3339());
    }

    /// All warnings across steps, in pipeline order.
    pub fn warnings(&self) -> impl Iterator<Item = &str> {
        self.steps
            .iter()
            .flat_map(|s| s.warnings.iter().map(String::as_str))
    }

    /// Render the post-run diagnostics shown to the operator.
    pub fn render(&self) -> String {
        let mut out = String::from("provisioning summary:\n");
        for step in &self.steps {
            let badge = match step.status {
                StepStatus::Succeeded => "ok",
                StepStatus::Skipped => "skip",
                StepStatus::Degraded => "warn",
            };
            out.push_str(&format!("  [{badge:>4}] {}\n", step.step));
            for note in &step.notes {
                out.push_str(&format!("         - {note}\n"));
            }
        }
        let warnings: Vec<&str> = self.warnings().collect();
        if !warnings.is_empty() {
            out.push_str("warnings:\n");
            for warning in warnings {
                out.push_str(&format!("  ! {warning}\n"));
            }
        }
        out
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_degrades_a_successful_step() {
        let mut step = StepReport::succeeded("create-buckets");
        step.warn("bucket create raced an existing bucket");
        assert_eq!(step.status, StepStatus::Degraded);
        assert_eq!(step.warnings.len(), 1);
    }

    #[test]
    fn skipped_step_stays_skipped_after_warning() {
        let mut step = StepReport::skipped("create-table", "schema file absent");
        step.warn("schema file table-schema.json not found");
        assert_eq!(step.status, StepStatus::Skipped);
    }

    #[test]
    fn render_lists_steps_and_warnings() {
        let mut report = RunReport::new();
        report.push(StepReport::succeeded("enable-services"));
        let mut buckets = StepReport::succeeded("create-buckets").with_note("3 buckets ready");
        buckets.warn("existence check ambiguous for output bucket");
        report.push(buckets);
        report.finish();

        let text = report.render();
        assert!(text.contains("[  ok] enable-services"));
        assert!(text.contains("[warn] create-buckets"));
        assert!(text.contains("3 buckets ready"));
        assert!(text.contains("! existence check ambiguous"));
        assert!(report.finished_at.is_some());
    }
}

//! Rendering of run results for the terminal and for `--json`.

use serde::Serialize;
use std::fmt::Write;

use crate::services::{ItemOutcome, ReconcileReport, ReportSummary};
use crate::session::RunOutcome;

/// JSON document printed by `--json`.
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    /// Device address
    pub host: &'a str,
    /// Whether art mode is supported
    pub supported: bool,
    /// Per-outcome counts (absent when unsupported)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ReportSummary>,
    /// Full report (absent when unsupported)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<&'a ReconcileReport>,
}

impl<'a> JsonOutput<'a> {
    /// Builds the JSON document for a finished run.
    #[must_use]
    pub fn new(host: &'a str, outcome: &'a RunOutcome) -> Self {
        match outcome {
            RunOutcome::Unsupported => Self {
                host,
                supported: false,
                summary: None,
                report: None,
            },
            RunOutcome::Completed { report, .. } => Self {
                host,
                supported: true,
                summary: Some(report.summary()),
                report: Some(report),
            },
        }
    }
}

/// Renders a finished run for humans.
#[must_use]
pub fn render_text(host: &str, outcome: &RunOutcome) -> String {
    let report = match outcome {
        RunOutcome::Unsupported => return format!("Art mode is not supported on {host}\n"),
        RunOutcome::Completed { report, .. } => report,
    };

    let summary = report.summary();
    let mut out = String::new();

    let mode = if report.dry_run { " (dry run)" } else { "" };
    let _ = writeln!(out, "✓ Matte run on {host} complete{mode}");
    let _ = writeln!(out, "\nItems:");
    let _ = writeln!(out, "  Total:     {}", summary.total);
    if report.dry_run {
        let _ = writeln!(out, "  Planned:   {}", summary.planned);
    } else {
        let _ = writeln!(out, "  Changed:   {}", summary.changed);
    }
    let _ = writeln!(out, "  Unchanged: {}", summary.skipped);
    let _ = writeln!(out, "  Rejected:  {}", summary.rejected);
    let _ = writeln!(out, "  Malformed: {}", summary.malformed);

    let mut issues = Vec::new();
    for item in &report.items {
        for warning in &item.warnings {
            issues.push(format!("  ⚠ {warning}"));
        }
        match &item.outcome {
            ItemOutcome::Rejected { code, .. } => {
                issues.push(format!(
                    "  ✗ {}: change rejected (error code {code})",
                    item.item
                ));
            }
            ItemOutcome::Malformed { missing } => {
                issues.push(format!("  ✗ {}: missing {}", item.item, missing.join(", ")));
            }
            ItemOutcome::Changed { .. } | ItemOutcome::Planned { .. } | ItemOutcome::Skipped => {}
        }
    }

    if !issues.is_empty() {
        let _ = writeln!(out, "\nIssues:");
        for issue in issues {
            let _ = writeln!(out, "{issue}");
        }
    }

    out
}

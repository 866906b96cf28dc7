//! Deterministic report sections
//!
//! These formatters never touch the model: whatever happens upstream, the
//! report always carries the verdict listing and the source listing built
//! from typed results.

use std::fmt::Write;
use verity_domain::{CrossCheckReport, EvidenceBundle};

/// Render the per-claim cross-check verdicts
pub fn cross_check_section(report: &CrossCheckReport) -> String {
    let mut out = String::from("Claim verification:\n");
    for (idx, result) in report.results.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. \"{}\" - {} ({}% confidence)\n   {}",
            idx + 1,
            result.claim.text,
            result.confirmation_status,
            result.confidence_score,
            result.explanation,
        );
    }
    let _ = write!(
        out,
        "\nOverall agreement with sources: {}% - {}",
        report.overall_score, report.overall_assessment,
    );
    out
}

/// Render the per-claim source listing; placeholder records are shown with
/// their explanatory title and no link
pub fn sources_section(bundle: &EvidenceBundle) -> String {
    if bundle.is_empty() {
        return String::new();
    }

    let mut out = String::from("Sources consulted:\n");
    for entry in bundle.iter() {
        let _ = writeln!(out, "For \"{}\":", entry.claim.text);
        for source in &entry.sources {
            if source.is_placeholder() {
                let _ = writeln!(out, "  - {}", source.title);
            } else {
                let _ = writeln!(out, "  - {} ({})", source.title, source.url);
            }
        }
    }
    out.trim_end().to_string()
}

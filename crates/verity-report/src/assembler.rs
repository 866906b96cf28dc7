//! Final report assembly and length enforcement

use tracing::info;
use verity_domain::text::{char_len, clip};

/// Marker inserted where the middle of an oversized report was removed
pub const TRUNCATION_MARKER: &str = "\n\n[... middle of report omitted ...]\n\n";

/// Joins the report parts and enforces the transport length bound.
///
/// Reports over the bound lose their middle, not their tail: the opening
/// summary and the closing source listing both survive truncation. All
/// measurements are in characters, so the cut never lands inside a
/// multi-byte character.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    max_chars: usize,
}

impl ReportAssembler {
    /// Create an assembler with the given character bound
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Join the non-empty parts and bound the result
    pub fn assemble(&self, parts: &[&str]) -> String {
        let report = parts
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        self.bound(&report)
    }

    fn bound(&self, report: &str) -> String {
        let total = char_len(report);
        if total <= self.max_chars {
            return report.to_string();
        }

        let marker_chars = char_len(TRUNCATION_MARKER);
        if self.max_chars <= marker_chars + 1 {
            // Bound too small to split around the marker
            return clip(report, self.max_chars);
        }

        let budget = self.max_chars - marker_chars;
        let head_chars = budget / 2;
        let tail_chars = budget - head_chars;

        info!(
            "Report of {} chars truncated to fit {} chars",
            total, self.max_chars
        );

        let head: String = report.chars().take(head_chars).collect();
        let tail_start = total - tail_chars;
        let tail: String = report.chars().skip(tail_start).collect();

        let mut out = String::with_capacity(self.max_chars * 4);
        out.push_str(&head);
        out.push_str(TRUNCATION_MARKER);
        out.push_str(&tail);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parts_joined_with_blank_line() {
        let assembler = ReportAssembler::new(4000);
        let report = assembler.assemble(&["summary", "", "  ", "details"]);
        assert_eq!(report, "summary\n\ndetails");
    }

    #[test]
    fn test_short_report_untouched() {
        let assembler = ReportAssembler::new(100);
        let report = assembler.assemble(&["short report"]);
        assert_eq!(report, "short report");
    }

    #[test]
    fn test_truncation_keeps_head_and_tail() {
        let assembler = ReportAssembler::new(120);
        let head_part = "HEAD ".repeat(40);
        let tail_part = "TAIL ".repeat(40);
        let report = assembler.assemble(&[&head_part, &tail_part]);

        assert!(char_len(&report) <= 120);
        assert!(report.starts_with("HEAD"));
        assert!(report.ends_with("TAIL"));
        assert!(report.contains(TRUNCATION_MARKER));
    }

    #[test]
    fn test_multibyte_text_cut_on_char_boundary() {
        let assembler = ReportAssembler::new(80);
        let text = "факт ".repeat(100);
        let report = assembler.assemble(&[&text]);
        assert!(char_len(&report) <= 80);
    }

    proptest! {
        #[test]
        fn prop_report_never_exceeds_bound(text in ".{0,600}", max in 45usize..200) {
            let assembler = ReportAssembler::new(max);
            let report = assembler.assemble(&[&text]);
            prop_assert!(char_len(&report) <= max);
        }

        #[test]
        fn prop_truncated_report_keeps_both_ends(text in "[a-z]{300,500}") {
            let assembler = ReportAssembler::new(100);
            let report = assembler.assemble(&[&text]);
            let marker_at = report.find(TRUNCATION_MARKER).expect("marker present");
            prop_assert!(marker_at > 0);
            prop_assert!(marker_at + TRUNCATION_MARKER.len() < report.len());
            prop_assert!(text.starts_with(&report[..marker_at]));
        }
    }
}

//! Anomaly reports rendered against the dump they came from

use ariadne::{Color, Label, Report, ReportKind, Source};
use cfgtree_core::Anomaly;
use std::ops::Range;

/// Byte range of a 1-based line, without its line break
pub fn line_span(source: &str, line: usize) -> Range<usize> {
    let mut offset = 0;
    for (idx, text) in source.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            let end = offset + text.trim_end_matches(['\r', '\n']).len();
            return offset..end;
        }
        offset += text.len();
    }
    source.len()..source.len()
}

fn label(anomaly: &Anomaly) -> &'static str {
    match anomaly {
        Anomaly::MalformedLine { .. } => "quote opened here is never closed",
        Anomaly::UnmatchedTerminator { .. } => "no open block at this indent",
        Anomaly::IrregularIndent { .. } => "dedent lands between two levels",
        Anomaly::Unterminated { .. } => "input ends here",
        Anomaly::UnterminatedLiteral { .. } => "literal starts here",
        Anomaly::UnmatchedLine { .. } => "skipped",
    }
}

/// Print one warning per anomaly to stderr
pub fn print(name: &str, source: &str, anomalies: &[Anomaly]) {
    let last_line = source.lines().count();

    for anomaly in anomalies {
        let span = line_span(source, anomaly.line().unwrap_or(last_line));
        let report = Report::build(ReportKind::Warning, (name, span.clone()))
            .with_message(anomaly.to_string())
            .with_label(
                Label::new((name, span))
                    .with_message(label(anomaly))
                    .with_color(Color::Yellow),
            )
            .finish();

        if let Err(e) = report.eprint((name, Source::from(source))) {
            tracing::debug!("Failed to render report: {}", e);
        }
    }
}

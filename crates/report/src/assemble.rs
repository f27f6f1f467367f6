//! Report assembly — decide the email body and whether an attachment exists.

use crate::reconcile::ReportRow;
use crate::summary::ReportSummary;

const BODY_READY: &str = "Hello,\r\n\r\nThe bank transactions of your Qonto accounts \
for the last week are now ready.\r\nPlease see the attached CSV.";

const BODY_EMPTY: &str = "Hello,\r\n\r\nThere are no bank transactions of your Qonto \
accounts for the last week.\r\n";

/// The assembled report: plain-text body plus the rows to export.
/// No rows means no attachment downstream.
#[derive(Debug, Clone)]
pub struct Report {
    pub body: String,
    pub rows: Vec<ReportRow>,
}

impl Report {
    pub fn has_attachment(&self) -> bool {
        !self.rows.is_empty()
    }
}

/// Build the message body from the completed rows and the non-settled
/// summary. Summary lines are appended only when detail lines exist.
pub fn assemble(rows: Vec<ReportRow>, summary: &ReportSummary) -> Report {
    let mut body = if rows.is_empty() { BODY_EMPTY } else { BODY_READY }.to_string();

    if summary.has_details() {
        body.push_str("\r\n\r\n");
        body.push_str(&summary.lines.join("\r\n"));
    }

    Report { body, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn row() -> ReportRow {
        ReportRow {
            booking_date: "2026-08-25 10:00:00".into(),
            counterpart: "ACME GmbH".into(),
            description: "card Jane Doe".into(),
            signed_amount: Decimal::from_str("-42.5").unwrap(),
            additional_info: "_".into(),
        }
    }

    fn summary(lines: Vec<&str>) -> ReportSummary {
        ReportSummary {
            total_count: (lines.len() - 1) as u64,
            lines: lines.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn empty_rows_no_attachment() {
        let report = assemble(vec![], &summary(vec!["There are 0 non-settled records."]));
        assert!(!report.has_attachment());
        assert!(report.body.contains("There are no bank transactions"));
        assert!(!report.body.contains("attached CSV"));
        // Count-only summary is not appended
        assert!(!report.body.contains("non-settled records"));
    }

    #[test]
    fn rows_present_announces_attachment() {
        let report = assemble(
            vec![row()],
            &summary(vec!["There are 0 non-settled records."]),
        );
        assert!(report.has_attachment());
        assert!(report.body.contains("now ready"));
        assert!(report.body.contains("attached CSV"));
    }

    #[test]
    fn detail_lines_are_appended_after_blank_line() {
        let report = assemble(
            vec![row()],
            &summary(vec![
                "There are 1 non-settled records.",
                "[pending 2026-08-27 11:15:00] Counterpart: AWS EMEA, Amount: -120.0 EUR",
            ]),
        );
        assert!(report.body.contains(
            "attached CSV.\r\n\r\nThere are 1 non-settled records.\r\n[pending",
        ));
    }
}

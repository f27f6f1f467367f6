//! CSV export of the completed-transaction rows.
//!
//! German accounting headers, all fields quoted except the amount. The
//! amount stays a plain decimal string so spreadsheet imports read it as
//! a number.

use std::io::BufWriter;
use std::path::Path;

use qweek_report::ReportRow;

use crate::CliError;

const HEADER: [&str; 5] = [
    "Buchungsdatum",
    "Auftraggeber/Empfänger",
    "Verwendungszweck",
    "Betrag",
    "Zusatzinfo",
];

/// Write the export artifact. Any failure here fails the invocation.
pub fn write_rows(rows: &[ReportRow], path: &Path) -> Result<(), CliError> {
    let file = std::fs::File::create(path).map_err(|e| {
        CliError::export(format!("cannot create {}: {e}", path.display()))
    })?;

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::NonNumeric)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(BufWriter::new(file));

    writer
        .write_record(HEADER)
        .map_err(|e| CliError::export(format!("CSV write error: {e}")))?;

    for row in rows {
        let amount = row.signed_amount.to_string();
        writer
            .write_record([
                &row.booking_date,
                &row.counterpart,
                &row.description,
                &amount,
                &row.additional_info,
            ])
            .map_err(|e| CliError::export(format!("CSV write error: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| CliError::export(format!("CSV flush error: {e}")))
}

// ── Tests ───────────────────────────────────────────────────────────

//! Human-readable summary of non-settled (pending/declined) activity.
//!
//! Non-settled records are never exported as a file; they only appear as
//! text in the email body and on the operational log.

use serde_json::Value;

use crate::error::ReportError;
use crate::model::{amount_field, opt_str_field, signed_amount, str_field, Side};
use crate::window;

/// Summary lines for the non-settled fetch. The first line is always the
/// count line; one detail line per record follows, in input order.
#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub total_count: u64,
    pub lines: Vec<String>,
}

impl ReportSummary {
    /// Whether any per-record detail lines exist beyond the count line.
    pub fn has_details(&self) -> bool {
        self.lines.len() > 1
    }
}

/// Convert the raw non-settled document into summary lines.
pub fn summarize_non_settled(doc: &Value) -> Result<ReportSummary, ReportError> {
    let total_count = doc["meta"]["total_count"]
        .as_u64()
        .ok_or(ReportError::MissingField { field: "meta.total_count" })?;

    let transactions = doc["transactions"]
        .as_array()
        .ok_or(ReportError::MissingField { field: "transactions" })?;

    // Size from the records actually present; the reported count is
    // upstream data and need not match the array
    let mut lines = Vec::with_capacity(1 + transactions.len());
    lines.push(format!("There are {total_count} non-settled records."));

    for trn in transactions {
        let status = str_field(trn, "status")?;
        let updated = window::to_local(str_field(trn, "updated_at")?)?;
        let label = str_field(trn, "label")?;
        let side = Side::parse(str_field(trn, "side")?)?;
        let amount = signed_amount(side, amount_field(trn, "amount")?);

        let mut line =
            format!("[{status} {updated}] Counterpart: {label}, Amount: {amount} EUR");
        if let Some(reference) = opt_str_field(trn, "reference") {
            line.push_str(", Reference: ");
            line.push_str(reference);
        }
        lines.push(line);
    }

    Ok(ReportSummary { total_count, lines })
}

//! Completion reconciliation — the core join of completed transactions
//! with member identities, producing one export row per transaction.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::ReportError;
use crate::model::{amount_field, opt_str_field, signed_amount, str_field, Member, Side};
use crate::window;

/// One derived export row. Never mutated after creation; row order follows
/// the input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// `settled_at` converted to local time (`YYYY-MM-DD HH:MM:SS`).
    pub booking_date: String,
    /// Counterpart label, verbatim.
    pub counterpart: String,
    /// Reference text, or operation type (plus initiator name) as fallback.
    pub description: String,
    /// Amount with the debit sign applied. Plain decimal, no rounding.
    pub signed_amount: Decimal,
    /// Foreign-currency amount and/or note, or `"_"` when both are absent.
    pub additional_info: String,
}

/// Join the completed document against the member list. Returns no rows
/// when the document reports a zero total count.
pub fn reconcile(members: &[Member], doc: &Value) -> Result<Vec<ReportRow>, ReportError> {
    let total_count = doc["meta"]["total_count"]
        .as_u64()
        .ok_or(ReportError::MissingField { field: "meta.total_count" })?;
    if total_count == 0 {
        return Ok(Vec::new());
    }

    let lookup: HashMap<&str, &str> = members
        .iter()
        .map(|m| (m.id.as_str(), m.full_name.as_str()))
        .collect();

    let transactions = doc["transactions"]
        .as_array()
        .ok_or(ReportError::MissingField { field: "transactions" })?;

    let mut rows = Vec::with_capacity(transactions.len());
    for trn in transactions {
        rows.push(reconcile_one(&lookup, trn)?);
    }
    Ok(rows)
}

fn reconcile_one(
    lookup: &HashMap<&str, &str>,
    trn: &Value,
) -> Result<ReportRow, ReportError> {
    let side = Side::parse(str_field(trn, "side")?)?;
    let booking_date = window::to_local(str_field(trn, "settled_at")?)?;
    let amount = signed_amount(side, amount_field(trn, "amount")?);

    // Reference verbatim; otherwise operation type, with the initiator's
    // resolved name appended. An unresolvable initiator is a hard failure.
    let description = match opt_str_field(trn, "reference") {
        Some(reference) => reference.to_string(),
        None => {
            let mut text = str_field(trn, "operation_type")?.to_string();
            if let Some(id) = opt_str_field(trn, "initiator_id") {
                let name = lookup
                    .get(id)
                    .ok_or_else(|| ReportError::UnknownMember { id: id.to_string() })?;
                text.push(' ');
                text.push_str(name);
            }
            text
        }
    };

    // Foreign amount and/or note. "_" keeps the trailing CSV field from
    // being stripped downstream when both are absent.
    let mut parts: Vec<String> = Vec::new();
    let local_currency = str_field(trn, "local_currency")?;
    if local_currency != "EUR" {
        let local = signed_amount(side, amount_field(trn, "local_amount")?);
        parts.push(format!("{local} {local_currency}"));
    }
    if let Some(note) = opt_str_field(trn, "note") {
        parts.push(note.to_string());
    }
    let additional_info = if parts.is_empty() { "_".to_string() } else { parts.join(" ") };

    Ok(ReportRow {
        booking_date,
        counterpart: str_field(trn, "label")?.to_string(),
        description,
        signed_amount: amount,
        additional_info,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

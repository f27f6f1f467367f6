use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::ReportError;

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

/// An account member, used only to resolve transaction initiators to names.
#[derive(Debug, Clone)]
pub struct Member {
    pub id: String,
    pub full_name: String,
}

/// Parse the memberships document into member records.
pub fn parse_members(doc: &Value) -> Result<Vec<Member>, ReportError> {
    let memberships = doc["memberships"]
        .as_array()
        .ok_or(ReportError::MissingField { field: "memberships" })?;

    let mut members = Vec::with_capacity(memberships.len());
    for mem in memberships {
        let id = str_field(mem, "id")?;
        let first = str_field(mem, "first_name")?;
        let last = str_field(mem, "last_name")?;
        members.push(Member {
            id: id.to_string(),
            full_name: format!("{first} {last}"),
        });
    }
    Ok(members)
}

// ---------------------------------------------------------------------------
// Transaction side and amounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Credit,
    Debit,
}

impl Side {
    pub fn parse(value: &str) -> Result<Self, ReportError> {
        match value {
            "credit" => Ok(Side::Credit),
            "debit" => Ok(Side::Debit),
            other => Err(ReportError::InvalidSide { value: other.to_string() }),
        }
    }
}

/// Apply the side to a positive API amount: debit flips the sign.
pub fn signed_amount(side: Side, amount: Decimal) -> Decimal {
    match side {
        Side::Credit => amount,
        Side::Debit => -amount,
    }
}

// ---------------------------------------------------------------------------
// Field access helpers
// ---------------------------------------------------------------------------

pub(crate) fn str_field<'a>(item: &'a Value, field: &'static str) -> Result<&'a str, ReportError> {
    item[field]
        .as_str()
        .ok_or(ReportError::MissingField { field })
}

/// Optional string field: absent, null, or empty all read as `None`.
pub(crate) fn opt_str_field<'a>(item: &'a Value, field: &str) -> Option<&'a str> {
    item[field].as_str().filter(|s| !s.is_empty())
}

/// Read a decimal amount. The API sends JSON numbers; string amounts are
/// accepted too so fixtures can pin exact representations.
pub(crate) fn amount_field(item: &Value, field: &'static str) -> Result<Decimal, ReportError> {
    let value = &item[field];
    if let Some(s) = value.as_str() {
        return Decimal::from_str(s)
            .map_err(|_| ReportError::AmountParse { value: s.to_string() });
    }
    if value.is_number() {
        let text = value.to_string();
        return Decimal::from_str(&text)
            .map_err(|_| ReportError::AmountParse { value: text });
    }
    Err(ReportError::MissingField { field })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_members_builds_full_names() {
        let doc = json!({
            "memberships": [
                { "id": "m1", "first_name": "Jane", "last_name": "Doe" },
                { "id": "m2", "first_name": "Max", "last_name": "Mustermann" },
            ]
        });
        let members = parse_members(&doc).unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].id, "m1");
        assert_eq!(members[0].full_name, "Jane Doe");
        assert_eq!(members[1].full_name, "Max Mustermann");
    }

    #[test]
    fn parse_members_missing_collection() {
        let err = parse_members(&json!({ "meta": {} })).unwrap_err();
        assert_eq!(err, ReportError::MissingField { field: "memberships" });
    }

    #[test]
    fn signed_amount_flips_debit_only() {
        let amt = Decimal::from_str("42.5").unwrap();
        assert_eq!(signed_amount(Side::Credit, amt).to_string(), "42.5");
        assert_eq!(signed_amount(Side::Debit, amt).to_string(), "-42.5");
    }

    #[test]
    fn side_parse_rejects_unknown() {
        assert_eq!(Side::parse("credit").unwrap(), Side::Credit);
        assert_eq!(Side::parse("debit").unwrap(), Side::Debit);
        let err = Side::parse("refund").unwrap_err();
        assert_eq!(err, ReportError::InvalidSide { value: "refund".into() });
    }

    #[test]
    fn amount_field_preserves_decimal_text() {
        // 42.5 must stay 42.5, never 42.50000000001
        let item = json!({ "amount": 42.5 });
        assert_eq!(amount_field(&item, "amount").unwrap().to_string(), "42.5");

        let item = json!({ "amount": "10.05" });
        assert_eq!(amount_field(&item, "amount").unwrap().to_string(), "10.05");
    }

    #[test]
    fn amount_field_errors() {
        let err = amount_field(&json!({}), "amount").unwrap_err();
        assert_eq!(err, ReportError::MissingField { field: "amount" });

        let err = amount_field(&json!({ "amount": "abc" }), "amount").unwrap_err();
        assert_eq!(err, ReportError::AmountParse { value: "abc".into() });
    }
}

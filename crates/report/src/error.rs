use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// Required field missing (or wrong type) in a fetched document.
    MissingField { field: &'static str },
    /// Transaction side is neither "credit" nor "debit".
    InvalidSide { value: String },
    /// Completed transaction references a member id absent from the lookup.
    UnknownMember { id: String },
    /// Timestamp in a fetched record cannot be parsed.
    DateParse { value: String },
    /// Amount in a fetched record cannot be parsed as a decimal.
    AmountParse { value: String },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "missing field '{field}'"),
            Self::InvalidSide { value } => write!(f, "invalid transaction side '{value}'"),
            Self::UnknownMember { id } => {
                write!(f, "transaction initiator '{id}' not found among memberships")
            }
            Self::DateParse { value } => write!(f, "cannot parse timestamp '{value}'"),
            Self::AmountParse { value } => write!(f, "cannot parse amount '{value}'"),
        }
    }
}

impl std::error::Error for ReportError {}

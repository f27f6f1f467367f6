//! Query filter construction for the transactions endpoint.

use crate::window::TimeWindow;

/// Logical status group a remote query targets. The two groups use
/// disjoint status sets and different date fields, so a transaction can
/// never appear in both the non-settled and the completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusGroup {
    /// Non-settled activity: declined + pending, windowed on `updated_at`.
    Update,
    /// Completed transactions, windowed on `settled_at`.
    Settle,
}

impl StatusGroup {
    fn statuses(self) -> &'static [&'static str] {
        match self {
            StatusGroup::Update => &["declined", "pending"],
            StatusGroup::Settle => &["completed"],
        }
    }

    fn date_field(self) -> &'static str {
        match self {
            StatusGroup::Update => "updated_at",
            StatusGroup::Settle => "settled_at",
        }
    }
}

/// Build the filter expression appended to the transactions query string:
/// `&status[]=s1&status[]=s2&<field>_from=<start>&<field>_to=<end>`.
pub fn build_filter(window: &TimeWindow, group: StatusGroup) -> String {
    let mut filter = String::new();
    for status in group.statuses() {
        filter.push_str("&status[]=");
        filter.push_str(status);
    }
    let field = group.date_field();
    filter.push_str(&format!("&{field}_from={}", window.start_filter));
    filter.push_str(&format!("&{field}_to={}", window.end_filter));
    filter
}

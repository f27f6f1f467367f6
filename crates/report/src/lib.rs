//! `qweek-report` — core pipeline of the weekly Qonto report.
//!
//! Pure crate: receives fetched JSON documents, returns summary lines and
//! export rows. No HTTP, no filesystem, no mail.

pub mod assemble;
pub mod error;
pub mod filter;
pub mod model;
pub mod reconcile;
pub mod summary;
pub mod window;

pub use assemble::{assemble, Report};
pub use error::ReportError;
pub use filter::{build_filter, StatusGroup};
pub use model::{parse_members, Member, Side};
pub use reconcile::{reconcile, ReportRow};
pub use summary::{summarize_non_settled, ReportSummary};
pub use window::{TimeWindow, LOCAL_TZ};

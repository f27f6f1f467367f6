//! Qonto API client — blocking reqwest, no Tokio runtime required.
//!
//! Single source of truth for the Qonto wire contract: auth header,
//! collection paths, query assembly. One attempt per fetch — the report
//! runs once on a schedule, and a failed fetch fails the run rather than
//! sending a partial report.

mod client;

pub use client::{QontoClient, QontoError};

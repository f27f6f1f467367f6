//! Blocking HTTP client for the Qonto v2 API.

use std::time::Duration;

use serde_json::Value;

// ── Constants ───────────────────────────────────────────────────────

const QONTO_API_BASE: &str = "https://thirdparty.qonto.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("qweek/", env!("CARGO_PKG_VERSION"));

// ── Errors ──────────────────────────────────────────────────────────

/// Error type for Qonto fetches. Transport failures and timeouts land in
/// `Network`; all variants fail the invocation (no retry, no partial report).
#[derive(Debug)]
pub enum QontoError {
    /// Connection, TLS, or timeout failure before a response arrived.
    Network(String),
    /// Upstream rejected our credentials (401/403).
    Auth(u16, String),
    /// Any other non-success HTTP status.
    Http(u16, String),
    /// Response body was not the expected JSON document.
    Parse(String),
}

impl std::fmt::Display for QontoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QontoError::Network(msg) => write!(f, "Qonto request failed: {msg}"),
            QontoError::Auth(status, msg) => {
                write!(f, "Qonto auth failed ({status}): {msg}")
            }
            QontoError::Http(status, msg) => write!(f, "Qonto error ({status}): {msg}"),
            QontoError::Parse(msg) => write!(f, "Qonto response parse error: {msg}"),
        }
    }
}

impl std::error::Error for QontoError {}

// ── Client ──────────────────────────────────────────────────────────

/// Qonto API client (blocking).
#[derive(Clone)]
pub struct QontoClient {
    http: reqwest::blocking::Client,
    base_url: String,
    slug: String,
    secret_key: String,
    iban: String,
}

impl QontoClient {
    pub fn new(slug: String, secret_key: String, iban: String) -> Self {
        Self::with_base_url(slug, secret_key, iban, QONTO_API_BASE.to_string())
    }

    pub fn with_base_url(
        slug: String,
        secret_key: String,
        iban: String,
        base_url: String,
    ) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build HTTP client");

        Self { http, base_url, slug, secret_key, iban }
    }

    /// Fetch transactions matching the given status/date filter. The
    /// account IBAN and slug are always part of the query.
    pub fn fetch_transactions(&self, filter: &str) -> Result<Value, QontoError> {
        let url = format!(
            "{}/v2/transactions?iban={}&slug={}{}",
            self.base_url, self.iban, self.slug, filter,
        );
        self.get(&url)
    }

    /// Fetch all members of the account. No filter applies.
    pub fn fetch_memberships(&self) -> Result<Value, QontoError> {
        let url = format!("{}/v2/memberships", self.base_url);
        self.get(&url)
    }

    fn get(&self, url: &str) -> Result<Value, QontoError> {
        let resp = self
            .http
            .get(url)
            .header("authorization", format!("{}:{}", self.slug, self.secret_key))
            .send()
            .map_err(|e| QontoError::Network(e.to_string()))?;

        let status = resp.status().as_u16();

        if status == 401 || status == 403 {
            let body: Value = resp.json().unwrap_or(Value::Null);
            return Err(QontoError::Auth(status, extract_error(&body, status)));
        }

        if !(200..300).contains(&status) {
            let body: Value = resp.json().unwrap_or(Value::Null);
            return Err(QontoError::Http(status, extract_error(&body, status)));
        }

        let text = resp
            .text()
            .map_err(|e| QontoError::Network(format!("failed to read response body: {e}")))?;
        let trimmed = text.trim_start_matches('\u{feff}');
        serde_json::from_str(trimmed).map_err(|e| {
            // Truncate on a char boundary; the body may not be ASCII
            let preview: String = trimmed.chars().take(200).collect();
            QontoError::Parse(format!("{e} (body: {preview})"))
        })
    }
}

fn extract_error(body: &Value, status: u16) -> String {
    body["errors"][0]["detail"]
        .as_str()
        .or_else(|| body["message"].as_str())
        .unwrap_or(&format!("HTTP {status}"))
        .to_string()
}

// ── Tests ───────────────────────────────────────────────────────────

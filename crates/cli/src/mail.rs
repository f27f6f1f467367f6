//! Outbound delivery of the report email over SMTP.
//!
//! Plain-text body, CSV attached only when completed rows exist. Delivery
//! failure is non-fatal: the caller logs it and the run still counts as
//! successful (the summary already went to the operational log).

use std::path::Path;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

// ── Configuration ───────────────────────────────────────────────────

/// SMTP relay settings plus the message envelope, read once at startup.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub sender: String,
    pub recipient: String,
    pub subject: String,
}

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum MailError {
    /// Sender or recipient is not a valid mailbox address.
    Address(String),
    /// Could not read the CSV attachment from disk.
    Io(String),
    /// Message assembly failed.
    Message(String),
    /// SMTP relay setup or send failure.
    Transport(String),
}

impl std::fmt::Display for MailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MailError::Address(msg) => write!(f, "bad address: {msg}"),
            MailError::Io(msg) => write!(f, "attachment read error: {msg}"),
            MailError::Message(msg) => write!(f, "message build error: {msg}"),
            MailError::Transport(msg) => write!(f, "SMTP error: {msg}"),
        }
    }
}

impl std::error::Error for MailError {}

// ── Message assembly ────────────────────────────────────────────────

/// Build the outbound message; attaches the CSV when a path is given.
pub fn build_message(
    config: &MailConfig,
    body: &str,
    attachment: Option<&Path>,
) -> Result<Message, MailError> {
    let from: Mailbox = config
        .sender
        .parse()
        .map_err(|e| MailError::Address(format!("sender {:?}: {e}", config.sender)))?;
    let to: Mailbox = config
        .recipient
        .parse()
        .map_err(|e| MailError::Address(format!("recipient {:?}: {e}", config.recipient)))?;

    let builder = Message::builder()
        .from(from)
        .to(to)
        .subject(config.subject.clone());

    let message = match attachment {
        Some(path) => {
            let bytes = std::fs::read(path)
                .map_err(|e| MailError::Io(format!("{}: {e}", path.display())))?;
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("report.csv")
                .to_string();
            let csv_part = Attachment::new(filename).body(
                bytes,
                ContentType::parse("text/csv; charset=utf-8")
                    .map_err(|e| MailError::Message(e.to_string()))?,
            );
            builder.multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(body.to_string()))
                    .singlepart(csv_part),
            )
        }
        None => builder.body(body.to_string()),
    }
    .map_err(|e| MailError::Message(e.to_string()))?;

    Ok(message)
}

/// Send the report. STARTTLS on the submission port, relay credentials
/// from configuration.
pub fn send(
    config: &MailConfig,
    body: &str,
    attachment: Option<&Path>,
) -> Result<(), MailError> {
    let message = build_message(config, body, attachment)?;

    let mailer = SmtpTransport::starttls_relay(&config.host)
        .map_err(|e| MailError::Transport(e.to_string()))?
        .credentials(Credentials::new(
            config.username.clone(),
            config.password.clone(),
        ))
        .build();

    mailer
        .send(&message)
        .map_err(|e| MailError::Transport(e.to_string()))?;
    Ok(())
}

// ── Tests ───────────────────────────────────────────────────────────

// qweek - weekly Qonto transaction report, run once per scheduler tick

mod exit_codes;
mod export;
mod mail;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;

use qweek_qonto_client::{QontoClient, QontoError};
use qweek_report::{
    assemble, build_filter, parse_members, reconcile, summarize_non_settled, ReportError,
    StatusGroup, TimeWindow, LOCAL_TZ,
};

use exit_codes::{
    EXIT_ERROR, EXIT_EXPORT_IO, EXIT_FETCH_AUTH, EXIT_FETCH_UPSTREAM, EXIT_SUCCESS,
};

#[derive(Parser)]
#[command(name = "qweek")]
#[command(about = "Weekly Qonto transaction report — fetch, reconcile, export, email")]
#[command(version)]
struct Cli {
    /// Qonto API secret key
    #[arg(long, env = "QONTO_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Qonto organization slug (the API login)
    #[arg(long, env = "QONTO_SLUG")]
    slug: String,

    /// IBAN of the account to report on
    #[arg(long, env = "QONTO_IBAN")]
    iban: String,

    /// Sender address of the report email
    #[arg(long, env = "SENDER")]
    sender: String,

    /// Recipient address of the report email
    #[arg(long, env = "RECIPIENT")]
    recipient: String,

    /// Subject line of the report email
    #[arg(long, env = "SUBJECT")]
    subject: String,

    /// SES region; derives the SMTP relay host when --smtp-host is unset
    #[arg(long, env = "REGION")]
    region: Option<String>,

    /// SMTP relay host (overrides the region-derived default)
    #[arg(long, env = "SMTP_HOST")]
    smtp_host: Option<String>,

    /// SMTP relay username
    #[arg(long, env = "SMTP_USERNAME", hide_env_values = true)]
    smtp_username: Option<String>,

    /// SMTP relay password
    #[arg(long, env = "SMTP_PASSWORD", hide_env_values = true)]
    smtp_password: Option<String>,

    /// Directory for the CSV export (default: system temp dir)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Print the email body instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// Suppress progress on stderr
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {message}");
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {hint}");
            }
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let now = Utc::now().with_timezone(&LOCAL_TZ);
    let window = TimeWindow::compute(now);

    if !cli.quiet {
        eprintln!(
            "Reporting window: {} to {} ({})",
            window.start_date, window.end_date, LOCAL_TZ,
        );
    }

    // Configuration is all-or-nothing at startup: a missing relay
    // setting must fail here, not after the fetches and the export
    let mail_config = if cli.dry_run {
        None
    } else {
        Some(resolve_mail_config(&cli)?)
    };

    let client = QontoClient::new(cli.slug.clone(), cli.api_key.clone(), cli.iban.clone());

    // Non-settled activity: summarized as text, never exported
    let non_settled =
        client.fetch_transactions(&build_filter(&window, StatusGroup::Update))?;
    let summary = summarize_non_settled(&non_settled)?;
    if !cli.quiet {
        for line in &summary.lines {
            eprintln!("{line}");
        }
    }

    // Completed transactions, joined against the member list
    let members = parse_members(&client.fetch_memberships()?)?;
    let completed =
        client.fetch_transactions(&build_filter(&window, StatusGroup::Settle))?;
    let rows = reconcile(&members, &completed)?;
    if !cli.quiet {
        eprintln!("{} transactions found.", rows.len());
    }

    let report = assemble(rows, &summary);

    let attachment = if report.has_attachment() {
        let dir = cli.out_dir.clone().unwrap_or_else(std::env::temp_dir);
        let path = dir.join(format!(
            "qonto_{}_{}.csv",
            window.start_date, window.end_date,
        ));
        export::write_rows(&report.rows, &path)?;
        if !cli.quiet {
            eprintln!("CSV written: {}", path.display());
        }
        Some(path)
    } else {
        None
    };

    match &mail_config {
        // Dry run: print the body instead of sending
        None => {
            println!("{}", report.body);
            if let Some(path) = &attachment {
                eprintln!("dry run: would attach {}", path.display());
            }
        }
        // Delivery failure is reported but does not fail the run: the CSV
        // exists and the summary is already on the log.
        Some(config) => match mail::send(config, &report.body, attachment.as_deref()) {
            Ok(()) => {
                if !cli.quiet {
                    eprintln!("Email sent to {}", cli.recipient);
                }
            }
            Err(e) => eprintln!("warning: email delivery failed: {e}"),
        },
    }

    Ok(())
}

fn resolve_mail_config(cli: &Cli) -> Result<mail::MailConfig, CliError> {
    let host = match (&cli.smtp_host, &cli.region) {
        (Some(host), _) => host.clone(),
        (None, Some(region)) => format!("email-smtp.{region}.amazonaws.com"),
        (None, None) => {
            return Err(CliError::args("missing SMTP relay host")
                .with_hint("set SMTP_HOST, or REGION to use the SES relay"));
        }
    };

    let username = cli.smtp_username.clone().ok_or_else(|| {
        CliError::args("missing SMTP username").with_hint("set SMTP_USERNAME")
    })?;
    let password = cli.smtp_password.clone().ok_or_else(|| {
        CliError::args("missing SMTP password").with_hint("set SMTP_PASSWORD")
    })?;

    Ok(mail::MailConfig {
        host,
        username,
        password,
        sender: cli.sender.clone(),
        recipient: cli.recipient.clone(),
        subject: cli.subject.clone(),
    })
}

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: exit_codes::EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self { code: EXIT_EXPORT_IO, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<QontoError> for CliError {
    fn from(err: QontoError) -> Self {
        let code = match &err {
            QontoError::Auth(..) => EXIT_FETCH_AUTH,
            QontoError::Network(_) | QontoError::Http(..) | QontoError::Parse(_) => {
                EXIT_FETCH_UPSTREAM
            }
        };
        Self { code, message: err.to_string(), hint: None }
    }
}

impl From<ReportError> for CliError {
    fn from(err: ReportError) -> Self {
        let hint = match &err {
            ReportError::UnknownMember { .. } => Some(
                "a completed transaction references a member missing from the \
                 account; check the membership list in Qonto"
                    .to_string(),
            ),
            _ => None,
        };
        Self { code: EXIT_ERROR, message: err.to_string(), hint }
    }
}

// ── Tests ───────────────────────────────────────────────────────────

//! Email delivery of the consolidated report
//!
//! The report is rendered as an HTML table inside a short letter and handed to
//! a [`Mailer`]. Delivery never raises past [`send_report`]: the caller gets a
//! [`DeliveryOutcome`] that is either `Sent` or `Failed` with a reason.

use crate::config::{EmailConfig, TlsMode};
use crate::error::{Result, SocietyReportError};
use crate::report::{column_headers, ReportRow, ReportTable, COLUMN_COUNT};

use askama::Template;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message as MimeMessage, Tokio1Executor};
use std::fmt;
use std::time::Duration;

/// The report letter, rendered from `templates/report_email.html`
#[derive(Template)]
#[template(path = "report_email.html")]
struct ReportEmailTemplate<'a> {
    headers: [&'static str; COLUMN_COUNT],
    rows: &'a [ReportRow],
}

/// A fully composed message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// Sender address
    pub from: String,
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// HTML body
    pub html_body: String,
}

/// Result of an email attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The transport accepted the message
    Sent,
    /// Nothing was delivered
    Failed {
        /// Human readable cause
        reason: String,
    },
}

impl DeliveryOutcome {
    /// Returns true when the message was sent
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }

    fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DeliveryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sent => write!(f, "Email sent successfully!"),
            Self::Failed { reason } => write!(f, "Failed to send email: {}", reason),
        }
    }
}

/// Something that can deliver an [`OutgoingEmail`]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a message
    ///
    /// # Errors
    ///
    /// Returns error if the message could not be built or the transport rejected it
    async fn deliver(&self, email: &OutgoingEmail) -> Result<()>;
}

/// SMTP mailer backed by lettre
///
/// Port 465 uses implicit TLS and port 587 uses STARTTLS unless
/// `email.tls` says otherwise.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build a mailer from email configuration
    ///
    /// # Errors
    ///
    /// Returns error if settings or credentials are missing, or the relay
    /// cannot be configured
    pub fn from_config(config: &EmailConfig) -> Result<Self> {
        config.ensure_sendable()?;
        let tls = config.resolve_tls()?;
        let password = config.password.clone().unwrap_or_default();

        let builder = match tls {
            TlsMode::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host),
            TlsMode::Starttls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            }
        }
        .map_err(|e| SocietyReportError::Email(format!("Invalid SMTP relay: {}", e)))?;

        let transport = builder
            .port(config.smtp_port)
            .credentials(Credentials::new(config.sender.clone(), password))
            .timeout(Some(Duration::from_secs(config.timeout_seconds)))
            .build();

        tracing::debug!(
            "Configured SMTP relay {}:{} ({:?})",
            config.smtp_host,
            config.smtp_port,
            tls
        );

        Ok(Self { transport })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox> {
    address.parse::<Mailbox>().map_err(|e| {
        SocietyReportError::Email(format!("Invalid address '{}': {}", address, e)).into()
    })
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn deliver(&self, email: &OutgoingEmail) -> Result<()> {
        let message = MimeMessage::builder()
            .from(parse_mailbox(&email.from)?)
            .to(parse_mailbox(&email.to)?)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(email.html_body.clone())
            .map_err(|e| SocietyReportError::Email(format!("Failed to build message: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| SocietyReportError::Email(e.to_string()))?;
        Ok(())
    }
}

/// Render the HTML letter carrying the report table
///
/// Every header and cell value is HTML-escaped by the template.
///
/// # Errors
///
/// Returns error if the template fails to render
///
/// # Examples
///
/// ```
/// use societyreport::notify::render_email_body;
/// use societyreport::report::ReportTable;
///
/// let mut table = ReportTable::new();
/// table.add_organization("IOWA Oncology Society");
/// let body = render_email_body(&table).unwrap();
/// assert!(body.contains("Dear Recipient,"));
/// assert!(body.contains("<td>IOWA Oncology Society</td>"));
/// ```
pub fn render_email_body(table: &ReportTable) -> Result<String> {
    let letter = ReportEmailTemplate {
        headers: column_headers(),
        rows: table.rows(),
    };
    letter
        .render()
        .map_err(|e| SocietyReportError::Email(format!("Failed to render report: {}", e)).into())
}

/// Compose the report email for the configured sender and recipient
///
/// # Errors
///
/// Returns error if the body cannot be rendered
pub fn compose_report_email(table: &ReportTable, config: &EmailConfig) -> Result<OutgoingEmail> {
    Ok(OutgoingEmail {
        from: config.sender.clone(),
        to: config.recipient.clone(),
        subject: config.subject.clone(),
        html_body: render_email_body(table)?,
    })
}

/// Email the report and report what happened
///
/// An empty report or incomplete settings fail without contacting the
/// mailer.
pub async fn send_report(
    mailer: &dyn Mailer,
    table: &ReportTable,
    config: &EmailConfig,
) -> DeliveryOutcome {
    if table.is_empty() {
        return DeliveryOutcome::failed("No report data to send");
    }
    if let Err(e) = config.ensure_sendable() {
        tracing::warn!("Email settings incomplete: {}", e);
        return DeliveryOutcome::failed(e.to_string());
    }

    let email = match compose_report_email(table, config) {
        Ok(email) => email,
        Err(e) => {
            tracing::error!("Could not compose report email: {}", e);
            return DeliveryOutcome::failed(e.to_string());
        }
    };
    match mailer.deliver(&email).await {
        Ok(()) => {
            tracing::info!("Emailed report with {} rows to {}", table.len(), email.to);
            DeliveryOutcome::Sent
        }
        Err(e) => {
            tracing::error!("Email delivery failed: {}", e);
            DeliveryOutcome::failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeMailer {
        fail_with: Option<String>,
        sent: Mutex<Vec<OutgoingEmail>>,
    }

    #[async_trait]
    impl Mailer for FakeMailer {
        async fn deliver(&self, email: &OutgoingEmail) -> Result<()> {
            if let Some(reason) = &self.fail_with {
                return Err(SocietyReportError::Email(reason.clone()).into());
            }
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    fn sendable_config() -> EmailConfig {
        EmailConfig {
            sender: "reports@example.com".to_string(),
            recipient: "team@example.com".to_string(),
            password: Some("app-password".to_string()),
            ..EmailConfig::default()
        }
    }

    fn one_row_table() -> ReportTable {
        let mut table = ReportTable::new();
        table.add_organization("GASCO (Georgia Society of Clinical Oncology)");
        table
    }

    #[tokio::test]
    async fn test_send_report_success() {
        let mailer = FakeMailer::default();
        let outcome = send_report(&mailer, &one_row_table(), &sendable_config()).await;
        assert_eq!(outcome, DeliveryOutcome::Sent);

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "team@example.com");
        assert_eq!(sent[0].subject, "Consolidated Pharma Society Report");
        assert!(sent[0].html_body.contains("GASCO"));
    }

    #[tokio::test]
    async fn test_send_report_transport_failure_is_tagged() {
        let mailer = FakeMailer {
            fail_with: Some("535 authentication failed".to_string()),
            ..FakeMailer::default()
        };
        let outcome = send_report(&mailer, &one_row_table(), &sendable_config()).await;
        match outcome {
            DeliveryOutcome::Failed { reason } => assert!(reason.contains("535")),
            DeliveryOutcome::Sent => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn test_send_report_empty_table() {
        let mailer = FakeMailer::default();
        let outcome = send_report(&mailer, &ReportTable::new(), &sendable_config()).await;
        assert!(!outcome.is_sent());
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_report_missing_password() {
        let mailer = FakeMailer::default();
        let mut config = sendable_config();
        config.password = None;
        let outcome = send_report(&mailer, &one_row_table(), &config).await;
        assert!(outcome.to_string().starts_with("Failed to send email:"));
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_render_email_body_wraps_table() {
        let body = render_email_body(&one_row_table()).unwrap();
        assert!(body.starts_with("<html>"));
        assert!(body.contains("<table border=\"1\" class=\"dataframe\">"));
        assert!(body.contains("Pharma Society Insights Team"));
        assert!(body.contains("background-color: #4CAF50;"));
    }

    #[test]
    fn test_email_table_has_header_and_rows() {
        let mut table = ReportTable::new();
        table.add_organization("FLASCO (Florida Society of Clinical Oncology)");
        table.add_organization("IOS (Indiana Oncology Society)");
        let body = render_email_body(&table).unwrap();

        assert_eq!(body.matches("<th>").count(), COLUMN_COUNT);
        assert!(body.contains("<th>Society Name</th>"));
        assert!(body.contains("<th>Top Experts on Board</th>"));
        assert_eq!(body.matches("<tr>").count(), 2);
        assert_eq!(body.matches("<td>").count(), 2 * COLUMN_COUNT);
        assert!(body.contains("<td>4100</td>"));
        assert!(body.contains("<td>IOS (Indiana Oncology Society)</td>"));
    }

    #[test]
    fn test_email_table_empty_report_has_header_only() {
        let body = render_email_body(&ReportTable::new()).unwrap();
        assert_eq!(body.matches("<th>").count(), COLUMN_COUNT);
        assert!(!body.contains("<td>"));
    }

    #[test]
    fn test_email_body_escapes_record_text() {
        let body = render_email_body(&one_row_table()).unwrap();
        // apostrophes in record text are escaped, the letter's own markup is not
        assert!(body.contains("s primary focus is on clinical oncology"));
        assert!(!body.contains("GASCO's primary focus"));
        assert!(body.contains("<p>Dear Recipient,</p>"));
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(DeliveryOutcome::Sent.to_string(), "Email sent successfully!");
    }

    #[tokio::test]
    async fn test_smtp_mailer_rejects_unknown_port_without_tls() {
        let mut config = sendable_config();
        config.smtp_port = 2525;
        assert!(SmtpMailer::from_config(&config).is_err());
    }

    #[tokio::test]
    async fn test_smtp_mailer_builds_for_starttls() {
        assert!(SmtpMailer::from_config(&sendable_config()).is_ok());
    }
}

use async_trait::async_trait;
use std::sync::Mutex;

use societyreport::config::EmailConfig;
use societyreport::error::{Result, SocietyReportError};
use societyreport::notify::{DeliveryOutcome, Mailer, OutgoingEmail};
use societyreport::Session;

#[derive(Default)]
struct CapturingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
}

#[async_trait]
impl Mailer for CapturingMailer {
    async fn deliver(&self, email: &OutgoingEmail) -> Result<()> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

struct RejectingMailer;

#[async_trait]
impl Mailer for RejectingMailer {
    async fn deliver(&self, _email: &OutgoingEmail) -> Result<()> {
        Err(SocietyReportError::Email("550 mailbox unavailable".to_string()).into())
    }
}

fn email_config() -> EmailConfig {
    EmailConfig {
        sender: "reports@example.com".to_string(),
        recipient: "team@example.com".to_string(),
        password: Some("app-password".to_string()),
        ..EmailConfig::default()
    }
}

#[tokio::test]
async fn test_session_email_contains_every_row() {
    let mut session = Session::new();
    session.add_organization("FLASCO (Florida Society of Clinical Oncology)");
    session.add_organization("IOS (Indiana Oncology Society)");

    let mailer = CapturingMailer::default();
    let outcome = session.email_report(&mailer, &email_config()).await;
    assert_eq!(outcome, DeliveryOutcome::Sent);

    let sent = mailer.sent.lock().unwrap();
    let body = &sent[0].html_body;
    assert!(body.contains("<td>FLASCO (Florida Society of Clinical Oncology)</td>"));
    assert!(body.contains("<td>IOS (Indiana Oncology Society)</td>"));
    assert!(body.contains("<td>4100</td>"));
    assert_eq!(sent[0].from, "reports@example.com");
}

#[tokio::test]
async fn test_session_email_rejection_is_failed_outcome() {
    let mut session = Session::new();
    session.add_organization("IOWA Oncology Society");

    let outcome = session.email_report(&RejectingMailer, &email_config()).await;
    match outcome {
        DeliveryOutcome::Failed { reason } => assert!(reason.contains("550")),
        DeliveryOutcome::Sent => panic!("rejected delivery reported as sent"),
    }
}

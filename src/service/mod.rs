mod mailer;
mod templates;

pub use mailer::{Email, MailError, Mailer, SmtpMailer};

use askama::Template;
use lettre::message::Mailbox;

use std::sync::Arc;

use crate::{
    config::Config,
    dto::{ContactRequest, SubmissionResult},
};

use templates::{AcknowledgmentTemplate, OwnerNotificationTemplate};

pub const SENT_MESSAGE: &str = "Email sent successfully!";

/// Turns a contact request into an owner notification plus an
/// acknowledgment for the person who wrote in.
#[derive(Clone)]
pub struct ContactService {
    mailer: Arc<dyn Mailer>,
    sender: String,
    recipient: String,
    owner_name: String,
}

impl ContactService {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        owner_name: impl Into<String>,
    ) -> Self {
        Self {
            mailer,
            sender: sender.into(),
            recipient: recipient.into(),
            owner_name: owner_name.into(),
        }
    }

    pub fn from_config(config: &Config, mailer: Arc<dyn Mailer>) -> Self {
        Self::new(
            mailer,
            config.sender.clone(),
            config.recipient(),
            config.owner_name.clone(),
        )
    }

    /// Sends the notification, then the acknowledgment. The acknowledgment is
    /// never attempted if the notification fails, and errors are returned
    /// as-is without retrying.
    pub async fn send_contact_email(
        &self,
        request: ContactRequest,
    ) -> Result<SubmissionResult, MailError> {
        let notification = self.owner_notification(&request)?;
        tracing::info!(
            "Sending contact notification to '{}' with subject '{}'",
            self.recipient,
            notification.subject
        );
        self.mailer.deliver(notification).await?;

        let acknowledgment = self.acknowledgment(&request)?;
        tracing::info!("Sending acknowledgment to '{}'", request.email);
        self.mailer.deliver(acknowledgment).await?;

        tracing::info!("Contact request from {} relayed successfully", request.email);

        Ok(SubmissionResult::sent(SENT_MESSAGE))
    }

    fn owner_notification(&self, request: &ContactRequest) -> Result<Email, MailError> {
        let subject = match request.subject.as_deref() {
            Some(subject) if !subject.is_empty() => subject.to_string(),
            _ => format!("New Contact Form Message from {}", request.name),
        };

        let html = OwnerNotificationTemplate {
            name: &request.name,
            email: &request.email,
            message: &request.message,
        }
        .render()?;

        Ok(Email {
            from: self.sender.parse::<Mailbox>()?,
            to: self.recipient.parse::<Mailbox>()?,
            reply_to: Some(request.email.parse::<Mailbox>()?),
            subject,
            html,
        })
    }

    fn acknowledgment(&self, request: &ContactRequest) -> Result<Email, MailError> {
        let html = AcknowledgmentTemplate {
            name: &request.name,
            message: &request.message,
            owner_name: &self.owner_name,
        }
        .render()?;

        Ok(Email {
            from: self.sender.parse::<Mailbox>()?,
            to: request.email.parse::<Mailbox>()?,
            reply_to: None,
            subject: format!("Thank you for contacting {}", self.owner_name),
            html,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingMailer;
    use super::*;

    fn service(mailer: Arc<RecordingMailer>) -> ContactService {
        ContactService::new(mailer, "site@example.com", "owner@example.com", "Jane Doe")
    }

    fn alice() -> ContactRequest {
        ContactRequest {
            name: "Alice".to_string(),
            email: "alice@x.com".to_string(),
            subject: None,
            message: "Hi".to_string(),
        }
    }

    #[tokio::test]
    async fn sends_notification_then_acknowledgment() {
        let mailer = Arc::new(RecordingMailer::default());

        let result = service(mailer.clone())
            .send_contact_email(alice())
            .await
            .unwrap();

        assert_eq!(result, SubmissionResult::sent("Email sent successfully!"));

        let sent = mailer.attempts();
        assert_eq!(sent.len(), 2);

        let notification = &sent[0];
        assert_eq!(notification.from.email.to_string(), "site@example.com");
        assert_eq!(notification.to.email.to_string(), "owner@example.com");
        assert_eq!(
            notification.reply_to.as_ref().map(|m| m.email.to_string()),
            Some("alice@x.com".to_string())
        );
        assert_eq!(notification.subject, "New Contact Form Message from Alice");
        assert!(notification.html.contains("Alice"));
        assert!(notification.html.contains("alice@x.com"));
        assert!(notification.html.contains("Hi"));

        let acknowledgment = &sent[1];
        assert_eq!(acknowledgment.from.email.to_string(), "site@example.com");
        assert_eq!(acknowledgment.to.email.to_string(), "alice@x.com");
        assert!(acknowledgment.reply_to.is_none());
        assert_eq!(acknowledgment.subject, "Thank you for contacting Jane Doe");
        assert!(acknowledgment.html.contains("Dear Alice,"));
        assert!(acknowledgment.html.contains("Hi"));
        assert!(acknowledgment.html.contains("Jane Doe"));
    }

    #[tokio::test]
    async fn explicit_subject_overrides_default() {
        let mailer = Arc::new(RecordingMailer::default());
        let request = ContactRequest {
            subject: Some("Project inquiry".to_string()),
            ..alice()
        };

        service(mailer.clone())
            .send_contact_email(request)
            .await
            .unwrap();

        assert_eq!(mailer.attempts()[0].subject, "Project inquiry");
    }

    #[tokio::test]
    async fn empty_subject_falls_back_to_default() {
        let mailer = Arc::new(RecordingMailer::default());
        let request = ContactRequest {
            subject: Some(String::new()),
            ..alice()
        };

        service(mailer.clone())
            .send_contact_email(request)
            .await
            .unwrap();

        assert_eq!(
            mailer.attempts()[0].subject,
            "New Contact Form Message from Alice"
        );
    }

    #[tokio::test]
    async fn failed_notification_skips_acknowledgment() {
        let mailer = Arc::new(RecordingMailer::failing_on(1));

        let result = service(mailer.clone()).send_contact_email(alice()).await;

        assert!(matches!(result, Err(MailError::Rejected(_))));
        assert_eq!(mailer.attempts().len(), 1);
    }

    #[tokio::test]
    async fn failed_acknowledgment_propagates() {
        let mailer = Arc::new(RecordingMailer::failing_on(2));

        let result = service(mailer.clone()).send_contact_email(alice()).await;

        assert!(matches!(result, Err(MailError::Rejected(_))));
        assert_eq!(mailer.attempts().len(), 2);
    }

    #[tokio::test]
    async fn invalid_submitter_address_sends_nothing() {
        let mailer = Arc::new(RecordingMailer::default());
        let request = ContactRequest {
            email: "not an address".to_string(),
            ..alice()
        };

        let result = service(mailer.clone()).send_contact_email(request).await;

        assert!(matches!(result, Err(MailError::AddressFormat(_))));
        assert!(mailer.attempts().is_empty());
    }

    #[tokio::test]
    async fn submitter_markup_is_escaped() {
        let mailer = Arc::new(RecordingMailer::default());
        let request = ContactRequest {
            message: "<script>alert(1)</script>".to_string(),
            ..alice()
        };

        service(mailer.clone())
            .send_contact_email(request)
            .await
            .unwrap();

        for email in mailer.attempts() {
            assert!(!email.html.contains("<script>"));
            assert!(email.html.contains("&#60;script&#62;"));
        }
    }
}

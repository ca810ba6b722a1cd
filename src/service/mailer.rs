use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid email address format: {0}")]
    AddressFormat(#[from] lettre::address::AddressError),

    #[error("Failed to build email message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("Failed to render email template: {0}")]
    Template(#[from] askama::Error),

    #[error("SMTP transport error: {0}")]
    SmtpTransport(#[from] lettre::transport::smtp::Error),

    #[error("Failed to connect to SMTP relay: {0}")]
    SmtpRelay(lettre::transport::smtp::Error),

    #[cfg(test)]
    #[error("Relay rejected message: {0}")]
    Rejected(String),
}

/// A fully rendered HTML email, ready to hand to a [`Mailer`].
#[derive(Debug, Clone)]
pub struct Email {
    pub from: Mailbox,
    pub to: Mailbox,
    pub reply_to: Option<Mailbox>,
    pub subject: String,
    pub html: String,
}

/// Outbound mail transport.
///
/// Implementations are shared by every request handler, so they must be safe
/// to call concurrently.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn deliver(&self, email: Email) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(relay: &str, username: String, password: String) -> Result<Self, MailError> {
        let creds = Credentials::new(username, password);

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(relay)
            .map_err(MailError::SmtpRelay)?
            .credentials(creds)
            .build();

        Ok(Self { transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn deliver(&self, email: Email) -> Result<(), MailError> {
        let mut builder = Message::builder()
            .from(email.from)
            .to(email.to)
            .subject(email.subject)
            .header(ContentType::TEXT_HTML);

        if let Some(reply_to) = email.reply_to {
            builder = builder.reply_to(reply_to);
        }

        let message = builder.body(email.html)?;
        self.transport.send(message).await?;

        Ok(())
    }
}

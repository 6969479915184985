//! Email Dispatcher: delivers the rendered pathway as an SMTP attachment.
//!
//! The attachment is read from disk before the transport is touched, so an
//! unreadable file never opens a network session.

use std::path::Path;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::info;

use crate::config::SmtpConfig;

const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("failed to read attachment {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid message: {0}")]
    Compose(String),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Anything that can deliver a pathway email with a PDF attachment.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(
        &self,
        to_address: &str,
        subject: &str,
        body: &str,
        pdf_path: &Path,
    ) -> Result<(), MailError>;
}

/// Authenticated STARTTLS SMTP delivery.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailer {
    /// Builds the transport. No connection is made until the first send.
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let sender: Mailbox = config
            .username
            .parse()
            .map_err(|e| MailError::Compose(format!("sender address: {e}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport, sender })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(
        &self,
        to_address: &str,
        subject: &str,
        body: &str,
        pdf_path: &Path,
    ) -> Result<(), MailError> {
        let pdf = tokio::fs::read(pdf_path).await.map_err(|source| MailError::Io {
            path: pdf_path.display().to_string(),
            source,
        })?;

        let message = compose(
            &self.sender,
            to_address,
            subject,
            body,
            &attachment_name(pdf_path),
            pdf,
        )?;

        self.transport.send(message).await?;
        info!("Delivered pathway email to {to_address}");
        Ok(())
    }
}

/// Attachment filename is the base name of the PDF path.
pub fn attachment_name(pdf_path: &Path) -> String {
    pdf_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "pathway.pdf".to_string())
}

/// Builds the multipart message: a plain-text part and the PDF attachment.
pub fn compose(
    sender: &Mailbox,
    to_address: &str,
    subject: &str,
    body: &str,
    filename: &str,
    pdf: Vec<u8>,
) -> Result<Message, MailError> {
    let recipient: Mailbox = to_address
        .trim()
        .parse()
        .map_err(|e| MailError::Compose(format!("recipient address '{to_address}': {e}")))?;

    let content_type = ContentType::parse(PDF_CONTENT_TYPE)
        .map_err(|e| MailError::Compose(format!("content type: {e}")))?;

    Message::builder()
        .from(sender.clone())
        .to(recipient)
        .subject(subject)
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(body.to_string()))
                .singlepart(Attachment::new(filename.to_string()).body(pdf, content_type)),
        )
        .map_err(|e| MailError::Compose(e.to_string()))
}

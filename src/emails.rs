use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    Message,
};
use thiserror::Error;

use crate::{config::EmailConfig, mailer::Mailer};

const MOCK_SENDER: &str = "noreply@example.com";

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] lettre::address::AddressError),
    #[error("Failed to build email: {0}")]
    BuilderError(#[from] lettre::error::Error),
    #[error("Mailer error: {0}")]
    MailerError(String),
}

fn sender(config: &EmailConfig) -> Result<Mailbox, EmailError> {
    match config {
        EmailConfig::Smtp { sender, .. } => Ok(sender.clone()),
        EmailConfig::Mock => Ok(MOCK_SENDER.parse()?),
    }
}

/// Sends a plain text + HTML email.
pub async fn send_multipart_email(
    config: &EmailConfig,
    mailer: &Mailer,
    recipient: &str,
    subject: &str,
    text_body: String,
    html_body: String,
) -> Result<(), EmailError> {
    let email = Message::builder()
        .from(sender(config)?)
        .to(recipient.parse()?)
        .subject(subject)
        .multipart(
            MultiPart::alternative()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(text_body),
                )
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_HTML)
                        .body(html_body),
                ),
        )?;

    mailer
        .send(email)
        .await
        .map_err(|e| EmailError::MailerError(e.to_string()))
}

/// Emails the verification code for a pending registration.
pub async fn send_otp_email(
    config: &EmailConfig,
    mailer: &Mailer,
    recipient: &str,
    first_name: &str,
    code: &str,
    valid_minutes: u64,
) -> Result<(), EmailError> {
    let text_body = format!(
        "Hello {first_name},\n\nYour email verification code is {code}.\n\
         It is valid for {valid_minutes} minutes.\n"
    );
    let html_body = format!(
        "<p>Hello {first_name},</p>\
         <p>Your email verification code is <strong>{code}</strong>.</p>\
         <p>It is valid for {valid_minutes} minutes.</p>"
    );

    send_multipart_email(
        config,
        mailer,
        recipient,
        "Your admission registration code",
        text_body,
        html_body,
    )
    .await
}

use crate::config::EmailConfig;
use crate::config::addresses::Addresses;
use crate::email::error::TransportError;
use crate::email::error::TransportError::{
    CantBuildMessage, CantConnectToSmtpServer, CantSendMessage,
};
use crate::tools::log_message_and_return;
use mail_send::SmtpClientBuilder;
use mail_send::mail_builder::MessageBuilder;
use mail_send::mail_builder::headers::text::Text;
use mail_send::mail_builder::mime::MimePart;
use mail_send::smtp::message::Message;
use std::io;

type Result<T, E = TransportError> = std::result::Result<T, E>;

/// Hands a rendered email over to a mail server.
#[allow(async_fn_in_trait)]
pub trait Mailer {
    async fn send(&self, to: &[String], subject: &str, body_html: &str, cc: &[String]) -> Result<()>;
}

/// [`Mailer`] opening one STARTTLS connection per email, authenticated with the configured
/// credentials.
pub struct SmtpMailer {
    config: EmailConfig,
}

impl SmtpMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, to: &[String], subject: &str, body_html: &str, cc: &[String]) -> Result<()> {
        let failure = failure_message(to, cc);
        let from_address = self.config.from_address();
        let body = build_message(from_address, to, subject, body_html, cc)
            .map_err(log_message_and_return(&failure, CantBuildMessage))?;
        let mail_from = from_address.first().unwrap_or_default().to_owned();
        let message = Message::new(mail_from, envelope_recipients(to, cc), body);

        let mut smtp_client = SmtpClientBuilder::new(
            self.config.smtp_server().clone(),
            *self.config.smtp_port(),
        )
        .implicit_tls(false)
        .credentials((self.config.user().clone(), self.config.password().clone()))
        .connect()
        .await
        .map_err(log_message_and_return(&failure, CantConnectToSmtpServer))?;

        smtp_client
            .send(message)
            .await
            .map_err(log_message_and_return(&failure, CantSendMessage))?;

        if let Err(e) = smtp_client.quit().await {
            log::debug!("Couldn't close SMTP connection properly\n{e:#?}");
        }
        log::debug!("Email sent [to: {to:?}, cc: {cc:?}]");

        Ok(())
    }
}

fn failure_message(to: &[String], cc: &[String]) -> String {
    format!("Failed to send email [to: {to:?}, cc: {cc:?}]")
}

/// Envelope recipients: every `To` address, then every `Cc` address.
fn envelope_recipients(to: &[String], cc: &[String]) -> Vec<String> {
    to.iter().chain(cc).cloned().collect()
}

/// Raw `multipart/alternative` message holding a single HTML part.
/// Address headers are `;` separated; `Cc` is left out when empty.
fn build_message(
    from: &Addresses,
    to: &[String],
    subject: &str,
    body_html: &str,
    cc: &[String],
) -> io::Result<Vec<u8>> {
    let mut builder = MessageBuilder::new()
        .header("From", Text::new(from.join()))
        .header("To", Text::new(to.join(";")))
        .subject(subject);
    if !cc.is_empty() {
        builder = builder.header("Cc", Text::new(cc.join(";")));
    }

    builder
        .body(MimePart::new(
            "multipart/alternative",
            vec![MimePart::new("text/html", body_html)],
        ))
        .write_to_vec()
}

use crate::config::EmailConfig;
use crate::config::addresses::Addresses;
use crate::email::address::is_valid_email_address;
use crate::email::error::ValidationFailure;
use crate::email::error::ValidationFailure::{EmptyRecipients, InvalidAddresses};
use crate::email::smtp::{Mailer, SmtpMailer};
use crate::email::template::{DEFAULT_TEMPLATE_NAME, load_and_format_template};
use crate::error::Result;
use crate::notification::Notifier;
use derive_getters::Getters;
use std::collections::HashMap;

pub mod address;
pub mod error;
pub mod smtp;
pub mod template;

/// One email to send, built per call.
#[derive(Debug, Clone, Getters)]
pub struct SendRequest {
    recipients: Vec<String>,
    cc_recipients: Vec<String>,
    subject: String,
    link: String,
    template_name: String,
    template_parameters: HashMap<String, String>,
}

impl SendRequest {
    pub fn new(recipients: impl Into<Addresses>, subject: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            recipients: recipients.into().into_vec(),
            cc_recipients: vec![],
            subject: subject.into(),
            link: link.into(),
            template_name: DEFAULT_TEMPLATE_NAME.to_owned(),
            template_parameters: HashMap::new(),
        }
    }

    pub fn with_cc(mut self, cc_recipients: impl Into<Addresses>) -> Self {
        self.cc_recipients = cc_recipients.into().into_vec();
        self
    }

    /// Either `"default"` or the path of a template file.
    pub fn with_template(mut self, template_name: impl Into<String>) -> Self {
        self.template_name = template_name.into();
        self
    }

    pub fn with_template_parameters(mut self, template_parameters: HashMap<String, String>) -> Self {
        self.template_parameters = template_parameters;
        self
    }
}

/// Validates, renders and sends access emails.
///
/// Holds no state between calls besides its collaborators,
/// so a single service can be shared across tasks.
pub struct EmailService<N, M = SmtpMailer> {
    notifier: N,
    mailer: M,
}

impl<N: Notifier> EmailService<N> {
    pub fn new(config: EmailConfig, notifier: N) -> Self {
        Self::with_mailer(notifier, SmtpMailer::new(config))
    }
}

impl<N: Notifier, M: Mailer> EmailService<N, M> {
    pub fn with_mailer(notifier: N, mailer: M) -> Self {
        Self { notifier, mailer }
    }

    /// Send `request` once every address is valid.
    ///
    /// Invalid or missing addresses are reported through the notifier and the call
    /// returns `Ok(())` without sending anything. Template and transport failures are
    /// logged, then returned.
    pub async fn send_email(&self, request: &SendRequest) -> Result<()> {
        if let Err(failure) = validate(request) {
            self.notifier.notify(&failure.to_string());
            return Ok(());
        }

        let body = load_and_format_template(
            request.template_name(),
            request.link(),
            request.template_parameters(),
        )?;
        self.mailer
            .send(request.recipients(), request.subject(), &body, request.cc_recipients())
            .await?;

        Ok(())
    }
}

/// Check recipients then CC addresses, collecting every invalid one in order.
pub fn validate(request: &SendRequest) -> Result<(), ValidationFailure> {
    if request.recipients().is_empty() {
        return Err(EmptyRecipients);
    }

    let invalid_addresses: Vec<String> = request
        .recipients()
        .iter()
        .chain(request.cc_recipients())
        .filter(|address| !is_valid_email_address(address))
        .cloned()
        .collect();

    if invalid_addresses.is_empty() {
        Ok(())
    } else {
        Err(InvalidAddresses(invalid_addresses))
    }
}

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Can't read template file [path: {path:?}]")]
    CantReadTemplateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Template references an unknown placeholder [name: {0}]")]
    MissingPlaceholder(String),
    #[error("Template argument redefines a reserved placeholder [name: {0}]")]
    DuplicatePlaceholder(String),
    #[error("Template is malformed at byte {position}: {reason}")]
    MalformedTemplate { position: usize, reason: &'static str },
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Can't build MIME message")]
    CantBuildMessage(#[source] io::Error),
    #[error("Can't connect to SMTP server")]
    CantConnectToSmtpServer(#[source] mail_send::Error),
    #[error("Can't send message")]
    CantSendMessage(#[source] mail_send::Error),
}

/// Reasons for refusing a request before anything is rendered or sent.
/// The display form is the message handed to the notifier.
#[derive(Debug, PartialEq, Error)]
pub enum ValidationFailure {
    #[error("Empty list of email addresses")]
    EmptyRecipients,
    #[error("{}", describe_invalid_addresses(.0))]
    InvalidAddresses(Vec<String>),
}

fn describe_invalid_addresses(addresses: &[String]) -> String {
    let joined = addresses.join(",");
    if addresses.len() == 1 {
        format!("{joined} is not a valid email address")
    } else {
        format!("{joined} are not valid email addresses")
    }
}

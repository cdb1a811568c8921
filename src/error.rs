use crate::email::error::{TemplateError, TransportError};
use thiserror::Error;

pub type Result<T, E = EmailError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("The email template can't be rendered.")]
    Template(#[from] TemplateError),
    #[error("The email can't be handed to the SMTP server.")]
    Transport(#[from] TransportError),
}

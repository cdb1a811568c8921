//! Sends lab-environment access emails through an authenticated SMTP server.
//!
//! Recipients are checked first: malformed addresses are reported through a [`Notifier`]
//! and nothing is sent. Valid requests are rendered from the built-in template or from a
//! template file, then submitted over STARTTLS.

pub mod config;
pub mod email;
pub mod error;
pub mod notification;
mod tools;

pub use config::EmailConfig;
pub use config::addresses::Addresses;
pub use email::smtp::{Mailer, SmtpMailer};
pub use email::{EmailService, SendRequest};
pub use error::{EmailError, Result};
pub use notification::{LogNotifier, Notifier};

use crate::config::addresses::Addresses;
use derive_getters::Getters;
use serde::Deserialize;

pub mod addresses;

/// Where and as whom emails are sent.
/// Populated by the host application; values are used as-is.
#[derive(Debug, Clone, Getters, Deserialize)]
pub struct EmailConfig {
    smtp_server: String,
    smtp_port: u16,
    user: String,
    password: String,
    from_address: Addresses,
}

impl EmailConfig {
    pub fn new(
        smtp_server: String,
        smtp_port: u16,
        user: String,
        password: String,
        from_address: Addresses,
    ) -> Self {
        Self {
            smtp_server,
            smtp_port,
            user,
            password,
            from_address,
        }
    }
}

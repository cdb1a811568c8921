use serde::Deserialize;

/// One address or several, as accepted for senders and recipients.
/// Always read back as an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Addresses {
    One(String),
    Many(Vec<String>),
}

impl Addresses {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Addresses::One(address) => vec![address],
            Addresses::Many(addresses) => addresses,
        }
    }

    pub fn first(&self) -> Option<&str> {
        match self {
            Addresses::One(address) => Some(address),
            Addresses::Many(addresses) => addresses.first().map(String::as_str),
        }
    }

    /// Header form: addresses separated by `;`.
    pub fn join(&self) -> String {
        match self {
            Addresses::One(address) => address.clone(),
            Addresses::Many(addresses) => addresses.join(";"),
        }
    }
}

impl Default for Addresses {
    fn default() -> Self {
        Addresses::Many(vec![])
    }
}

impl From<&str> for Addresses {
    fn from(value: &str) -> Self {
        Addresses::One(value.to_owned())
    }
}

impl From<String> for Addresses {
    fn from(value: String) -> Self {
        Addresses::One(value)
    }
}

impl From<Vec<String>> for Addresses {
    fn from(value: Vec<String>) -> Self {
        Addresses::Many(value)
    }
}

impl From<Vec<&str>> for Addresses {
    fn from(value: Vec<&str>) -> Self {
        Addresses::Many(value.into_iter().map(str::to_owned).collect())
    }
}

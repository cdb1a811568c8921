use regex::Regex;
use std::sync::LazyLock;

/// Word-character local part and domain, `.` or `-` separated,
/// ending with one or more 2-3 character top-level domains (`.com`, `.co.uk`).
static EMAIL_ADDRESS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$")
        .expect("Email address pattern should compile")
});

/// Syntactic check only: no DNS lookup, and knowingly permissive.
/// The whole input must match.
pub fn is_valid_email_address(address: &str) -> bool {
    EMAIL_ADDRESS_REGEX.is_match(address)
}

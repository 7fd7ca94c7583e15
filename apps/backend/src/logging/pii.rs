use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Email pattern: matches standard email addresses
/// SAFETY: This regex pattern is a vetted literal that compiles successfully
fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
    });
    &EMAIL_REGEX
}

/// Base64-like token pattern: matches base64-encoded tokens (≥16 chars)
/// SAFETY: This regex pattern is a vetted literal that compiles successfully
fn token_regex() -> &'static Regex {
    static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"\b[A-Za-z0-9+/]{16,}={0,2}\b").unwrap()
    });
    &TOKEN_REGEX
}

/// Redacts sensitive information from a string.
///
/// This function conservatively masks:
/// - Emails: keeps first character of local part, replaces rest with ***, keeps full domain
/// - Opaque tokens: replaces base64-like runs (≥16 chars) with [REDACTED_TOKEN]
///
/// Order: emails first, then tokens, to avoid double-processing.
pub fn redact(input: &str) -> String {
    let email_redacted = email_regex().replace_all(input, |caps: &regex::Captures| {
        let full_match = &caps[0];
        match full_match.find('@') {
            Some(at_pos) if at_pos > 0 => {
                let first_char = &full_match[..1];
                let domain = &full_match[at_pos..];
                format!("{first_char}***{domain}")
            }
            _ => full_match.to_string(),
        }
    });

    token_regex()
        .replace_all(&email_redacted, "[REDACTED_TOKEN]")
        .to_string()
}

/// A wrapper that automatically redacts sensitive strings when displayed.
///
/// This provides ergonomic logging of sensitive data by automatically
/// applying PII redaction when the value is formatted for display.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

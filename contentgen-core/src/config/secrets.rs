//! API key wrapper
//!
//! Keys never show up in `Debug`/`Display` output, so configs holding them can
//! be logged and printed freely.

use std::fmt;

const REDACTED: &str = "[REDACTED]";

/// A credential that only `expose_secret` reveals
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw key, for building request headers
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First and last characters only, for log lines.
    ///
    /// Short or non-ASCII keys are fully hidden.
    pub fn partial_redact(&self) -> String {
        let key = self.0.as_str();
        match key.len() {
            0 => "[EMPTY]".to_string(),
            len if len <= 8 || !key.is_ascii() => REDACTED.to_string(),
            len => {
                let head = if key.starts_with("sk-") { 3 } else { 2 };
                let tail = if head == 3 { 4 } else { 2 };
                format!("{}...{}", &key[..head], &key[len - tail..])
            }
        }
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatting_hides_key() {
        let secret = SecretString::new("sk-1234567890abcdef");
        assert_eq!(secret.to_string(), "[REDACTED]");
        assert_eq!(format!("{:?}", Some(&secret)), "Some([REDACTED])");
        assert_eq!(secret.expose_secret(), "sk-1234567890abcdef");
    }

    #[test]
    fn test_partial_redaction() {
        let openai = SecretString::new("sk-1234567890abcdef");
        assert_eq!(openai.partial_redact(), "sk-...cdef");
        let gemini = SecretString::new("AIzaSyExample");
        assert_eq!(gemini.partial_redact(), "AI...le");
        assert_eq!(SecretString::new("abc").partial_redact(), "[REDACTED]");
        assert_eq!(SecretString::default().partial_redact(), "[EMPTY]");
    }
}

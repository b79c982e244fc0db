//! # Text Processing Utilities
//!
//! Helpers for showing secrets on a terminal without leaking them: a short
//! visible prefix for API keys and a regex pass that redacts anything that
//! looks like a credential before it reaches a log line.

use once_cell::sync::Lazy;
use regex::Regex;

static SENSITIVE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(bearer )([\w\-\.=:/+]+)",
        r"(?i)(authorization: )([\w\-\.=:/+]+)",
        r"(?i)([A-Z0-9_]*?(KEY|TOKEN|SECRET|PASSWORD)=)([^\s]+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("sensitive pattern should compile"))
    .collect()
});

/// Redacts values that look like secrets in a string.
///
/// # Example
/// ```rust
/// use codex_doctor_util::redact_sensitive;
///
/// assert_eq!(redact_sensitive("OPENAI_API_KEY=sk-abc123"), "OPENAI_API_KEY=<redacted>");
/// assert_eq!(redact_sensitive("Bearer sk-abc123 rejected"), "Bearer <redacted> rejected");
/// ```
pub fn redact_sensitive(input: &str) -> String {
    let mut redacted = input.to_string();
    for re in SENSITIVE_PATTERNS.iter() {
        redacted = re
            .replace_all(&redacted, |caps: &regex::Captures| {
                let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                format!("{}<redacted>", prefix)
            })
            .to_string();
    }
    redacted
}

/// Returns the first `visible_chars` characters of a secret followed by `...`.
///
/// Counts characters rather than bytes so multi-byte input never splits a
/// code point. The ellipsis is always appended, even for short values.
///
/// # Example
/// ```rust
/// use codex_doctor_util::secret_prefix;
///
/// assert_eq!(secret_prefix("sk-test1234567890123", 15), "sk-test12345678...");
/// assert_eq!(secret_prefix("short", 15), "short...");
/// ```
pub fn secret_prefix(secret: &str, visible_chars: usize) -> String {
    let mut prefix: String = secret.chars().take(visible_chars).collect();
    prefix.push_str("...");
    prefix
}

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Regex patterns for log redaction. Every pattern is a vetted literal.
struct Patterns {
    email: Regex,
    jwt: Regex,
    phc_hash: Regex,
    opaque: Regex,
}

#[allow(clippy::unwrap_used)]
static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| {
    Patterns {
        email: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap(),
        jwt: Regex::new(r"\beyJ[A-Za-z0-9_-]*\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*").unwrap(),
        phc_hash: Regex::new(r"\$argon2(?:id|i|d)\$[^\s]+").unwrap(),
        opaque: Regex::new(r"\b[A-Za-z0-9+/]{24,}={0,2}").unwrap(),
    }
});

/// Mask an email: first character of the local part, `***`, full domain.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) => format!("{first}***@{domain}"),
            None => format!("@{domain}"),
        },
        None => email.to_string(),
    }
}

/// Redacts sensitive information from a string.
///
/// Session tokens and password digests are removed entirely; emails keep
/// their first character and domain. Tokens go first so their base64
/// segments are never mistaken for anything else.
pub fn redact(input: &str) -> String {
    let p = &*PATTERNS;
    let out = p.jwt.replace_all(input, "[REDACTED_TOKEN]");
    let out = p.phc_hash.replace_all(&out, "[REDACTED_HASH]");
    let out = p
        .email
        .replace_all(&out, |caps: &regex::Captures| mask_email(&caps[0]));
    p.opaque.replace_all(&out, "[REDACTED_TOKEN]").into_owned()
}

/// A wrapper that redacts its contents when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

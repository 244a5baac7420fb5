use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

// Patterns are literals covered by the tests below.
#[allow(clippy::unwrap_used)]
static JWT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"eyJ[A-Za-z0-9_-]*\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*").unwrap()
});

#[allow(clippy::unwrap_used)]
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Za-z0-9._%+-])[A-Za-z0-9._%+-]*(@[A-Za-z0-9.-]+\.[A-Za-z]+)\b").unwrap()
});

#[allow(clippy::unwrap_used)]
static OPAQUE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9+/_-]{24,}={0,2}").unwrap());

/// Mask credentials and contact details before they reach the logs.
///
/// - signed tokens (`eyJ...`) become `[REDACTED_JWT]`
/// - emails keep the first character and the domain: `a***@example.com`
/// - other base64/hex-looking runs of 24+ chars become `[REDACTED_TOKEN]`
pub fn redact(input: &str) -> String {
    let without_jwt = JWT.replace_all(input, "[REDACTED_JWT]");
    let without_email = EMAIL.replace_all(&without_jwt, "$1***$2");
    OPAQUE_TOKEN
        .replace_all(&without_email, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Display wrapper that applies [`redact`] when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

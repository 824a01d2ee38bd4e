use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) const REDACTED: &str = "[REDACTED]";
pub(crate) const MAX_EXCERPT_CHARS: usize = 512;

static API_KEY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(api[_-]?key=)[^&\s#]+",
        r#"(?i)("api[_-]?key"\s*:\s*")[^"]*"#,
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
});

/// Scrubs a known credential out of text that may end up in logs or errors.
#[derive(Clone)]
pub(crate) struct Redactor {
    secret: String,
}

impl Redactor {
    pub(crate) fn new(secret: &str) -> Self {
        Self {
            secret: secret.to_string(),
        }
    }

    pub(crate) fn scrub(&self, text: &str) -> String {
        if self.secret.trim().is_empty() {
            scrub_patterns(text)
        } else {
            scrub_patterns(&text.replace(&self.secret, REDACTED))
        }
    }

    /// Scrubbed and truncated to [`MAX_EXCERPT_CHARS`].
    pub(crate) fn excerpt(&self, body: &str) -> String {
        excerpt(&self.scrub(body))
    }
}

/// Masks `api_key` values in query strings and JSON fragments.
pub(crate) fn scrub_patterns(text: &str) -> String {
    let mut scrubbed = text.to_string();
    for pattern in API_KEY_PATTERNS.iter() {
        scrubbed = pattern
            .replace_all(&scrubbed, |caps: &regex::Captures<'_>| {
                format!("{}{REDACTED}", &caps[1])
            })
            .into_owned();
    }
    scrubbed
}

pub(crate) fn excerpt(text: &str) -> String {
    let scrubbed = scrub_patterns(text);
    let trimmed = scrubbed.trim();
    match trimmed.char_indices().nth(MAX_EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrubs_query_parameter() {
        let redactor = Redactor::new("");
        let out = redactor.scrub("GET /getRoutes.php?api_key=abc123&host=2 failed");
        assert_eq!(out, "GET /getRoutes.php?api_key=[REDACTED]&host=2 failed");
    }

    #[test]
    fn scrubs_literal_secret_anywhere() {
        let redactor = Redactor::new("s3cr3t-key");
        let out = redactor.scrub(r#"{"error":"key s3cr3t-key expired","api_key":"s3cr3t-key"}"#);
        assert!(!out.contains("s3cr3t-key"));
        assert!(out.contains(REDACTED));
    }

    #[test]
    fn whitespace_secret_leaves_text_intact() {
        let redactor = Redactor::new("   ");
        assert_eq!(redactor.scrub("a   b"), "a   b");
    }

    #[test]
    fn excerpt_truncates_long_bodies_on_char_boundary() {
        let body = "é".repeat(MAX_EXCERPT_CHARS + 10);
        let cut = excerpt(&body);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), MAX_EXCERPT_CHARS + 3);
    }

    #[test]
    fn excerpt_masks_key_fragments() {
        assert_eq!(
            excerpt(r#"{"api_key": "leaked"}"#),
            r#"{"api_key": "[REDACTED]"}"#
        );
    }

    #[test]
    fn excerpt_keeps_short_bodies() {
        assert_eq!(excerpt("  {\"success\":false}\n"), "{\"success\":false}");
    }
}

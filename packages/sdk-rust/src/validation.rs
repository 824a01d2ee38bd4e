use reqwest::Url;

use crate::error::HProxyError;

fn ensure_not_blank<'a>(value: &'a str, field: &str) -> Result<&'a str, HProxyError> {
    if value.trim().is_empty() {
        Err(HProxyError::Configuration(format!("{field} is required")))
    } else {
        Ok(value)
    }
}

/// The key is opaque: only an empty string is rejected and the value is kept
/// byte for byte.
pub fn api_key(raw: &str) -> Result<String, HProxyError> {
    if raw.is_empty() {
        return Err(HProxyError::Configuration("API key is required".to_string()));
    }
    Ok(raw.to_string())
}

/// Trims a filter value; blank input means "not supplied".
pub fn optional_value(raw: Option<&str>) -> Option<String> {
    match raw.map(str::trim) {
        Some(value) if value.is_empty() => None,
        Some(value) => Some(value.to_string()),
        None => None,
    }
}

pub fn base_url(raw: &str) -> Result<String, HProxyError> {
    let trimmed = ensure_not_blank(raw, "base URL")?
        .trim()
        .trim_end_matches('/');

    let parsed = Url::parse(trimmed)
        .map_err(|error| HProxyError::Configuration(format!("invalid base URL '{trimmed}': {error}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(HProxyError::Configuration(format!(
            "unsupported base URL scheme '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_api_key() {
        let err = api_key("").unwrap_err();
        assert!(matches!(err, HProxyError::Configuration(_)));
    }

    #[test]
    fn keeps_api_key_unchanged() {
        for raw in ["   ", " abc ", "k\nk"] {
            assert_eq!(api_key(raw).unwrap(), raw);
        }
        let long = "k".repeat(300);
        assert_eq!(api_key(&long).unwrap(), long);
    }

    #[test]
    fn optional_value_filters_blank() {
        assert_eq!(optional_value(Some("  ")), None);
        assert_eq!(optional_value(None), None);
        assert_eq!(optional_value(Some(" US ")), Some("US".to_string()));
    }

    #[test]
    fn base_url_strips_trailing_slash() {
        assert_eq!(
            base_url("http://127.0.0.1:8080/api/v1/").unwrap(),
            "http://127.0.0.1:8080/api/v1"
        );
    }

    #[test]
    fn base_url_rejects_other_schemes() {
        assert!(base_url("ftp://hproxy.xyz").is_err());
        assert!(base_url("not a url").is_err());
    }
}

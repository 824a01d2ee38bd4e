use thiserror::Error;

use crate::endpoint::Endpoint;
use crate::redact::Redactor;

#[derive(Debug, Error)]
pub enum HProxyError {
    #[error("invalid client configuration: {0}")]
    Configuration(String),
    #[error("{endpoint}: bad request (HTTP 400), parameters missing or invalid: {excerpt}")]
    BadRequest {
        endpoint: Endpoint,
        body: String,
        /// `body` with the API key masked and long content cut.
        excerpt: String,
    },
    #[error("{endpoint}: API key rejected (HTTP 401), invalid or expired: {excerpt}")]
    Authentication {
        endpoint: Endpoint,
        body: String,
        excerpt: String,
    },
    #[error("{endpoint}: HTTP {status}: {excerpt}")]
    Http {
        endpoint: Endpoint,
        status: u16,
        body: String,
        excerpt: String,
    },
    #[error("{endpoint}: transport failure: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint}: response body is not valid JSON: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },
}

impl HProxyError {
    /// Classifies a non-2xx response.
    pub(crate) fn from_status(
        endpoint: Endpoint,
        status: u16,
        body: String,
        redactor: &Redactor,
    ) -> Self {
        let excerpt = redactor.excerpt(&body);
        match status {
            400 => HProxyError::BadRequest {
                endpoint,
                body,
                excerpt,
            },
            401 => HProxyError::Authentication {
                endpoint,
                body,
                excerpt,
            },
            _ => HProxyError::Http {
                endpoint,
                status,
                body,
                excerpt,
            },
        }
    }

    pub(crate) fn transport(endpoint: Endpoint, source: reqwest::Error) -> Self {
        // The request URL carries the API key in its query string.
        HProxyError::Transport {
            endpoint,
            source: source.without_url(),
        }
    }

    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            HProxyError::BadRequest { .. } => Some(400),
            HProxyError::Authentication { .. } => Some(401),
            HProxyError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            HProxyError::Configuration(_) => None,
            HProxyError::BadRequest { endpoint, .. }
            | HProxyError::Authentication { endpoint, .. }
            | HProxyError::Http { endpoint, .. }
            | HProxyError::Transport { endpoint, .. }
            | HProxyError::Decode { endpoint, .. } => Some(*endpoint),
        }
    }

    /// Raw response body for HTTP-level failures. May echo the API key; use
    /// the `Display` output when logging.
    pub fn body(&self) -> Option<&str> {
        match self {
            HProxyError::BadRequest { body, .. }
            | HProxyError::Authentication { body, .. }
            | HProxyError::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            HProxyError::Configuration(_) => "configuration",
            HProxyError::BadRequest { .. } => "bad_request",
            HProxyError::Authentication { .. } => "authentication",
            HProxyError::Http { .. } => "http",
            HProxyError::Transport { .. } => "transport",
            HProxyError::Decode { .. } => "decode",
        }
    }
}

use std::fmt;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info_span, warn};
use uuid::Uuid;

use crate::audit::{self, CallDetails, Outcome};
use crate::endpoint::Endpoint;
use crate::error::HProxyError;
use crate::models;
use crate::options::NewProxyOptions;
use crate::redact::Redactor;
use crate::validation;

pub const DEFAULT_BASE_URL: &str = "https://hproxy.xyz/public/api/v1";

const API_KEY_PARAM: &str = "api_key";
const DEFAULT_USER_AGENT: &str = concat!("hproxy-sdk/", env!("CARGO_PKG_VERSION"));

pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: None,
        }
    }

    pub fn base_url<T: Into<String>>(mut self, base_url: T) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overall request timeout. Unset means the transport default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent<T: Into<String>>(mut self, user_agent: T) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<Client, HProxyError> {
        let api_key = validation::api_key(&self.api_key)?;
        let base_url = validation::base_url(&self.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .user_agent(
                self.user_agent
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            );
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder.build().map_err(|e| {
            HProxyError::Configuration(format!("failed to create HTTP client: {e}"))
        })?;

        Ok(Client {
            redactor: Redactor::new(&api_key),
            api_key,
            base_url,
            http_client,
        })
    }
}

/// Blocking client for the HProxy public API.
///
/// Holds one reusable connection for its whole lifetime. Every request carries
/// the API key as the `api_key` query parameter; callers cannot override it.
pub struct Client {
    api_key: String,
    base_url: String,
    http_client: reqwest::blocking::Client,
    redactor: Redactor,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_key", &crate::redact::REDACTED)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Client {
    pub fn new<T: Into<String>>(api_key: T) -> Result<Self, HProxyError> {
        Self::builder(api_key).build()
    }

    pub fn builder<T: Into<String>>(api_key: T) -> ClientBuilder {
        ClientBuilder::new(api_key.into())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a GET to `endpoint` and returns the decoded JSON body unchanged.
    ///
    /// Non-2xx responses and transport failures are logged with the endpoint,
    /// status and a body excerpt, then returned as [`HProxyError`].
    pub fn call(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> Result<Value, HProxyError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("hproxy_call", endpoint = %endpoint, request_id = %request_id);
        let _entered = span.enter();

        let started = Instant::now();
        let result = self.execute(endpoint, params);
        let elapsed_ms = started.elapsed().as_millis();

        match &result {
            Ok((status, _)) => audit::log_call(
                endpoint.path(),
                Outcome::Success,
                request_id,
                Some(CallDetails {
                    status: Some(*status),
                    error: None,
                    elapsed_ms,
                }),
            ),
            Err(error) => {
                self.report(error);
                audit::log_call(
                    endpoint.path(),
                    Outcome::Failure,
                    request_id,
                    Some(CallDetails {
                        status: error.status(),
                        error: Some(error.kind()),
                        elapsed_ms,
                    }),
                );
            }
        }

        result.map(|(_, body)| body)
    }

    /// [`Client::call`] followed by decoding into one of the [`models`] types.
    pub fn call_as<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        params: &[(&str, &str)],
    ) -> Result<T, HProxyError> {
        let value = self.call(endpoint, params)?;
        models::decode(endpoint, value)
    }

    pub fn get_all_locations(&self) -> Result<Value, HProxyError> {
        self.call(Endpoint::GetAllLocations, &[])
    }

    pub fn get_routes(&self) -> Result<Value, HProxyError> {
        self.call(Endpoint::GetRoutes, &[])
    }

    pub fn get_proto_types(&self) -> Result<Value, HProxyError> {
        self.call(Endpoint::GetProtoTypes, &[])
    }

    pub fn get_current_proxy(&self) -> Result<Value, HProxyError> {
        self.call(Endpoint::GetCurrentProxy, &[])
    }

    /// Requests a new (rotated) proxy. Unset filters are not sent.
    pub fn get_new_proxy(&self, options: &NewProxyOptions) -> Result<Value, HProxyError> {
        let params = options.to_params();
        let borrowed: Vec<(&str, &str)> = params
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        self.call(Endpoint::GetNewProxy, &borrowed)
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    fn query<'a>(&'a self, params: &[(&'a str, &'a str)]) -> Vec<(&'a str, &'a str)> {
        let mut query = Vec::with_capacity(params.len() + 1);
        query.push((API_KEY_PARAM, self.api_key.as_str()));

        for &(name, value) in params {
            if name == API_KEY_PARAM {
                warn!("ignoring caller-supplied api_key parameter");
                continue;
            }
            query.push((name, value));
        }

        query
    }

    fn execute(
        &self,
        endpoint: Endpoint,
        params: &[(&str, &str)],
    ) -> Result<(u16, Value), HProxyError> {
        let query = self.query(params);
        debug!(
            params = ?query.iter().skip(1).collect::<Vec<_>>(),
            "sending request"
        );

        let response = self
            .http_client
            .get(self.url(endpoint))
            .query(&query)
            .send()
            .map_err(|e| HProxyError::transport(endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| HProxyError::transport(endpoint, e))?;

        if !status.is_success() {
            return Err(HProxyError::from_status(
                endpoint,
                status.as_u16(),
                body,
                &self.redactor,
            ));
        }

        let value = serde_json::from_str(&body)
            .map_err(|source| HProxyError::Decode { endpoint, source })?;
        Ok((status.as_u16(), value))
    }

    fn report(&self, error: &HProxyError) {
        match error {
            HProxyError::BadRequest { excerpt, .. } => warn!(
                status = 400,
                body = %excerpt,
                "request rejected; parameters may be missing or invalid"
            ),
            HProxyError::Authentication { excerpt, .. } => warn!(
                status = 401,
                body = %excerpt,
                "API key is invalid or expired"
            ),
            HProxyError::Http {
                status, excerpt, ..
            } => warn!(
                status = *status,
                body = %excerpt,
                "HTTP error from API"
            ),
            HProxyError::Transport { source, .. } => warn!(
                error = %self.redactor.scrub(&source.to_string()),
                "could not reach API"
            ),
            HProxyError::Decode { source, .. } => warn!(
                error = %source,
                "response body is not valid JSON"
            ),
            HProxyError::Configuration(message) => warn!(error = %message, "client misconfigured"),
        }
    }
}

//! # HTTP Transport
//!
//! Sends one request to the Payments API and hands back the raw status and
//! body. Interpreting the status is left to the caller, because each
//! endpoint has its own notion of success.

use checkout_core::{CallOptions, CheckoutError, CheckoutResult};
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Authorization attached to a request
#[derive(Clone)]
pub enum AuthScheme {
    Basic { username: String, password: String },
    Bearer(String),
}

impl std::fmt::Debug for AuthScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthScheme::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            AuthScheme::Bearer(_) => f.write_str("Bearer(<redacted>)"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Form(Vec<(String, String)>),
    Json(serde_json::Value),
}

/// A single call against the gateway, relative to the configured base URL.
///
/// `path` is a fixed endpoint prefix. Caller-supplied values (ids) go into
/// `segments`, each percent-encoded as exactly one path segment.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub method: Method,
    pub path: String,
    pub segments: Vec<String>,
    pub auth: Option<AuthScheme>,
    pub headers: Vec<(&'static str, String)>,
    pub body: RequestBody,
}

impl GatewayRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            segments: Vec::new(),
            auth: None,
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Append one path segment. `/`, `?`, `#` and `%` are encoded, never interpreted.
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Path for logging, segments shown unencoded
    pub fn display_path(&self) -> String {
        let mut path = self.path.clone();
        for segment in &self.segments {
            path.push('/');
            path.push_str(segment);
        }
        path
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(AuthScheme::Basic {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(AuthScheme::Bearer(token.into()));
        self
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn form(mut self, pairs: &[(&str, &str)]) -> Self {
        self.body = RequestBody::Form(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        self
    }

    /// Attach a JSON body. Fails only if `payload` cannot be represented as JSON.
    pub fn json<T: Serialize>(mut self, payload: &T) -> CheckoutResult<Self> {
        let value = serde_json::to_value(payload)
            .map_err(|e| CheckoutError::Serialization(e.to_string()))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }
}

/// Status and body of a gateway response, untouched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON, keeping the raw text on failure
    pub fn decode<T: DeserializeOwned>(&self) -> CheckoutResult<T> {
        serde_json::from_str(&self.body).map_err(|e| CheckoutError::Decode {
            message: e.to_string(),
            body: self.body.clone(),
        })
    }
}

/// Thin wrapper around a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    default_timeout: Duration,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, default_timeout: Duration) -> CheckoutResult<Self> {
        let client = Client::builder()
            .timeout(default_timeout)
            .build()
            .map_err(|e| {
                CheckoutError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str, segments: &[String]) -> CheckoutResult<Url> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| {
            CheckoutError::Configuration(format!("Invalid gateway URL {}: {}", raw, e))
        })?;

        if !segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| {
                    CheckoutError::Configuration(format!("Gateway URL {} cannot take a path", raw))
                })?
                .pop_if_empty()
                .extend(segments);
        }

        Ok(url)
    }

    /// Perform the request once. Never retries.
    ///
    /// The call's timeout (or the transport default) bounds the whole
    /// exchange including the body. Cancellation wins over an in-flight
    /// request.
    #[instrument(skip(self, request, call), fields(method = %request.method, path = %request.display_path()))]
    pub async fn send(
        &self,
        request: GatewayRequest,
        call: &CallOptions,
    ) -> CheckoutResult<RawResponse> {
        if call.is_cancelled() {
            return Err(CheckoutError::Cancelled);
        }

        let timeout = call.timeout.unwrap_or(self.default_timeout);
        let url = self.url(&request.path, &request.segments)?;
        let mut builder = self.client.request(request.method, url).timeout(timeout);

        builder = match request.auth {
            Some(AuthScheme::Basic { username, password }) => {
                builder.basic_auth(username, Some(password))
            }
            Some(AuthScheme::Bearer(token)) => builder.bearer_auth(token),
            None => builder,
        };

        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(pairs) => builder.form(&pairs),
            RequestBody::Json(value) => builder.json(&value),
        };

        let exchange = async {
            let response = builder.send().await.map_err(transport_error)?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(transport_error)?;
            Ok(RawResponse { status, body })
        };

        tokio::select! {
            biased;
            _ = call.cancellation.cancelled() => {
                warn!("Gateway request cancelled before completion");
                Err(CheckoutError::Cancelled)
            }
            result = exchange => {
                if let Ok(ref response) = result {
                    debug!(status = response.status, "Gateway responded");
                }
                result
            }
        }
    }
}

fn transport_error(e: reqwest::Error) -> CheckoutError {
    if e.is_timeout() {
        CheckoutError::Transport(format!("request timed out: {}", e))
    } else {
        CheckoutError::Transport(e.to_string())
    }
}

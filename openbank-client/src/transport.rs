//! Transport port and its reqwest adapter.
//!
//! [`PixService`](crate::PixService) only ever talks to a [`Transport`].
//! [`HttpTransport`] is the production implementation; tests plug in fakes.

use std::sync::Arc;

use async_trait::async_trait;
use openbank_types::{IDEMPOTENCY_KEY_HEADER, IdempotencyKey};
use reqwest::{Method, Url};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::response::ResponseMeta;

/// A request ready to be handed to a [`Transport`].
///
/// The path is kept as raw segments relative to the transport's base URL.
/// Each segment is percent-encoded on its own, so `/`, `?` and `#` inside an
/// id never change the resource being addressed.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    segments: Vec<String>,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Starts a request at a fixed, already well-formed path template.
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    /// Appends one path segment taken verbatim from caller input.
    pub fn segment(mut self, value: impl Into<String>) -> Self {
        self.segments.push(value.into());
        self
    }

    /// Sets the JSON body.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body).map_err(ClientError::Encode)?);
        Ok(self)
    }

    /// Appends query parameters from a struct of scalar fields.
    ///
    /// `None` fields are skipped.
    pub fn query<Q: Serialize>(mut self, params: &Q) -> Result<Self, ClientError> {
        let serde_json::Value::Object(map) =
            serde_json::to_value(params).map_err(ClientError::Encode)?
        else {
            return Err(ClientError::InvalidRequest(
                "query parameters must serialize to an object".into(),
            ));
        };

        for (name, value) in map {
            let value = match value {
                serde_json::Value::Null => continue,
                serde_json::Value::String(s) => s,
                serde_json::Value::Bool(_) | serde_json::Value::Number(_) => value.to_string(),
                _ => {
                    return Err(ClientError::InvalidRequest(format!(
                        "query parameter {} must be a scalar",
                        name
                    )));
                }
            };
            self.query.push((name, value));
        }
        Ok(self)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attaches the idempotency header, rejecting keys over the maximum length.
    pub fn idempotency_key(self, key: &str) -> Result<Self, ClientError> {
        let key = IdempotencyKey::new(key)?;
        Ok(self.header(IDEMPOTENCY_KEY_HEADER, key.into_inner()))
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path_segments(&self) -> &[String] {
        &self.segments
    }

    /// Encoded path, as it appears on the request line.
    pub fn path(&self) -> String {
        Url::parse("http://localhost/")
            .ok()
            .and_then(|root| self.url(&root).ok())
            .map(|url| url.path().to_string())
            .unwrap_or_default()
    }

    /// Resolves the request path against `base`, keeping any path prefix it has.
    pub fn url(&self, base: &Url) -> Result<Url, ClientError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::Config(format!("Base URL cannot have a path: {}", base)))?
            .pop_if_empty()
            .extend(&self.segments);
        Ok(url)
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First value of a header, matched case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }
}

/// Undecoded response as returned by a [`Transport`].
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub meta: ResponseMeta,
    pub body: Vec<u8>,
}

/// Port trait for sending requests to the API.
///
/// Implementations own connection handling, base URL and authentication.
/// They must return non-2xx responses as `Ok` so callers can inspect them.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        (**self).send(request).await
    }
}

/// reqwest-backed [`Transport`].
///
/// Cloning is cheap: the connection pool is shared.
#[derive(Clone)]
pub struct HttpTransport {
    base_url: Url,
    access_token: Option<String>,
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ClientError::Config(format!("Invalid base URL {}: {}", config.base_url, e))
        })?;

        Ok(Self {
            base_url,
            access_token: config.access_token.clone(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url())
            .field("authenticated", &self.access_token.is_some())
            .finish()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path()))]
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        let url = request.url(&self.base_url)?;
        let mut req = self.http.request(request.method, url);

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if let Some(token) = &self.access_token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        debug!("Sending request");
        let resp = req.send().await?;

        let meta = ResponseMeta::new(resp.status(), resp.headers().clone());
        let body = resp.bytes().await?.to_vec();

        if meta.status.is_success() {
            debug!(status = %meta.status, bytes = body.len(), "Received response");
        } else {
            warn!(status = %meta.status, "API returned an error status");
        }

        Ok(RawResponse { meta, body })
    }
}

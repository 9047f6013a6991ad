//! Shared request execution: status handling and response decoding.

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::pix::PixService;
use crate::response::ApiResponse;
use crate::transport::{ApiRequest, HttpTransport, RawResponse, Transport};

/// Stone Openbank API client.
///
/// Generic over `T: Transport` so the HTTP layer can be swapped, e.g. for a
/// recording fake in tests. Stateless apart from the transport, so a single
/// instance can be shared across tasks.
#[derive(Debug, Clone)]
pub struct OpenBankClient<T: Transport = HttpTransport> {
    transport: T,
}

impl OpenBankClient<HttpTransport> {
    /// Creates a client backed by reqwest.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::with_transport(HttpTransport::new(&config)?))
    }

    /// Creates a client from `OPENBANK_*` environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport> OpenBankClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// PIX operations.
    pub fn pix(&self) -> PixService<'_, T> {
        PixService::new(self)
    }

    /// Sends `request` and decodes a successful body into `R`.
    pub async fn execute<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<ApiResponse<R>, ClientError> {
        let resp = self.send_checked(request).await?;
        match serde_json::from_slice(&resp.body) {
            Ok(value) => Ok(ApiResponse {
                value,
                meta: resp.meta,
            }),
            Err(source) => Err(ClientError::Decode {
                meta: resp.meta,
                source,
            }),
        }
    }

    /// Sends `request` and discards the body of a successful response.
    pub async fn execute_empty(&self, request: ApiRequest) -> Result<ApiResponse<()>, ClientError> {
        let resp = self.send_checked(request).await?;
        Ok(ApiResponse {
            value: (),
            meta: resp.meta,
        })
    }

    async fn send_checked(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        let resp = self.transport.send(request).await?;
        if resp.meta.status.is_success() {
            Ok(resp)
        } else {
            let message = error_message(&resp.body);
            Err(ClientError::Api {
                meta: resp.meta,
                message,
            })
        }
    }
}

/// Pulls a human readable message out of an error body.
fn error_message(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body).into_owned();
    serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| {
            ["message", "error", "type"]
                .iter()
                .find_map(|field| v.get(field).and_then(|e| e.as_str()).map(String::from))
        })
        .unwrap_or(text)
}

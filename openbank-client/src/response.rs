//! Successful results and the response metadata attached to them.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;

/// Status line and headers of an HTTP response.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    pub status: StatusCode,
    pub headers: HeaderMap,
}

impl ResponseMeta {
    pub fn new(status: StatusCode, headers: HeaderMap) -> Self {
        Self { status, headers }
    }

    /// Value of a header, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A decoded value together with the response it came from.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub value: T,
    pub meta: ResponseMeta,
}

impl<T> ApiResponse<T> {
    pub fn status(&self) -> StatusCode {
        self.meta.status
    }

    /// Drops the metadata.
    pub fn into_value(self) -> T {
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            value: f(self.value),
            meta: self.meta,
        }
    }
}

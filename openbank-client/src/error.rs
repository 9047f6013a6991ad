//! Error type for client operations.

use openbank_types::DomainError;
use reqwest::StatusCode;

use crate::response::ResponseMeta;

/// Everything that can go wrong between building a request and decoding
/// its response.
///
/// Variants raised before the request leaves the process carry no response
/// metadata; `Api` and `Decode` always do.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid idempotency key: {len} bytes exceeds maximum of {max}")]
    InvalidIdempotencyKey { len: usize, max: usize },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {} - {message}", .meta.status)]
    Api { meta: ResponseMeta, message: String },

    #[error("Failed to decode response ({}): {source}", .meta.status)]
    Decode {
        meta: ResponseMeta,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Response metadata, when the error happened after a response arrived.
    pub fn response(&self) -> Option<&ResponseMeta> {
        match self {
            ClientError::Api { meta, .. } | ClientError::Decode { meta, .. } => Some(meta),
            _ => None,
        }
    }

    /// HTTP status of the response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http(err) => err.status(),
            other => other.response().map(|meta| meta.status),
        }
    }

    /// True for errors raised before any network IO.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidIdempotencyKey { .. }
                | ClientError::InvalidRequest(_)
                | ClientError::Encode(_)
                | ClientError::Config(_)
        )
    }
}

impl From<DomainError> for ClientError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::IdempotencyKeyTooLong { len, max } => {
                ClientError::InvalidIdempotencyKey { len, max }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderMap;

    #[test]
    fn test_domain_error_maps_to_local_error() {
        let err: ClientError = DomainError::IdempotencyKeyTooLong { len: 80, max: 72 }.into();
        assert!(matches!(
            err,
            ClientError::InvalidIdempotencyKey { len: 80, max: 72 }
        ));
        assert!(err.is_local());
        assert!(err.response().is_none());
        assert!(err.status().is_none());
    }

    #[test]
    fn test_api_error_exposes_metadata() {
        let err = ClientError::Api {
            meta: ResponseMeta::new(StatusCode::UNPROCESSABLE_ENTITY, HeaderMap::new()),
            message: "invalid key".into(),
        };
        assert_eq!(err.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(!err.is_local());
        assert_eq!(
            err.to_string(),
            "API error: 422 Unprocessable Entity - invalid key"
        );
    }
}

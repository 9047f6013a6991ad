//! Idempotency key forwarded on mutating requests.

use std::fmt;

use crate::error::DomainError;

/// Header carrying the caller-supplied idempotency key.
pub const IDEMPOTENCY_KEY_HEADER: &str = "x-stone-idempotency-key";

/// Maximum accepted key length, in bytes.
pub const IDEMPOTENCY_KEY_MAX_LEN: usize = 72;

/// A key known to fit within [`IDEMPOTENCY_KEY_MAX_LEN`].
///
/// The value is forwarded verbatim; no trimming or normalisation happens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Validates the key length.
    pub fn new(key: impl Into<String>) -> Result<Self, DomainError> {
        let key = key.into();
        if key.len() > IDEMPOTENCY_KEY_MAX_LEN {
            return Err(DomainError::IdempotencyKeyTooLong {
                len: key.len(),
                max: IDEMPOTENCY_KEY_MAX_LEN,
            });
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for IdempotencyKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for IdempotencyKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

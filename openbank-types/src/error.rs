//! Error types for the PIX domain.

/// Domain-level errors (local validation, raised before any IO).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("Idempotency key too long: {len} bytes, maximum is {max}")]
    IdempotencyKeyTooLong { len: usize, max: usize },
}

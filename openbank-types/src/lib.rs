//! # Openbank Types
//!
//! Wire types for the Stone Openbank PIX API.
//! This crate has ZERO IO dependencies - only data structures and the
//! small amount of validation that must happen before a request is sent.
//!
//! ## Layout
//!
//! - `domain/` - Shared value types (Party, PixPaymentStatus, QrCode, IdempotencyKey)
//! - `dto/` - Request and response bodies, one pair per PIX operation
//! - `error/` - Local validation errors

pub mod domain;
pub mod dto;
pub mod error;
mod serde_util;

// Re-export commonly used types
pub use domain::{
    Customer, DynamicQrCode, Entity, IDEMPOTENCY_KEY_HEADER, IDEMPOTENCY_KEY_MAX_LEN,
    IdempotencyKey, Institution, Party, PartyAccount, PixPaymentStatus, QrCode, StaticQrCode,
};
pub use dto::*;
pub use error::DomainError;

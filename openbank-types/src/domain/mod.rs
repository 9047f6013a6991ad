//! Domain models for the PIX API.

pub mod idempotency;
pub mod party;
pub mod qrcode;
pub mod status;

pub use idempotency::{IDEMPOTENCY_KEY_HEADER, IDEMPOTENCY_KEY_MAX_LEN, IdempotencyKey};
pub use party::{Customer, Entity, Institution, Party, PartyAccount};
pub use qrcode::{DynamicQrCode, QrCode, StaticQrCode};
pub use status::PixPaymentStatus;

//! # Openbank Client SDK
//!
//! A typed Rust client for the Stone Openbank PIX API.
//!
//! ```rust,no_run
//! use openbank_client::{ClientConfig, Environment, OpenBankClient};
//! use openbank_types::CreatePendingPaymentRequest;
//!
//! # async fn run() -> Result<(), openbank_client::ClientError> {
//! let config = ClientConfig::new(Environment::Sandbox).with_access_token("token");
//! let client = OpenBankClient::new(config)?;
//!
//! let request = CreatePendingPaymentRequest {
//!     account_id: Some("account-id".into()),
//!     amount: Some(1000),
//!     key: Some("+5511999999999".into()),
//!     ..Default::default()
//! };
//! let pending = client
//!     .pix()
//!     .create_pending_payment(&request, "order-42")
//!     .await?;
//! println!("created {} ({})", pending.value.id, pending.value.status);
//! # Ok(())
//! # }
//! ```
//!
//! ## Layout
//!
//! - `transport/` - `Transport` port and the reqwest adapter
//! - `client/` - request execution, status handling, decoding
//! - `pix/` - one method per PIX operation

mod client;
mod config;
mod error;
mod pix;
mod response;
mod transport;

#[cfg(test)]
mod pix_tests;

pub use client::OpenBankClient;
pub use config::{ClientConfig, Environment};
pub use error::ClientError;
pub use pix::PixService;
pub use response::{ApiResponse, ResponseMeta};
pub use transport::{ApiRequest, HttpTransport, RawResponse, Transport};

//! Outbound payment status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an outbound PIX payment.
///
/// The set is open: statuses the server introduces later decode into
/// [`PixPaymentStatus::Other`] instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PixPaymentStatus {
    Created,
    Failed,
    MoneyReserved,
    Settled,
    Refunded,
    Other(String),
}

impl PixPaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PixPaymentStatus::Created => "CREATED",
            PixPaymentStatus::Failed => "FAILED",
            PixPaymentStatus::MoneyReserved => "MONEY_RESERVED",
            PixPaymentStatus::Settled => "SETTLED",
            PixPaymentStatus::Refunded => "REFUNDED",
            PixPaymentStatus::Other(s) => s,
        }
    }

    /// Returns true once the payment can no longer change state.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            PixPaymentStatus::Failed | PixPaymentStatus::Settled | PixPaymentStatus::Refunded
        )
    }
}

impl From<String> for PixPaymentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "CREATED" => PixPaymentStatus::Created,
            "FAILED" => PixPaymentStatus::Failed,
            "MONEY_RESERVED" => PixPaymentStatus::MoneyReserved,
            "SETTLED" => PixPaymentStatus::Settled,
            "REFUNDED" => PixPaymentStatus::Refunded,
            _ => PixPaymentStatus::Other(s),
        }
    }
}

impl From<PixPaymentStatus> for String {
    fn from(status: PixPaymentStatus) -> Self {
        match status {
            PixPaymentStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PixPaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

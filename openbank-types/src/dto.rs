//! Data Transfer Objects (DTOs) for PIX requests and responses.
//!
//! Field names match the API's JSON exactly.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Customer, Entity, Party, PixPaymentStatus};
use crate::serde_util::null_to_default;

// ─────────────────────────────────────────────────────────────────────────────
// Pending payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a pending (not yet confirmed) outbound payment.
///
/// Every field is optional; absent fields are left out of the JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePendingPaymentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    /// Amount in centavos
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Caller-side reference for reconciliation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// PIX key of the recipient (phone, email, document or random key)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Explicit payer account, when not derived from `account_id`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Party>,
}

/// A pending payment as returned right after creation.
///
/// Timestamps on this endpoint are structured RFC 3339 values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPayment {
    pub id: String,
    pub account_id: String,
    pub amount: i64,
    pub status: PixPaymentStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub created_by: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub transaction_id: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub key: String,
    #[serde(default)]
    pub end_to_end_id: Option<String>,
    #[serde(default)]
    pub failed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub failure_reason_code: Option<String>,
    #[serde(default)]
    pub failure_reason_description: Option<String>,
    #[serde(default)]
    pub money_reserved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub settled_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub refunded_amount: i64,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub source: Party,
    #[serde(default, deserialize_with = "null_to_default")]
    pub target: Party,
}

/// Request to confirm a pending payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmPendingPaymentRequest {
    /// Amount in centavos; must match the pending payment
    pub amount: i64,
    pub description: String,
    pub add_target_to_contacts: bool,
}

impl ConfirmPendingPaymentRequest {
    pub fn new(amount: i64) -> Self {
        Self {
            amount,
            description: String::new(),
            add_target_to_contacts: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Outbound payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Read-only view of an outbound PIX payment.
///
/// Unlike [`PendingPayment`], every timestamp here is an opaque string: the
/// API is not consistent about their format on this endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundPix {
    pub id: String,
    pub account_id: String,
    pub amount: i64,
    /// Currently one of CREATED, FAILED, MONEY_RESERVED, SETTLED, REFUNDED
    pub status: PixPaymentStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub end_to_end_id: Option<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub fee: i64,
    #[serde(default, deserialize_with = "null_to_default")]
    pub refunded_amount: i64,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub failed_at: Option<String>,
    #[serde(default)]
    pub failure_reason_code: Option<String>,
    #[serde(default)]
    pub failure_reason_description: Option<String>,
    #[serde(default)]
    pub money_reserved_at: Option<String>,
    #[serde(default)]
    pub settled_at: Option<String>,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub approved_at: Option<String>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub source: Party,
    #[serde(default, deserialize_with = "null_to_default")]
    pub target: Party,
}

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic QR-code (invoice) DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a dynamic QR-code for receiving a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDynamicQrCodeRequest {
    /// Amount in centavos. This endpoint takes it as a string.
    pub amount: String,
    pub account_id: String,
    /// PIX key the payment is credited to
    pub key: String,
    pub transaction_id: String,
    pub customer: Customer,
    /// Message shown to the payer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_for_payer: Option<String>,
}

/// Invoice backing a dynamic QR-code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixInvoice {
    pub id: String,
    pub account_id: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub participant_ispb: String,
    pub key: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub key_type: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub transaction_id: String,
    pub amount: i64,
    #[serde(default)]
    pub additional_information: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub last_updated_by: Option<String>,
    /// BR-code string ("copia e cola")
    pub qr_code_content: String,
    /// Rendered QR-code image reference
    #[serde(default, deserialize_with = "null_to_default")]
    pub qr_code_image: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// QR-code lookup DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query for resolving a BR-code. Sent as URL query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetQrCodeRequest {
    pub brcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_account: Option<String>,
    /// Intended payment date, serialized as `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
}

impl GetQrCodeRequest {
    pub fn new(brcode: impl Into<String>) -> Self {
        Self {
            brcode: brcode.into(),
            ..Default::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// PIX key entry DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Pagination cursor, kept exactly as the API returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(serde_json::Value);

impl Cursor {
    /// The cursor as a token, when the API returned a string.
    pub fn token(&self) -> Option<&str> {
        self.0.as_str()
    }

    /// True when there is nothing to page from.
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            serde_json::Value::Null => true,
            serde_json::Value::String(s) => s.is_empty(),
            serde_json::Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Account that receives payments made to a PIX key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeneficiaryAccount {
    #[serde(default, deserialize_with = "null_to_default")]
    pub branch_code: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub account_code: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub account_type: String,
    /// Not every entry carries it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A PIX key registered to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixKeyEntry {
    pub id: String,
    pub key: String,
    pub key_type: String,
    pub key_status: String,
    pub account_id: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub participant_ispb: String,
    pub beneficiary_account: BeneficiaryAccount,
    #[serde(default, deserialize_with = "null_to_default")]
    pub beneficiary_entity: Entity,
}

/// One page of PIX key entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixEntries {
    #[serde(default)]
    pub cursor: Cursor,
    #[serde(default, deserialize_with = "null_to_default")]
    pub data: Vec<PixKeyEntry>,
}

//! Decoded BR-code payloads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::party::Customer;

/// Payload of a static QR-code: a PIX key with an optional fixed amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticQrCode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Key type. Older API versions sent this under `phone`.
    #[serde(
        default,
        rename = "type",
        alias = "phone",
        skip_serializing_if = "Option::is_none"
    )]
    pub key_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
}

/// Payload of a dynamic QR-code, i.e. a server-side invoice.
///
/// Timestamps come back as plain strings on this endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicQrCode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_at: Option<String>,
    /// Seconds after `created_at` during which the code can be paid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_for_payer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
}

/// Result of resolving a BR-code.
///
/// On the wire this is `{"type": "...", "static": {...}, "dynamic": {...}}`.
/// Only the payload named by `type` is decoded; the other one is ignored
/// whatever shape it has.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQrCodeEnvelope", into = "QrCodeEnvelope")]
pub enum QrCode {
    Static(StaticQrCode),
    Dynamic(DynamicQrCode),
    /// A `type` this SDK does not know about. Both payloads are discarded.
    Unknown(String),
}

impl QrCode {
    /// Wire value of the `type` discriminator.
    pub fn kind(&self) -> &str {
        match self {
            QrCode::Static(_) => "static",
            QrCode::Dynamic(_) => "dynamic",
            QrCode::Unknown(kind) => kind,
        }
    }

    pub fn as_static(&self) -> Option<&StaticQrCode> {
        match self {
            QrCode::Static(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn as_dynamic(&self) -> Option<&DynamicQrCode> {
        match self {
            QrCode::Dynamic(payload) => Some(payload),
            _ => None,
        }
    }

    /// Amount encoded in the code, if any.
    pub fn amount(&self) -> Option<i64> {
        match self {
            QrCode::Static(payload) => payload.amount,
            QrCode::Dynamic(payload) => payload.amount,
            QrCode::Unknown(_) => None,
        }
    }
}

/// Envelope as received. Payloads stay untyped until `type` picks one.
#[derive(Deserialize)]
struct RawQrCodeEnvelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, rename = "static")]
    static_payload: Option<serde_json::Value>,
    #[serde(default, rename = "dynamic")]
    dynamic_payload: Option<serde_json::Value>,
}

impl TryFrom<RawQrCodeEnvelope> for QrCode {
    type Error = String;

    fn try_from(envelope: RawQrCodeEnvelope) -> Result<Self, Self::Error> {
        if envelope.kind.eq_ignore_ascii_case("static") {
            decode_payload("static", envelope.static_payload).map(QrCode::Static)
        } else if envelope.kind.eq_ignore_ascii_case("dynamic") {
            decode_payload("dynamic", envelope.dynamic_payload).map(QrCode::Dynamic)
        } else {
            Ok(QrCode::Unknown(envelope.kind))
        }
    }
}

// A missing or null payload decodes to the empty payload.
fn decode_payload<T: DeserializeOwned + Default>(
    kind: &str,
    payload: Option<serde_json::Value>,
) -> Result<T, String> {
    match payload {
        Some(value) => serde_json::from_value(value)
            .map_err(|e| format!("invalid {} QR-code payload: {}", kind, e)),
        None => Ok(T::default()),
    }
}

#[derive(Serialize)]
struct QrCodeEnvelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "static", skip_serializing_if = "Option::is_none")]
    static_payload: Option<StaticQrCode>,
    #[serde(rename = "dynamic", skip_serializing_if = "Option::is_none")]
    dynamic_payload: Option<DynamicQrCode>,
}

impl From<QrCode> for QrCodeEnvelope {
    fn from(code: QrCode) -> Self {
        match code {
            QrCode::Static(payload) => QrCodeEnvelope {
                kind: "static".into(),
                static_payload: Some(payload),
                dynamic_payload: None,
            },
            QrCode::Dynamic(payload) => QrCodeEnvelope {
                kind: "dynamic".into(),
                static_payload: None,
                dynamic_payload: Some(payload),
            },
            QrCode::Unknown(kind) => QrCodeEnvelope {
                kind,
                static_payload: None,
                dynamic_payload: None,
            },
        }
    }
}

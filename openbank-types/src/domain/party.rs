//! Account holder descriptors shared by every PIX payload.
//!
//! The API nests the same `account` / `entity` / `institution` shapes under
//! `source`, `target`, `beneficiary_entity` and friends. They are modelled once
//! here and composed wherever the wire format repeats them.

use serde::{Deserialize, Serialize};

use crate::serde_util::null_to_default;

/// Bank account coordinates of a party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyAccount {
    #[serde(default, deserialize_with = "null_to_default")]
    pub account_code: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub branch_code: String,
    /// e.g. `CHECKING`, `SAVINGS`, `PAYMENT`
    #[serde(default, deserialize_with = "null_to_default")]
    pub account_type: String,
}

/// Person or company that owns an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default, deserialize_with = "null_to_default")]
    pub document: String,
    /// `CPF` or `CNPJ`
    #[serde(default, deserialize_with = "null_to_default")]
    pub document_type: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
}

/// Financial institution identified by its ISPB code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    #[serde(default, deserialize_with = "null_to_default")]
    pub ispb: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
}

/// Source or target of a PIX payment.
///
/// Sent as `source` when creating a pending payment on behalf of an explicit
/// account, and returned as both `source` and `target` on payment results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    #[serde(default, deserialize_with = "null_to_default")]
    pub account: PartyAccount,
    #[serde(default, deserialize_with = "null_to_default")]
    pub entity: Entity,
    #[serde(default, deserialize_with = "null_to_default")]
    pub institution: Institution,
}

/// Payer identification attached to dynamic QR-codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub document: String,
    /// Only returned by the API; never sent on invoice creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
}

impl Customer {
    pub fn new(name: impl Into<String>, document: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            document: document.into(),
            document_type: None,
        }
    }
}

//! PIX operations.
//!
//! Every method is a single round trip: build the path, build the request,
//! attach the idempotency header where the endpoint takes one, then hand the
//! request to the transport. Nothing is retried; retry safety comes from the
//! idempotency key, which the server de-duplicates on.

use openbank_types::{
    ConfirmPendingPaymentRequest, CreateDynamicQrCodeRequest, CreatePendingPaymentRequest,
    GetQrCodeRequest, OutboundPix, PendingPayment, PixEntries, PixInvoice, QrCode,
};

use crate::client::OpenBankClient;
use crate::error::ClientError;
use crate::response::ApiResponse;
use crate::transport::{ApiRequest, Transport};

const PIX_PATH: &str = "/api/v1/pix";
const OUTBOUND_PIX_PAYMENTS_PATH: &str = "/api/v1/pix/outbound_pix_payments";
const BRCODES_PATH: &str = "/api/v1/pix/outbound_pix_payments/brcodes";
const PIX_PAYMENT_INVOICES_PATH: &str = "/api/v1/pix_payment_invoices";

/// PIX endpoints, borrowed from an [`OpenBankClient`].
#[derive(Debug)]
pub struct PixService<'a, T: Transport> {
    client: &'a OpenBankClient<T>,
}

impl<'a, T: Transport> PixService<'a, T> {
    pub(crate) fn new(client: &'a OpenBankClient<T>) -> Self {
        Self { client }
    }

    /// Retrieves an outbound payment.
    pub async fn get_outbound_pix(&self, id: &str) -> Result<ApiResponse<OutboundPix>, ClientError> {
        let id = path_param("payment id", id)?;
        let request = ApiRequest::get(OUTBOUND_PIX_PAYMENTS_PATH).segment(id);
        self.client.execute(request).await
    }

    /// Resolves a BR-code into its static or dynamic payload.
    ///
    /// The code itself is validated by the API; a malformed one comes back
    /// as [`ClientError::Api`].
    pub async fn get_qr_code_data(
        &self,
        input: &GetQrCodeRequest,
    ) -> Result<ApiResponse<QrCode>, ClientError> {
        let request = ApiRequest::get(BRCODES_PATH).query(input)?;
        self.client.execute(request).await
    }

    /// Creates a dynamic QR-code for receiving a payment.
    pub async fn create_dynamic_qr_code(
        &self,
        input: &CreateDynamicQrCodeRequest,
        idempotency_key: &str,
    ) -> Result<ApiResponse<PixInvoice>, ClientError> {
        let request = ApiRequest::post(PIX_PAYMENT_INVOICES_PATH)
            .json(input)?
            .idempotency_key(idempotency_key)?;
        self.client.execute(request).await
    }

    /// Lists the PIX keys registered to an account.
    pub async fn get_entries(
        &self,
        account_id: &str,
        idempotency_key: &str,
    ) -> Result<ApiResponse<PixEntries>, ClientError> {
        let account_id = path_param("account id", account_id)?;
        let request = ApiRequest::get(PIX_PATH)
            .segment(account_id)
            .segment("entries")
            .idempotency_key(idempotency_key)?;
        self.client.execute(request).await
    }

    /// Creates a pending payment. It only moves money once confirmed.
    pub async fn create_pending_payment(
        &self,
        input: &CreatePendingPaymentRequest,
        idempotency_key: &str,
    ) -> Result<ApiResponse<PendingPayment>, ClientError> {
        let request = ApiRequest::post(OUTBOUND_PIX_PAYMENTS_PATH)
            .json(input)?
            .idempotency_key(idempotency_key)?;
        self.client.execute(request).await
    }

    /// Confirms a pending payment. The API answers with an empty body.
    pub async fn confirm_pending_payment(
        &self,
        pix_id: &str,
        input: &ConfirmPendingPaymentRequest,
        idempotency_key: &str,
    ) -> Result<ApiResponse<()>, ClientError> {
        let pix_id = path_param("payment id", pix_id)?;
        let request = ApiRequest::post(OUTBOUND_PIX_PAYMENTS_PATH)
            .segment(pix_id)
            .segment("actions")
            .segment("confirm")
            .json(input)?
            .idempotency_key(idempotency_key)?;
        self.client.execute_empty(request).await
    }
}

// Ids become a single percent-encoded path segment. Empty and dot segments
// cannot be encoded that way: they would address a different resource.
fn path_param<'v>(name: &str, value: &'v str) -> Result<&'v str, ClientError> {
    if value.is_empty() {
        return Err(ClientError::InvalidRequest(format!("{} cannot be empty", name)));
    }
    if value == "." || value == ".." {
        return Err(ClientError::InvalidRequest(format!(
            "{} cannot be a dot segment: {}",
            name, value
        )));
    }
    Ok(value)
}

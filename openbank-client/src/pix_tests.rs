//! PixService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
    use reqwest::{Method, StatusCode};
    use serde_json::json;

    use openbank_types::{
        ConfirmPendingPaymentRequest, CreateDynamicQrCodeRequest, CreatePendingPaymentRequest,
        Customer, GetQrCodeRequest, IDEMPOTENCY_KEY_HEADER, IDEMPOTENCY_KEY_MAX_LEN,
        PixPaymentStatus,
    };

    use crate::{ApiRequest, ClientError, OpenBankClient, RawResponse, ResponseMeta, Transport};

    /// Transport that records every request and replays canned responses.
    pub struct RecordingTransport {
        requests: Mutex<Vec<ApiRequest>>,
        responses: Mutex<VecDeque<RawResponse>>,
    }

    impl RecordingTransport {
        pub fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                responses: Mutex::new(VecDeque::new()),
            }
        }

        pub fn respond_with(self, status: u16, body: serde_json::Value) -> Self {
            let body = if body.is_null() {
                Vec::new()
            } else {
                serde_json::to_vec(&body).unwrap()
            };
            self.respond_with_raw(status, body)
        }

        pub fn respond_with_raw(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
            let mut headers = HeaderMap::new();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            self.responses.lock().unwrap().push_back(RawResponse {
                meta: ResponseMeta::new(StatusCode::from_u16(status).unwrap(), headers),
                body: body.into(),
            });
            self
        }

        pub fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        pub fn last_request(&self) -> ApiRequest {
            self.requests
                .lock()
                .unwrap()
                .last()
                .cloned()
                .expect("no request was sent")
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
            self.requests.lock().unwrap().push(request);
            let canned = self.responses.lock().unwrap().pop_front();
            Ok(canned.unwrap_or_else(|| RawResponse {
                meta: ResponseMeta::new(StatusCode::OK, HeaderMap::new()),
                body: b"{}".to_vec(),
            }))
        }
    }

    fn client_with(
        transport: RecordingTransport,
    ) -> (OpenBankClient<Arc<RecordingTransport>>, Arc<RecordingTransport>) {
        let transport = Arc::new(transport);
        (OpenBankClient::with_transport(transport.clone()), transport)
    }

    fn party_json() -> serde_json::Value {
        json!({
            "account": {"account_code": "123456", "branch_code": "0001", "account_type": "CHECKING"},
            "entity": {"document": "12345678900", "document_type": "CPF", "name": "Maria"},
            "institution": {"ispb": "16501555", "name": "Stone"}
        })
    }

    fn pending_payment_json() -> serde_json::Value {
        json!({
            "id": "pix-1",
            "account_id": "acc-1",
            "amount": 1000,
            "status": "CREATED",
            "created_at": "2021-03-10T14:05:31Z",
            "created_by": "user:1",
            "description": "",
            "transaction_id": "tx-1",
            "key": "+5511999999999",
            "end_to_end_id": null,
            "failed_at": null,
            "failure_reason_code": null,
            "failure_reason_description": null,
            "money_reserved_at": null,
            "refunded_amount": 0,
            "request_id": "req-1",
            "settled_at": null,
            "source": party_json(),
            "target": party_json()
        })
    }

    fn pending_payment_request() -> CreatePendingPaymentRequest {
        CreatePendingPaymentRequest {
            account_id: Some("acc-1".into()),
            amount: Some(1000),
            key: Some("+5511999999999".into()),
            ..Default::default()
        }
    }

    fn dynamic_qr_code_request() -> CreateDynamicQrCodeRequest {
        CreateDynamicQrCodeRequest {
            amount: "1000".into(),
            account_id: "acc-1".into(),
            key: "b0b6f3a4".into(),
            transaction_id: "tx-1".into(),
            customer: Customer::new("Maria", "12345678900"),
            request_for_payer: Some("Pedido 42".into()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Outbound payments
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_get_outbound_pix_targets_payment_path() {
        let body = json!({
            "id": "abc123",
            "account_id": "acc-1",
            "amount": 500,
            "status": "SETTLED",
            "created_at": "2021-03-10T14:05:31Z",
            "settled_at": "2021-03-10T14:05:33Z",
            "source": party_json(),
            "target": party_json()
        });
        let (client, transport) = client_with(RecordingTransport::new().respond_with(200, body));

        let resp = client.pix().get_outbound_pix("abc123").await.unwrap();

        let req = transport.last_request();
        assert_eq!(req.method(), &Method::GET);
        assert_eq!(req.path(), "/api/v1/pix/outbound_pix_payments/abc123");
        assert!(req.body().is_none());
        assert_eq!(req.header_value(IDEMPOTENCY_KEY_HEADER), None);

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.value.id, "abc123");
        assert_eq!(resp.value.status, PixPaymentStatus::Settled);
        assert_eq!(resp.value.settled_at.as_deref(), Some("2021-03-10T14:05:33Z"));
        assert_eq!(resp.value.failed_at, None);
    }

    #[tokio::test]
    async fn test_get_outbound_pix_rejects_empty_id() {
        let (client, transport) = client_with(RecordingTransport::new());

        let err = client.pix().get_outbound_pix("").await.unwrap_err();

        assert!(matches!(err, ClientError::InvalidRequest(_)));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_ids_stay_inside_their_path_segment() {
        let cases = [
            ("abc?brcode=x", "/api/v1/pix/outbound_pix_payments/abc%3Fbrcode=x"),
            ("../brcodes", "/api/v1/pix/outbound_pix_payments/..%2Fbrcodes"),
            ("a/b", "/api/v1/pix/outbound_pix_payments/a%2Fb"),
            ("a#frag", "/api/v1/pix/outbound_pix_payments/a%23frag"),
        ];
        for (id, expected) in cases {
            let (client, transport) = client_with(RecordingTransport::new());
            let _ = client.pix().get_outbound_pix(id).await;

            let req = transport.last_request();
            assert_eq!(req.path(), expected, "id {:?}", id);
            assert!(req.query_pairs().is_empty());
        }

        let (client, transport) = client_with(RecordingTransport::new());
        let _ = client.pix().get_entries("acc/../x", "key-1").await;
        assert_eq!(transport.last_request().path(), "/api/v1/pix/acc%2F..%2Fx/entries");

        let (client, transport) = client_with(RecordingTransport::new());
        let input = ConfirmPendingPaymentRequest::new(1000);
        let _ = client
            .pix()
            .confirm_pending_payment("xyz?a=1", &input, "key-1")
            .await;
        assert_eq!(
            transport.last_request().path(),
            "/api/v1/pix/outbound_pix_payments/xyz%3Fa=1/actions/confirm"
        );
    }

    #[tokio::test]
    async fn test_dot_segment_ids_are_rejected_locally() {
        let (client, transport) = client_with(RecordingTransport::new());
        let input = ConfirmPendingPaymentRequest::new(1000);

        for id in [".", ".."] {
            let err = client.pix().get_outbound_pix(id).await.unwrap_err();
            assert!(matches!(err, ClientError::InvalidRequest(_)));

            let err = client.pix().get_entries(id, "key-1").await.unwrap_err();
            assert!(matches!(err, ClientError::InvalidRequest(_)));

            let err = client
                .pix()
                .confirm_pending_payment(id, &input, "key-1")
                .await
                .unwrap_err();
            assert!(matches!(err, ClientError::InvalidRequest(_)));
        }
        assert_eq!(transport.calls(), 0);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // QR-codes
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_get_qr_code_data_sends_query_params() {
        let body = json!({"type": "static", "static": {"key": "+5511999999999", "amount": 1000}});
        let (client, transport) = client_with(RecordingTransport::new().respond_with(200, body));

        let input = GetQrCodeRequest {
            brcode: "00020126360014br.gov.bcb.pix".into(),
            owner_account: Some("acc-1".into()),
            payment_date: chrono::NaiveDate::from_ymd_opt(2021, 3, 10),
        };
        let resp = client.pix().get_qr_code_data(&input).await.unwrap();

        let req = transport.last_request();
        assert_eq!(req.method(), &Method::GET);
        assert_eq!(req.path(), "/api/v1/pix/outbound_pix_payments/brcodes");
        assert_eq!(
            req.query_pairs(),
            &[
                ("brcode".to_string(), "00020126360014br.gov.bcb.pix".to_string()),
                ("owner_account".to_string(), "acc-1".to_string()),
                ("payment_date".to_string(), "2021-03-10".to_string()),
            ]
        );
        assert!(req.body().is_none());

        let payload = resp.value.as_static().expect("static payload");
        assert_eq!(payload.amount, Some(1000));
        assert!(resp.value.as_dynamic().is_none());
    }

    #[tokio::test]
    async fn test_get_qr_code_data_surfaces_remote_rejection() {
        let body = json!({"type": "srn:error:invalid_brcode", "message": "brcode is invalid"});
        let (client, _) = client_with(RecordingTransport::new().respond_with(400, body));

        let err = client
            .pix()
            .get_qr_code_data(&GetQrCodeRequest::new("garbage"))
            .await
            .unwrap_err();

        match err {
            ClientError::Api { meta, message } => {
                assert_eq!(meta.status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "brcode is invalid");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_dynamic_qr_code() {
        let body = json!({
            "id": "inv-1",
            "account_id": "acc-1",
            "participant_ispb": "16501555",
            "key": "b0b6f3a4",
            "key_type": "random_key",
            "transaction_id": "tx-1",
            "amount": 1000,
            "created_at": "2021-03-10T14:05:31Z",
            "updated_at": "2021-03-10T14:05:31Z",
            "qr_code_content": "000201...",
            "qr_code_image": "data:image/png;base64,iVBOR"
        });
        let (client, transport) = client_with(RecordingTransport::new().respond_with(201, body));

        let resp = client
            .pix()
            .create_dynamic_qr_code(&dynamic_qr_code_request(), "invoice-key-1")
            .await
            .unwrap();

        let req = transport.last_request();
        assert_eq!(req.method(), &Method::POST);
        assert_eq!(req.path(), "/api/v1/pix_payment_invoices");
        assert_eq!(req.header_value(IDEMPOTENCY_KEY_HEADER), Some("invoice-key-1"));
        let sent = req.body().unwrap();
        assert_eq!(sent["amount"], json!("1000"));
        assert_eq!(sent["request_for_payer"], json!("Pedido 42"));
        assert_eq!(sent["customer"], json!({"name": "Maria", "document": "12345678900"}));

        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(resp.value.id, "inv-1");
        assert_eq!(resp.value.qr_code_content, "000201...");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Entries
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_get_entries() {
        let body = json!({
            "cursor": "page-2",
            "data": [{
                "id": "entry-1",
                "key": "maria@example.com",
                "key_type": "email",
                "key_status": "REGISTERED",
                "account_id": "acc-1",
                "participant_ispb": "16501555",
                "beneficiary_account": {
                    "branch_code": "0001",
                    "account_code": "123456",
                    "account_type": "PAYMENT",
                    "created_at": "2020-11-16T10:00:00Z"
                },
                "beneficiary_entity": {"name": "Maria", "document_type": "CPF", "document": "12345678900"}
            }]
        });
        let (client, transport) = client_with(RecordingTransport::new().respond_with(200, body));

        let resp = client.pix().get_entries("acc-1", "entries-key").await.unwrap();

        let req = transport.last_request();
        assert_eq!(req.method(), &Method::GET);
        assert_eq!(req.path(), "/api/v1/pix/acc-1/entries");
        assert_eq!(req.header_value(IDEMPOTENCY_KEY_HEADER), Some("entries-key"));

        assert_eq!(resp.value.cursor.token(), Some("page-2"));
        assert_eq!(resp.value.data[0].key, "maria@example.com");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pending payments
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_pending_payment_forwards_key_and_body() {
        let (client, transport) =
            client_with(RecordingTransport::new().respond_with(200, pending_payment_json()));
        let key = "k".repeat(40);

        let resp = client
            .pix()
            .create_pending_payment(&pending_payment_request(), &key)
            .await
            .unwrap();

        assert_eq!(transport.calls(), 1);
        let req = transport.last_request();
        assert_eq!(req.method(), &Method::POST);
        assert_eq!(req.path(), "/api/v1/pix/outbound_pix_payments");
        assert_eq!(req.header_value(IDEMPOTENCY_KEY_HEADER), Some(key.as_str()));
        let body = serde_json::to_string(req.body().unwrap()).unwrap();
        assert!(body.contains(r#""amount":1000"#));
        assert!(body.contains(r#""key":"+5511999999999""#));

        assert_eq!(resp.value.id, "pix-1");
        assert_eq!(resp.value.status, PixPaymentStatus::Created);
        assert_eq!(resp.value.settled_at, None);
        assert_eq!(resp.value.failure_reason_code, None);
    }

    #[tokio::test]
    async fn test_create_pending_payment_with_oversized_key_never_sends() {
        let (client, transport) = client_with(RecordingTransport::new());

        let err = client
            .pix()
            .create_pending_payment(&pending_payment_request(), &"k".repeat(300))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClientError::InvalidIdempotencyKey { len: 300, max: IDEMPOTENCY_KEY_MAX_LEN }
        ));
        assert!(err.response().is_none());
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_key_at_max_length_is_forwarded_verbatim() {
        let (client, transport) =
            client_with(RecordingTransport::new().respond_with(200, pending_payment_json()));
        let key = "é".repeat(IDEMPOTENCY_KEY_MAX_LEN / 2);

        client
            .pix()
            .create_pending_payment(&pending_payment_request(), &key)
            .await
            .unwrap();

        assert_eq!(
            transport.last_request().header_value(IDEMPOTENCY_KEY_HEADER),
            Some(key.as_str())
        );
    }

    #[tokio::test]
    async fn test_every_idempotent_operation_rejects_oversized_key_locally() {
        let (client, transport) = client_with(RecordingTransport::new());
        let pix = client.pix();
        let key = "k".repeat(IDEMPOTENCY_KEY_MAX_LEN + 1);

        let errors = vec![
            pix.create_dynamic_qr_code(&dynamic_qr_code_request(), &key)
                .await
                .map(|_| ())
                .unwrap_err(),
            pix.get_entries("acc-1", &key).await.map(|_| ()).unwrap_err(),
            pix.create_pending_payment(&pending_payment_request(), &key)
                .await
                .map(|_| ())
                .unwrap_err(),
            pix.confirm_pending_payment("xyz", &ConfirmPendingPaymentRequest::new(1000), &key)
                .await
                .map(|_| ())
                .unwrap_err(),
        ];

        for err in errors {
            assert!(matches!(err, ClientError::InvalidIdempotencyKey { .. }));
            assert!(err.is_local());
        }
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_confirm_pending_payment_targets_confirm_action() {
        let (client, transport) =
            client_with(RecordingTransport::new().respond_with(204, serde_json::Value::Null));
        let input = ConfirmPendingPaymentRequest {
            amount: 1000,
            description: "Almoço".into(),
            add_target_to_contacts: true,
        };

        let resp = client
            .pix()
            .confirm_pending_payment("xyz", &input, "confirm-key")
            .await
            .unwrap();

        let req = transport.last_request();
        assert_eq!(req.method(), &Method::POST);
        assert_eq!(req.path(), "/api/v1/pix/outbound_pix_payments/xyz/actions/confirm");
        assert_eq!(req.header_value(IDEMPOTENCY_KEY_HEADER), Some("confirm-key"));
        assert_eq!(
            req.body(),
            Some(&json!({"amount": 1000, "description": "Almoço", "add_target_to_contacts": true}))
        );
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Error propagation
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_unprocessable_entity_keeps_metadata() {
        let body = json!({"type": "srn:error:unprocessable_entity", "message": "insufficient balance"});
        let (client, transport) = client_with(RecordingTransport::new().respond_with(422, body));

        let result = client
            .pix()
            .create_pending_payment(&pending_payment_request(), "key-422")
            .await;

        let err = result.unwrap_err();
        assert_eq!(transport.calls(), 1);
        assert_eq!(err.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
        let meta = err.response().expect("response metadata");
        assert_eq!(meta.status.as_u16(), 422);
        assert_eq!(meta.header("content-type"), Some("application/json"));
        assert!(matches!(err, ClientError::Api { ref message, .. } if message == "insufficient balance"));
    }

    #[tokio::test]
    async fn test_confirm_surfaces_api_error() {
        let (client, _) = client_with(RecordingTransport::new().respond_with_raw(404, "not found"));

        let err = client
            .pix()
            .confirm_pending_payment("missing", &ConfirmPendingPaymentRequest::new(1), "k")
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Api { ref message, .. } if message == "not found"));
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_a_decode_error() {
        let (client, _) =
            client_with(RecordingTransport::new().respond_with(200, json!({"unexpected": true})));

        let err = client.pix().get_outbound_pix("abc123").await.unwrap_err();

        match &err {
            ClientError::Decode { meta, .. } => assert_eq!(meta.status, StatusCode::OK),
            other => panic!("expected decode error, got {other:?}"),
        }
        assert!(!err.is_local());
    }

    #[tokio::test]
    async fn test_concurrent_calls_share_one_client() {
        let transport = RecordingTransport::new()
            .respond_with(200, pending_payment_json())
            .respond_with(200, pending_payment_json());
        let (client, transport) = client_with(transport);
        let pix = client.pix();
        let req = pending_payment_request();

        let (a, b) = tokio::join!(
            pix.create_pending_payment(&req, "key-a"),
            pix.create_pending_payment(&req, "key-b"),
        );

        assert!(a.is_ok());
        assert!(b.is_ok());
        assert_eq!(transport.calls(), 2);
    }
}

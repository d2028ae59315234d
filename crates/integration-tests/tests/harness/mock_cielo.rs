//! Mock Cielo API for integration tests
//!
//! Serves both the transactional and query routes from one address, keeps
//! created sales and card tokens in memory, and answers with Cielo's status
//! codes and error lists.

use std::collections::HashMap;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Merchant id the mock accepts
pub const MERCHANT_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Merchant key the mock accepts
pub const MERCHANT_KEY: &str = "TESTMERCHANTKEY";

/// Mock Cielo backend with in-memory sales
pub struct MockCielo {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockCieloState>,
}

struct MockCieloState {
    gzip: bool,
    request_count: AtomicU32,
    next_id: AtomicU32,
    sales: Mutex<HashMap<String, Value>>,
    recurrent: Mutex<HashMap<String, Value>>,
    cards: Mutex<HashMap<String, Value>>,
    request_ids: Mutex<Vec<String>>,
}

impl MockCielo {
    /// Start the mock server with plain JSON responses
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(false).await
    }

    /// Start a mock server that gzips every response body
    pub async fn start_gzip() -> anyhow::Result<Self> {
        Self::start_inner(true).await
    }

    async fn start_inner(gzip: bool) -> anyhow::Result<Self> {
        let state = Arc::new(MockCieloState {
            gzip,
            request_count: AtomicU32::new(0),
            next_id: AtomicU32::new(1),
            sales: Mutex::new(HashMap::new()),
            recurrent: Mutex::new(HashMap::new()),
            cards: Mutex::new(HashMap::new()),
            request_ids: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/1/sales/", routing::post(handle_create_sale))
            .route("/1/sales/{payment_id}", routing::get(handle_query_sale))
            .route("/1/sales/{payment_id}/capture", routing::put(handle_capture))
            .route("/1/sales/{payment_id}/void", routing::put(handle_void))
            .route("/1/RecurrentPayment/{id}", routing::get(handle_query_recurrent))
            .route("/1/RecurrentPayment/{id}/Deactivate", routing::put(handle_deactivate_recurrent))
            .route("/1/card/", routing::post(handle_create_card))
            .route("/1/card/{token}", routing::get(handle_query_card))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for both the api and the query host, with trailing slash
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Number of requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// `RequestId` header of every request, in arrival order
    pub fn request_ids(&self) -> Vec<String> {
        self.state.request_ids.lock().unwrap().clone()
    }
}

impl Drop for MockCielo {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

// -- Handlers --

async fn handle_create_sale(
    State(state): State<Arc<MockCieloState>>,
    headers: HeaderMap,
    Json(mut sale): Json<Value>,
) -> Response {
    if let Err(status) = state.admit(&headers) {
        return status.into_response();
    }

    let amount = sale["Payment"]["Amount"].as_u64().unwrap_or(0);
    let mut errors = Vec::new();
    if sale["MerchantOrderId"].as_str().is_none_or(str::is_empty) {
        errors.push(json!({ "Code": 122, "Message": "MerchantOrderId is required" }));
    }
    if amount == 0 {
        errors.push(json!({ "Code": 116, "Message": "Payment Amount is required" }));
    }
    if !errors.is_empty() {
        return state.respond(StatusCode::BAD_REQUEST, &Value::Array(errors));
    }

    let payment_id = state.next_id("pay");
    let customer = sale["Customer"].clone();
    let payment = &mut sale["Payment"];
    payment["PaymentId"] = json!(payment_id);
    payment["Status"] = json!(1);
    payment["ReturnCode"] = json!("4");
    payment["ReturnMessage"] = json!("Operation Successful");
    if let Some(card) = payment.get_mut("CreditCard").and_then(Value::as_object_mut) {
        if let Some(masked) = card.get("CardNumber").and_then(Value::as_str).map(mask_number) {
            card.insert("CardNumber".to_owned(), json!(masked));
        }
        card.remove("SecurityCode");
    }

    if payment["RecurrentPayment"].is_object() {
        let recurrent_id = state.next_id("rec");
        payment["RecurrentPayment"]["RecurrentPaymentId"] = json!(recurrent_id);
        let recurrent = json!({
            "Customer": customer,
            "RecurrentPayment": {
                "RecurrentPaymentId": recurrent_id,
                "Interval": payment["RecurrentPayment"]["Interval"].clone(),
                "Amount": amount,
                "CurrentRecurrencyTry": 1,
                "Status": 1
            }
        });
        state.recurrent.lock().unwrap().insert(recurrent_id, recurrent);
    }

    state.sales.lock().unwrap().insert(payment_id, sale.clone());

    state.respond(StatusCode::CREATED, &sale)
}

async fn handle_query_sale(
    State(state): State<Arc<MockCieloState>>,
    headers: HeaderMap,
    Path(payment_id): Path<String>,
) -> Response {
    if let Err(status) = state.admit(&headers) {
        return status.into_response();
    }

    let sale = state.sales.lock().unwrap().get(&payment_id).cloned();
    match sale {
        Some(sale) => state.respond(StatusCode::OK, &sale),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct AmountQuery {
    amount: Option<u64>,
    #[serde(rename = "serviceTaxAmount")]
    service_tax_amount: Option<u64>,
}

async fn handle_capture(
    State(state): State<Arc<MockCieloState>>,
    headers: HeaderMap,
    Path(payment_id): Path<String>,
    Query(query): Query<AmountQuery>,
) -> Response {
    state.update_status(&headers, &payment_id, 2, &query)
}

async fn handle_void(
    State(state): State<Arc<MockCieloState>>,
    headers: HeaderMap,
    Path(payment_id): Path<String>,
    Query(query): Query<AmountQuery>,
) -> Response {
    state.update_status(&headers, &payment_id, 10, &query)
}

async fn handle_query_recurrent(
    State(state): State<Arc<MockCieloState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(status) = state.admit(&headers) {
        return status.into_response();
    }

    let recurrent = state.recurrent.lock().unwrap().get(&id).cloned();
    match recurrent {
        Some(recurrent) => state.respond(StatusCode::OK, &recurrent),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Cielo answers a deactivation with an empty 200
async fn handle_deactivate_recurrent(
    State(state): State<Arc<MockCieloState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(status) = state.admit(&headers) {
        return status.into_response();
    }

    let mut recurrent = state.recurrent.lock().unwrap();
    let Some(entry) = recurrent.get_mut(&id) else {
        return state.respond(
            StatusCode::BAD_REQUEST,
            &json!([{ "Code": 313, "Message": "Recurrent Payment not found" }]),
        );
    };
    entry["RecurrentPayment"]["Status"] = json!(3);

    StatusCode::OK.into_response()
}

async fn handle_create_card(
    State(state): State<Arc<MockCieloState>>,
    headers: HeaderMap,
    Json(card): Json<Value>,
) -> Response {
    if let Err(status) = state.admit(&headers) {
        return status.into_response();
    }

    let Some(number) = card["CardNumber"].as_str() else {
        return state.respond(
            StatusCode::BAD_REQUEST,
            &json!([{ "Code": 126, "Message": "Credit Card Expiration Date is invalid" }]),
        );
    };

    let token = state.next_id("tok");
    let stored = json!({
        "CardNumber": mask_number(number),
        "Holder": card["Holder"].clone(),
        "ExpirationDate": card["ExpirationDate"].clone()
    });
    state.cards.lock().unwrap().insert(token.clone(), stored);

    state.respond(StatusCode::CREATED, &json!({ "CardToken": token }))
}

async fn handle_query_card(
    State(state): State<Arc<MockCieloState>>,
    headers: HeaderMap,
    Path(token): Path<String>,
) -> Response {
    if let Err(status) = state.admit(&headers) {
        return status.into_response();
    }

    let card = state.cards.lock().unwrap().get(&token).cloned();
    match card {
        Some(card) => state.respond(StatusCode::OK, &card),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

// -- Helpers --

impl MockCieloState {
    /// Count the request and check merchant credentials
    fn admit(&self, headers: &HeaderMap) -> Result<(), StatusCode> {
        self.request_count.fetch_add(1, Ordering::Relaxed);

        if let Some(id) = headers.get("RequestId").and_then(|v| v.to_str().ok()) {
            self.request_ids.lock().unwrap().push(id.to_owned());
        }

        let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
        if header("MerchantId") == Some(MERCHANT_ID) && header("MerchantKey") == Some(MERCHANT_KEY) {
            Ok(())
        } else {
            Err(StatusCode::UNAUTHORIZED)
        }
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn update_status(&self, headers: &HeaderMap, payment_id: &str, status: i32, query: &AmountQuery) -> Response {
        if let Err(status) = self.admit(headers) {
            return status.into_response();
        }

        let mut sales = self.sales.lock().unwrap();
        let Some(sale) = sales.get_mut(payment_id) else {
            return StatusCode::NOT_FOUND.into_response();
        };

        let authorized = sale["Payment"]["Amount"].as_u64().unwrap_or(0);
        if query.amount.is_some_and(|amount| amount > authorized) {
            return self.respond(
                StatusCode::BAD_REQUEST,
                &json!([{ "Code": 115, "Message": "Amount exceeds the authorized value" }]),
            );
        }

        sale["Payment"]["Status"] = json!(status);
        if status == 2 {
            sale["Payment"]["CapturedAmount"] = json!(query.amount.unwrap_or(authorized));
            if let Some(tax) = query.service_tax_amount {
                sale["Payment"]["ServiceTaxAmount"] = json!(tax);
            }
        }

        self.respond(
            StatusCode::OK,
            &json!({
                "Status": status,
                "ReasonCode": 0,
                "ReasonMessage": "Successful",
                "ProviderReturnCode": "6",
                "ProviderReturnMessage": "Operation Successful"
            }),
        )
    }

    /// JSON response, gzipped when the mock was started with compression
    fn respond(&self, status: StatusCode, body: &Value) -> Response {
        let json = serde_json::to_vec(body).unwrap();

        if !self.gzip {
            return (status, [(header::CONTENT_TYPE, "application/json")], json).into_response();
        }

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&json).unwrap();
        let compressed = encoder.finish().unwrap();

        (
            status,
            [
                (header::CONTENT_TYPE, "application/json"),
                (header::CONTENT_ENCODING, "gzip"),
            ],
            compressed,
        )
            .into_response()
    }
}

/// Keep the first six and last four digits, as Cielo does
fn mask_number(number: &str) -> String {
    if number.len() <= 10 {
        return number.to_owned();
    }
    let (head, rest) = number.split_at(6);
    let tail = &rest[rest.len() - 4..];
    format!("{head}{}{tail}", "*".repeat(rest.len() - 4))
}

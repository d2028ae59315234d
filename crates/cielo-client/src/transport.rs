//! Shared send/receive pipeline for every Cielo endpoint
//!
//! One call is one round trip: protocol headers are attached, the body is
//! logged (masked) and sent, the response is inflated when gzip-encoded,
//! logged (masked) and finally decoded according to its status code.

use std::io::Read;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use flate2::read::GzDecoder;
use reqwest::header::{
    ACCEPT, ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue,
    USER_AGENT,
};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;
use uuid::Uuid;

use crate::error::{CieloClientError, CieloError, Result};
use crate::logger::{Direction, PayloadLogger, TracingPayloadLogger};
use crate::mask::mask_sensitive_card_data;
use crate::merchant::Merchant;

/// `User-Agent` sent on every request
pub const USER_AGENT_VALUE: &str = concat!("CieloEcommerce/3.0 Rust SDK ", env!("CARGO_PKG_VERSION"));

const MERCHANT_ID: HeaderName = HeaderName::from_static("merchantid");
const MERCHANT_KEY: HeaderName = HeaderName::from_static("merchantkey");
const REQUEST_ID: HeaderName = HeaderName::from_static("requestid");

/// Timeouts for the lazily built HTTP client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeouts {
    /// Total time allowed for one request
    pub request: Option<Duration>,
    /// Time allowed to establish a connection
    pub connect: Option<Duration>,
}

/// Generic request/response engine
///
/// Holds the merchant credentials and one long-lived HTTP client, created on
/// first use unless one was supplied.
#[derive(Debug, Clone)]
pub struct Transport {
    merchant: Merchant,
    http: OnceLock<reqwest::Client>,
    timeouts: Timeouts,
    logger: Option<Arc<dyn PayloadLogger>>,
}

impl Transport {
    /// Create a transport that logs payloads through `tracing`
    pub fn new(merchant: Merchant) -> Self {
        Self {
            merchant,
            http: OnceLock::new(),
            timeouts: Timeouts::default(),
            logger: Some(Arc::new(TracingPayloadLogger)),
        }
    }

    /// Use an existing HTTP client instead of building one
    pub fn set_http_client(&mut self, http: reqwest::Client) {
        self.http = OnceLock::from(http);
    }

    /// Timeouts applied when the client is built lazily
    pub const fn set_timeouts(&mut self, timeouts: Timeouts) {
        self.timeouts = timeouts;
    }

    /// Replace the payload sink, or disable payload logging with `None`
    pub fn set_logger(&mut self, logger: Option<Arc<dyn PayloadLogger>>) {
        self.logger = logger;
    }

    /// Send a request without a body
    pub async fn get<R>(&self, url: Url) -> Result<R>
    where
        R: DeserializeOwned + Default,
    {
        self.send::<(), R>(Method::GET, url, None).await
    }

    /// Send one request and decode the response
    ///
    /// # Errors
    ///
    /// - [`CieloClientError::Http`] / [`CieloClientError::Decompress`] when
    ///   the exchange itself fails
    /// - [`CieloClientError::Parse`] when a 200/201 body is not an `R`
    /// - [`CieloClientError::Api`] for 400 and 404 responses
    pub async fn send<P, R>(&self, method: Method, url: Url, payload: Option<&P>) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned + Default,
    {
        let (status, body) = self.exchange(method, url, payload).await?;
        parse_response(status, &body)
    }

    /// Send one request whose success response carries no body
    ///
    /// 200, 201 and 204 succeed whatever the body holds; 400 and 404 fail as
    /// in [`Transport::send`].
    pub async fn send_empty<P>(&self, method: Method, url: Url, payload: Option<&P>) -> Result<()>
    where
        P: Serialize + ?Sized,
    {
        let (status, body) = self.exchange(method, url, payload).await?;
        parse_empty_response(status, &body)
    }

    /// One round trip: headers, masked logging, send, inflate, masked logging
    async fn exchange<P>(&self, method: Method, url: Url, payload: Option<&P>) -> Result<(StatusCode, String)>
    where
        P: Serialize + ?Sized,
    {
        let http = self.http()?;
        let request_id = Uuid::new_v4();

        let mut request = http.request(method.clone(), url.clone()).headers(self.headers(request_id)?);

        if let Some(payload) = payload {
            let body = serde_json::to_vec(payload).map_err(CieloClientError::Encode)?;
            self.log_payload(Direction::Request, &body);
            request = request.body(body);
        }

        tracing::debug!(%method, %url, %request_id, "sending cielo request");

        let response = request.send().await?;
        let status = response.status();
        let gzip = is_gzip(response.headers());
        let raw = response.bytes().await?;

        let body = decode_body(&raw, gzip)?;
        self.log_payload(Direction::Response, body.as_bytes());

        tracing::debug!(%request_id, status = status.as_u16(), "received cielo response");

        Ok((status, body))
    }

    fn http(&self) -> Result<&reqwest::Client> {
        if let Some(http) = self.http.get() {
            return Ok(http);
        }

        let built = build_http_client(self.timeouts)?;
        Ok(self.http.get_or_init(|| built))
    }

    fn headers(&self, request_id: Uuid) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(7);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(MERCHANT_ID, secret_header(&MERCHANT_ID, self.merchant.id())?);
        headers.insert(MERCHANT_KEY, secret_header(&MERCHANT_KEY, self.merchant.key())?);
        headers.insert(
            REQUEST_ID,
            HeaderValue::from_str(&request_id.to_string()).map_err(invalid_header(&REQUEST_ID))?,
        );
        Ok(headers)
    }

    fn log_payload(&self, direction: Direction, body: &[u8]) {
        let Some(logger) = self.logger.as_deref() else {
            return;
        };

        if !logger.enabled() {
            return;
        }

        logger.log(direction, &mask_sensitive_card_data(&String::from_utf8_lossy(body)));
    }
}

fn build_http_client(timeouts: Timeouts) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = timeouts.request {
        builder = builder.timeout(timeout);
    }

    if let Some(timeout) = timeouts.connect {
        builder = builder.connect_timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| CieloClientError::Config(format!("failed to build HTTP client: {e}")))
}

fn secret_header(name: &HeaderName, value: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(value).map_err(invalid_header(name))?;
    value.set_sensitive(true);
    Ok(value)
}

fn invalid_header(name: &HeaderName) -> impl FnOnce(InvalidHeaderValue) -> CieloClientError + '_ {
    move |e| CieloClientError::Config(format!("invalid {name} header value: {e}"))
}

fn is_gzip(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_ENCODING)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("gzip"))
}

/// Inflate a gzip body if flagged, then read it as text
fn decode_body(raw: &[u8], gzip: bool) -> Result<String> {
    if !gzip {
        return Ok(String::from_utf8_lossy(raw).into_owned());
    }

    let mut inflated = Vec::new();
    GzDecoder::new(raw)
        .read_to_end(&mut inflated)
        .map_err(CieloClientError::Decompress)?;

    Ok(String::from_utf8_lossy(&inflated).into_owned())
}

/// One entry of a 400 response body
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorRecord {
    code: i32,
    #[serde(default)]
    message: String,
}

/// Map a status code and body to a value or an error
fn parse_response<R>(status: StatusCode, body: &str) -> Result<R>
where
    R: DeserializeOwned + Default,
{
    match status {
        StatusCode::OK | StatusCode::CREATED => serde_json::from_str(body).map_err(CieloClientError::Parse),
        other => reject(other, body).map(|()| R::default()),
    }
}

/// Map a status code to success or an error, ignoring any success body
fn parse_empty_response(status: StatusCode, body: &str) -> Result<()> {
    match status {
        StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT => Ok(()),
        other => reject(other, body),
    }
}

/// Errors for 400 and 404; any other status passes through
fn reject(status: StatusCode, body: &str) -> Result<()> {
    match status {
        StatusCode::BAD_REQUEST => Err(parse_error_chain(body)?.into()),
        StatusCode::NOT_FOUND => Err(CieloError::not_found().into()),
        other => {
            // TODO: decide whether statuses outside 200/201/400/404 should surface as errors
            tracing::warn!(status = other.as_u16(), "unexpected cielo status, returning an empty value");
            Ok(())
        }
    }
}

/// Fold the error list so the last reported error is outermost
fn parse_error_chain(body: &str) -> Result<CieloError> {
    let records: Vec<ErrorRecord> = serde_json::from_str(body).map_err(CieloClientError::Parse)?;

    let chain = records
        .into_iter()
        .fold(None, |cause, record| Some(CieloError::new(record.message, record.code, cause)));

    Ok(chain.unwrap_or_else(CieloError::no_detail))
}

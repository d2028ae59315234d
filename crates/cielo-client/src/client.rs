use std::sync::Arc;

use cielo_config::{ClientConfig, Environment};
use reqwest::Method;
use url::Url;

use crate::error::{CieloClientError, Result};
use crate::logger::{PayloadLogger, TracingPayloadLogger};
use crate::merchant::Merchant;
use crate::transport::{Timeouts, Transport};
use crate::types::{Card, RecurrentSale, Sale, SaleResponse};

/// Typed client for the Cielo e-commerce API 3.0
///
/// Clones share the same transport and therefore the same HTTP client.
#[derive(Debug, Clone)]
pub struct CieloEcommerce {
    environment: Environment,
    transport: Arc<Transport>,
}

impl CieloEcommerce {
    /// Create a client for the given merchant and environment
    pub fn new(merchant: Merchant, environment: Environment) -> Self {
        Self {
            environment,
            transport: Arc::new(Transport::new(merchant)),
        }
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(Merchant::from(&config.merchant), config.environment.clone())
            .with_timeouts(Timeouts {
                request: Some(config.http.timeout),
                connect: Some(config.http.connect_timeout),
            })
            .with_payload_logging(config.logging.payloads)
    }

    /// Use an existing HTTP client
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        Arc::make_mut(&mut self.transport).set_http_client(http);
        self
    }

    /// Timeouts for the HTTP client built on first use
    #[must_use]
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        Arc::make_mut(&mut self.transport).set_timeouts(timeouts);
        self
    }

    /// Log redacted payloads through `tracing`, or not at all
    #[must_use]
    pub fn with_payload_logging(self, enabled: bool) -> Self {
        self.with_logger(enabled.then(|| Arc::new(TracingPayloadLogger) as Arc<dyn PayloadLogger>))
    }

    /// Replace the payload sink; `None` turns payload logging off
    #[must_use]
    pub fn with_logger(mut self, logger: Option<Arc<dyn PayloadLogger>>) -> Self {
        Arc::make_mut(&mut self.transport).set_logger(logger);
        self
    }

    /// Target environment
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    // -- Sales --

    /// Create a sale and return it with the payment id and status
    ///
    /// POST `1/sales/`
    pub async fn create_sale(&self, sale: &Sale) -> Result<Sale> {
        let url = make_url(self.environment.api_url(), &["1", "sales", ""])?;
        self.transport.send(Method::POST, url, Some(sale)).await
    }

    /// Fetch a sale by payment id
    ///
    /// GET `1/sales/{payment_id}` on the query host
    pub async fn query_sale(&self, payment_id: &str) -> Result<Sale> {
        let url = make_url(self.environment.api_query_url(), &["1", "sales", payment_id])?;
        self.transport.get(url).await
    }

    /// Fetch a recurring payment by its id
    ///
    /// GET `1/RecurrentPayment/{recurrent_payment_id}` on the query host
    pub async fn query_recurrent_sale(&self, recurrent_payment_id: &str) -> Result<RecurrentSale> {
        let url = make_url(
            self.environment.api_query_url(),
            &["1", "RecurrentPayment", recurrent_payment_id],
        )?;
        self.transport.get(url).await
    }

    /// Stop a recurring payment; Cielo answers with an empty body
    ///
    /// PUT `1/RecurrentPayment/{recurrent_payment_id}/Deactivate`
    pub async fn deactivate_recurrent_sale(&self, recurrent_payment_id: &str) -> Result<()> {
        let url = make_url(
            self.environment.api_url(),
            &["1", "RecurrentPayment", recurrent_payment_id, "Deactivate"],
        )?;
        self.transport.send_empty::<()>(Method::PUT, url, None).await
    }

    /// Capture an authorized sale, fully or partially
    ///
    /// PUT `1/sales/{payment_id}/capture`
    pub async fn capture_sale(
        &self,
        payment_id: &str,
        amount: Option<u64>,
        service_tax_amount: Option<u64>,
    ) -> Result<SaleResponse> {
        let mut url = make_url(self.environment.api_url(), &["1", "sales", payment_id, "capture"])?;
        append_amount(&mut url, "amount", amount);
        append_amount(&mut url, "serviceTaxAmount", service_tax_amount);

        self.transport.send::<(), _>(Method::PUT, url, None).await
    }

    /// Cancel a sale, fully or partially
    ///
    /// PUT `1/sales/{payment_id}/void`
    pub async fn cancel_sale(&self, payment_id: &str, amount: Option<u64>) -> Result<SaleResponse> {
        let mut url = make_url(self.environment.api_url(), &["1", "sales", payment_id, "void"])?;
        append_amount(&mut url, "amount", amount);

        self.transport.send::<(), _>(Method::PUT, url, None).await
    }

    // -- Card tokens --

    /// Tokenize a card; the returned card carries the token
    ///
    /// POST `1/card/`
    pub async fn create_card_token(&self, card: &Card) -> Result<Card> {
        let url = make_url(self.environment.api_url(), &["1", "card", ""])?;
        self.transport.send(Method::POST, url, Some(card)).await
    }

    /// Fetch the (masked) card behind a token
    ///
    /// GET `1/card/{card_token}` on the query host
    pub async fn query_card_token(&self, card_token: &str) -> Result<Card> {
        let url = make_url(self.environment.api_query_url(), &["1", "card", card_token])?;
        self.transport.get(url).await
    }
}

// -- Helper functions --

/// Append percent-encoded path segments to a base URL
///
/// A trailing `""` segment yields a trailing slash.
fn make_url(base_url: &str, segments: &[&str]) -> Result<Url> {
    let mut url =
        Url::parse(base_url).map_err(|e| CieloClientError::Config(format!("invalid base URL '{base_url}': {e}")))?;

    url.path_segments_mut()
        .map_err(|()| CieloClientError::Config(format!("base URL '{base_url}' cannot have a path")))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

fn append_amount(url: &mut Url, name: &str, amount: Option<u64>) {
    if let Some(amount) = amount {
        url.query_pairs_mut().append_pair(name, &amount.to_string());
    }
}

use serde::{Deserialize, Serialize};

// -- Sale --

/// A sale: order id, customer and payment
///
/// Sent to create a transaction and returned, enriched with the payment id
/// and status, by create and query operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Sale {
    /// Merchant's own order identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_order_id: Option<String>,
    /// Buyer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    /// Payment details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<Payment>,
}

impl Sale {
    /// Start a sale for the given order id
    pub fn new(merchant_order_id: impl Into<String>) -> Self {
        Self {
            merchant_order_id: Some(merchant_order_id.into()),
            ..Self::default()
        }
    }

    /// Set the customer
    #[must_use]
    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    /// Set the payment
    #[must_use]
    pub fn with_payment(mut self, payment: Payment) -> Self {
        self.payment = Some(payment);
        self
    }

    /// Payment id assigned by Cielo, once created
    pub fn payment_id(&self) -> Option<&str> {
        self.payment.as_ref()?.payment_id.as_deref()
    }
}

/// Buyer information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Customer {
    /// Full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// E-mail address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Birth date, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    /// Document number (CPF or CNPJ)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    /// Document type, `CPF` or `CNPJ`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_type: Option<String>,
    /// Billing address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Shipping address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<Address>,
}

impl Customer {
    /// Customer with just a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Postal address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

// -- Payment --

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentType {
    CreditCard,
    DebitCard,
    ElectronicTransfer,
    Boleto,
    Pix,
}

/// Payment attached to a sale
///
/// Amounts are in cents. Request-side fields describe what to charge;
/// the remaining fields are filled in by Cielo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Payment {
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<PaymentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_tax_amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installments: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Capture on authorization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture: Option<bool>,
    /// Require 3-D Secure authentication
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authenticate: Option<bool>,
    /// Text shown on the cardholder's statement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soft_descriptor: Option<String>,
    /// Where the buyer returns after redirect-based flows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    /// Acquirer or bank, e.g. `Simulado` in the sandbox
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_card: Option<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debit_card: Option<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet: Option<Wallet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrent_payment: Option<RecurrentPayment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_of_sale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_return_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_return_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
}

impl Payment {
    /// Single-installment payment of `amount` cents
    pub fn new(amount: u64) -> Self {
        Self::with_installments(amount, 1)
    }

    /// Payment of `amount` cents split into `installments`
    pub fn with_installments(amount: u64, installments: u32) -> Self {
        Self {
            amount: Some(amount),
            installments: Some(installments),
            ..Self::default()
        }
    }

    /// Pay by credit card
    #[must_use]
    pub fn credit_card(mut self, card: Card) -> Self {
        self.payment_type = Some(PaymentType::CreditCard);
        self.credit_card = Some(card);
        self
    }

    /// Pay by debit card; Cielo requires authentication for debit
    #[must_use]
    pub fn debit_card(mut self, card: Card) -> Self {
        self.payment_type = Some(PaymentType::DebitCard);
        self.authenticate = Some(true);
        self.debit_card = Some(card);
        self
    }

    /// Pay through a digital wallet
    #[must_use]
    pub fn wallet(mut self, wallet: Wallet) -> Self {
        self.wallet = Some(wallet);
        self
    }

    /// Make this the first charge of a recurring payment
    #[must_use]
    pub fn recurrent(mut self, recurrent_payment: RecurrentPayment) -> Self {
        self.recurrent_payment = Some(recurrent_payment);
        self
    }
}

// -- Card --

/// Card data, also used for card tokenization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Card {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder: Option<String>,
    /// `MM/YYYY`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_code: Option<String>,
    /// Issuer, e.g. `Visa` or `Master`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Tokenize the card while paying
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_card: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_token: Option<String>,
    /// Cardholder's customer name, required for tokenization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}

impl Card {
    /// Card identified by security code and brand
    pub fn new(security_code: impl Into<String>, brand: impl Into<String>) -> Self {
        Self {
            security_code: Some(security_code.into()),
            brand: Some(brand.into()),
            ..Self::default()
        }
    }

    /// Card referenced by a previously created token
    pub fn from_token(card_token: impl Into<String>) -> Self {
        Self {
            card_token: Some(card_token.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_number(mut self, card_number: impl Into<String>) -> Self {
        self.card_number = Some(card_number.into());
        self
    }

    #[must_use]
    pub fn with_holder(mut self, holder: impl Into<String>) -> Self {
        self.holder = Some(holder.into());
        self
    }

    #[must_use]
    pub fn with_expiration_date(mut self, expiration_date: impl Into<String>) -> Self {
        self.expiration_date = Some(expiration_date.into());
        self
    }
}

// -- Wallet --

/// Digital wallet provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletType {
    VisaCheckout,
    Masterpass,
    AndroidPay,
    ApplePay,
    SamsungPay,
}

/// Digital wallet data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Wallet {
    #[serde(rename = "Type", skip_serializing_if = "Option::is_none")]
    pub wallet_type: Option<WalletType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<WalletAdditionalData>,
}

impl Wallet {
    /// Visa Checkout wallet identified by its key
    pub fn visa_checkout(wallet_key: impl Into<String>) -> Self {
        Self {
            wallet_type: Some(WalletType::VisaCheckout),
            wallet_key: Some(wallet_key.into()),
            additional_data: None,
        }
    }

    /// Masterpass wallet identified by its capture code
    pub fn masterpass(capture_code: impl Into<String>) -> Self {
        Self {
            wallet_type: Some(WalletType::Masterpass),
            wallet_key: None,
            additional_data: Some(WalletAdditionalData {
                capture_code: Some(capture_code.into()),
            }),
        }
    }
}

/// Extra wallet fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WalletAdditionalData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_code: Option<String>,
}

// -- Recurrence --

/// Billing interval of a recurring payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecurrentInterval {
    Monthly,
    Bimonthly,
    Quarterly,
    SemiAnnual,
    Annual,
}

/// Recurrence schedule, sent with a payment and returned by queries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecurrentPayment {
    /// Charge the first installment immediately
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorize_now: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<RecurrentInterval>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrent_payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_recurrency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installments: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_recurrency_try: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
}

impl RecurrentPayment {
    /// Schedule authorized now and repeated every `interval`
    pub fn new(interval: RecurrentInterval) -> Self {
        Self {
            authorize_now: Some(true),
            interval: Some(interval),
            ..Self::default()
        }
    }

    /// First charge on `start_date` (`YYYY-MM-DD`) instead of now
    #[must_use]
    pub fn starting_on(mut self, start_date: impl Into<String>) -> Self {
        self.authorize_now = Some(false);
        self.start_date = Some(start_date.into());
        self
    }

    /// Stop recurring after `end_date` (`YYYY-MM-DD`)
    #[must_use]
    pub fn ending_on(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }
}

/// Result of querying a recurring payment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecurrentSale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrent_payment: Option<RecurrentPayment>,
}

// -- Updates --

/// Result of capturing or cancelling a sale
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SaleResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_return_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_return_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_of_sale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
}

/// HATEOAS link returned by Cielo
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Link {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Client for the Cielo e-commerce API 3.0
//!
//! Card data in logged payloads is always masked before it reaches a
//! [`PayloadLogger`].

mod client;
mod error;
mod logger;
mod mask;
mod merchant;
mod transport;
mod types;

pub use cielo_config::Environment;
pub use client::CieloEcommerce;
pub use error::{CieloClientError, CieloError, Result};
pub use logger::{Direction, PayloadLogger, TracingPayloadLogger};
pub use mask::{UNMASKABLE_SENTINEL, mask_sensitive_card_data, mask_sensitive_card_data as redact};
pub use merchant::Merchant;
pub use transport::{Timeouts, Transport, USER_AGENT_VALUE};
pub use types::{
    Address, Card, Customer, Link, Payment, PaymentType, RecurrentInterval, RecurrentPayment, RecurrentSale, Sale,
    SaleResponse, Wallet, WalletAdditionalData, WalletType,
};

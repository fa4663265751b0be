//! Typed Rust client for the Beem Africa bulk SMS HTTP API.
//!
//! The crate is split into a domain layer of strong types (messages,
//! recipients, phone-number normalization), a transport layer for wire-format
//! details, and a small client layer orchestrating requests.
//!
//! ```rust,no_run
//! use beem::{Auth, BeemClient, Message};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BeemClient::new(Auth::new("api-key", "secret-key")?)?;
//!     let mut message = Message::new("INFO", "hello")?;
//!     message.add_recipient("0754123456", None, Some("TZ"))?;
//!     let data = client.send(message).await?;
//!     println!("{data}");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Auth, BeemClient, BeemClientBuilder, BeemError};
pub use domain::{
    ApiKey, CreditBalance, DeliveryState, DeliveryStatus, KnownDeliveryState, Message,
    MessageText, PhoneNumber, Recipient, RecipientId, RequestId, SecretKey, SenderAddr,
    ValidationError,
    generate_recipient_id, normalize,
};

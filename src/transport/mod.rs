//! Transport layer: wire-format details (serialization/deserialization).

mod balance;
mod delivery_report;
mod send;
mod text;

use serde::Deserialize;

pub use balance::decode_balance_json_response;
pub use delivery_report::{decode_delivery_report_json_response, encode_delivery_report_query};
pub use send::{decode_send_json_response, encode_send_json_body};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response is missing `{field}`")]
    MissingField { field: &'static str },
}

/// Every Beem response wraps its payload in a top-level `data` member.
///
/// A JSON `null` is treated the same as an absent member.
#[derive(Debug, Clone, Deserialize)]
struct DataEnvelope<T> {
    data: Option<T>,
}

impl<T> DataEnvelope<T> {
    fn into_data(self) -> Result<T, TransportError> {
        self.data
            .ok_or(TransportError::MissingField { field: "data" })
    }
}

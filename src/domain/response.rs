use crate::domain::value::{DeliveryState, RequestId};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Account credit balance (`data.credit_balance`).
///
/// Beem reports it as either a JSON string or a JSON number; the text is kept
/// exactly as received and is never reinterpreted as a numeric type.
pub struct CreditBalance(String);

impl CreditBalance {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Delivery outcome of a previously sent message for one destination.
pub struct DeliveryStatus {
    pub destination: String,
    pub status: DeliveryState,
    pub request_id: RequestId,
    /// The `data` payload as returned by the gateway; `None` for a synthetic not-found result.
    pub report: Option<serde_json::Value>,
}

impl DeliveryStatus {
    /// Result used when the delivery-report endpoint answers 404.
    pub fn not_found(destination: impl Into<String>, request_id: RequestId) -> Self {
        Self {
            destination: destination.into(),
            status: DeliveryState::not_found(),
            request_id,
            report: None,
        }
    }
}

use serde_json::Value;

use super::text::TransportText;
use super::{DataEnvelope, TransportError};
use crate::domain::{DeliveryState, DeliveryStatus, PhoneNumber, RequestId};

pub fn encode_delivery_report_query(
    destination: &str,
    request_id: &RequestId,
) -> Vec<(String, String)> {
    vec![
        (PhoneNumber::FIELD.to_owned(), destination.to_owned()),
        (RequestId::FIELD.to_owned(), request_id.as_str().to_owned()),
    ]
}

/// Decode a delivery report.
///
/// `data` may be a single report object or a list of them, in which case the
/// first entry is used. `dest_addr` and `request_id` fall back to the values
/// that were queried when the report omits them.
pub fn decode_delivery_report_json_response(
    destination: &str,
    request_id: &RequestId,
    json: &str,
) -> Result<DeliveryStatus, TransportError> {
    let parsed: DataEnvelope<Value> = serde_json::from_str(json)?;
    let data = parsed.into_data()?;

    let entry = match &data {
        Value::Array(items) => items.first(),
        other => Some(other),
    };
    let status = entry
        .and_then(|entry| entry.get("status"))
        .and_then(Value::as_str)
        .ok_or(TransportError::MissingField {
            field: "data.status",
        })?
        .to_owned();

    let text_field = |field: &str| {
        entry
            .and_then(|entry| entry.get(field))
            .and_then(TransportText::from_value)
            .map(TransportText::into_string)
    };
    let destination = text_field(PhoneNumber::FIELD).unwrap_or_else(|| destination.to_owned());
    let request_id = text_field(RequestId::FIELD)
        .and_then(|reported| RequestId::new(reported).ok())
        .unwrap_or_else(|| request_id.clone());

    Ok(DeliveryStatus {
        destination,
        status: DeliveryState::new(status),
        request_id,
        report: Some(data),
    })
}

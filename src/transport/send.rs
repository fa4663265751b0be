use serde::Serialize;

use super::{DataEnvelope, TransportError};
use crate::domain::{Message, Recipient};

/// Scheduling is not supported; the gateway expects the field to be present and empty.
const SCHEDULE_NOW: &str = "";
/// Default single-byte (GSM 7-bit) encoding marker.
const DEFAULT_ENCODING: &str = "0";

#[derive(Debug, Serialize)]
struct SendJsonRequest<'a> {
    source_addr: &'a str,
    schedule_time: &'a str,
    encoding: &'a str,
    message: &'a str,
    recipients: Vec<RecipientJson<'a>>,
}

#[derive(Debug, Serialize)]
struct RecipientJson<'a> {
    recipient_id: &'a str,
    dest_addr: &'a str,
}

impl<'a> From<&'a Recipient> for RecipientJson<'a> {
    fn from(value: &'a Recipient) -> Self {
        Self {
            recipient_id: value.id().as_str(),
            dest_addr: value.destination(),
        }
    }
}

pub fn encode_send_json_body(message: &Message) -> Result<String, serde_json::Error> {
    let request = SendJsonRequest {
        source_addr: message.sender().as_str(),
        schedule_time: SCHEDULE_NOW,
        encoding: DEFAULT_ENCODING,
        message: message.text().as_str(),
        recipients: message.recipients().iter().map(RecipientJson::from).collect(),
    };
    serde_json::to_string(&request)
}

/// Extract the opaque `data` payload; its structure is vendor-defined and forwarded as-is.
pub fn decode_send_json_response(json: &str) -> Result<serde_json::Value, TransportError> {
    let parsed: DataEnvelope<serde_json::Value> = serde_json::from_str(json)?;
    parsed.into_data()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn encode_send_body_uses_wire_field_names() {
        let mut message = Message::new("INFO", "hello").unwrap();
        message.add_recipient("255754123456", Some("1"), None).unwrap();
        message.add_recipient("255754000001", Some("2"), None).unwrap();

        let body = encode_send_json_body(&message).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "source_addr": "INFO",
                "schedule_time": "",
                "encoding": "0",
                "message": "hello",
                "recipients": [
                    {"recipient_id": "1", "dest_addr": "255754123456"},
                    {"recipient_id": "2", "dest_addr": "255754000001"}
                ]
            })
        );
    }

    #[test]
    fn decode_forwards_data_verbatim() {
        let json = r#"
        {
          "data": {
            "successful": true,
            "request_id": 1234,
            "code": 100,
            "message": "Message Submitted Successfully",
            "valid": 1,
            "invalid": 0,
            "duplicates": 0
          }
        }
        "#;
        let data = decode_send_json_response(json).unwrap();
        assert_eq!(data["request_id"], json!(1234));
        assert_eq!(data["valid"], json!(1));
    }

    #[test]
    fn decode_requires_data_member() {
        let err = decode_send_json_response(r#"{"successful": true}"#).unwrap_err();
        assert!(matches!(err, TransportError::MissingField { field: "data" }));

        let err = decode_send_json_response(r#"{"data": null}"#).unwrap_err();
        assert!(matches!(err, TransportError::MissingField { field: "data" }));
    }

    #[test]
    fn decode_rejects_malformed_json() {
        let err = decode_send_json_response("{ not json }").unwrap_err();
        assert!(matches!(err, TransportError::Json(_)));
    }
}

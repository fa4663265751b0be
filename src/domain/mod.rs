//! Domain layer: strong types with validation and invariants (no I/O).

mod message;
mod phone;
mod recipient_id;
mod response;
mod validation;
mod value;

pub use message::{Message, Recipient};
pub use phone::{PhoneNumber, normalize, parse_region};
pub use recipient_id::generate_recipient_id;
pub use response::{CreditBalance, DeliveryStatus};
pub use validation::ValidationError;
pub use value::{
    ApiKey, DeliveryState, KnownDeliveryState, MessageText, RecipientId, RequestId, SecretKey,
    SenderAddr,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_rejects_empty() {
        assert!(matches!(
            ApiKey::new("   "),
            Err(ValidationError::Empty {
                field: ApiKey::FIELD
            })
        ));
    }

    #[test]
    fn secret_key_rejects_empty() {
        assert!(matches!(
            SecretKey::new(""),
            Err(ValidationError::Empty {
                field: SecretKey::FIELD
            })
        ));
    }

    #[test]
    fn normalized_recipient_matches_parsed_phone_number() {
        let parsed = PhoneNumber::parse(parse_region("TZ").unwrap(), "0754123456").unwrap();
        let mut message = Message::new("INFO", "hi").unwrap();
        let recipient = message
            .add_recipient("0754123456", None, Some("TZ"))
            .unwrap();
        assert_eq!(recipient.destination(), parsed.canonical());
    }

    #[test]
    fn not_found_status_has_no_report() {
        let request_id = RequestId::new("req-1").unwrap();
        let status = DeliveryStatus::not_found("255754123456", request_id);
        assert_eq!(status.status.known(), Some(KnownDeliveryState::NotFound));
        assert_eq!(status.destination, "255754123456");
        assert_eq!(status.request_id.as_str(), "req-1");
        assert!(status.report.is_none());
    }
}

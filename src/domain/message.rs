use crate::domain::phone::{PhoneNumber, normalize, parse_region};
use crate::domain::recipient_id::generate_recipient_id;
use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageText, RecipientId, SenderAddr};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single SMS destination with its correlation id.
pub struct Recipient {
    id: RecipientId,
    destination: String,
}

impl Recipient {
    /// Correlation id sent as `recipient_id`.
    pub fn id(&self) -> &RecipientId {
        &self.id
    }

    /// Destination sent as `dest_addr`: canonical when a region was given, raw otherwise.
    pub fn destination(&self) -> &str {
        &self.destination
    }
}

#[derive(Debug, Clone)]
/// One outbound message: a sender, a body, and an ordered list of recipients.
///
/// Recipients are only ever appended. Duplicates are allowed; each entry is
/// delivered and reported on independently.
pub struct Message {
    sender: SenderAddr,
    text: MessageText,
    recipients: Vec<Recipient>,
}

impl Message {
    /// Create a message with no recipients.
    pub fn new(
        sender: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            sender: SenderAddr::new(sender)?,
            text: MessageText::new(text)?,
            recipients: Vec::new(),
        })
    }

    /// Create a message whose sender is itself a phone number, normalized against `region`.
    ///
    /// Fails when the sender does not validate for that region.
    pub fn with_sender_region(
        sender: impl Into<String>,
        text: impl Into<String>,
        region: &str,
    ) -> Result<Self, ValidationError> {
        let sender = sender.into();
        let canonical = normalize_strict(&sender, region)?;
        Self::new(canonical, text)
    }

    /// Append a recipient.
    ///
    /// With a non-empty `region` the destination is normalized first and the
    /// call fails if it does not validate. Without an `id` one is derived from
    /// the body, sender and destination. On error the recipient list is left
    /// untouched.
    pub fn add_recipient(
        &mut self,
        destination: &str,
        id: Option<&str>,
        region: Option<&str>,
    ) -> Result<&Recipient, ValidationError> {
        let destination = match region {
            Some(region) if !region.trim().is_empty() => normalize_strict(destination, region)?,
            _ => destination.trim().to_owned(),
        };
        if destination.is_empty() {
            return Err(ValidationError::Empty {
                field: PhoneNumber::FIELD,
            });
        }

        let id = match id {
            Some(id) => RecipientId::new(id)?,
            None => generate_recipient_id(self.text.as_str(), self.sender.as_str(), &destination),
        };

        self.recipients.push(Recipient { id, destination });
        Ok(&self.recipients[self.recipients.len() - 1])
    }

    pub fn sender(&self) -> &SenderAddr {
        &self.sender
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }
}

fn normalize_strict(raw: &str, region: &str) -> Result<String, ValidationError> {
    parse_region(region)?;
    normalize(raw, region).ok_or_else(|| ValidationError::InvalidPhoneNumber {
        input: raw.trim().to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_recipient_normalizes_with_region() {
        let mut message = Message::new("INFO", "hello").unwrap();
        let recipient = message
            .add_recipient("0754 123 456", Some("7"), Some("TZ"))
            .unwrap();
        assert_eq!(recipient.destination(), "255754123456");
        assert_eq!(recipient.id().as_str(), "7");
    }

    #[test]
    fn add_recipient_without_region_keeps_raw_destination() {
        let mut message = Message::new("INFO", "hello").unwrap();
        message.add_recipient(" 0754123456 ", None, None).unwrap();
        message.add_recipient("0754123456", None, Some("")).unwrap();
        assert_eq!(message.recipients()[0].destination(), "0754123456");
        assert_eq!(message.recipients()[1].destination(), "0754123456");
    }

    #[test]
    fn add_recipient_with_invalid_number_leaves_list_unchanged() {
        let mut message = Message::new("INFO", "hello").unwrap();
        message
            .add_recipient("0754123456", None, Some("TZ"))
            .unwrap();

        let err = message
            .add_recipient("12345", None, Some("TZ"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPhoneNumber { .. }));
        assert_eq!(message.recipients().len(), 1);

        let err = message
            .add_recipient("0754123456", None, Some("QQ"))
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnknownRegion { .. }));
        assert_eq!(message.recipients().len(), 1);
    }

    #[test]
    fn add_recipient_rejects_empty_destination() {
        let mut message = Message::new("INFO", "hello").unwrap();
        let err = message.add_recipient("   ", None, None).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Empty {
                field: PhoneNumber::FIELD
            }
        );
        assert!(message.recipients().is_empty());
    }

    #[test]
    fn generated_ids_differ_for_duplicate_recipients() {
        let mut message = Message::new("INFO", "hello").unwrap();
        message.add_recipient("255754123456", None, None).unwrap();
        message.add_recipient("255754123456", None, None).unwrap();

        let recipients = message.recipients();
        assert_eq!(recipients.len(), 2);
        assert_eq!(recipients[0].destination(), recipients[1].destination());
        assert_ne!(recipients[0].id(), recipients[1].id());
    }

    #[test]
    fn sender_can_be_normalized_at_construction() {
        let message = Message::with_sender_region("0754123456", "hello", "TZ").unwrap();
        assert_eq!(message.sender().as_str(), "255754123456");

        assert!(Message::with_sender_region("12345", "hello", "TZ").is_err());
    }

    #[test]
    fn message_requires_sender_and_text() {
        assert!(Message::new("", "hello").is_err());
        assert!(Message::new("INFO", "  ").is_err());
    }
}

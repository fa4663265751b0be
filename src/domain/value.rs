use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Beem API key, the user half of the Basic-Auth pair.
///
/// Invariant: non-empty after trimming.
pub struct ApiKey(String);

impl ApiKey {
    /// Field name used in error messages (`api_key`).
    pub const FIELD: &'static str = "api_key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Beem secret key, the password half of the Basic-Auth pair.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct SecretKey(String);

impl SecretKey {
    /// Field name used in error messages (`secret_key`).
    pub const FIELD: &'static str = "secret_key";

    /// Create a validated [`SecretKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the secret as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender identity (`source_addr`): a numeric sender or an alphanumeric short code.
///
/// Invariant: non-empty after trimming.
pub struct SenderAddr(String);

impl SenderAddr {
    /// JSON field name used by Beem (`source_addr`).
    pub const FIELD: &'static str = "source_addr";

    /// Create a validated [`SenderAddr`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message body (`message`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// JSON field name used by Beem (`message`).
    pub const FIELD: &'static str = "message";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Per-recipient correlation id (`recipient_id`).
///
/// Invariant: non-empty after trimming.
pub struct RecipientId(String);

impl RecipientId {
    /// JSON field name used by Beem (`recipient_id`).
    pub const FIELD: &'static str = "recipient_id";

    /// Create a validated [`RecipientId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub(crate) fn from_digest(digest: String) -> Self {
        Self(digest)
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Gateway request id (`request_id`) returned by a send and used to look up delivery reports.
///
/// Invariant: non-empty after trimming.
pub struct RequestId(String);

impl RequestId {
    /// Query parameter name used by Beem (`request_id`).
    pub const FIELD: &'static str = "request_id";

    /// Create a validated [`RequestId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Vendor delivery state (`status` in a delivery report).
///
/// The vendor string is preserved as-is even when it is unknown to this crate.
pub struct DeliveryState(String);

impl DeliveryState {
    /// Synthetic state reported when the gateway answers a delivery lookup with 404.
    pub const NOT_FOUND: &'static str = "NOTFOUND";

    /// Wrap a vendor state string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The state that stands for a 404 from the delivery-report endpoint.
    pub fn not_found() -> Self {
        Self(Self::NOT_FOUND.to_owned())
    }

    /// Borrow the state exactly as reported.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Map this state to a known variant, if one exists.
    pub fn known(&self) -> Option<KnownDeliveryState> {
        KnownDeliveryState::from_vendor(&self.0)
    }

    /// Returns `true` once the handset has acknowledged the message.
    pub fn is_delivered(&self) -> bool {
        self.known() == Some(KnownDeliveryState::Delivered)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Delivery states documented by Beem.
pub enum KnownDeliveryState {
    Delivered,
    Pending,
    Failed,
    NotFound,
}

impl KnownDeliveryState {
    /// Convert a vendor state string (case-insensitive) into a known variant.
    pub fn from_vendor(value: &str) -> Option<Self> {
        Some(match value.trim().to_ascii_uppercase().as_str() {
            "DELIVERED" => Self::Delivered,
            "PENDING" => Self::Pending,
            "FAILED" | "UNDELIVERED" => Self::Failed,
            DeliveryState::NOT_FOUND => Self::NotFound,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        let key = ApiKey::new("  key ").unwrap();
        assert_eq!(key.as_str(), "key");
        assert!(ApiKey::new("  ").is_err());

        let secret = SecretKey::new(" secret ").unwrap();
        assert_eq!(secret.as_str(), " secret ");
        assert!(SecretKey::new("").is_err());

        let sender = SenderAddr::new(" INFO ").unwrap();
        assert_eq!(sender.as_str(), "INFO");
        assert!(SenderAddr::new("").is_err());

        let msg = MessageText::new(" hi ").unwrap();
        assert_eq!(msg.as_str(), " hi ");
        assert!(MessageText::new("  ").is_err());

        let id = RecipientId::new(" 42 ").unwrap();
        assert_eq!(id.as_str(), "42");
        assert!(RecipientId::new(" ").is_err());

        let request_id = RequestId::new(" 9001 ").unwrap();
        assert_eq!(request_id.as_str(), "9001");
        assert!(matches!(
            RequestId::new("  "),
            Err(ValidationError::Empty {
                field: RequestId::FIELD
            })
        ));
    }

    #[test]
    fn delivery_state_known_mapping() {
        assert_eq!(
            DeliveryState::new("DELIVERED").known(),
            Some(KnownDeliveryState::Delivered)
        );
        assert_eq!(
            DeliveryState::new("pending").known(),
            Some(KnownDeliveryState::Pending)
        );
        assert_eq!(
            DeliveryState::not_found().known(),
            Some(KnownDeliveryState::NotFound)
        );

        let unknown = DeliveryState::new("QUEUED_AT_SMSC");
        assert_eq!(unknown.known(), None);
        assert_eq!(unknown.as_str(), "QUEUED_AT_SMSC");
        assert!(!unknown.is_delivered());
    }
}

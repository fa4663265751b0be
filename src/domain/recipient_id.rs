use std::sync::atomic::{AtomicU64, Ordering};

use sha2::{Digest, Sha256};

use crate::domain::value::RecipientId;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Derive a correlation id for a recipient the caller did not name.
///
/// The id is the hex SHA-256 of the message body, sender and destination,
/// salted with the current time in nanoseconds and a process-wide sequence
/// number. It is unique enough for correlating delivery reports; it is not
/// a security token.
pub fn generate_recipient_id(body: &str, sender: &str, destination: &str) -> RecipientId {
    let nanos = chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default();
    let sequence = SEQUENCE.fetch_add(1, Ordering::Relaxed);

    let mut hasher = Sha256::new();
    for part in [body, sender, destination] {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    hasher.update(nanos.to_be_bytes());
    hasher.update(sequence.to_be_bytes());

    RecipientId::from_digest(hex::encode(hasher.finalize()))
}

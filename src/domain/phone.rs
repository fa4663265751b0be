use phonenumber::country;

use crate::domain::validation::ValidationError;

/// Parse an ISO 3166 alpha-2 region hint (case-insensitive).
///
/// Returns `Ok(None)` for an empty hint.
pub fn parse_region(hint: &str) -> Result<Option<country::Id>, ValidationError> {
    let trimmed = hint.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .to_ascii_uppercase()
        .parse::<country::Id>()
        .map(Some)
        .map_err(|_| ValidationError::UnknownRegion {
            region: trimmed.to_owned(),
        })
}

/// Normalize a local-format number into its canonical digit string.
///
/// The canonical form is the E.164 representation without the leading `+`
/// (`0754123456` in `TZ` becomes `255754123456`). Returns `None` when the
/// region is unknown or the number does not validate against its numbering
/// plan; callers decide whether that aborts or falls back to `raw`.
///
/// Numbers carrying an extension (`0754123456;ext=1`) are rejected; an SMS
/// cannot be routed to one.
///
/// An empty `region_hint` disables normalization and `raw` passes through
/// unchanged.
pub fn normalize(raw: &str, region_hint: &str) -> Option<String> {
    let region = match parse_region(region_hint) {
        Ok(Some(region)) => region,
        Ok(None) => return Some(raw.to_owned()),
        Err(_) => return None,
    };
    PhoneNumber::parse(Some(region), raw)
        .ok()
        .map(|number| number.canonical().to_owned())
}

#[derive(Debug, Clone)]
/// Phone number validated against its numbering plan.
///
/// Equality and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// JSON field name used by Beem (`dest_addr`).
    pub const FIELD: &'static str = "dest_addr";

    /// Parse a number and reject it unless it is valid for its region and has no extension.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;
        if !phonenumber::is_valid(&parsed) || parsed.extension().is_some() {
            return Err(ValidationError::InvalidPhoneNumber { input: raw });
        }

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation, with the leading `+`.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// E.164 digits without the leading `+`, as the gateway expects them.
    pub fn canonical(&self) -> &str {
        self.e164.trim_start_matches('+')
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_local_numbers_to_canonical_digits() {
        assert_eq!(normalize("0754123456", "TZ").as_deref(), Some("255754123456"));
        assert_eq!(
            normalize("8 925 123-45-67", "ru").as_deref(),
            Some("79251234567")
        );
        assert_eq!(
            normalize("+255 754 123 456", "TZ").as_deref(),
            Some("255754123456")
        );
    }

    #[test]
    fn normalize_rejects_numbers_outside_the_numbering_plan() {
        assert_eq!(normalize("12345", "TZ"), None);
        assert_eq!(normalize("not-a-number", "TZ"), None);
        assert_eq!(normalize("", "TZ"), None);
    }

    #[test]
    fn normalize_rejects_numbers_with_extension() {
        assert_eq!(normalize("0754123456;ext=1", "TZ"), None);
        assert!(matches!(
            PhoneNumber::parse(Some(country::Id::TZ), "0754123456;ext=1"),
            Err(ValidationError::InvalidPhoneNumber { .. })
        ));
    }

    #[test]
    fn normalize_rejects_unknown_region() {
        assert_eq!(normalize("0754123456", "ZZZ"), None);
    }

    #[test]
    fn normalize_without_region_passes_raw_through() {
        assert_eq!(normalize(" 0754 123 ", "").as_deref(), Some(" 0754 123 "));
        assert_eq!(normalize("INFO", "  ").as_deref(), Some("INFO"));
    }

    #[test]
    fn parse_region_is_case_insensitive() {
        assert_eq!(parse_region("tz").unwrap(), Some(country::Id::TZ));
        assert_eq!(parse_region("").unwrap(), None);
        assert!(matches!(
            parse_region("nowhere"),
            Err(ValidationError::UnknownRegion { .. })
        ));
    }

    #[test]
    fn phone_number_equality_uses_e164() {
        let p1 = PhoneNumber::parse(Some(country::Id::TZ), "0754123456").unwrap();
        let p2 = PhoneNumber::parse(None, "+255 754 123 456").unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.e164(), "+255754123456");
        assert_eq!(p1.canonical(), "255754123456");
        assert_eq!(p1.raw(), "0754123456");
    }
}

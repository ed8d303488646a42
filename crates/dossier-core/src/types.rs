//! Shared identifier types.

use crate::error::DossierError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Newtype for German commercial register company identifiers.
///
/// Format: `<country>-<register type>-<number>-<sub number>`, e.g.
/// `DE-HRB-123456-00001`. The country must be `de`, the register type must
/// start with `hr` (both case-insensitive) and the last two segments are
/// ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegistryId(String);

impl RegistryId {
    /// Create a new `RegistryId` from a string.
    ///
    /// # Errors
    /// Returns error if the ID does not match the register format.
    pub fn new(id: impl Into<String>) -> Result<Self, DossierError> {
        let id = id.into();
        if Self::is_valid(&id) {
            Ok(Self(id))
        } else {
            Err(DossierError::Validation(format!(
                "invalid registry ID: expected DE-HR*-<digits>-<digits>, got '{id}'"
            )))
        }
    }

    /// Check whether `id` is a well-formed register identifier.
    ///
    /// Never fails; any malformed input is simply `false`.
    #[must_use]
    pub fn is_valid(id: &str) -> bool {
        static REGISTRY_ID_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = REGISTRY_ID_REGEX
            .get_or_init(|| Regex::new(r"(?i)^de-hr[^-]*-[0-9]+-[0-9]+$").expect("valid regex"));

        regex.is_match(id)
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RegistryId {
    type Error = DossierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RegistryId> for String {
    fn from(id: RegistryId) -> Self {
        id.0
    }
}

/// Newtype for D-U-N-S numbers, stored in the `XX-XXX-XXXX` form.
///
/// Input may be the nine bare digits or the hyphenated form; hyphens are
/// stripped before the digits are regrouped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Duns(String);

impl Duns {
    /// Number of digits in a D-U-N-S number.
    pub const DIGITS: usize = 9;

    /// Parse and normalize a D-U-N-S number.
    ///
    /// # Errors
    /// Returns error for negative, non-digit, or wrongly sized input.
    pub fn parse(raw: &str) -> Result<Self, DossierError> {
        let trimmed = raw.trim();
        let invalid = |reason: &str| {
            DossierError::Validation(format!("invalid D-U-N-S number '{raw}': {reason}"))
        };

        if trimmed.starts_with('-') {
            return Err(invalid("negative"));
        }

        let digits = trimmed.replace('-', "");
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("non-digit characters"));
        }
        if digits.len() != Self::DIGITS {
            return Err(invalid("expected 9 digits"));
        }

        Ok(Self(format!("{}-{}-{}", &digits[..2], &digits[2..5], &digits[5..])))
    }

    /// Build a D-U-N-S number from its numeric form, keeping leading zeros.
    ///
    /// # Errors
    /// Returns error for negative numbers or more than nine digits.
    pub fn from_number(number: i64) -> Result<Self, DossierError> {
        if number < 0 {
            return Err(DossierError::Validation(format!(
                "invalid D-U-N-S number '{number}': negative"
            )));
        }
        Self::parse(&format!("{number:09}"))
    }

    /// Check whether `duns` is already in the formatted `XX-XXX-XXXX` shape.
    #[must_use]
    pub fn is_valid(duns: &str) -> bool {
        let digits = duns.replace('-', "");
        duns.len() == Self::DIGITS + 2
            && !digits.is_empty()
            && digits.chars().all(|c| c.is_ascii_digit())
    }

    /// Get the formatted value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Duns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Duns {
    type Error = DossierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Duns> for String {
    fn from(duns: Duns) -> Self {
        duns.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_id_valid() {
        let valid_ids = vec![
            "DE-HRB-123456-00001",
            "de-hra-1-2",
            "De-Hr-42-7",
            "DE-HRBX-0-0",
        ];

        for id in valid_ids {
            assert!(RegistryId::is_valid(id), "Failed for: {id}");
            assert_eq!(RegistryId::new(id).expect("valid id").as_str(), id);
        }
    }

    #[test]
    fn test_registry_id_invalid() {
        let invalid_ids = vec![
            "FR-HRB-123456-00001", // Wrong country
            "DE-HRB-abc-00001",    // Non-numeric number
            "DE-HRB-123456",       // Three segments
            "DE-HRB-123456-1-2",   // Five segments
            "DE-VR-123456-00001",  // Not a commercial register
            "DE-HRB--00001",       // Empty number
            "DE-HRB-123456-0000x", // Non-numeric sub number
            " DE-HRB-1-2",         // Leading whitespace
            "",
        ];

        for id in invalid_ids {
            assert!(!RegistryId::is_valid(id), "Should fail for: {id}");
            assert!(RegistryId::new(id).is_err());
        }
    }

    #[test]
    fn test_registry_id_serde() {
        let id = RegistryId::new("DE-HRB-1-2").expect("valid id");
        let json = serde_json::to_string(&id).expect("serialize id");
        assert_eq!(json, "\"DE-HRB-1-2\"");

        let parsed: RegistryId = serde_json::from_str(&json).expect("deserialize id");
        assert_eq!(parsed, id);

        assert!(serde_json::from_str::<RegistryId>("\"FR-HRB-1-2\"").is_err());
    }

    #[test]
    fn test_duns_normalizes() {
        let cases = [
            ("804735132", "80-473-5132"),
            ("80-473-5132", "80-473-5132"),
            ("8-0473-5132", "80-473-5132"),
            (" 150483782 ", "15-048-3782"),
        ];

        for (raw, expected) in cases {
            assert_eq!(Duns::parse(raw).expect("valid duns").as_str(), expected);
        }

        assert_eq!(Duns::from_number(804_735_132).expect("valid duns").as_str(), "80-473-5132");
        assert_eq!(Duns::from_number(12_345_678).expect("valid duns").as_str(), "01-234-5678");
    }

    #[test]
    fn test_duns_rejects() {
        let invalid = [
            "-80473513",    // Negative
            "-804735132",   // Negative
            "80-47A-5132",  // Non-digit
            "80.473.5132",  // Wrong separator
            "80473513",     // Too short
            "8047351320",   // Too long
            "",
        ];

        for raw in invalid {
            assert!(Duns::parse(raw).is_err(), "Should fail for: {raw}");
        }

        assert!(Duns::from_number(-804_735_132).is_err());
        assert!(Duns::from_number(8_047_351_320).is_err());
    }

    #[test]
    fn test_duns_format_check() {
        assert!(Duns::is_valid("80-473-5132"));
        assert!(!Duns::is_valid("804735132"));
        assert!(!Duns::is_valid("80-47A-5132"));
        assert!(!Duns::is_valid("80+473+5132"));
        assert!(!Duns::is_valid("-----------"));
    }

    #[test]
    fn test_duns_serde() {
        let parsed: Duns = serde_json::from_str("\"804735132\"").expect("deserialize duns");
        assert_eq!(serde_json::to_string(&parsed).expect("serialize duns"), "\"80-473-5132\"");
        assert!(serde_json::from_str::<Duns>("\"80-47A-5132\"").is_err());
    }
}

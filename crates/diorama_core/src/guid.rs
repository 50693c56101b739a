//! Stable identifiers for objects and resources

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GuidError;

/// Textual form of an intentionally absent reference
pub const NULL_REF: &str = "null";

/// Globally unique identifier for scene objects and resources
///
/// Guids are the only stable way to refer to something across a save and
/// reload; positions in a list are not. They serialize as hyphenated
/// strings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Guid(Uuid);

impl Guid {
    /// Create a new random guid
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse from a hyphenated string
    pub fn parse(s: &str) -> Result<Self, GuidError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| GuidError::Malformed(s.to_string()))
    }

    /// Get the underlying UUID
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Encode an optional reference as a document string
    ///
    /// `None` encodes as the literal `"null"` so absent links are visible
    /// in the document rather than omitted.
    pub fn encode_ref(guid: Option<Guid>) -> String {
        match guid {
            Some(guid) => guid.to_string(),
            None => NULL_REF.to_string(),
        }
    }

    /// Decode a document reference string
    ///
    /// The literal `"null"` decodes to `None`. Anything else must be a
    /// well-formed guid; a typo is an error, never a silent `None`.
    pub fn decode_ref(s: &str) -> Result<Option<Guid>, GuidError> {
        if s == NULL_REF {
            return Ok(None);
        }
        Self::parse(s).map(Some)
    }
}

impl Default for Guid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Guid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guid_uniqueness() {
        let a = Guid::new();
        let b = Guid::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_round_trip() {
        let guid = Guid::new();
        let parsed = Guid::parse(&guid.to_string()).unwrap();
        assert_eq!(guid, parsed);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Guid::parse("not-a-guid"),
            Err(GuidError::Malformed(_))
        ));
    }

    #[test]
    fn test_encode_ref() {
        let guid = Guid::new();
        assert_eq!(Guid::encode_ref(Some(guid)), guid.to_string());
        assert_eq!(Guid::encode_ref(None), NULL_REF);
    }

    #[test]
    fn test_decode_ref_null() {
        assert_eq!(Guid::decode_ref(NULL_REF).unwrap(), None);
    }

    #[test]
    fn test_decode_ref_round_trip() {
        let guid = Guid::new();
        let decoded = Guid::decode_ref(&Guid::encode_ref(Some(guid))).unwrap();
        assert_eq!(decoded, Some(guid));
    }

    #[test]
    fn test_decode_ref_rejects_typo() {
        assert!(Guid::decode_ref("nulL").is_err());
        assert!(Guid::decode_ref("").is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let guid = Guid::new();
        let json = serde_json::to_string(&guid).unwrap();
        assert_eq!(json, format!("\"{}\"", guid));
        let back: Guid = serde_json::from_str(&json).unwrap();
        assert_eq!(guid, back);
    }
}

//! UUID utilities

use uuid::Uuid;

use crate::{Error, Result};

/// Generate a new UUIDv4
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Parse UUID from string
pub fn parse(s: &str) -> std::result::Result<Uuid, uuid::Error> {
    Uuid::parse_str(s)
}

/// Parse an identifier taken from a request path or query string
///
/// Malformed input maps to [`Error::InvalidId`] so callers can answer 400.
pub fn parse_id(s: &str) -> Result<Uuid> {
    parse(s.trim()).map_err(|_| Error::InvalidId(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_roundtrip() {
        let id = generate();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        let err = parse_id("not-a-uuid").unwrap_err();
        assert!(matches!(err, Error::InvalidId(ref s) if s == "not-a-uuid"));
    }
}

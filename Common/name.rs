use aliri_braid::braid;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref NAME_PATTERN: Regex = Regex::new(r"^[A-Za-z0-9]{1,20}$").unwrap();
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("name must match ^[A-Za-z0-9]{{1,20}}$")]
pub struct NameError;

/// A validated player handle. Constructed once at the signup handshake boundary; every other
/// component that needs a player identity receives an already-valid `Name`.
#[braid(validator)]
pub struct Name;

impl aliri_braid::Validator for Name {
    type Error = NameError;

    fn validate(s: &str) -> Result<(), Self::Error> {
        if NAME_PATTERN.is_match(s) {
            Ok(())
        } else {
            Err(NameError)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_alphanumeric_up_to_twenty() {
        assert!(Name::new("abc123").is_ok());
        assert!(Name::new("a".repeat(20)).is_ok());
    }

    #[test]
    fn rejects_empty_too_long_or_non_alphanumeric() {
        assert!(Name::new("").is_err());
        assert!(Name::new("a".repeat(21)).is_err());
        assert!(Name::new("bad name!").is_err());
    }
}

//! Phone number type for contact forms.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty (after trimming).
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains a character outside the allowed set.
    #[error("phone number may only contain digits, spaces, and -+()")]
    InvalidCharacter(char),
}

/// A loosely validated phone number.
///
/// Contact forms accept international formats, so validation is permissive:
/// digits, spaces, dashes, plus signs, and parentheses. No attempt is made
/// to verify the number is dialable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a `Phone` from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or contains a character other
    /// than digits, spaces, `-`, `+`, `(`, or `)`.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(PhoneError::Empty);
        }

        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_digit() || matches!(c, ' ' | '-' | '+' | '(' | ')')))
        {
            return Err(PhoneError::InvalidCharacter(bad));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Phone::parse("555-0123").is_ok());
        assert!(Phone::parse("+1 (555) 012-3456").is_ok());
        assert!(Phone::parse("0123456789").is_ok());
    }

    #[test]
    fn test_parse_trims() {
        assert_eq!(Phone::parse("  555-0123 ").unwrap().as_str(), "555-0123");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Phone::parse(""), Err(PhoneError::Empty));
        assert_eq!(Phone::parse("   "), Err(PhoneError::Empty));
    }

    #[test]
    fn test_parse_rejects_letters() {
        assert_eq!(
            Phone::parse("call me"),
            Err(PhoneError::InvalidCharacter('c'))
        );
    }
}

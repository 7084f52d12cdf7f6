//! # Identity Newtypes
//!
//! Court case numbers are opaque strings assigned by the record source
//! (e.g. `CR1234567`, `19CR01234`). The newtype keeps them from being
//! mixed up with other free-text fields such as charge names.

use serde::{Deserialize, Serialize};

use crate::error::InvalidCaseNumberError;

/// Implement `Deserialize` for a string newtype by routing the raw string
/// through the type's `new()` constructor, so invalid values are rejected
/// at deserialization time.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// A court case number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CaseNumber(String);

impl_validating_deserialize!(CaseNumber);

impl CaseNumber {
    /// Create a case number.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCaseNumberError::Malformed`] if the value is empty
    /// or contains whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidCaseNumberError> {
        let value = value.into();
        if value.is_empty() || value.chars().any(char::is_whitespace) {
            return Err(InvalidCaseNumberError::Malformed(value));
        }
        Ok(Self(value))
    }

    /// The case number as assigned by the court.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CaseNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

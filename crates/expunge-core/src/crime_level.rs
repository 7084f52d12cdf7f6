//! # Crime Levels
//!
//! A crime level labels the severity of a charge, e.g. `Felony Class A`
//! or plain `Violation`. The offense type is free text from the record
//! source; the optional class is a single letter, stored uppercase.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidCrimeLevelError;

/// Offense type plus optional class letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCrimeLevel")]
pub struct CrimeLevel {
    #[serde(rename = "type")]
    offense_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    class: Option<char>,
}

impl CrimeLevel {
    /// A crime level with no class.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCrimeLevelError::EmptyType`] for a blank type.
    pub fn new(offense_type: impl Into<String>) -> Result<Self, InvalidCrimeLevelError> {
        let offense_type = offense_type.into();
        if offense_type.trim().is_empty() {
            return Err(InvalidCrimeLevelError::EmptyType);
        }
        Ok(Self {
            offense_type,
            class: None,
        })
    }

    /// Set the class letter. Lowercase letters are stored uppercase.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCrimeLevelError::InvalidClass`] if `class` is not
    /// an ASCII letter.
    pub fn with_class(mut self, class: char) -> Result<Self, InvalidCrimeLevelError> {
        if !class.is_ascii_alphabetic() {
            return Err(InvalidCrimeLevelError::InvalidClass(class.to_string()));
        }
        self.class = Some(class.to_ascii_uppercase());
        Ok(self)
    }

    /// The offense type, e.g. `Felony`.
    pub fn offense_type(&self) -> &str {
        &self.offense_type
    }

    /// The class letter, if any.
    pub fn class(&self) -> Option<char> {
        self.class
    }
}

impl fmt::Display for CrimeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class {
            Some(class) => write!(f, "{} Class {}", self.offense_type, class),
            None => f.write_str(&self.offense_type),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCrimeLevel {
    #[serde(rename = "type")]
    offense_type: String,
    #[serde(default)]
    class: Option<String>,
}

impl TryFrom<RawCrimeLevel> for CrimeLevel {
    type Error = InvalidCrimeLevelError;

    fn try_from(raw: RawCrimeLevel) -> Result<Self, Self::Error> {
        let level = CrimeLevel::new(raw.offense_type)?;
        let Some(class) = raw.class else {
            return Ok(level);
        };
        let mut chars = class.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => level.with_class(c),
            _ => Err(InvalidCrimeLevelError::InvalidClass(class)),
        }
    }
}

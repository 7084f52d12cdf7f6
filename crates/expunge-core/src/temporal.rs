//! # Record Dates
//!
//! Charges, dispositions, cases and dates of birth are calendar dates with
//! no time or zone component, so the model uses `chrono::NaiveDate`.
//!
//! Dates serialize as ISO 8601 `YYYY-MM-DD`. Deserialization also accepts
//! the `MM/DD/YYYY` form that court record systems print, so a record can
//! be ingested without pre-normalizing its dates. Output is always ISO,
//! which keeps record fingerprints independent of the source format.

use chrono::NaiveDate;

use crate::error::DateParseError;

const ISO_FORMAT: &str = "%Y-%m-%d";
const COURT_FORMAT: &str = "%m/%d/%Y";

/// Parse a record date in either `YYYY-MM-DD` or `MM/DD/YYYY` form.
///
/// # Errors
///
/// Returns [`DateParseError`] if the string matches neither format or
/// names an impossible date.
pub fn parse_record_date(s: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(s, ISO_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, COURT_FORMAT))
        .map_err(|_| DateParseError(s.to_string()))
}

/// Render a date as `YYYY-MM-DD`.
pub fn to_iso_date(date: &NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// Serde adapter for `NaiveDate` fields: ISO out, ISO or court form in.
pub mod record_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_iso_date(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_record_date(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `Option<NaiveDate>` fields.
pub mod optional_record_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_some(&super::to_iso_date(date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| super::parse_record_date(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}

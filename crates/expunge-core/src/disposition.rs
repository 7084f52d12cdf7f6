//! # Dispositions
//!
//! The outcome of a charge. [`DispositionType`] is a closed set of five
//! kinds; eligibility rules branch on it with exhaustive `match`, so adding
//! a kind forces every rule to handle it at compile time.
//!
//! The string form of each kind is its SCREAMING_SNAKE_CASE name, used for
//! both serde and [`FromStr`]. Parsing is case-sensitive.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::InvalidDispositionError;
use crate::temporal;

/// The kind of outcome a charge reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DispositionType {
    /// Found or pleaded guilty.
    Convicted,
    /// Probation on a prior conviction was revoked.
    ProbationRevoked,
    /// Dismissed by the court or the prosecution.
    Dismissed,
    /// Found not guilty.
    Acquitted,
    /// The prosecutor declined to file a complaint.
    NoComplaint,
}

impl DispositionType {
    /// All five kinds in declaration order.
    pub fn all() -> &'static [DispositionType] {
        &[
            Self::Convicted,
            Self::ProbationRevoked,
            Self::Dismissed,
            Self::Acquitted,
            Self::NoComplaint,
        ]
    }

    /// The SCREAMING_SNAKE_CASE name, matching the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Convicted => "CONVICTED",
            Self::ProbationRevoked => "PROBATION_REVOKED",
            Self::Dismissed => "DISMISSED",
            Self::Acquitted => "ACQUITTED",
            Self::NoComplaint => "NO_COMPLAINT",
        }
    }

    /// Outcomes that leave a conviction on the record.
    pub fn is_conviction(&self) -> bool {
        matches!(self, Self::Convicted | Self::ProbationRevoked)
    }

    /// Outcomes that end without a conviction.
    pub fn is_non_conviction(&self) -> bool {
        !self.is_conviction()
    }
}

impl fmt::Display for DispositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DispositionType {
    type Err = InvalidDispositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONVICTED" => Ok(Self::Convicted),
            "PROBATION_REVOKED" => Ok(Self::ProbationRevoked),
            "DISMISSED" => Ok(Self::Dismissed),
            "ACQUITTED" => Ok(Self::Acquitted),
            "NO_COMPLAINT" => Ok(Self::NoComplaint),
            other => Err(InvalidDispositionError::UnknownKind(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for DispositionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|e: InvalidDispositionError| {
            tracing::debug!(error = %e, "rejected disposition kind");
            serde::de::Error::custom(e)
        })
    }
}

/// The outcome of a charge and the date it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Disposition {
    #[serde(rename = "type")]
    kind: DispositionType,
    #[serde(with = "temporal::record_date")]
    date: NaiveDate,
}

impl Disposition {
    /// A disposition of a known kind.
    pub fn new(kind: DispositionType, date: NaiveDate) -> Self {
        Self { kind, date }
    }

    /// A disposition from a kind name as supplied by a record source.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDispositionError::UnknownKind`] if `kind` is not
    /// one of the five disposition names.
    pub fn parse(kind: &str, date: NaiveDate) -> Result<Self, InvalidDispositionError> {
        Ok(Self::new(kind.parse()?, date))
    }

    /// The kind of outcome.
    pub fn kind(&self) -> DispositionType {
        self.kind
    }

    /// The date the outcome was reached.
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.kind, temporal::to_iso_date(&self.date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 6, 1).unwrap()
    }

    #[test]
    fn test_all_kinds_unique() {
        let mut seen = std::collections::HashSet::new();
        for kind in DispositionType::all() {
            assert!(seen.insert(kind), "duplicate kind {kind}");
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_as_str_parses_back() {
        for kind in DispositionType::all() {
            assert_eq!(kind.as_str().parse::<DispositionType>().unwrap(), *kind);
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = Disposition::parse("PARDONED", date()).unwrap_err();
        assert_eq!(err, InvalidDispositionError::UnknownKind("PARDONED".to_string()));
        assert!("convicted".parse::<DispositionType>().is_err());
        assert!("".parse::<DispositionType>().is_err());
    }

    #[test]
    fn test_conviction_classification() {
        assert!(DispositionType::Convicted.is_conviction());
        assert!(DispositionType::ProbationRevoked.is_conviction());
        assert!(DispositionType::Dismissed.is_non_conviction());
        assert!(DispositionType::Acquitted.is_non_conviction());
        assert!(DispositionType::NoComplaint.is_non_conviction());
    }

    #[test]
    fn test_serde_format() {
        let disposition = Disposition::new(DispositionType::NoComplaint, date());
        let json = serde_json::to_string(&disposition).unwrap();
        assert_eq!(json, r#"{"type":"NO_COMPLAINT","date":"2018-06-01"}"#);
        let back: Disposition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, disposition);
    }

    #[test]
    fn test_deserialize_court_date_form() {
        let disposition: Disposition =
            serde_json::from_str(r#"{"type":"DISMISSED","date":"06/01/2018"}"#).unwrap();
        assert_eq!(disposition.date(), date());
    }

    #[test]
    fn test_deserialize_unknown_kind_fails() {
        let result: Result<Disposition, _> =
            serde_json::from_str(r#"{"type":"PARDONED","date":"2018-06-01"}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown disposition kind"), "{err}");
    }

    #[test]
    fn test_display() {
        let disposition = Disposition::new(DispositionType::Convicted, date());
        assert_eq!(disposition.to_string(), "CONVICTED on 2018-06-01");
    }
}

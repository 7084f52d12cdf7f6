//! # Cases
//!
//! A case groups the charges of one court proceeding, in the order the
//! record source lists them. Its state (open or closed) and outstanding
//! balance are taken from the source of record and never change here;
//! state transitions belong to the court system, not this model.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::charge::Charge;
use crate::error::InvalidCaseStateError;
use crate::identity::CaseNumber;
use crate::money::Money;
use crate::temporal;

/// Whether a case is still pending before the court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseState {
    /// Proceedings are ongoing.
    Open,
    /// Proceedings have concluded.
    Closed,
}

impl CaseState {
    /// The SCREAMING_SNAKE_CASE name, matching the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for CaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseState {
    type Err = InvalidCaseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "CLOSED" => Ok(Self::Closed),
            other => Err(InvalidCaseStateError::UnknownState(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for CaseState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|e: InvalidCaseStateError| {
            tracing::debug!(error = %e, "rejected case state");
            serde::de::Error::custom(e)
        })
    }
}

/// One court proceeding and its charges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Case {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    case_number: Option<CaseNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "temporal::optional_record_date"
    )]
    date: Option<NaiveDate>,
    charges: Vec<Charge>,
    state: CaseState,
    #[serde(default)]
    balance_due: Money,
}

impl Case {
    /// A case with no balance due.
    pub fn new(charges: Vec<Charge>, state: CaseState) -> Self {
        Self {
            case_number: None,
            location: None,
            date: None,
            charges,
            state,
            balance_due: Money::ZERO,
        }
    }

    /// Set the amount owed to the court.
    pub fn with_balance_due(mut self, balance_due: Money) -> Self {
        self.balance_due = balance_due;
        self
    }

    /// Set the court-assigned case number.
    pub fn with_case_number(mut self, case_number: CaseNumber) -> Self {
        self.case_number = Some(case_number);
        self
    }

    /// Set the court location, e.g. a county name.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the date the case was opened.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Charges in record order.
    pub fn charges(&self) -> &[Charge] {
        &self.charges
    }

    pub fn num_charges(&self) -> usize {
        self.charges.len()
    }

    pub fn state(&self) -> CaseState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == CaseState::Open
    }

    /// Amount owed to the court.
    pub fn balance_due(&self) -> Money {
        self.balance_due
    }

    pub fn has_balance_due(&self) -> bool {
        !self.balance_due.is_zero()
    }

    pub fn case_number(&self) -> Option<&CaseNumber> {
        self.case_number.as_ref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

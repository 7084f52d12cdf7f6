//! # Clients
//!
//! The person whose record is being analyzed. A client owns their cases
//! outright; eligibility rules walk `Client → Case → Charge` through the
//! read-only accessors here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::case::Case;
use crate::charge::Charge;
use crate::digest::{record_digest, RecordDigest};
use crate::error::{CanonicalizationError, InvalidClientError};
use crate::money::Money;
use crate::temporal;

/// An individual seeking to expunge charges from their record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawClient")]
pub struct Client {
    name: String,
    #[serde(with = "temporal::record_date")]
    dob: NaiveDate,
    cases: Vec<Case>,
}

impl Client {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidClientError::EmptyName`] for a blank name.
    pub fn new(
        name: impl Into<String>,
        dob: NaiveDate,
        cases: Vec<Case>,
    ) -> Result<Self, InvalidClientError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InvalidClientError::EmptyName);
        }
        Ok(Self { name, dob, cases })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Date of birth.
    pub fn dob(&self) -> NaiveDate {
        self.dob
    }

    /// Cases in record order.
    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    /// Total charges across all cases; zero when there are no cases.
    pub fn num_charges(&self) -> usize {
        self.cases.iter().map(Case::num_charges).sum()
    }

    /// Every charge, case by case, in record order.
    pub fn charges(&self) -> impl Iterator<Item = &Charge> + '_ {
        self.cases.iter().flat_map(|case| case.charges().iter())
    }

    /// Cases still pending before the court.
    pub fn open_cases(&self) -> impl Iterator<Item = &Case> + '_ {
        self.cases.iter().filter(|case| case.is_open())
    }

    /// Sum of balances owed across all cases.
    pub fn total_balance_due(&self) -> Money {
        self.cases.iter().map(Case::balance_due).sum()
    }

    /// Content digest of the whole record, for caching analysis results.
    pub fn digest(&self) -> Result<RecordDigest, CanonicalizationError> {
        record_digest(self)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawClient {
    name: String,
    #[serde(with = "temporal::record_date")]
    dob: NaiveDate,
    #[serde(default)]
    cases: Vec<Case>,
}

impl TryFrom<RawClient> for Client {
    type Error = InvalidClientError;

    fn try_from(raw: RawClient) -> Result<Self, Self::Error> {
        let result = Client::new(raw.name, raw.dob, raw.cases);
        if let Err(ref e) = result {
            tracing::debug!(error = %e, "rejected client");
        }
        result
    }
}

//! # Charges
//!
//! A charge is one alleged offense: a name as printed on the record, the
//! statute it cites, its crime level, the filing date and its disposition.
//! All five are required. Whether a record without an outcome yet is
//! represented by a sentinel disposition is the record source's decision;
//! this model always holds a concrete [`Disposition`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::crime_level::CrimeLevel;
use crate::disposition::Disposition;
use crate::error::InvalidChargeError;
use crate::statute::Statute;
use crate::temporal;

/// A single alleged offense within a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawCharge")]
pub struct Charge {
    name: String,
    statute: Statute,
    level: CrimeLevel,
    #[serde(with = "temporal::record_date")]
    date: NaiveDate,
    disposition: Disposition,
}

impl Charge {
    /// Create a charge.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidChargeError::EmptyName`] for a blank name.
    pub fn new(
        name: impl Into<String>,
        statute: Statute,
        level: CrimeLevel,
        date: NaiveDate,
        disposition: Disposition,
    ) -> Result<Self, InvalidChargeError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InvalidChargeError::EmptyName);
        }
        if disposition.date() < date {
            tracing::warn!(
                charge = %name,
                statute = %statute,
                filed = %date,
                disposed = %disposition.date(),
                "disposition predates charge filing"
            );
        }
        Ok(Self {
            name,
            statute,
            level,
            date,
            disposition,
        })
    }

    /// Start a builder that reports the first missing field.
    pub fn builder() -> ChargeBuilder {
        ChargeBuilder::default()
    }

    /// The charge name as printed on the record.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cited statute.
    pub fn statute(&self) -> &Statute {
        &self.statute
    }

    /// The crime level.
    pub fn level(&self) -> &CrimeLevel {
        &self.level
    }

    /// The filing date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The outcome.
    pub fn disposition(&self) -> &Disposition {
        &self.disposition
    }
}

/// Value equality across all five fields. Statutes compare strictly here:
/// two charges citing `653.412` and `653.412(5)` are different charges.
impl PartialEq for Charge {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.statute.strict_eq(&other.statute)
            && self.level == other.level
            && self.date == other.date
            && self.disposition == other.disposition
    }
}

impl Eq for Charge {}

/// Collects charge fields in any order.
#[derive(Debug, Clone, Default)]
pub struct ChargeBuilder {
    name: Option<String>,
    statute: Option<Statute>,
    level: Option<CrimeLevel>,
    date: Option<NaiveDate>,
    disposition: Option<Disposition>,
}

impl ChargeBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn statute(mut self, statute: Statute) -> Self {
        self.statute = Some(statute);
        self
    }

    pub fn level(mut self, level: CrimeLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn disposition(mut self, disposition: Disposition) -> Self {
        self.disposition = Some(disposition);
        self
    }

    /// Build the charge.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidChargeError::MissingField`] naming the first unset
    /// field, or any error from [`Charge::new`].
    pub fn build(self) -> Result<Charge, InvalidChargeError> {
        let result = self.try_build();
        if let Err(ref e) = result {
            tracing::debug!(error = %e, "rejected charge");
        }
        result
    }

    fn try_build(self) -> Result<Charge, InvalidChargeError> {
        Charge::new(
            self.name.ok_or(InvalidChargeError::MissingField("name"))?,
            self.statute.ok_or(InvalidChargeError::MissingField("statute"))?,
            self.level.ok_or(InvalidChargeError::MissingField("level"))?,
            self.date.ok_or(InvalidChargeError::MissingField("date"))?,
            self.disposition
                .ok_or(InvalidChargeError::MissingField("disposition"))?,
        )
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCharge {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    statute: Option<Statute>,
    #[serde(default)]
    level: Option<CrimeLevel>,
    #[serde(default, with = "temporal::optional_record_date")]
    date: Option<NaiveDate>,
    #[serde(default)]
    disposition: Option<Disposition>,
}

impl TryFrom<RawCharge> for Charge {
    type Error = InvalidChargeError;

    fn try_from(raw: RawCharge) -> Result<Self, Self::Error> {
        let mut builder = Charge::builder();
        builder.name = raw.name;
        builder.statute = raw.statute;
        builder.level = raw.level;
        builder.date = raw.date;
        builder.disposition = raw.disposition;
        builder.build()
    }
}

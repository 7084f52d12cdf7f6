//! # Error Types — Construction-Time Validation Failures
//!
//! Every error in this crate is raised while building a model value.
//! Once an instance exists it is immutable, so there are no runtime
//! failures beyond construction.
//!
//! ## Design
//!
//! - One `thiserror` enum per entity, carrying the offending value.
//! - [`ModelError`] wraps them all for callers that ingest whole records
//!   and only need a single error type at the boundary.
//! - Validation failures propagate immediately. A partially valid
//!   charge, case, or client is never constructed.

use thiserror::Error;

/// Top-level error type for the record model.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Statute citation rejected.
    #[error("invalid statute: {0}")]
    Statute(#[from] InvalidStatuteError),

    /// Crime level rejected.
    #[error("invalid crime level: {0}")]
    CrimeLevel(#[from] InvalidCrimeLevelError),

    /// Disposition rejected.
    #[error("invalid disposition: {0}")]
    Disposition(#[from] InvalidDispositionError),

    /// Charge rejected.
    #[error("invalid charge: {0}")]
    Charge(#[from] InvalidChargeError),

    /// Case state rejected.
    #[error("invalid case state: {0}")]
    CaseState(#[from] InvalidCaseStateError),

    /// Case number rejected.
    #[error("invalid case number: {0}")]
    CaseNumber(#[from] InvalidCaseNumberError),

    /// Monetary amount rejected.
    #[error("invalid amount: {0}")]
    Amount(#[from] InvalidAmountError),

    /// Client rejected.
    #[error("invalid client: {0}")]
    Client(#[from] InvalidClientError),

    /// Date string could not be parsed.
    #[error("invalid date: {0}")]
    Date(#[from] DateParseError),

    /// Canonicalization for fingerprinting failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

/// A statute citation could not be constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidStatuteError {
    /// No chapter was supplied.
    #[error("statute chapter is required")]
    MissingChapter,

    /// A numeric component was not an integer in the `u32` range.
    #[error("statute {component} must be a non-negative integer, got {value}")]
    InvalidNumber {
        /// Which component was rejected (`chapter` or `subchapter`).
        component: &'static str,
        /// The rejected value as supplied.
        value: String,
    },

    /// The section label was empty or contained citation delimiters.
    #[error("statute section {0:?} must be non-empty and free of whitespace and parentheses")]
    InvalidSection(String),

    /// The subsection was not a single ASCII letter or digit.
    #[error("statute subsection {0:?} must be a single ASCII letter or digit")]
    InvalidSubsection(String),

    /// A subsection was supplied without a section.
    #[error("statute subsection {0:?} requires a section")]
    SubsectionWithoutSection(char),

    /// A citation string did not match `chapter[.subchapter][(section)[(subsection)]]`.
    #[error("malformed statute citation {0:?}")]
    Malformed(String),
}

/// A crime level could not be constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidCrimeLevelError {
    /// The offense type was empty.
    #[error("crime level type must be non-empty")]
    EmptyType,

    /// The class was not a single ASCII letter.
    #[error("crime level class {0:?} must be a single ASCII letter")]
    InvalidClass(String),
}

/// A disposition kind outside the closed set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidDispositionError {
    /// The kind string did not name one of the five disposition kinds.
    #[error("unknown disposition kind {0:?}")]
    UnknownKind(String),
}

/// A case state outside {OPEN, CLOSED}.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidCaseStateError {
    /// The state string did not name a case state.
    #[error("unknown case state {0:?}; expected OPEN or CLOSED")]
    UnknownState(String),
}

/// A charge could not be constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidChargeError {
    /// A required field was never supplied to the builder.
    #[error("charge field `{0}` is required")]
    MissingField(&'static str),

    /// The charge name was empty.
    #[error("charge name must be non-empty")]
    EmptyName,
}

/// A court case number could not be constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidCaseNumberError {
    /// The case number was empty or contained whitespace.
    #[error("case number {0:?} must be non-empty and contain no whitespace")]
    Malformed(String),
}

/// A monetary amount could not be constructed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidAmountError {
    /// Balances are non-negative.
    #[error("amount must be non-negative, got {0}")]
    Negative(String),

    /// NaN and infinities are not amounts.
    #[error("amount must be finite, got {0}")]
    NotFinite(f64),

    /// The amount does not fit in the cent counter.
    #[error("amount {0} is out of range")]
    OutOfRange(String),

    /// A decimal string did not parse.
    #[error("malformed amount {0:?}")]
    Malformed(String),
}

/// A client could not be constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidClientError {
    /// The client name was empty.
    #[error("client name must be non-empty")]
    EmptyName,
}

/// A record date string matched neither accepted format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("date {0:?} is neither YYYY-MM-DD nor MM/DD/YYYY")]
pub struct DateParseError(pub String);

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Amounts must be strings or integers.
    #[error("float values are not permitted in canonical representations; use string or integer for amount: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

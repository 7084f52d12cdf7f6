//! # expunge-core — Record Model for Expungement Analysis
//!
//! This crate defines the vocabulary an expungement-eligibility engine
//! works in: a [`Client`] holds [`Case`]s, a case holds [`Charge`]s, and a
//! charge cites a [`Statute`], carries a [`CrimeLevel`], and ends in a
//! [`Disposition`]. Which statutes qualify for expungement is decided by
//! rule tables outside this crate, built against these types.
//!
//! ## Key Design Principles
//!
//! 1. **Validated construction, immutable values.** Every entity is built
//!    through a constructor or builder that rejects invalid input with a
//!    typed error. Fields are private and there are no setters, so a value
//!    that exists is valid for its whole lifetime.
//!
//! 2. **Partial-match statutes.** `Statute` equality matches a broad
//!    citation against a more specific one. It is not an equivalence
//!    relation, so `Statute` is not `Eq`/`Hash`; exact lookups go through
//!    [`StatuteKey`] and [`MatchPolicy`].
//!
//! 3. **Closed enumerations.** [`DispositionType`] and [`CaseState`] are
//!    enums; rules match on them exhaustively.
//!
//! 4. **Serde at the ingestion boundary.** Deserialization routes through
//!    the same validating constructors, so a deserialized record is as
//!    trustworthy as one built in code.
//!
//! ## Crate Policy
//!
//! - No file or network I/O and no interior mutability; all types are
//!   `Send + Sync`. The one read of process state is
//!   [`MatchPolicy::from_environment`]; hosts that keep configuration
//!   elsewhere pass the value to [`MatchPolicy::from_setting`].
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Logging through `tracing` only; the host installs the subscriber.

pub mod canonical;
pub mod case;
pub mod charge;
pub mod client;
pub mod crime_level;
pub mod digest;
pub mod disposition;
pub mod error;
pub mod identity;
pub mod money;
pub mod policy;
pub mod statute;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use case::{Case, CaseState};
pub use charge::{Charge, ChargeBuilder};
pub use client::Client;
pub use crime_level::CrimeLevel;
pub use digest::{record_digest, RecordDigest};
pub use disposition::{Disposition, DispositionType};
pub use error::ModelError;
pub use identity::CaseNumber;
pub use money::Money;
pub use policy::{MatchMode, MatchPolicy};
pub use statute::{RawNumber, RawSection, RawStatute, Section, Statute, StatuteKey};

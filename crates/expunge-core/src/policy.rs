//! # Statute Match Policy
//!
//! Rule tables look statutes up in one of two ways:
//!
//! - [`MatchMode::Partial`]: the `Statute` `==` relation. A broad entry
//!   such as `653.412` matches any citation under it. This is the default.
//! - [`MatchMode::Strict`]: every component must be identical.
//!
//! Partial matching is not a true equivalence relation. Strict matching
//! can be selected per deployment without touching rule code.
//!
//! ## Configuration
//!
//! The mode is chosen by:
//! 1. Runtime environment variable `EXPUNGE_STATUTE_MATCH`
//!    (`partial` or `strict`, case-insensitive)
//! 2. Explicit [`MatchPolicy::new()`] construction
//!
//! An unrecognized value logs a warning and falls back to `Partial`.

use serde::{Deserialize, Serialize};

use crate::statute::Statute;

/// Environment variable read by [`MatchPolicy::from_environment`].
pub const MATCH_MODE_ENV: &str = "EXPUNGE_STATUTE_MATCH";

/// How two statutes are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Components both sides cite must agree.
    #[default]
    Partial,
    /// All components must be identical.
    Strict,
}

impl MatchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchMode::Partial => "partial",
            MatchMode::Strict => "strict",
        }
    }

    /// Parse a mode name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "partial" => Some(MatchMode::Partial),
            "strict" => Some(MatchMode::Strict),
            _ => None,
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime policy for statute lookups.
///
/// ```rust
/// use expunge_core::{MatchPolicy, Statute};
///
/// let entry: Statute = "653.412".parse()?;
/// let cited: Statute = "653.412(5)(c)".parse()?;
///
/// assert!(MatchPolicy::partial().matches(&entry, &cited));
/// assert!(!MatchPolicy::strict().matches(&entry, &cited));
/// # Ok::<(), expunge_core::error::InvalidStatuteError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchPolicy {
    mode: MatchMode,
}

impl MatchPolicy {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    /// Partial matching (the default).
    pub fn partial() -> Self {
        Self::new(MatchMode::Partial)
    }

    /// Exact matching.
    pub fn strict() -> Self {
        Self::new(MatchMode::Strict)
    }

    /// Create a policy from `EXPUNGE_STATUTE_MATCH`, defaulting to partial.
    pub fn from_environment() -> Self {
        Self::from_setting(std::env::var(MATCH_MODE_ENV).ok().as_deref())
    }

    /// Resolve a raw setting value as `from_environment` does.
    pub fn from_setting(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        match MatchMode::from_name(value) {
            Some(mode) => Self::new(mode),
            None => {
                tracing::warn!(
                    variable = MATCH_MODE_ENV,
                    value,
                    "unrecognized statute match mode; using partial"
                );
                Self::default()
            }
        }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Whether `a` and `b` match under this policy.
    pub fn matches(&self, a: &Statute, b: &Statute) -> bool {
        match self.mode {
            MatchMode::Partial => a == b,
            MatchMode::Strict => a.strict_eq(b),
        }
    }

    /// The first candidate matching `statute`, in candidate order.
    pub fn find<'a, I>(&self, statute: &Statute, candidates: I) -> Option<&'a Statute>
    where
        I: IntoIterator<Item = &'a Statute>,
    {
        candidates
            .into_iter()
            .find(|candidate| self.matches(statute, candidate))
    }
}

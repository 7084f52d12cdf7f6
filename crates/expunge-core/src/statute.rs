//! # Statute Citations
//!
//! A statute is cited hierarchically as
//! `chapter.subchapter(section)(subsection)`, e.g. `653.412(5)(c)`.
//! Only the chapter is required; each lower level is optional and its
//! absence is tracked separately from its value, so an absent section is
//! never confused with a section labelled `0`.
//!
//! ## Equality
//!
//! [`Statute`]'s `PartialEq` is a *partial match*: chapters and
//! subchapters must be equal, while sections and subsections only have to
//! agree when both sides specify them. A broad citation such as `653.412`
//! therefore equals `653.412(5)(c)`. Rule tables rely on this to match a
//! statute range against a specific citation.
//!
//! The relation is not transitive across different specificity:
//! `653.412(5)(c) == 653.412` and `653.412 == 653.412(5)(d)`, yet
//! `653.412(5)(c) != 653.412(5)(d)`. For that reason `Statute` implements
//! neither `Eq` nor `Hash`. Use [`Statute::strict_eq`] for exact comparison
//! and [`StatuteKey`] when a hashable exact key is needed.
//!
//! ## Canonical Form
//!
//! `Display` renders the chapter, then `.` and the subchapter zero-padded
//! to three digits, then `(section)` and `(subsection)` when present. The
//! [`FromStr`] impl parses that form back into the same components.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidStatuteError;

// ─── Section ────────────────────────────────────────────────────────

/// The section label of a citation, e.g. `5` in `653.412(5)`.
///
/// Sections are usually numeric but some codes use alphanumeric labels,
/// so the label is kept as text. Numeric sections render without
/// leading zeros.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Section(String);

impl Section {
    /// Create a section from a label.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStatuteError::InvalidSection`] if the label is
    /// empty or contains whitespace or parentheses.
    pub fn new(label: impl Into<String>) -> Result<Self, InvalidStatuteError> {
        let label = label.into();
        let valid = !label.is_empty()
            && !label
                .chars()
                .any(|c| c.is_whitespace() || c == '(' || c == ')');
        if valid {
            Ok(Self(label))
        } else {
            Err(InvalidStatuteError::InvalidSection(label))
        }
    }

    /// The section label as written in the citation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<u32> for Section {
    type Error = InvalidStatuteError;

    fn try_from(number: u32) -> Result<Self, Self::Error> {
        Ok(Self(number.to_string()))
    }
}

impl TryFrom<i32> for Section {
    type Error = InvalidStatuteError;

    fn try_from(number: i32) -> Result<Self, Self::Error> {
        u32::try_from(number)
            .map_err(|_| InvalidStatuteError::InvalidSection(number.to_string()))
            .and_then(<Self as TryFrom<u32>>::try_from)
    }
}

impl TryFrom<&str> for Section {
    type Error = InvalidStatuteError;

    fn try_from(label: &str) -> Result<Self, Self::Error> {
        Self::new(label)
    }
}

impl TryFrom<String> for Section {
    type Error = InvalidStatuteError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Self::new(label)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Statute ────────────────────────────────────────────────────────

/// A hierarchical statute citation.
///
/// Build one with [`Statute::new`] and the `with_*` methods, parse one
/// from its canonical string, or deserialize one from either a citation
/// string or a [`RawStatute`] object.
///
/// ```rust
/// use expunge_core::Statute;
///
/// let broad = Statute::new(653).with_subchapter(412);
/// let exact = Statute::new(653)
///     .with_subchapter(412)
///     .with_section(5)?
///     .with_subsection('c')?;
///
/// assert_eq!(exact.to_string(), "653.412(5)(c)");
/// assert_eq!(broad, exact);
/// assert!(!broad.strict_eq(&exact));
/// # Ok::<(), expunge_core::error::InvalidStatuteError>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "StatuteRecord")]
pub struct Statute {
    chapter: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    subchapter: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    section: Option<Section>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subsection: Option<char>,
}

impl Statute {
    /// A chapter-only citation, e.g. `653`.
    pub fn new(chapter: u32) -> Self {
        Self {
            chapter,
            subchapter: None,
            section: None,
            subsection: None,
        }
    }

    /// Set the subchapter.
    pub fn with_subchapter(mut self, subchapter: u32) -> Self {
        self.subchapter = Some(subchapter);
        self
    }

    /// Set the section.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStatuteError::InvalidSection`] for an unusable label.
    pub fn with_section<S>(mut self, section: S) -> Result<Self, InvalidStatuteError>
    where
        S: TryInto<Section, Error = InvalidStatuteError>,
    {
        self.section = Some(section.try_into()?);
        Ok(self)
    }

    /// Set the subsection. Requires a section to already be set.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStatuteError::InvalidSubsection`] if the character
    /// is not ASCII alphanumeric, or
    /// [`InvalidStatuteError::SubsectionWithoutSection`] if no section is set.
    pub fn with_subsection(mut self, subsection: char) -> Result<Self, InvalidStatuteError> {
        if !subsection.is_ascii_alphanumeric() {
            return Err(InvalidStatuteError::InvalidSubsection(subsection.to_string()));
        }
        if self.section.is_none() {
            return Err(InvalidStatuteError::SubsectionWithoutSection(subsection));
        }
        self.subsection = Some(subsection);
        Ok(self)
    }

    /// The chapter number.
    pub fn chapter(&self) -> u32 {
        self.chapter
    }

    /// The subchapter number, if cited.
    pub fn subchapter(&self) -> Option<u32> {
        self.subchapter
    }

    /// The section label, if cited.
    pub fn section(&self) -> Option<&Section> {
        self.section.as_ref()
    }

    /// The subsection, if cited.
    pub fn subsection(&self) -> Option<char> {
        self.subsection
    }

    /// Number of levels cited, from 1 (chapter only) to 4.
    pub fn specificity(&self) -> usize {
        1 + usize::from(self.subchapter.is_some())
            + usize::from(self.section.is_some())
            + usize::from(self.subsection.is_some())
    }

    /// Exact comparison over all four components.
    pub fn strict_eq(&self, other: &Statute) -> bool {
        self.chapter == other.chapter
            && self.subchapter == other.subchapter
            && self.section == other.section
            && self.subsection == other.subsection
    }

    /// Whether this citation falls under `broader`: every component
    /// `broader` cites is cited identically here.
    ///
    /// Unlike the partial-match `==`, this is directional.
    /// `653.412(5)(c)` is within `653.412`, but not the reverse.
    pub fn is_within(&self, broader: &Statute) -> bool {
        self.chapter == broader.chapter
            && covers(&broader.subchapter, &self.subchapter)
            && covers(&broader.section, &self.section)
            && covers(&broader.subsection, &self.subsection)
    }

    /// The exact lookup key for this citation.
    pub fn key(&self) -> StatuteKey {
        StatuteKey(self.to_string())
    }
}

/// Partial match: see the module documentation.
impl PartialEq for Statute {
    fn eq(&self, other: &Self) -> bool {
        self.chapter == other.chapter
            && self.subchapter == other.subchapter
            && agrees(&self.section, &other.section)
            && agrees(&self.subsection, &other.subsection)
    }
}

/// Both unset, one unset, or both set and equal.
fn agrees<T: PartialEq>(a: &Option<T>, b: &Option<T>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

/// `broader` leaves the level open, or both cite the same value.
fn covers<T: PartialEq>(broader: &Option<T>, narrower: &Option<T>) -> bool {
    match broader {
        None => true,
        Some(_) => broader == narrower,
    }
}

impl fmt::Display for Statute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.chapter)?;
        if let Some(subchapter) = self.subchapter {
            write!(f, ".{subchapter:03}")?;
        }
        if let Some(section) = &self.section {
            write!(f, "({section})")?;
        }
        if let Some(subsection) = self.subsection {
            write!(f, "({subsection})")?;
        }
        Ok(())
    }
}

impl FromStr for Statute {
    type Err = InvalidStatuteError;

    /// Parse `chapter[.subchapter][(section)[(subsection)]]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(InvalidStatuteError::MissingChapter);
        }
        let malformed = || InvalidStatuteError::Malformed(s.to_string());

        let (head, mut rest) = match s.find('(') {
            Some(idx) => s.split_at(idx),
            None => (s, ""),
        };
        let (chapter, subchapter) = match head.split_once('.') {
            Some((chapter, subchapter)) => (chapter, Some(subchapter)),
            None => (head, None),
        };

        let mut statute = Statute::new(parse_number("chapter", chapter).map_err(|e| match e {
            InvalidStatuteError::Malformed(_) => malformed(),
            other => other,
        })?);
        if let Some(subchapter) = subchapter {
            statute = statute.with_subchapter(parse_number("subchapter", subchapter).map_err(
                |e| match e {
                    InvalidStatuteError::Malformed(_) => malformed(),
                    other => other,
                },
            )?);
        }

        let mut groups = Vec::with_capacity(2);
        while !rest.is_empty() {
            let inner = rest.strip_prefix('(').ok_or_else(malformed)?;
            let close = inner.find(')').ok_or_else(malformed)?;
            groups.push(&inner[..close]);
            rest = &inner[close + 1..];
        }

        match groups.as_slice() {
            [] => {}
            [section] => statute = statute.with_section(*section)?,
            [section, subsection] => {
                let mut chars = subsection.chars();
                let (Some(subsection), None) = (chars.next(), chars.next()) else {
                    return Err(InvalidStatuteError::InvalidSubsection(subsection.to_string()));
                };
                statute = statute.with_section(*section)?.with_subsection(subsection)?;
            }
            _ => return Err(malformed()),
        }
        Ok(statute)
    }
}

/// Digits only; a leading `-` is reported as a negative number.
fn parse_number(component: &'static str, digits: &str) -> Result<u32, InvalidStatuteError> {
    let unsigned = digits.strip_prefix('-').unwrap_or(digits);
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidStatuteError::Malformed(digits.to_string()));
    }
    if unsigned.len() != digits.len() {
        return Err(InvalidStatuteError::InvalidNumber {
            component,
            value: digits.to_string(),
        });
    }
    digits.parse().map_err(|_| InvalidStatuteError::InvalidNumber {
        component,
        value: digits.to_string(),
    })
}

// ─── Exact lookup key ───────────────────────────────────────────────

/// Hashable, exact-match key for a citation: its canonical string.
///
/// Two statutes produce the same key only if they are [`Statute::strict_eq`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatuteKey(String);

impl StatuteKey {
    /// The canonical citation string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatuteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── Ingestion shape ────────────────────────────────────────────────

/// A section as supplied by a record source: a number or a label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawSection {
    /// Numeric section.
    Number(i64),
    /// Text label.
    Label(String),
}

/// A chapter or subchapter number as supplied by a record source.
///
/// Only [`RawNumber::Integer`] survives validation. The other shapes are
/// captured so they can be reported as [`InvalidStatuteError::InvalidNumber`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// Integral JSON/YAML number.
    Integer(i64),
    /// Number with a fractional part or outside the `i64` range.
    Decimal(f64),
    /// Quoted value.
    Text(String),
}

/// Statute components as supplied by a record source, before validation.
///
/// Every field is optional here so that a missing, negative or non-integer
/// chapter can be reported as an [`InvalidStatuteError`] rather than a type
/// error. Unknown keys are rejected: a misspelled `section` must not
/// silently widen the citation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawStatute {
    /// Chapter number (required by validation).
    #[serde(default)]
    pub chapter: Option<RawNumber>,
    /// Subchapter number.
    #[serde(default)]
    pub subchapter: Option<RawNumber>,
    /// Section number or label.
    #[serde(default)]
    pub section: Option<RawSection>,
    /// Subsection, a single character.
    #[serde(default)]
    pub subsection: Option<String>,
}

impl TryFrom<RawStatute> for Statute {
    type Error = InvalidStatuteError;

    fn try_from(raw: RawStatute) -> Result<Self, Self::Error> {
        let chapter = raw.chapter.ok_or(InvalidStatuteError::MissingChapter)?;
        let mut statute = Statute::new(checked_u32("chapter", chapter)?);
        if let Some(subchapter) = raw.subchapter {
            statute = statute.with_subchapter(checked_u32("subchapter", subchapter)?);
        }
        match raw.section {
            Some(RawSection::Number(n)) => {
                let n = u32::try_from(n)
                    .map_err(|_| InvalidStatuteError::InvalidSection(n.to_string()))?;
                statute = statute.with_section(n)?;
            }
            Some(RawSection::Label(label)) => statute = statute.with_section(label)?,
            None => {}
        }
        if let Some(subsection) = raw.subsection {
            let mut chars = subsection.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return Err(InvalidStatuteError::InvalidSubsection(subsection));
            };
            statute = statute.with_subsection(c)?;
        }
        Ok(statute)
    }
}

fn checked_u32(component: &'static str, value: RawNumber) -> Result<u32, InvalidStatuteError> {
    let invalid = |value: String| InvalidStatuteError::InvalidNumber { component, value };
    match value {
        RawNumber::Integer(n) => u32::try_from(n).map_err(|_| invalid(n.to_string())),
        RawNumber::Decimal(f) => Err(invalid(f.to_string())),
        RawNumber::Text(s) => Err(invalid(format!("{s:?}"))),
    }
}

/// Records cite statutes either as a citation string or as components.
enum StatuteRecord {
    Citation(String),
    Parts(RawStatute),
}

impl<'de> Deserialize<'de> for StatuteRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(StatuteRecordVisitor)
    }
}

struct StatuteRecordVisitor;

impl<'de> serde::de::Visitor<'de> for StatuteRecordVisitor {
    type Value = StatuteRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a statute citation string or a map of statute components")
    }

    fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(StatuteRecord::Citation(v.to_owned()))
    }

    fn visit_string<E: serde::de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(StatuteRecord::Citation(v))
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        RawStatute::deserialize(serde::de::value::MapAccessDeserializer::new(map))
            .map(StatuteRecord::Parts)
    }
}

impl TryFrom<StatuteRecord> for Statute {
    type Error = InvalidStatuteError;

    fn try_from(record: StatuteRecord) -> Result<Self, Self::Error> {
        let result = match record {
            StatuteRecord::Citation(citation) => citation.parse(),
            StatuteRecord::Parts(raw) => Statute::try_from(raw),
        };
        if let Err(ref e) = result {
            tracing::debug!(error = %e, "rejected statute citation");
        }
        result
    }
}

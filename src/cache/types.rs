use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{NEGATIVE_AFFILIATION, NEGATIVE_MARKER, NEGATIVE_TITLE};

/// A positive resolution: the page that matched and its party label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Affiliation {
    /// Canonical page title of the matched person.
    pub title: String,
    /// Party label, e.g. `"Democratic Party"`.
    pub party: String,
}

impl Affiliation {
    pub fn new(title: impl Into<String>, party: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            party: party.into(),
        }
    }
}

/// Stored outcome for one entity key.
///
/// On disk both variants are a two-element array `[canonical_title, affiliation]`; the
/// negative record uses the reserved pair `["No political figure", "None found"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RecordPair", into = "RecordPair")]
pub enum AffiliationRecord {
    Affiliated(Affiliation),
    /// Looked up and confirmed to carry no affiliation.
    Negative,
}

impl AffiliationRecord {
    pub fn affiliated(title: impl Into<String>, party: impl Into<String>) -> Self {
        AffiliationRecord::Affiliated(Affiliation::new(title, party))
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        matches!(self, AffiliationRecord::Negative)
    }

    pub fn affiliation(&self) -> Option<&Affiliation> {
        match self {
            AffiliationRecord::Affiliated(affiliation) => Some(affiliation),
            AffiliationRecord::Negative => None,
        }
    }

    /// The record as it reads back from disk. A blank or reserved party label is negative.
    pub fn canonical(self) -> Self {
        RecordPair::from(self).into()
    }

    /// The `(canonical_title, affiliation)` pair as persisted.
    pub fn as_pair(&self) -> (&str, &str) {
        match self {
            AffiliationRecord::Affiliated(a) => (a.title.as_str(), a.party.as_str()),
            AffiliationRecord::Negative => (NEGATIVE_TITLE, NEGATIVE_AFFILIATION),
        }
    }
}

/// Wire form of a record: a JSON array of exactly two strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RecordPair(String, String);

impl From<RecordPair> for AffiliationRecord {
    fn from(RecordPair(title, party): RecordPair) -> Self {
        let trimmed = party.trim();
        if trimmed.is_empty() || trimmed == NEGATIVE_AFFILIATION || trimmed == NEGATIVE_MARKER {
            AffiliationRecord::Negative
        } else {
            AffiliationRecord::Affiliated(Affiliation::new(title, party))
        }
    }
}

impl From<AffiliationRecord> for RecordPair {
    fn from(record: AffiliationRecord) -> Self {
        match record {
            AffiliationRecord::Affiliated(a) => RecordPair(a.title, a.party),
            AffiliationRecord::Negative => {
                RecordPair(NEGATIVE_TITLE.to_string(), NEGATIVE_AFFILIATION.to_string())
            }
        }
    }
}

/// Result of [`AffiliationCache::get`](super::AffiliationCache::get).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// A positive record exists.
    Hit(Affiliation),
    /// A negative record exists; the resolver must not be called again.
    Negative,
    /// Never looked up.
    Miss,
}

impl CacheLookup {
    #[inline]
    pub fn is_miss(&self) -> bool {
        matches!(self, CacheLookup::Miss)
    }

    /// Collapses the lookup to what callers see: an affiliation or nothing.
    pub fn into_affiliation(self) -> Option<Affiliation> {
        match self {
            CacheLookup::Hit(affiliation) => Some(affiliation),
            CacheLookup::Negative | CacheLookup::Miss => None,
        }
    }
}

impl From<&AffiliationRecord> for CacheLookup {
    fn from(record: &AffiliationRecord) -> Self {
        match record {
            AffiliationRecord::Affiliated(a) => CacheLookup::Hit(a.clone()),
            AffiliationRecord::Negative => CacheLookup::Negative,
        }
    }
}

/// What [`AffiliationCache::open`](super::AffiliationCache::open) found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// An existing snapshot was read.
    Loaded {
        entries: usize,
        /// Entries that were not a two-string array and were dropped.
        skipped: usize,
    },
    /// No snapshot existed; an empty one was written.
    Created,
    /// The snapshot was unreadable; it was moved to `backup` and replaced with an empty one.
    Recovered { backup: PathBuf },
}

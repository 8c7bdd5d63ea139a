use crate::cache::{Affiliation, AffiliationRecord};
use crate::entity::EntityKind;

/// Outcome of one resolution episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A candidate carried a party label.
    Affiliated(Affiliation),
    /// Every candidate was checked and none had a party.
    NotPolitical {
        /// Candidates queried before giving up.
        candidates_checked: usize,
    },
    /// Only persons are resolved.
    Unsupported(EntityKind),
    /// The initial search failed; nothing was learned.
    Unavailable {
        /// Error message.
        reason: String,
    },
}

impl Resolution {
    /// The record to cache, or `None` when the outcome must not be cached.
    pub fn to_record(&self) -> Option<AffiliationRecord> {
        match self {
            Resolution::Affiliated(affiliation) => {
                Some(AffiliationRecord::Affiliated(affiliation.clone()))
            }
            Resolution::NotPolitical { .. } => Some(AffiliationRecord::Negative),
            Resolution::Unsupported(_) | Resolution::Unavailable { .. } => None,
        }
    }

    pub fn affiliation(&self) -> Option<&Affiliation> {
        match self {
            Resolution::Affiliated(affiliation) => Some(affiliation),
            _ => None,
        }
    }

    /// Returns a short debug string.
    pub fn debug_status(&self) -> &'static str {
        match self {
            Resolution::Affiliated(_) => "AFFILIATED",
            Resolution::NotPolitical { .. } => "NOT_POLITICAL",
            Resolution::Unsupported(_) => "UNSUPPORTED",
            Resolution::Unavailable { .. } => "UNAVAILABLE",
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Affiliated(a) => write!(f, "AFFILIATED ({} -> {})", a.title, a.party),
            Resolution::NotPolitical { candidates_checked } => {
                write!(f, "NOT_POLITICAL (checked: {candidates_checked})")
            }
            Resolution::Unsupported(kind) => write!(f, "UNSUPPORTED ({kind})"),
            Resolution::Unavailable { reason } => write!(f, "UNAVAILABLE ({reason})"),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::cache::Affiliation;
use crate::entity::Entity;

/// How an entity's outcome was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkStatus {
    /// Positive record already cached.
    CacheHit,
    /// Negative record already cached.
    CacheNegative,
    /// Looked up now and found a party.
    Resolved,
    /// Looked up now; no candidate had a party.
    NotPolitical,
    /// Not a person; never looked up.
    Unsupported,
    /// Search failed; try again later.
    Unavailable,
    /// Cache miss while running cache-only.
    Offline,
}

impl LinkStatus {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkStatus::CacheHit => "CACHE_HIT",
            LinkStatus::CacheNegative => "CACHE_NEGATIVE",
            LinkStatus::Resolved => "RESOLVED",
            LinkStatus::NotPolitical => "NOT_POLITICAL",
            LinkStatus::Unsupported => "UNSUPPORTED",
            LinkStatus::Unavailable => "UNAVAILABLE",
            LinkStatus::Offline => "OFFLINE",
        }
    }

    /// `true` when the outcome came from the cache without a lookup.
    #[inline]
    pub fn is_cached(&self) -> bool {
        matches!(self, LinkStatus::CacheHit | LinkStatus::CacheNegative)
    }

    /// `true` when the outcome is a definitive answer (positive or negative).
    #[inline]
    pub fn is_definitive(&self) -> bool {
        matches!(
            self,
            LinkStatus::CacheHit
                | LinkStatus::CacheNegative
                | LinkStatus::Resolved
                | LinkStatus::NotPolitical
        )
    }
}

impl std::fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entity and what was learned about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityOutcome {
    pub entity: Entity,
    /// `None` for every status except `CacheHit` and `Resolved`.
    pub affiliation: Option<Affiliation>,
    pub status: LinkStatus,
    /// `-1`, `0` or `1`.
    pub lean: i8,
}

impl EntityOutcome {
    pub fn party(&self) -> Option<&str> {
        self.affiliation.as_ref().map(|a| a.party.as_str())
    }
}

//! Candidate resolution against an external knowledge source.
//!
//! Resolution for a person is: search by surface name, normalize and filter the returned
//! titles ([`select_candidates`]), then query up to K of them for a party until one answers.
//!
//! Failure policy:
//! - search fails: [`Resolution::Unavailable`], nothing is cached
//! - one candidate fails: skip it and try the next
//! - no candidate has a party: [`Resolution::NotPolitical`], cached as negative

pub mod candidate;
pub mod engine;
pub mod error;
pub mod source;
pub mod types;
pub mod wiki;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use candidate::{CandidateFilter, normalize_title, select_candidates};
pub use engine::{CandidateResolver, ResolverSettings};
pub use error::{SourceError, SourceResult};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockKnowledgeSource;
pub use source::{KnowledgeSource, PropertyLookup};
pub use types::Resolution;
pub use wiki::{WikiClient, WikiClientConfig};

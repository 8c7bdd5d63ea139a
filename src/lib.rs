//! Partisan library crate (used by the CLI and integration tests).
//!
//! Links named entities in text to a political affiliation through a persistent, memoized
//! knowledge-base lookup, then scores the affiliation on a two-party axis.
//!
//! # Public API Surface
//!
//! ## Pipeline
//! - [`EntityLinker`] - tag → merge → cache → resolve → score
//! - [`EntityOutcome`], [`LinkStatus`] - per-entity result and how it was reached
//!
//! ## Building Blocks
//! - [`SpanMerger`], [`Entity`], [`Chunk`] - span merging over tagger output
//! - [`AffiliationCache`], [`AffiliationRecord`], [`CacheLookup`] - persistent memo
//! - [`CandidateResolver`], [`KnowledgeSource`], [`WikiClient`] - candidate resolution
//! - [`AffiliationScorer`], [`Lean`] - affiliation → lean
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod entity;
pub mod linker;
pub mod resolver;
pub mod scoring;

pub use cache::{
    Affiliation, AffiliationCache, AffiliationRecord, CacheError, CacheLookup, CacheResult,
    LoadOutcome, normalize_key,
};
pub use config::{Config, ConfigError};
pub use constants::{NEGATIVE_AFFILIATION, NEGATIVE_TITLE};
#[cfg(any(test, feature = "mock"))]
pub use entity::MockTagger;
pub use entity::{Chunk, Entity, EntityKind, SpanMerger, TaggedSentence, Tagger, TaggerError};
pub use linker::{EntityLinker, EntityOutcome, LinkError, LinkResult, LinkStatus};
#[cfg(any(test, feature = "mock"))]
pub use resolver::MockKnowledgeSource;
pub use resolver::{
    CandidateFilter, CandidateResolver, KnowledgeSource, PropertyLookup, Resolution,
    ResolverSettings, SourceError, SourceResult, WikiClient, WikiClientConfig,
};
pub use scoring::{AffiliationScorer, Lean};

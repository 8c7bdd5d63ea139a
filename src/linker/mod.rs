//! Orchestration: tag → merge → cache → resolve → score.
//!
//! ## Outcome statuses
//!
//! | Status | Source | Cached |
//! |--------|--------|--------|
//! | `CACHE_HIT` | positive record | already |
//! | `CACHE_NEGATIVE` | negative record | already |
//! | `RESOLVED` | lookup found a party | written |
//! | `NOT_POLITICAL` | lookup found nothing | written (negative) |
//! | `UNSUPPORTED` | not a person | no |
//! | `UNAVAILABLE` | search failed | no |
//! | `OFFLINE` | miss in cache-only mode | no |
//!
//! Callers should treat every status without an affiliation as neutral. Only
//! `CACHE_NEGATIVE` and `NOT_POLITICAL` mean "confirmed apolitical".

pub mod error;
pub mod pipeline;
pub mod types;


pub use error::{LinkError, LinkResult};
pub use pipeline::EntityLinker;
pub use types::{EntityOutcome, LinkStatus};

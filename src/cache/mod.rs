//! Persistent memo of entity name → affiliation outcome.
//!
//! A key that is absent ([`CacheLookup::Miss`]) has never been looked up. A key holding
//! [`AffiliationRecord::Negative`] was looked up and has no affiliation. Both collapse to
//! "no affiliation" for callers, but only the miss sends the linker to the resolver.
//!
//! ## Snapshot format
//!
//! One JSON object mapping lower-cased names to `[canonical_title, affiliation]`:
//!
//! ```json
//! {
//!   "barack obama": ["Barack Obama", "Democratic Party"],
//!   "taylor swift": ["No political figure", "None found"]
//! }
//! ```

pub mod error;
pub mod store;
pub mod types;


pub use error::{CacheError, CacheResult};
pub use store::{AffiliationCache, normalize_key};
pub use types::{Affiliation, AffiliationRecord, CacheLookup, LoadOutcome};

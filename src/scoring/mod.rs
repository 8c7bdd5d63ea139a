//! Affiliation → political lean.
//!
//! A fixed two-party axis. Anything that is not recognizably Republican or Democratic,
//! including no affiliation at all, scores neutral.

pub mod scorer;
pub mod types;

#[cfg(test)]
mod tests;

pub use scorer::AffiliationScorer;
pub use types::Lean;

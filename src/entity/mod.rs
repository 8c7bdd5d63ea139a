//! Named-entity types and span merging.
//!
//! The upstream tagger emits, per sentence, an ordered list of [`Chunk`]s. Some taggers split
//! one name across several labeled chunks ("Angela" + "Merkel"); [`SpanMerger`] stitches
//! index-adjacent labeled chunks back into a single [`Entity`].

pub mod error;
pub mod merger;
pub mod tagger;
pub mod types;


pub use error::{TaggerError, TaggerResult};
pub use merger::SpanMerger;
#[cfg(any(test, feature = "mock"))]
pub use tagger::MockTagger;
pub use tagger::Tagger;
pub use types::{Chunk, Entity, EntityKind, TaggedSentence};

use super::error::TaggerResult;
use super::types::TaggedSentence;

/// Produces chunked, labeled sentences from raw text.
///
/// Tagging models live outside this crate; implementations adapt them to the chunk format.
pub trait Tagger: Send + Sync {
    fn tag(&self, text: &str) -> TaggerResult<Vec<TaggedSentence>>;
}

#[cfg(any(test, feature = "mock"))]
pub use mock::MockTagger;

#[cfg(any(test, feature = "mock"))]
mod mock {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::super::error::{TaggerError, TaggerResult};
    use super::super::types::TaggedSentence;
    use super::Tagger;

    /// Tagger returning canned sentences for known texts.
    ///
    /// Unknown texts tag to no sentences. Texts registered with [`MockTagger::fail_on`] error.
    #[derive(Debug, Default)]
    pub struct MockTagger {
        responses: HashMap<String, Vec<TaggedSentence>>,
        failures: Vec<String>,
        calls: AtomicUsize,
    }

    impl MockTagger {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_text(mut self, text: impl Into<String>, sentences: Vec<TaggedSentence>) -> Self {
            self.responses.insert(text.into(), sentences);
            self
        }

        pub fn fail_on(mut self, text: impl Into<String>) -> Self {
            self.failures.push(text.into());
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Tagger for MockTagger {
        fn tag(&self, text: &str) -> TaggerResult<Vec<TaggedSentence>> {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if self.failures.iter().any(|t| t == text) {
                return Err(TaggerError::Failed {
                    reason: format!("mock failure for '{text}'"),
                });
            }

            Ok(self.responses.get(text).cloned().unwrap_or_default())
        }
    }
}

//! Scripted in-memory knowledge source with call counters.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};

use super::error::{SourceError, SourceResult};
use super::source::{KnowledgeSource, PropertyLookup};

/// Knowledge source answering from fixed tables.
///
/// Unknown queries return no titles and unknown titles have no party. Failures can be
/// injected per query or title, and toggled later to simulate an outage that recovers.
#[derive(Debug, Default)]
pub struct MockKnowledgeSource {
    search_results: RwLock<HashMap<String, Vec<String>>>,
    parties: RwLock<HashMap<String, String>>,
    failing_searches: RwLock<HashSet<String>>,
    failing_titles: RwLock<HashSet<String>>,
    search_calls: AtomicUsize,
    party_calls: AtomicUsize,
    queried_titles: Mutex<Vec<String>>,
}

impl MockKnowledgeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search<I, S>(self, query: &str, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_results.write().insert(
            query.to_string(),
            titles.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn with_party(self, title: &str, party: &str) -> Self {
        self.parties
            .write()
            .insert(title.to_string(), party.to_string());
        self
    }

    pub fn with_failing_search(self, query: &str) -> Self {
        self.set_search_failing(query, true);
        self
    }

    pub fn with_failing_title(self, title: &str) -> Self {
        self.failing_titles.write().insert(title.to_string());
        self
    }

    pub fn set_search_failing(&self, query: &str, failing: bool) {
        let mut failing_searches = self.failing_searches.write();
        if failing {
            failing_searches.insert(query.to_string());
        } else {
            failing_searches.remove(query);
        }
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn party_calls(&self) -> usize {
        self.party_calls.load(Ordering::SeqCst)
    }

    /// Total external calls of either kind.
    pub fn total_calls(&self) -> usize {
        self.search_calls() + self.party_calls()
    }

    /// Titles passed to `party_of`, in call order.
    pub fn queried_titles(&self) -> Vec<String> {
        self.queried_titles.lock().clone()
    }
}

#[async_trait]
impl KnowledgeSource for MockKnowledgeSource {
    async fn search(&self, query: &str) -> SourceResult<Vec<String>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);

        if self.failing_searches.read().contains(query) {
            return Err(SourceError::Transport {
                url: "mock://search".to_string(),
                message: format!("injected failure for '{query}'"),
            });
        }

        Ok(self
            .search_results
            .read()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }

    async fn party_of(&self, title: &str) -> SourceResult<PropertyLookup> {
        self.party_calls.fetch_add(1, Ordering::SeqCst);
        self.queried_titles.lock().push(title.to_string());

        if self.failing_titles.read().contains(title) {
            return Err(SourceError::Timeout {
                url: format!("mock://party/{title}"),
            });
        }

        Ok(match self.parties.read().get(title) {
            Some(party) => PropertyLookup::Found(party.clone()),
            None => PropertyLookup::Absent,
        })
    }
}

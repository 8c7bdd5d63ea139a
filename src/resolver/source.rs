use async_trait::async_trait;

use super::error::SourceResult;

/// Answer to "what party does this page's subject belong to?".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyLookup {
    /// Party label of the page's linked item.
    Found(String),
    /// The page, its linked item, or the party claim does not exist.
    Absent,
}

#[async_trait]
/// External search index plus structured-property store.
pub trait KnowledgeSource: Send + Sync {
    /// Returns page titles for `query`, in the source's own relevance order.
    async fn search(&self, query: &str) -> SourceResult<Vec<String>>;

    /// Looks up the party property of the item linked to page `title`.
    async fn party_of(&self, title: &str) -> SourceResult<PropertyLookup>;
}

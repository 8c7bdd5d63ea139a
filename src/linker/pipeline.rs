use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::cache::{Affiliation, AffiliationCache, AffiliationRecord, CacheLookup, LoadOutcome};
use crate::config::Config;
use crate::entity::{Entity, SpanMerger, TaggedSentence, Tagger};
use crate::resolver::{CandidateResolver, KnowledgeSource, Resolution, ResolverSettings};
use crate::scoring::AffiliationScorer;

use super::error::{LinkError, LinkResult};
use super::types::{EntityOutcome, LinkStatus};

/// Text → entities → cached or freshly resolved affiliations.
///
/// Cache hits are served concurrently. Misses go through a single async lock that re-checks
/// the cache before resolving, so one key is never resolved twice and cache writes never
/// interleave.
pub struct EntityLinker {
    cache: Arc<AffiliationCache>,
    resolver: CandidateResolver,
    scorer: AffiliationScorer,
    merger: SpanMerger,
    tagger: Option<Arc<dyn Tagger>>,
    offline: bool,
    miss_lock: Mutex<()>,
}

impl std::fmt::Debug for EntityLinker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityLinker")
            .field("cache", &self.cache.path())
            .field("resolver", &self.resolver)
            .field("has_tagger", &self.tagger.is_some())
            .field("offline", &self.offline)
            .finish()
    }
}

impl EntityLinker {
    pub fn new(cache: Arc<AffiliationCache>, resolver: CandidateResolver) -> Self {
        Self {
            cache,
            resolver,
            scorer: AffiliationScorer::new(),
            merger: SpanMerger::new(),
            tagger: None,
            offline: false,
            miss_lock: Mutex::new(()),
        }
    }

    /// Opens the configured cache and wires a resolver over `source`.
    pub fn from_config(
        config: &Config,
        source: Arc<dyn KnowledgeSource>,
    ) -> LinkResult<(Self, LoadOutcome)> {
        let (cache, outcome) = AffiliationCache::open(&config.cache_path)?;
        let resolver = CandidateResolver::new(source, ResolverSettings::from(config));
        let linker = Self::new(Arc::new(cache), resolver).offline(config.offline);
        Ok((linker, outcome))
    }

    pub fn with_tagger(mut self, tagger: Arc<dyn Tagger>) -> Self {
        self.tagger = Some(tagger);
        self
    }

    /// When set, misses are reported as [`LinkStatus::Offline`] instead of looked up.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn cache(&self) -> &Arc<AffiliationCache> {
        &self.cache
    }

    pub fn resolver(&self) -> &CandidateResolver {
        &self.resolver
    }

    pub fn scorer(&self) -> &AffiliationScorer {
        &self.scorer
    }

    /// Tags `text` and merges its spans into entities.
    pub fn identify(&self, text: &str) -> LinkResult<Vec<Entity>> {
        let tagger = self.tagger.as_ref().ok_or(LinkError::NoTagger)?;
        let sentences = tagger.tag(text)?;
        Ok(self.merger.merge(&sentences))
    }

    /// Tags, merges and resolves every entity in `text`.
    pub async fn resolve_all(&self, text: &str) -> LinkResult<Vec<EntityOutcome>> {
        let entities = self.identify(text)?;
        Ok(self.resolve_entities(&entities).await)
    }

    /// Merges pre-tagged sentences and resolves the resulting entities.
    pub async fn resolve_sentences(&self, sentences: &[TaggedSentence]) -> Vec<EntityOutcome> {
        let entities = self.merger.merge(sentences);
        self.resolve_entities(&entities).await
    }

    /// Resolves entities in order, one outcome each, duplicates included.
    ///
    /// Titles matched earlier in the batch are preferred when later entities are ambiguous.
    #[instrument(skip_all, fields(entities = entities.len()))]
    pub async fn resolve_entities(&self, entities: &[Entity]) -> Vec<EntityOutcome> {
        let mut outcomes = Vec::with_capacity(entities.len());
        let mut subjects: Vec<String> = Vec::new();

        for entity in entities {
            let outcome = self.link(entity, &subjects).await;

            if let Some(affiliation) = &outcome.affiliation
                && !subjects.contains(&affiliation.title)
            {
                subjects.push(affiliation.title.clone());
            }

            outcomes.push(outcome);
        }

        let cached = outcomes.iter().filter(|o| o.status.is_cached()).count();
        info!(
            entities = outcomes.len(),
            cached,
            "Linked entities"
        );

        outcomes
    }

    /// Resolves a single entity through cache-then-resolver.
    pub async fn resolve_entity(&self, entity: &Entity) -> EntityOutcome {
        self.link(entity, &[]).await
    }

    async fn link(&self, entity: &Entity, subjects: &[String]) -> EntityOutcome {
        if let Some(outcome) = self.from_cache(entity) {
            return outcome;
        }

        if !entity.kind.is_person() {
            return self.outcome(entity, None, LinkStatus::Unsupported);
        }

        if self.offline {
            debug!(entity = %entity.name, "Cache miss in offline mode");
            return self.outcome(entity, None, LinkStatus::Offline);
        }

        let _guard = self.miss_lock.lock().await;

        // Another caller may have resolved this key while we waited.
        if let Some(outcome) = self.from_cache(entity) {
            return outcome;
        }

        let resolution = self.resolver.resolve(entity, subjects).await;

        if let Some(record) = resolution.to_record() {
            self.store(entity, record).await;
        }

        match resolution {
            Resolution::Affiliated(affiliation) => {
                self.outcome(entity, Some(affiliation), LinkStatus::Resolved)
            }
            Resolution::NotPolitical { .. } => {
                self.outcome(entity, None, LinkStatus::NotPolitical)
            }
            Resolution::Unsupported(_) => self.outcome(entity, None, LinkStatus::Unsupported),
            Resolution::Unavailable { .. } => self.outcome(entity, None, LinkStatus::Unavailable),
        }
    }

    /// Writes `record` on the blocking pool; the snapshot is fsynced before this returns.
    async fn store(&self, entity: &Entity, record: AffiliationRecord) {
        let cache = Arc::clone(&self.cache);
        let name = entity.name.clone();

        match tokio::task::spawn_blocking(move || cache.put(&name, record)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                warn!(entity = %entity.name, error = %e, "Failed to persist affiliation record");
            }
            Err(e) => {
                warn!(entity = %entity.name, error = %e, "Affiliation persist task failed");
            }
        }
    }

    fn from_cache(&self, entity: &Entity) -> Option<EntityOutcome> {
        match self.cache.get(&entity.name) {
            CacheLookup::Hit(affiliation) => {
                Some(self.outcome(entity, Some(affiliation), LinkStatus::CacheHit))
            }
            CacheLookup::Negative => Some(self.outcome(entity, None, LinkStatus::CacheNegative)),
            CacheLookup::Miss => None,
        }
    }

    fn outcome(
        &self,
        entity: &Entity,
        affiliation: Option<Affiliation>,
        status: LinkStatus,
    ) -> EntityOutcome {
        let lean = self
            .scorer
            .score(affiliation.as_ref().map(|a| a.party.as_str()));

        EntityOutcome {
            entity: entity.clone(),
            affiliation,
            status,
            lean,
        }
    }
}

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::cache::Affiliation;
use crate::config::Config;
use crate::constants::DEFAULT_CANDIDATE_LIMIT;
use crate::entity::Entity;

use super::candidate::{CandidateFilter, select_candidates};
use super::source::{KnowledgeSource, PropertyLookup};
use super::types::Resolution;

/// Candidate cutoff and filter mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Filtered candidates queried per entity (K).
    pub candidate_limit: usize,
    pub filter: CandidateFilter,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            filter: CandidateFilter::default(),
        }
    }
}

impl From<&Config> for ResolverSettings {
    fn from(config: &Config) -> Self {
        Self {
            candidate_limit: config.candidate_limit,
            filter: config.candidate_filter,
        }
    }
}

/// Resolves a person to a party by walking ranked search candidates.
///
/// The first candidate with a non-empty party wins. No attempt is made to reconcile several
/// people sharing a name: acceptance order is the search ranking.
pub struct CandidateResolver {
    source: Arc<dyn KnowledgeSource>,
    settings: ResolverSettings,
}

impl std::fmt::Debug for CandidateResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateResolver")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl CandidateResolver {
    pub fn new(source: Arc<dyn KnowledgeSource>, settings: ResolverSettings) -> Self {
        Self { source, settings }
    }

    pub fn settings(&self) -> ResolverSettings {
        self.settings
    }

    pub fn source(&self) -> &Arc<dyn KnowledgeSource> {
        &self.source
    }

    /// Runs one resolution episode for `entity`.
    ///
    /// `preferred` holds titles already matched for other entities in the same text; those
    /// jump the queue if the search returns them.
    #[instrument(skip(self, preferred), fields(entity = %entity.name, kind = %entity.kind))]
    pub async fn resolve(&self, entity: &Entity, preferred: &[String]) -> Resolution {
        if !entity.kind.is_person() {
            debug!("Skipping non-person entity");
            return Resolution::Unsupported(entity.kind);
        }

        let titles = match self.source.search(&entity.name).await {
            Ok(titles) => titles,
            Err(e) => {
                warn!(error = %e, "Search failed, leaving entity unresolved");
                return Resolution::Unavailable {
                    reason: e.to_string(),
                };
            }
        };

        let candidates = select_candidates(
            &entity.name,
            &titles,
            preferred,
            self.settings.filter,
            self.settings.candidate_limit,
        );

        debug!(
            results = titles.len(),
            candidates = candidates.len(),
            "Selected candidates"
        );

        for title in &candidates {
            match self.source.party_of(title).await {
                Ok(PropertyLookup::Found(party)) if !party.trim().is_empty() => {
                    info!(title = %title, party = %party, "Resolved affiliation");
                    return Resolution::Affiliated(Affiliation::new(title.clone(), party.trim()));
                }
                Ok(_) => {
                    debug!(title = %title, "Candidate has no party");
                }
                Err(e) => {
                    warn!(title = %title, error = %e, "Candidate lookup failed, skipping");
                }
            }
        }

        info!(checked = candidates.len(), "No political candidate found");
        Resolution::NotPolitical {
            candidates_checked: candidates.len(),
        }
    }
}

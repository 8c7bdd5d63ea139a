//! Wikipedia search + Wikidata party lookup over the MediaWiki action API.
//!
//! `party_of` is three requests: page props (for the linked Wikidata item), the item's
//! claims (for the party item id), and the party item's English label.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::constants::{
    DEFAULT_PARTY_PROPERTY, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SEARCH_LIMIT,
    DEFAULT_USER_AGENT, DEFAULT_WIKIDATA_API, DEFAULT_WIKIPEDIA_API,
};

use super::error::{SourceError, SourceResult};
use super::source::{KnowledgeSource, PropertyLookup};

/// Endpoint and transport settings for [`WikiClient`].
#[derive(Debug, Clone)]
pub struct WikiClientConfig {
    pub wikipedia_api: String,
    pub wikidata_api: String,
    pub party_property: String,
    pub search_limit: usize,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for WikiClientConfig {
    fn default() -> Self {
        Self {
            wikipedia_api: DEFAULT_WIKIPEDIA_API.to_string(),
            wikidata_api: DEFAULT_WIKIDATA_API.to_string(),
            party_property: DEFAULT_PARTY_PROPERTY.to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&Config> for WikiClientConfig {
    fn from(config: &Config) -> Self {
        Self {
            wikipedia_api: config.wikipedia_api.clone(),
            wikidata_api: config.wikidata_api.clone(),
            party_property: config.party_property.clone(),
            search_limit: config.search_limit,
            timeout: config.request_timeout,
            user_agent: config.user_agent.clone(),
        }
    }
}

#[derive(Debug, Clone)]
/// HTTP-backed [`KnowledgeSource`].
pub struct WikiClient {
    http: HttpClient,
    config: WikiClientConfig,
}

impl WikiClient {
    pub fn new(config: WikiClientConfig) -> SourceResult<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SourceError::Transport {
                url: config.wikipedia_api.clone(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { http, config })
    }

    pub fn from_config(config: &Config) -> SourceResult<Self> {
        Self::new(WikiClientConfig::from(config))
    }

    pub fn config(&self) -> &WikiClientConfig {
        &self.config
    }

    async fn get_json(&self, url: &str, params: &[(&str, &str)]) -> SourceResult<Value> {
        let response = self
            .http
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SourceError::from_reqwest(url, e))?;

        if let Some(info) = body["error"]["info"].as_str() {
            return Err(SourceError::Parse {
                url: url.to_string(),
                message: format!("API error: {info}"),
            });
        }

        Ok(body)
    }

    async fn wikibase_item(&self, title: &str) -> SourceResult<Option<String>> {
        let url = self.config.wikipedia_api.as_str();
        let body = self
            .get_json(
                url,
                &[
                    ("action", "query"),
                    ("prop", "pageprops"),
                    ("ppprop", "wikibase_item"),
                    ("redirects", "1"),
                    ("titles", title),
                    ("format", "json"),
                ],
            )
            .await?;

        let pages = body["query"]["pages"]
            .as_object()
            .ok_or_else(|| SourceError::Parse {
                url: url.to_string(),
                message: "missing query.pages".to_string(),
            })?;

        Ok(pages
            .values()
            .next()
            .and_then(|page| page["pageprops"]["wikibase_item"].as_str())
            .map(str::to_string))
    }

    async fn entity(&self, id: &str, props: &[(&str, &str)]) -> SourceResult<Value> {
        let url = self.config.wikidata_api.as_str();
        let mut params = vec![
            ("action", "wbgetentities"),
            ("ids", id),
            ("format", "json"),
        ];
        params.extend_from_slice(props);

        let body = self.get_json(url, &params).await?;
        let entity = body["entities"][id].clone();

        if entity.is_null() {
            return Err(SourceError::Parse {
                url: url.to_string(),
                message: format!("entity {id} missing from response"),
            });
        }

        Ok(entity)
    }

    async fn party_item(&self, item: &str) -> SourceResult<Option<String>> {
        let entity = self.entity(item, &[("props", "claims")]).await?;

        Ok(entity["claims"][self.config.party_property.as_str()]
            .as_array()
            .and_then(|claims| claims.first())
            .and_then(|claim| claim["mainsnak"]["datavalue"]["value"]["id"].as_str())
            .map(str::to_string))
    }

    async fn label(&self, item: &str) -> SourceResult<Option<String>> {
        let entity = self
            .entity(item, &[("props", "labels"), ("languages", "en")])
            .await?;

        Ok(entity["labels"]["en"]["value"]
            .as_str()
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(str::to_string))
    }
}

#[async_trait]
impl KnowledgeSource for WikiClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> SourceResult<Vec<String>> {
        let url = self.config.wikipedia_api.as_str();
        let limit = self.config.search_limit.to_string();
        let body = self
            .get_json(
                url,
                &[
                    ("action", "query"),
                    ("list", "search"),
                    ("srsearch", query),
                    ("srlimit", limit.as_str()),
                    ("format", "json"),
                    ("utf8", "1"),
                ],
            )
            .await?;

        let results = body["query"]["search"]
            .as_array()
            .ok_or_else(|| SourceError::Parse {
                url: url.to_string(),
                message: "missing query.search".to_string(),
            })?;

        let titles: Vec<String> = results
            .iter()
            .filter_map(|r| r["title"].as_str())
            .map(str::to_string)
            .collect();

        debug!(results = titles.len(), "Search complete");
        Ok(titles)
    }

    #[instrument(skip(self))]
    async fn party_of(&self, title: &str) -> SourceResult<PropertyLookup> {
        let Some(item) = self.wikibase_item(title).await? else {
            debug!("Page has no linked item");
            return Ok(PropertyLookup::Absent);
        };

        let Some(party) = self.party_item(&item).await? else {
            debug!(item = %item, "Item has no party claim");
            return Ok(PropertyLookup::Absent);
        };

        match self.label(&party).await? {
            Some(label) => {
                debug!(item = %item, party = %party, label = %label, "Party found");
                Ok(PropertyLookup::Found(label))
            }
            None => Ok(PropertyLookup::Absent),
        }
    }
}

//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `PARTISAN_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CACHE_PATH, DEFAULT_CANDIDATE_LIMIT, DEFAULT_PARTY_PROPERTY,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SEARCH_LIMIT, DEFAULT_USER_AGENT, DEFAULT_WIKIDATA_API,
    DEFAULT_WIKIPEDIA_API, MAX_CANDIDATE_LIMIT,
};
use crate::resolver::CandidateFilter;

/// Runtime configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `PARTISAN_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Affiliation snapshot file. Default: `./.data/affiliations.json`.
    pub cache_path: PathBuf,

    /// MediaWiki action API used for search and page props.
    pub wikipedia_api: String,

    /// Wikidata action API used for claims and labels.
    pub wikidata_api: String,

    /// Wikidata property holding the party. Default: `P102`.
    pub party_property: String,

    /// Filtered candidates queried per entity (K). Default: `3`.
    pub candidate_limit: usize,

    /// Raw titles requested from search. Default: `10`.
    pub search_limit: usize,

    /// Candidate filter mode. Default: strict.
    pub candidate_filter: CandidateFilter,

    /// Per-request timeout. Default: 10 seconds.
    pub request_timeout: Duration,

    /// `User-Agent` header for outbound requests.
    pub user_agent: String,

    /// Serve from the cache only; misses are not looked up. Default: `false`.
    pub offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            wikipedia_api: DEFAULT_WIKIPEDIA_API.to_string(),
            wikidata_api: DEFAULT_WIKIDATA_API.to_string(),
            party_property: DEFAULT_PARTY_PROPERTY.to_string(),
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            search_limit: DEFAULT_SEARCH_LIMIT,
            candidate_filter: CandidateFilter::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            offline: false,
        }
    }
}

impl Config {
    const ENV_CACHE_PATH: &'static str = "PARTISAN_CACHE_PATH";
    const ENV_WIKIPEDIA_API: &'static str = "PARTISAN_WIKIPEDIA_API";
    const ENV_WIKIDATA_API: &'static str = "PARTISAN_WIKIDATA_API";
    const ENV_PARTY_PROPERTY: &'static str = "PARTISAN_PARTY_PROPERTY";
    const ENV_CANDIDATE_LIMIT: &'static str = "PARTISAN_CANDIDATE_LIMIT";
    const ENV_SEARCH_LIMIT: &'static str = "PARTISAN_SEARCH_LIMIT";
    const ENV_CANDIDATE_FILTER: &'static str = "PARTISAN_CANDIDATE_FILTER";
    const ENV_REQUEST_TIMEOUT_SECS: &'static str = "PARTISAN_REQUEST_TIMEOUT_SECS";
    const ENV_USER_AGENT: &'static str = "PARTISAN_USER_AGENT";
    const ENV_OFFLINE: &'static str = "PARTISAN_OFFLINE";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let cache_path = Self::parse_path_from_env(Self::ENV_CACHE_PATH, defaults.cache_path);
        let wikipedia_api =
            Self::parse_string_from_env(Self::ENV_WIKIPEDIA_API, defaults.wikipedia_api);
        let wikidata_api =
            Self::parse_string_from_env(Self::ENV_WIKIDATA_API, defaults.wikidata_api);
        let party_property =
            Self::parse_string_from_env(Self::ENV_PARTY_PROPERTY, defaults.party_property);
        let candidate_limit =
            Self::parse_usize_from_env(Self::ENV_CANDIDATE_LIMIT, defaults.candidate_limit)?;
        let search_limit =
            Self::parse_usize_from_env(Self::ENV_SEARCH_LIMIT, defaults.search_limit)?;
        let candidate_filter = Self::parse_filter_from_env(defaults.candidate_filter)?;
        let request_timeout = Duration::from_secs(Self::parse_u64_from_env(
            Self::ENV_REQUEST_TIMEOUT_SECS,
            defaults.request_timeout.as_secs(),
        )?);
        let user_agent = Self::parse_string_from_env(Self::ENV_USER_AGENT, defaults.user_agent);
        let offline = Self::parse_bool_from_env(Self::ENV_OFFLINE, defaults.offline)?;

        Ok(Self {
            cache_path,
            wikipedia_api,
            wikidata_api,
            party_property,
            candidate_limit,
            search_limit,
            candidate_filter,
            request_timeout,
            user_agent,
            offline,
        })
    }

    /// Validates ranges and paths (does not create anything on disk).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_path.is_dir() {
            return Err(ConfigError::CachePathIsDirectory {
                path: self.cache_path.clone(),
            });
        }

        if self.candidate_limit == 0 || self.candidate_limit > MAX_CANDIDATE_LIMIT {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_CANDIDATE_LIMIT,
                value: self.candidate_limit.to_string(),
                reason: "must be between 1 and 10",
            });
        }

        if self.search_limit < self.candidate_limit {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_SEARCH_LIMIT,
                value: self.search_limit.to_string(),
                reason: "must be at least the candidate limit",
            });
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_REQUEST_TIMEOUT_SECS,
                value: "0".to_string(),
                reason: "must be greater than zero",
            });
        }

        if self.wikipedia_api.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint {
                name: Self::ENV_WIKIPEDIA_API,
            });
        }

        if self.wikidata_api.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint {
                name: Self::ENV_WIKIDATA_API,
            });
        }

        Ok(())
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_u64_from_env(name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(name) {
            Ok(value) => value.trim().parse().map_err(|e| ConfigError::ParseInt {
                name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_usize_from_env(name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(name) {
            Ok(value) => value.trim().parse().map_err(|e| ConfigError::ParseInt {
                name,
                value,
                source: e,
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_filter_from_env(default: CandidateFilter) -> Result<CandidateFilter, ConfigError> {
        match env::var(Self::ENV_CANDIDATE_FILTER) {
            Ok(value) => {
                CandidateFilter::parse(&value).ok_or(ConfigError::UnknownFilter { value })
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" | "" => Ok(false),
                _ => Err(ConfigError::InvalidBool { name, value }),
            },
            Err(_) => Ok(default),
        }
    }
}

//! Cross-cutting, shared constants.
//!
//! The two sentinel strings form the persisted negative record. They are part of the cache file
//! format, so changing them invalidates existing snapshots.

/// Canonical title stored for an entity that was looked up and has no political affiliation.
pub const NEGATIVE_TITLE: &str = "No political figure";

/// Affiliation stored alongside [`NEGATIVE_TITLE`].
pub const NEGATIVE_AFFILIATION: &str = "None found";

/// Bare affiliation written by older snapshots for the negative record.
pub const NEGATIVE_MARKER: &str = "None";

/// Default number of filtered candidate titles queried per entity.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 3;

/// Upper bound accepted for the candidate cutoff.
pub const MAX_CANDIDATE_LIMIT: usize = 10;

/// Default number of titles requested from the search endpoint.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Default per-request timeout for knowledge-source calls.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Wikidata property "member of political party".
pub const DEFAULT_PARTY_PROPERTY: &str = "P102";

pub const DEFAULT_WIKIPEDIA_API: &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_WIKIDATA_API: &str = "https://www.wikidata.org/w/api.php";

/// Default location of the affiliation snapshot.
pub const DEFAULT_CACHE_PATH: &str = "./.data/affiliations.json";

/// Suffix appended to an unreadable snapshot when it is moved aside.
pub const CORRUPT_SUFFIX: &str = "corrupt";

/// `User-Agent` sent with every knowledge-source request.
pub const DEFAULT_USER_AGENT: &str = concat!("partisan/", env!("CARGO_PKG_VERSION"));

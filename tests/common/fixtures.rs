#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use partisan::Config;

use super::harness::{StubData, StubServer};

/// Obama and Trump carry a party claim; Swift's page links an item without one.
pub fn politicians() -> StubData {
    StubData::new()
        .search("Barack Obama", &["Barack Obama", "Michelle Obama", "Obama (surname)"])
        .page("Barack Obama", "Q76", Some(("Q29552", "Democratic Party")))
        .page("Michelle Obama", "Q13133", Some(("Q29552", "Democratic Party")))
        .search("Donald Trump", &["Donald Trump", "Donald Trump Jr."])
        .page("Donald Trump", "Q22686", Some(("Q29468", "Republican Party")))
        .search("Taylor Swift", &["Taylor Swift", "Taylor Swift (album)"])
        .page("Taylor Swift", "Q26876", None)
        .page("Taylor Swift (album)", "Q1141232", None)
}

/// Config pointing at the stub server with the snapshot at `cache_path`.
pub fn config_for(server: &StubServer, cache_path: &Path) -> Config {
    Config {
        cache_path: cache_path.to_path_buf(),
        wikipedia_api: server.wikipedia_api(),
        wikidata_api: server.wikidata_api(),
        request_timeout: Duration::from_secs(2),
        user_agent: "partisan-tests/1.0".to_string(),
        ..Config::default()
    }
}

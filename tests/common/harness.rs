//! Stub MediaWiki + Wikidata server.
//!
//! Serves the subset of the action API that `WikiClient` calls:
//!
//! | Path | Params | Answer |
//! |------|--------|--------|
//! | `/wikipedia/api.php` | `list=search&srsearch=Q` | `query.search[].title` |
//! | `/wikipedia/api.php` | `prop=pageprops&titles=T` | `query.pages.*.pageprops.wikibase_item` |
//! | `/wikidata/api.php` | `action=wbgetentities&props=claims` | `entities.Q.claims.P102` |
//! | `/wikidata/api.php` | `action=wbgetentities&props=labels` | `entities.Q.labels.en.value` |

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 20;

/// Knowledge-base content served by the stub.
#[derive(Debug, Default, Clone)]
pub struct StubData {
    /// Search query → page titles.
    pub search: HashMap<String, Vec<String>>,
    /// Page title → Wikidata item id.
    pub pages: HashMap<String, String>,
    /// Item id → party item id.
    pub parties: HashMap<String, String>,
    /// Item id → English label.
    pub labels: HashMap<String, String>,
}

impl StubData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, query: &str, titles: &[&str]) -> Self {
        self.search.insert(
            query.to_string(),
            titles.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    /// Adds a page linked to `item`, optionally with a party claim.
    pub fn page(mut self, title: &str, item: &str, party: Option<(&str, &str)>) -> Self {
        self.pages.insert(title.to_string(), item.to_string());
        if let Some((party_item, label)) = party {
            self.parties.insert(item.to_string(), party_item.to_string());
            self.labels.insert(party_item.to_string(), label.to_string());
        }
        self
    }
}

#[derive(Debug, Default)]
pub struct StubState {
    pub data: StubData,
    pub fail_search: AtomicBool,
    pub delay: Mutex<Option<Duration>>,
    pub requests: AtomicUsize,
    pub search_requests: AtomicUsize,
    pub user_agents: Mutex<Vec<String>>,
}

impl StubState {
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn search_requests(&self) -> usize {
        self.search_requests.load(Ordering::SeqCst)
    }

    pub fn set_fail_search(&self, fail: bool) {
        self.fail_search.store(fail, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock() = delay;
    }
}

pub struct StubServer {
    pub addr: SocketAddr,
    pub state: Arc<StubState>,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl StubServer {
    pub fn wikipedia_api(&self) -> String {
        format!("http://{}/wikipedia/api.php", self.addr)
    }

    pub fn wikidata_api(&self) -> String {
        format!("http://{}/wikidata/api.php", self.addr)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
}

pub async fn spawn_stub_server(data: StubData) -> Result<StubServer, ServerStartupError> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;

    let state = Arc::new(StubState {
        data,
        ..Default::default()
    });

    let app = Router::new()
        .route("/wikipedia/api.php", get(wikipedia))
        .route("/wikidata/api.php", get(wikidata))
        .with_state(state.clone());

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(addr).await?;

    Ok(StubServer {
        addr,
        state,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}

async fn wait_for_server_ready(addr: SocketAddr) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS) {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => tokio::time::sleep(Duration::from_millis(STARTUP_POLL_INTERVAL_MS)).await,
        }
    }
}

async fn record(state: &StubState, headers: &HeaderMap) {
    state.requests.fetch_add(1, Ordering::SeqCst);

    if let Some(agent) = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
    {
        state.user_agents.lock().push(agent.to_string());
    }

    let delay = *state.delay.lock();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
}

async fn wikipedia(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&state, &headers).await;

    let param = |name: &str| params.get(name).map(String::as_str).unwrap_or_default();

    if param("list") == "search" {
        state.search_requests.fetch_add(1, Ordering::SeqCst);

        if state.fail_search.load(Ordering::SeqCst) {
            return (StatusCode::SERVICE_UNAVAILABLE, "search offline").into_response();
        }

        let results: Vec<Value> = state
            .data
            .search
            .get(param("srsearch"))
            .into_iter()
            .flatten()
            .map(|title| json!({ "ns": 0, "title": title }))
            .collect();

        return axum::Json(json!({ "batchcomplete": "", "query": { "search": results } }))
            .into_response();
    }

    if param("prop") == "pageprops" {
        let title = param("titles");
        let page = match state.data.pages.get(title) {
            Some(item) => json!({
                "42": { "pageid": 42, "ns": 0, "title": title, "pageprops": { "wikibase_item": item } }
            }),
            None => json!({ "-1": { "ns": 0, "title": title, "missing": "" } }),
        };

        return axum::Json(json!({ "batchcomplete": "", "query": { "pages": page } }))
            .into_response();
    }

    axum::Json(json!({ "error": { "code": "badparams", "info": "unsupported request" } }))
        .into_response()
}

async fn wikidata(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    record(&state, &headers).await;

    let id = params.get("ids").cloned().unwrap_or_default();
    let props = params.get("props").map(String::as_str).unwrap_or_default();

    let entity = match props {
        "claims" => {
            let claims = match state.data.parties.get(&id) {
                Some(party) => json!({
                    "P102": [{
                        "mainsnak": {
                            "snaktype": "value",
                            "property": "P102",
                            "datavalue": { "value": { "entity-type": "item", "id": party }, "type": "wikibase-entityid" }
                        },
                        "rank": "normal"
                    }]
                }),
                None => json!({}),
            };
            json!({ "type": "item", "id": id, "claims": claims })
        }
        "labels" => match state.data.labels.get(&id) {
            Some(label) => json!({
                "type": "item", "id": id, "labels": { "en": { "language": "en", "value": label } }
            }),
            None => json!({ "type": "item", "id": id, "labels": {} }),
        },
        _ => json!({ "id": id, "missing": "" }),
    };

    let mut entities = serde_json::Map::new();
    entities.insert(id, entity);

    axum::Json(json!({ "entities": entities, "success": 1 })).into_response()
}

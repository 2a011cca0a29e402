//! A canned InfluxDB `/series` endpoint for end-to-end tests.
//!
//! Replies are keyed by the `q` query parameter. Unknown queries get an empty
//! JSON array.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use log::{debug, warn};
use serde_json::Value;
use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct CannedReply {
    pub status: u16,
    pub body: String,
}

impl CannedReply {
    pub fn json(body: Value) -> CannedReply {
        CannedReply {
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(status: u16) -> CannedReply {
        CannedReply {
            status,
            body: String::new(),
        }
    }

    pub fn raw(body: &str) -> CannedReply {
        CannedReply {
            status: 200,
            body: body.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub database: String,
    pub params: HashMap<String, String>,
}

impl RecordedRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|v| v.as_str())
    }
}

#[derive(Clone)]
struct ServerState {
    replies: Arc<HashMap<String, CannedReply>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn series(
    State(state): State<ServerState>,
    Path(database): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let request = RecordedRequest { database, params };
    debug!("Fake influx got {:?}", request);
    let reply = request
        .param("q")
        .and_then(|q| state.replies.get(q))
        .cloned()
        .unwrap_or_else(|| CannedReply::raw("[]"));
    match state.requests.lock() {
        Ok(mut requests) => requests.push(request),
        Err(poisoned) => poisoned.into_inner().push(request),
    }
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
}

pub struct FakeInfluxServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl FakeInfluxServer {
    pub async fn start(replies: HashMap<String, CannedReply>) -> io::Result<FakeInfluxServer> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = ServerState {
            replies: Arc::new(replies),
            requests: Arc::new(Mutex::new(vec![])),
        };
        let requests = state.requests.clone();
        let app = Router::new()
            .route("/db/:database/series", get(series))
            .with_state(state);
        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                warn!("Fake influx server stopped: {}", err);
            }
        });
        Ok(FakeInfluxServer {
            addr,
            requests,
            handle,
        })
    }

    /// Base url of a database named `db`, e.g. `http://127.0.0.1:1234/db/site`.
    pub fn database_url(&self, db: &str) -> String {
        format!("http://{}/db/{}", self.addr, db)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        match self.requests.lock() {
            Ok(requests) => requests.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Drop for FakeInfluxServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

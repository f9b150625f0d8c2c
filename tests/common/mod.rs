#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode, Uri},
    Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// One request as the mock daemon saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub query_method: Option<String>,
    pub headers: HeaderMap,
    pub body: Value,
}

impl Recorded {
    pub fn method(&self) -> &str {
        self.body["method"].as_str().unwrap_or_default()
    }
}

type Responder = Arc<dyn Fn(&Recorded, usize) -> (StatusCode, String) + Send + Sync>;

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    respond: Responder,
}

/// In-process JSON-RPC server recording every request it receives.
pub struct MockDaemon {
    pub url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
    server_task: JoinHandle<()>,
}

impl MockDaemon {
    /// `respond` gets the request and its zero-based arrival index.
    pub async fn start<F>(respond: F) -> Self
    where
        F: Fn(&Recorded, usize) -> (StatusCode, Value) + Send + Sync + 'static,
    {
        Self::start_raw(move |req, index| {
            let (status, body) = respond(req, index);
            (status, body.to_string())
        })
        .await
    }

    pub async fn start_raw<F>(respond: F) -> Self
    where
        F: Fn(&Recorded, usize) -> (StatusCode, String) + Send + Sync + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            requests: requests.clone(),
            respond: Arc::new(respond),
        };
        let app = Router::new().fallback(handle).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server_task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}"),
            requests,
            server_task,
        }
    }

    /// Answers every call with `result`.
    pub async fn answering(result: Value) -> Self {
        Self::start(move |req, _| (StatusCode::OK, rpc_result(req, result.clone()))).await
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self, method: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method() == method)
            .count()
    }

    pub fn total_hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Drop for MockDaemon {
    fn drop(&mut self) {
        self.server_task.abort();
    }
}

async fn handle(
    State(state): State<MockState>,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let recorded = Recorded {
        path: uri.path().to_string(),
        query_method: query.get("m").cloned(),
        headers,
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    };
    let index = {
        let mut requests = state.requests.lock().unwrap();
        requests.push(recorded.clone());
        requests.len() - 1
    };
    (state.respond)(&recorded, index)
}

pub fn rpc_result(req: &Recorded, result: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": req.body["id"], "result": result})
}

pub fn rpc_error(req: &Recorded, message: &str) -> Value {
    json!({"jsonrpc": "2.0", "id": req.body["id"], "error": {"code": -32500, "message": message}})
}

/// An address nothing listens on.
pub async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

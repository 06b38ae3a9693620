//! Test fixtures: descriptors and a local stub HTTP server.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::IntoResponse;
use secrecy::SecretString;

use switchyard_types::provider::{Capability, GenerationParams, ProviderDescriptor, WireFormat};

pub fn descriptor(key: &str, wire: WireFormat, capability: Capability) -> ProviderDescriptor {
    ProviderDescriptor {
        key: key.to_string(),
        display_name: key.to_string(),
        endpoint: format!("http://127.0.0.1:9/{key}"),
        model: Some(format!("{key}-model")),
        text_model: None,
        credential: Some(SecretString::from(format!("{key}-secret"))),
        capability,
        priority: 1,
        daily_limit: None,
        wire,
        text_params: GenerationParams::text_default(),
        vision_params: GenerationParams::vision_default(),
    }
}

/// URL on a local port with nothing listening.
pub fn closed_endpoint(path: &str) -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}{path}")
}

/// One request as seen by the stub.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path_and_query: String,
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// A canned-response HTTP server bound to an ephemeral port.
pub struct StubServer {
    base: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl StubServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    pub fn request_count(&self) -> usize {
        self.captured.lock().unwrap().len()
    }

    pub fn single_request(&self) -> CapturedRequest {
        let captured = self.captured.lock().unwrap();
        assert_eq!(captured.len(), 1, "expected exactly one request");
        captured[0].clone()
    }
}

async fn handle(
    State(state): State<StubState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let captured = CapturedRequest {
        path_and_query: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_default(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    };
    state.captured.lock().unwrap().push(captured);

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

/// Start a stub that answers every request with `status` and `body`.
pub async fn spawn_stub(status: u16, body: &str) -> StubServer {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        status: StatusCode::from_u16(status).unwrap(),
        body: body.to_string(),
        captured: captured.clone(),
    };
    let app = Router::new().fallback(handle).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    StubServer {
        base: format!("http://{addr}"),
        captured,
    }
}

//! Routing endpoints.
//!
//! POST /api/v1/route/text   - Route a text completion
//! POST /api/v1/route/vision - Route an image + text completion
//!
//! Responses use a flat `{success, response, provider, model, error}` body
//! rather than the envelope. If the client disconnects, axum drops the
//! handler future, which abandons the sweep and releases any held quota.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use switchyard_types::routing::{RoutingOutcome, TextRequest, VisionRequest};

use crate::state::{AppState, Surface};

/// Request body for text routing.
#[derive(Debug, Deserialize)]
pub struct RouteTextBody {
    pub prompt: String,
    #[serde(default)]
    pub system: Option<String>,
}

/// Request body for vision routing. The image is bare base64.
#[derive(Debug, Deserialize)]
pub struct RouteVisionBody {
    pub image_base64: String,
    pub prompt: String,
    #[serde(default)]
    pub system: Option<String>,
}

/// Flat routing result.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RouteResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<RoutingOutcome> for RouteResponse {
    fn from(outcome: RoutingOutcome) -> Self {
        match outcome {
            RoutingOutcome::Success(completion) => Self {
                success: true,
                response: Some(completion.text),
                provider: Some(completion.provider),
                model: completion.model,
                error: None,
            },
            other => Self {
                success: false,
                response: None,
                provider: None,
                model: None,
                error: other.error().map(String::from),
            },
        }
    }
}

fn into_reply(outcome: RoutingOutcome) -> (StatusCode, Json<RouteResponse>) {
    let status = if outcome.is_success() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(outcome.into()))
}

/// POST /api/v1/route/text
pub async fn route_text(
    State(state): State<AppState>,
    Json(body): Json<RouteTextBody>,
) -> (StatusCode, Json<RouteResponse>) {
    let request = TextRequest::new(body.prompt, body.system);
    let outcome = state
        .route_text(&request, Surface::Http, &CancellationToken::new())
        .await;
    into_reply(outcome)
}

/// POST /api/v1/route/vision
pub async fn route_vision(
    State(state): State<AppState>,
    Json(body): Json<RouteVisionBody>,
) -> (StatusCode, Json<RouteResponse>) {
    let request = VisionRequest::new(body.image_base64, body.prompt, body.system);
    let outcome = state
        .route_vision(&request, Surface::Http, &CancellationToken::new())
        .await;
    into_reply(outcome)
}

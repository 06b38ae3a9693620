//! Application state shared by CLI commands and REST API handlers.
//!
//! AppState owns the assembled router. The quota tracker inside it is the
//! single source of truth for usage, so every surface shares one instance.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use switchyard_core::clock::SystemClock;
use switchyard_core::router::Router;
use switchyard_infra::config::{build_router, load_router_config, resolve_config_path};
use switchyard_observe::genai_attrs::{
    GEN_AI_OPERATION_NAME, GEN_AI_PROVIDER_NAME, GEN_AI_RESPONSE_MODEL, OP_CHAT,
    OUTCOME_CANCELLED, OUTCOME_EXHAUSTED, OUTCOME_SUCCESS, ROUTE_CLASS, ROUTE_OUTCOME,
    ROUTE_SURFACE,
};
use switchyard_types::provider::RequestClass;
use switchyard_types::routing::{RoutingOutcome, TextRequest, VisionRequest};

/// Which entry point started a route; recorded on the span.
#[derive(Debug, Clone, Copy)]
pub enum Surface {
    Cli,
    Http,
}

impl Surface {
    fn as_str(self) -> &'static str {
        match self {
            Surface::Cli => "cli",
            Surface::Http => "http",
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub router: Arc<Router>,
    pub config_path: PathBuf,
}

impl AppState {
    /// Load configuration, resolve credentials, and assemble the router.
    pub async fn init(config: Option<&Path>) -> anyhow::Result<Self> {
        let config_path = resolve_config_path(config);
        let config = load_router_config(&config_path).await;
        let router = build_router(&config, Arc::new(SystemClock))
            .with_context(|| format!("invalid router configuration in {}", config_path.display()))?;

        Ok(Self {
            router: Arc::new(router),
            config_path,
        })
    }

    pub async fn route_text(
        &self,
        request: &TextRequest,
        surface: Surface,
        cancel: &CancellationToken,
    ) -> RoutingOutcome {
        traced(
            RequestClass::Text,
            surface,
            self.router.route_text_with_cancel(request, cancel),
        )
        .await
    }

    pub async fn route_vision(
        &self,
        request: &VisionRequest,
        surface: Surface,
        cancel: &CancellationToken,
    ) -> RoutingOutcome {
        traced(
            RequestClass::Vision,
            surface,
            self.router.route_vision_with_cancel(request, cancel),
        )
        .await
    }
}

async fn traced<F>(class: RequestClass, surface: Surface, sweep: F) -> RoutingOutcome
where
    F: Future<Output = RoutingOutcome>,
{
    let span = tracing::info_span!(
        "route",
        { GEN_AI_OPERATION_NAME } = OP_CHAT,
        { ROUTE_CLASS } = %class,
        { ROUTE_SURFACE } = surface.as_str(),
        { GEN_AI_PROVIDER_NAME } = tracing::field::Empty,
        { GEN_AI_RESPONSE_MODEL } = tracing::field::Empty,
        { ROUTE_OUTCOME } = tracing::field::Empty,
    );

    let outcome = sweep.instrument(span.clone()).await;

    match &outcome {
        RoutingOutcome::Success(completion) => {
            span.record(GEN_AI_PROVIDER_NAME, completion.provider.as_str());
            if let Some(model) = completion.model.as_deref() {
                span.record(GEN_AI_RESPONSE_MODEL, model);
            }
            span.record(ROUTE_OUTCOME, OUTCOME_SUCCESS);
        }
        RoutingOutcome::Exhausted { .. } => {
            span.record(ROUTE_OUTCOME, OUTCOME_EXHAUSTED);
        }
        RoutingOutcome::Cancelled => {
            span.record(ROUTE_OUTCOME, OUTCOME_CANCELLED);
        }
    }

    outcome
}

//! Fixtures for handler and CLI tests: an `AppState` over scripted adapters.

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;

use switchyard_core::clock::SystemClock;
use switchyard_core::provider::adapter::ProviderAdapter;
use switchyard_core::provider::box_adapter::BoxProviderAdapter;
use switchyard_core::provider::registry::ProviderRegistry;
use switchyard_core::quota::QuotaTracker;
use switchyard_core::router::{Router, RoutingPolicy};
use switchyard_types::error::AdapterError;
use switchyard_types::provider::{Capability, GenerationParams, ProviderDescriptor, WireFormat};
use switchyard_types::routing::{Completion, TextRequest, VisionRequest};

use crate::state::AppState;

#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    Succeed,
    Fail,
    /// No credential, so the router never calls it.
    Unconfigured,
}

struct ScriptedAdapter {
    key: String,
    fail: bool,
}

impl ScriptedAdapter {
    fn reply(&self, prompt: &str) -> Result<Completion, AdapterError> {
        if self.fail {
            return Err(AdapterError::Status {
                status: 500,
                body: "scripted failure".into(),
            });
        }
        Ok(Completion {
            text: format!("{}: {prompt}", self.key),
            provider: self.key.clone(),
            model: None,
        })
    }
}

impl ProviderAdapter for ScriptedAdapter {
    fn key(&self) -> &str {
        &self.key
    }

    async fn complete_text(&self, request: &TextRequest) -> Result<Completion, AdapterError> {
        self.reply(&request.prompt)
    }

    async fn complete_vision(&self, request: &VisionRequest) -> Result<Completion, AdapterError> {
        self.reply(&request.prompt)
    }
}

pub fn state_with(
    providers: &[(&str, Capability, Option<u32>, Behavior)],
    text_order: &[&str],
    vision_order: &[&str],
) -> AppState {
    let descriptors = providers
        .iter()
        .map(|(key, capability, daily_limit, behavior)| ProviderDescriptor {
            key: key.to_string(),
            display_name: format!("{key} display"),
            endpoint: format!("http://127.0.0.1:9/{key}"),
            model: Some(format!("{key}-model")),
            text_model: None,
            credential: (!matches!(behavior, Behavior::Unconfigured))
                .then(|| SecretString::from(format!("{key}-secret"))),
            capability: *capability,
            priority: 1,
            daily_limit: *daily_limit,
            wire: WireFormat::ChatCompletions,
            text_params: GenerationParams::text_default(),
            vision_params: GenerationParams::vision_default(),
        })
        .collect();
    let adapters = providers
        .iter()
        .map(|(key, _, _, behavior)| {
            BoxProviderAdapter::new(ScriptedAdapter {
                key: key.to_string(),
                fail: matches!(behavior, Behavior::Fail),
            })
        })
        .collect();

    let registry = Arc::new(ProviderRegistry::new(descriptors).unwrap());
    let quota = Arc::new(QuotaTracker::new(registry.clone(), Arc::new(SystemClock)));
    let policy = RoutingPolicy {
        text_order: text_order.iter().map(|s| s.to_string()).collect(),
        vision_order: vision_order.iter().map(|s| s.to_string()).collect(),
        ..RoutingPolicy::default()
    };

    AppState {
        router: Arc::new(Router::new(registry, quota, adapters, policy)),
        config_path: PathBuf::from("switchyard.toml"),
    }
}

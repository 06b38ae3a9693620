//! Ordered fallback router.
//!
//! Routes one logical request through a fixed, class-specific candidate
//! order. Inadmissible candidates (no credential, quota used up) are skipped
//! silently; failing candidates are logged and the sweep moves on. The first
//! success wins and later candidates are never invoked.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use switchyard_types::error::{AdapterError, ConfigError};
use switchyard_types::provider::RequestClass;
use switchyard_types::routing::{
    Completion, ProviderQuotaStatus, Remaining, RoutingOutcome, TextRequest, VisionRequest,
};

use crate::provider::box_adapter::BoxProviderAdapter;
use crate::provider::registry::ProviderRegistry;
use crate::quota::QuotaTracker;

/// Candidate orders and per-attempt time bounds for both request classes.
#[derive(Debug, Clone)]
pub struct RoutingPolicy {
    pub text_order: Vec<String>,
    pub vision_order: Vec<String>,
    pub text_timeout: Duration,
    pub vision_timeout: Duration,
}

impl RoutingPolicy {
    pub fn order_for(&self, class: RequestClass) -> &[String] {
        match class {
            RequestClass::Text => &self.text_order,
            RequestClass::Vision => &self.vision_order,
        }
    }

    pub fn timeout_for(&self, class: RequestClass) -> Duration {
        match class {
            RequestClass::Text => self.text_timeout,
            RequestClass::Vision => self.vision_timeout,
        }
    }

    /// Check that every candidate exists and can serve its class.
    pub fn validate(&self, registry: &ProviderRegistry) -> Result<(), ConfigError> {
        for class in [RequestClass::Text, RequestClass::Vision] {
            for key in self.order_for(class) {
                let descriptor = registry.get(key).ok_or_else(|| ConfigError::UnknownCandidate {
                    class,
                    key: key.clone(),
                })?;
                if !descriptor.capability.supports(class) {
                    return Err(ConfigError::CapabilityMismatch {
                        class,
                        key: key.clone(),
                        capability: descriptor.capability,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        Self {
            text_order: ["opencode_zen", "mistral", "groq", "huggingface"]
                .into_iter()
                .map(String::from)
                .collect(),
            vision_order: ["gemini", "groq"].into_iter().map(String::from).collect(),
            text_timeout: Duration::from_secs(60),
            vision_timeout: Duration::from_secs(90),
        }
    }
}

/// The request being routed, borrowed for the duration of one sweep.
#[derive(Clone, Copy)]
enum Payload<'r> {
    Text(&'r TextRequest),
    Vision(&'r VisionRequest),
}

impl Payload<'_> {
    fn class(&self) -> RequestClass {
        match self {
            Payload::Text(_) => RequestClass::Text,
            Payload::Vision(_) => RequestClass::Vision,
        }
    }

    async fn send(self, adapter: &BoxProviderAdapter) -> Result<Completion, AdapterError> {
        match self {
            Payload::Text(request) => adapter.complete_text(request).await,
            Payload::Vision(request) => adapter.complete_vision(request).await,
        }
    }
}

/// Routes text and vision requests across providers with automatic fallback.
///
/// Holds no persistent state of its own: descriptors are read from the
/// registry, and usage is recorded through the shared quota tracker.
pub struct Router {
    registry: Arc<ProviderRegistry>,
    quota: Arc<QuotaTracker>,
    adapters: HashMap<String, BoxProviderAdapter>,
    policy: RoutingPolicy,
}

impl Router {
    /// Assemble a router. Call [`RoutingPolicy::validate`] first when the
    /// policy comes from user configuration.
    pub fn new(
        registry: Arc<ProviderRegistry>,
        quota: Arc<QuotaTracker>,
        adapters: Vec<BoxProviderAdapter>,
        policy: RoutingPolicy,
    ) -> Self {
        let adapters = adapters
            .into_iter()
            .map(|adapter| (adapter.key().to_string(), adapter))
            .collect();

        Self {
            registry,
            quota,
            adapters,
            policy,
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn quota(&self) -> &QuotaTracker {
        &self.quota
    }

    pub fn policy(&self) -> &RoutingPolicy {
        &self.policy
    }

    /// Route a text completion.
    pub async fn route_text(&self, request: &TextRequest) -> RoutingOutcome {
        self.sweep(Payload::Text(request), &CancellationToken::new())
            .await
    }

    /// Route a text completion, stopping immediately if `cancel` fires.
    pub async fn route_text_with_cancel(
        &self,
        request: &TextRequest,
        cancel: &CancellationToken,
    ) -> RoutingOutcome {
        self.sweep(Payload::Text(request), cancel).await
    }

    /// Route an image + text completion.
    pub async fn route_vision(&self, request: &VisionRequest) -> RoutingOutcome {
        self.sweep(Payload::Vision(request), &CancellationToken::new())
            .await
    }

    /// Route an image + text completion, stopping immediately if `cancel` fires.
    pub async fn route_vision_with_cancel(
        &self,
        request: &VisionRequest,
        cancel: &CancellationToken,
    ) -> RoutingOutcome {
        self.sweep(Payload::Vision(request), cancel).await
    }

    /// Quota and availability for every registered provider.
    pub fn quota_status(&self) -> BTreeMap<String, ProviderQuotaStatus> {
        self.quota.check_and_maybe_reset_all();

        self.registry
            .iter()
            .map(|descriptor| {
                let requests_today = self
                    .quota
                    .snapshot(&descriptor.key)
                    .map(|s| s.requests_today)
                    .unwrap_or(0);
                let remaining = match descriptor.daily_limit {
                    Some(limit) => Remaining::Count(limit.saturating_sub(requests_today)),
                    None => Remaining::Unlimited,
                };

                let status = ProviderQuotaStatus {
                    name: descriptor.display_name.clone(),
                    configured: descriptor.is_configured(),
                    capability: descriptor.capability,
                    priority: descriptor.priority,
                    requests_today,
                    rate_limit: descriptor.daily_limit,
                    remaining,
                    available: self.quota.is_admissible(&descriptor.key),
                };
                (descriptor.key.clone(), status)
            })
            .collect()
    }

    /// First admissible candidate for the class, without invoking it.
    pub fn recommended_provider(&self, class: RequestClass) -> Option<String> {
        self.quota.check_and_maybe_reset_all();

        self.policy
            .order_for(class)
            .iter()
            .find(|key| {
                self.registry
                    .get(key)
                    .is_some_and(|d| d.capability.supports(class))
                    && self.quota.is_admissible(key)
            })
            .cloned()
    }

    #[tracing::instrument(skip_all, fields(class = %payload.class()))]
    async fn sweep(&self, payload: Payload<'_>, cancel: &CancellationToken) -> RoutingOutcome {
        let class = payload.class();
        let timeout = self.policy.timeout_for(class);
        self.quota.check_and_maybe_reset_all();

        for key in self.policy.order_for(class) {
            if cancel.is_cancelled() {
                tracing::info!("Routing cancelled before next candidate");
                return RoutingOutcome::Cancelled;
            }

            let Some(descriptor) = self.registry.get(key) else {
                tracing::debug!(provider = %key, "Unknown provider, skipping");
                continue;
            };
            if !descriptor.capability.supports(class) {
                tracing::debug!(
                    provider = %key,
                    capability = %descriptor.capability,
                    "Provider cannot serve this class, skipping"
                );
                continue;
            }
            let Some(reservation) = self.quota.try_reserve(key) else {
                tracing::debug!(provider = %key, "Provider not admissible, skipping");
                continue;
            };
            let Some(adapter) = self.adapters.get(key) else {
                tracing::warn!(provider = %key, "No adapter registered, skipping");
                continue;
            };

            let attempt = tokio::time::timeout(timeout, payload.send(adapter));
            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!(provider = %key, "Routing cancelled during attempt");
                    return RoutingOutcome::Cancelled;
                }
                res = attempt => res.unwrap_or(Err(AdapterError::Timeout(timeout))),
            };

            match result {
                Ok(completion) => {
                    reservation.commit();
                    let completion = Completion {
                        provider: key.clone(),
                        model: completion
                            .model
                            .or_else(|| descriptor.model_for(class).map(String::from)),
                        text: completion.text,
                    };
                    tracing::info!(
                        provider = %key,
                        model = completion.model.as_deref().unwrap_or("-"),
                        "Request routed"
                    );
                    return RoutingOutcome::Success(completion);
                }
                Err(err) => {
                    tracing::warn!(
                        provider = %key,
                        error = %err,
                        "Provider failed, trying next candidate"
                    );
                }
            }
        }

        RoutingOutcome::Exhausted {
            reason: format!("All {class} providers failed or exhausted"),
        }
    }
}

//! Router configuration loading and assembly.
//!
//! Reads `switchyard.toml` (from an explicit path, `SWITCHYARD_CONFIG`, or
//! the data directory), resolves credentials from the environment, and
//! assembles a ready-to-use [`Router`]. Falls back to the built-in provider
//! set when the file is missing or malformed.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use switchyard_core::clock::Clock;
use switchyard_core::provider::registry::ProviderRegistry;
use switchyard_core::quota::QuotaTracker;
use switchyard_core::router::{Router, RoutingPolicy};
use switchyard_types::config::{ProviderConfig, RouterConfig};
use switchyard_types::error::ConfigError;
use switchyard_types::provider::ProviderDescriptor;

use crate::adapter::create_adapter;
use crate::adapter::http::build_http_client;

/// File name looked up inside the data directory.
pub const CONFIG_FILE_NAME: &str = "switchyard.toml";

/// Resolve the data directory.
///
/// Priority:
/// 1. `SWITCHYARD_DATA_DIR` environment variable
/// 2. `~/.switchyard`
/// 3. `./.switchyard`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SWITCHYARD_DATA_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".switchyard");
    }
    PathBuf::from(".switchyard")
}

/// Path of the config file: the explicit one if given, else the data dir's.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => resolve_data_dir().join(CONFIG_FILE_NAME),
    }
}

/// Load router configuration from `path`.
///
/// - If the file does not exist, returns [`RouterConfig::default()`].
/// - If the file exists but cannot be read or parsed, logs a warning and
///   returns the default.
pub async fn load_router_config(path: &Path) -> RouterConfig {
    match try_load_router_config(path).await {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            RouterConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err} ({}), using defaults", path.display());
            RouterConfig::default()
        }
    }
}

/// Strict variant of [`load_router_config`]: `Ok(None)` when the file is
/// absent, an error when it is unreadable or invalid.
pub async fn try_load_router_config(path: &Path) -> Result<Option<RouterConfig>, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(ConfigError::Io(err.to_string())),
    };

    toml::from_str::<RouterConfig>(&content)
        .map(Some)
        .map_err(|e| ConfigError::Parse(e.to_string()))
}

/// Turn provider configs into descriptors, reading each credential through
/// `lookup` (normally `std::env::var`). Empty values count as unset.
pub fn build_descriptors<F>(providers: &[ProviderConfig], lookup: F) -> Vec<ProviderDescriptor>
where
    F: Fn(&str) -> Option<String>,
{
    providers
        .iter()
        .map(|p| {
            let credential = p
                .api_key_env
                .as_deref()
                .and_then(&lookup)
                .filter(|value| !value.trim().is_empty())
                .map(SecretString::from);

            ProviderDescriptor {
                key: p.key.clone(),
                display_name: p.display_name.clone(),
                endpoint: p.endpoint.clone(),
                model: p.model.clone(),
                text_model: p.text_model.clone(),
                credential,
                capability: p.capability,
                priority: p.priority,
                daily_limit: p.daily_limit,
                wire: p.wire,
                text_params: p.text_params,
                vision_params: p.vision_params,
            }
        })
        .collect()
}

/// Candidate orders and timeouts from the config file.
pub fn routing_policy(config: &RouterConfig) -> RoutingPolicy {
    RoutingPolicy {
        text_order: config.text_order.clone(),
        vision_order: config.vision_order.clone(),
        text_timeout: Duration::from_secs(config.text_timeout_secs),
        vision_timeout: Duration::from_secs(config.vision_timeout_secs),
    }
}

/// Assemble a router from configuration, reading credentials from the
/// process environment.
pub fn build_router(config: &RouterConfig, clock: Arc<dyn Clock>) -> Result<Router, ConfigError> {
    build_router_with(config, clock, |name| std::env::var(name).ok())
}

/// [`build_router`] with an explicit credential lookup.
pub fn build_router_with<F>(
    config: &RouterConfig,
    clock: Arc<dyn Clock>,
    lookup: F,
) -> Result<Router, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let descriptors = build_descriptors(&config.providers, lookup);
    let registry = Arc::new(ProviderRegistry::new(descriptors)?);

    let policy = routing_policy(config);
    policy.validate(&registry)?;

    let client = build_http_client()?;
    let adapters = registry
        .iter()
        .map(|descriptor| create_adapter(client.clone(), descriptor.clone()))
        .collect();

    let configured: Vec<&str> = registry
        .iter()
        .filter(|d| d.is_configured())
        .map(|d| d.key.as_str())
        .collect();
    tracing::info!(
        providers = registry.len(),
        configured = ?configured,
        "Router assembled"
    );

    let quota = Arc::new(QuotaTracker::new(registry.clone(), clock));
    Ok(Router::new(registry, quota, adapters, policy))
}

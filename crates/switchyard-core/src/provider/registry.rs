//! Provider registry for runtime provider lookup.
//!
//! A name-indexed, read-only set of [`ProviderDescriptor`]s. Built once at
//! startup and shared behind an `Arc` for the process lifetime.

use std::collections::HashMap;

use switchyard_types::error::ConfigError;
use switchyard_types::provider::ProviderDescriptor;

/// Registry of provider descriptors, indexed by key.
///
/// Registration order is preserved for listing. Providers without a
/// credential are registered like any other; they are simply never admitted.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, ProviderDescriptor>,
    order: Vec<String>,
}

impl ProviderRegistry {
    /// Build a registry from descriptors. Keys must be unique.
    pub fn new(descriptors: Vec<ProviderDescriptor>) -> Result<Self, ConfigError> {
        let mut registry = Self::default();
        for descriptor in descriptors {
            if registry.providers.contains_key(&descriptor.key) {
                return Err(ConfigError::DuplicateProvider(descriptor.key));
            }
            registry.order.push(descriptor.key.clone());
            registry.providers.insert(descriptor.key.clone(), descriptor);
        }
        Ok(registry)
    }

    /// Look up a provider by key.
    pub fn get(&self, key: &str) -> Option<&ProviderDescriptor> {
        self.providers.get(key)
    }

    /// All registered keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// All descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.order.iter().filter_map(|key| self.providers.get(key))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::descriptor;
    use switchyard_types::provider::Capability;

    #[test]
    fn test_get_and_order() {
        let registry = ProviderRegistry::new(vec![
            descriptor("b", Capability::Text, None, true),
            descriptor("a", Capability::Vision, Some(10), false),
        ])
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(registry.get("a").unwrap().daily_limit, Some(10));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_unconfigured_provider_is_still_registered() {
        let registry =
            ProviderRegistry::new(vec![descriptor("a", Capability::Text, None, false)]).unwrap();
        let a = registry.get("a").unwrap();
        assert!(!a.is_configured());
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let result = ProviderRegistry::new(vec![
            descriptor("a", Capability::Text, None, true),
            descriptor("a", Capability::Both, None, true),
        ]);
        assert!(matches!(result, Err(ConfigError::DuplicateProvider(k)) if k == "a"));
    }
}

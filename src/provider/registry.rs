//! Resource type lookup

use super::error::{ResourceError, Result};
use super::healthcheck::{CommandKind, DnsKind, HealthcheckResource, HttpKind, TcpKind, TlsKind};
use super::resource::Resource;
use std::collections::BTreeMap;

/// Resource adapters keyed by Terraform type name
#[derive(Default)]
pub struct ResourceRegistry {
    resources: BTreeMap<&'static str, Box<dyn Resource>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the five healthcheck resources
    pub fn healthchecks() -> Self {
        let mut registry = Self::new();
        registry.register(HealthcheckResource::<DnsKind>::new());
        registry.register(HealthcheckResource::<TcpKind>::new());
        registry.register(HealthcheckResource::<TlsKind>::new());
        registry.register(HealthcheckResource::<HttpKind>::new());
        registry.register(HealthcheckResource::<CommandKind>::new());
        registry
    }

    pub fn register<R>(&mut self, resource: R)
    where
        R: Resource + 'static,
    {
        self.resources.insert(resource.type_name(), Box::new(resource));
    }

    pub fn get(&self, type_name: &str) -> Result<&dyn Resource> {
        self.resources
            .get(type_name)
            .map(|resource| &**resource)
            .ok_or_else(|| ResourceError::UnknownResource(type_name.to_string()))
    }

    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Resource> {
        self.resources.values().map(|resource| &**resource)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl std::fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.resources.keys()).finish()
    }
}

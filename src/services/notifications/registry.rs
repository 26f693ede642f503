//! Name-keyed provider registry.
//!
//! Built explicitly at startup and handed to the [`Dispatcher`](super::Dispatcher),
//! which only reads from it.

use super::mxc_provider::MxcProvider;
use super::provider::SenderProvider;
use super::sendcloud_provider::SendCloudProvider;
use super::sns_provider::SnsProvider;
use super::submail_provider::SubmailProvider;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn SenderProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in provider
    pub fn with_defaults() -> Self {
        Self::new()
            .with(SnsProvider::new())
            .with(SendCloudProvider::new())
            .with(SubmailProvider::new())
            .with(MxcProvider::new())
    }

    /// Registers a provider under its declared name
    ///
    /// The last registration for a name wins; the replaced provider is returned.
    pub fn register<P>(&mut self, provider: P) -> Option<Arc<dyn SenderProvider>>
    where
        P: SenderProvider + 'static,
    {
        self.register_arc(Arc::new(provider))
    }

    /// Registers an already shared provider instance
    pub fn register_arc(
        &mut self,
        provider: Arc<dyn SenderProvider>,
    ) -> Option<Arc<dyn SenderProvider>> {
        let name = provider.name();
        debug!(provider = name, "Registering sender provider");
        self.providers.insert(name.to_string(), provider)
    }

    /// Builder-style [`register`](Self::register)
    pub fn with<P>(mut self, provider: P) -> Self
    where
        P: SenderProvider + 'static,
    {
        self.register(provider);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn SenderProvider>> {
        self.providers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Registered provider names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}

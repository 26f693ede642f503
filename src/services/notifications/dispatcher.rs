//! Dispatcher routing messages to registered providers.
//!
//! Per call: resolve the provider's connection parameters through the
//! installed resolver, look the provider up by name, and delegate. Failures
//! raised here and inside providers already carry their provenance and are
//! returned unchanged.

use super::provider::SenderProvider;
use super::registry::ProviderRegistry;
use super::resolver::{EmailConfigResolver, SmsConfigResolver};
use crate::error::{ErrorKind, SenderError, SenderResult};
use crate::models::{Channel, DeliveryReceipt, EmailMessage, ServiceConfig, SmsMessage};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Routes email and SMS sends to providers by name
///
/// Cheap to clone; the registry is shared and never mutated after
/// construction, so clones can dispatch concurrently.
///
/// # Example
/// ```ignore
/// let dispatcher = Dispatcher::new(ProviderRegistry::with_defaults())
///     .with_email_resolver(|provider: &str| settings.email_config(provider))
///     .with_sms_resolver(|provider: &str, phone: &str| settings.sms_config(provider, phone));
///
/// let receipt = dispatcher.send_email(&message).await?;
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ProviderRegistry>,
    email_resolver: Option<Arc<dyn EmailConfigResolver>>,
    sms_resolver: Option<Arc<dyn SmsConfigResolver>>,
}

impl Dispatcher {
    /// Creates a dispatcher with no resolvers installed
    pub fn new(registry: ProviderRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            email_resolver: None,
            sms_resolver: None,
        }
    }

    pub fn with_email_resolver<R>(mut self, resolver: R) -> Self
    where
        R: EmailConfigResolver + 'static,
    {
        self.email_resolver = Some(Arc::new(resolver));
        self
    }

    pub fn with_sms_resolver<R>(mut self, resolver: R) -> Self
    where
        R: SmsConfigResolver + 'static,
    {
        self.sms_resolver = Some(Arc::new(resolver));
        self
    }

    /// Installs one resolver for both channels
    pub fn with_resolver<R>(mut self, resolver: R) -> Self
    where
        R: EmailConfigResolver + SmsConfigResolver + 'static,
    {
        let resolver = Arc::new(resolver);
        self.email_resolver = Some(resolver.clone());
        self.sms_resolver = Some(resolver);
        self
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Sends an email through the provider named in `message.provider`
    ///
    /// # Errors
    /// - Configuration: no email resolver, or no config for the provider
    /// - Routing: the provider is not registered
    /// - anything the provider reports
    pub async fn send_email(&self, message: &EmailMessage) -> SenderResult<DeliveryReceipt> {
        const OP: &str = "dispatcher.send_email";

        let resolver = self.email_resolver.as_ref().ok_or_else(|| {
            SenderError::configuration(OP, "email config resolver is not set")
        })?;
        let config = resolver
            .resolve_email(&message.provider)
            .ok_or_else(|| missing_config(OP, &message.provider))?;
        let provider = self.provider(OP, &message.provider)?;

        let start = Instant::now();
        let result = provider.send_email(message, &config).await;
        self.finish(Channel::Email, &message.provider, start, result)
    }

    /// Sends an SMS through the provider named in `message.provider`
    ///
    /// The SMS resolver also receives the destination phone number.
    ///
    /// # Errors
    /// Same classification as [`send_email`](Self::send_email).
    pub async fn send_sms(&self, message: &SmsMessage) -> SenderResult<DeliveryReceipt> {
        const OP: &str = "dispatcher.send_sms";

        let resolver = self.sms_resolver.as_ref().ok_or_else(|| {
            SenderError::configuration(OP, "sms config resolver is not set")
        })?;
        let config: ServiceConfig = resolver
            .resolve_sms(&message.provider, &message.phone_number)
            .ok_or_else(|| missing_config(OP, &message.provider))?;
        let provider = self.provider(OP, &message.provider)?;

        let start = Instant::now();
        let result = provider.send_sms(message, &config).await;
        self.finish(Channel::Sms, &message.provider, start, result)
    }

    #[track_caller]
    fn provider(&self, operation: &'static str, name: &str) -> SenderResult<Arc<dyn SenderProvider>> {
        match self.registry.get(name) {
            Some(provider) => Ok(provider),
            None => Err(SenderError::new(
                operation,
                ErrorKind::Routing {
                    provider: name.to_string(),
                },
            )),
        }
    }

    fn finish(
        &self,
        channel: Channel,
        provider: &str,
        start: Instant,
        result: SenderResult<()>,
    ) -> SenderResult<DeliveryReceipt> {
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(()) => {
                info!(
                    provider = provider,
                    channel = %channel,
                    duration_ms = duration_ms,
                    "Message dispatched"
                );
                Ok(DeliveryReceipt {
                    provider: provider.to_string(),
                    channel,
                    duration_ms,
                })
            }
            Err(e) => {
                warn!(
                    provider = provider,
                    channel = %channel,
                    duration_ms = duration_ms,
                    error = %e,
                    "Message dispatch failed"
                );
                Err(e)
            }
        }
    }
}

#[track_caller]
fn missing_config(operation: &'static str, provider: &str) -> SenderError {
    SenderError::configuration(operation, format!("service[{}] config is not found", provider))
}

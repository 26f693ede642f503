//! Core sender provider trait and shared request checks.
//!
//! Every provider runs one pass of the same pipeline per call:
//! validate inputs, build the request, sign it if the vendor requires it,
//! transmit, parse the response and classify the outcome. There is no retry
//! state; callers own any retry policy.

use crate::error::{SenderError, SenderResult};
use crate::models::{EmailMessage, ServiceConfig, SmsMessage};
use async_trait::async_trait;

/// Trait for delivery providers (cloud pub/sub, vendor HTTP APIs)
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// Providers hold no per-call state, so one instance serves concurrent sends.
///
/// # Example Implementation
/// ```ignore
/// use async_trait::async_trait;
///
/// pub struct EchoProvider;
///
/// #[async_trait]
/// impl SenderProvider for EchoProvider {
///     fn name(&self) -> &'static str {
///         "echo"
///     }
///
///     async fn send_email(&self, email: &EmailMessage, config: &ServiceConfig) -> SenderResult<()> {
///         Ok(())
///     }
///
///     async fn send_sms(&self, sms: &SmsMessage, config: &ServiceConfig) -> SenderResult<()> {
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait SenderProvider: Send + Sync {
    /// Name the provider is registered and addressed under
    fn name(&self) -> &'static str;

    /// Delivers an email using the resolved connection parameters
    async fn send_email(&self, email: &EmailMessage, config: &ServiceConfig) -> SenderResult<()>;

    /// Delivers an SMS using the resolved connection parameters
    async fn send_sms(&self, sms: &SmsMessage, config: &ServiceConfig) -> SenderResult<()>;
}

/// Fails with a validation error when `value` is empty
#[track_caller]
pub(crate) fn require(operation: &'static str, field: &str, value: &str) -> SenderResult<()> {
    if value.is_empty() {
        return Err(SenderError::validation(
            operation,
            field,
            format!("{} cannot be empty", field),
        ));
    }
    Ok(())
}

/// Like [`require`] for optional message fields; returns the present value
#[track_caller]
pub(crate) fn require_some<'a>(
    operation: &'static str,
    field: &str,
    value: Option<&'a str>,
) -> SenderResult<&'a str> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(SenderError::validation(
            operation,
            field,
            format!("{} cannot be empty", field),
        )),
    }
}

/// Decodes a vendor response body as JSON
#[track_caller]
pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(
    operation: &'static str,
    provider: &'static str,
    body: &str,
) -> SenderResult<T> {
    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(e) => Err(SenderError::protocol(operation, provider, body, e)),
    }
}

use std::fmt;
use std::panic::Location;

use thiserror::Error;

/// Classification of every failure a send can produce.
///
/// Validation failures are raised before any request is built. Transport,
/// protocol and delivery failures come from the provider round-trip.
#[derive(Error, Debug)]
pub enum ErrorKind {
    /// Malformed address or phone number, or a required field is missing
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// No resolver installed, or the resolver has no config for the provider
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// No provider registered under the requested name
    #[error("Provider not registered: {provider}")]
    Routing { provider: String },

    /// The provider does not implement the requested message type
    #[error("Unsupported operation: {provider} does not support {operation}")]
    Unsupported {
        provider: &'static str,
        operation: &'static str,
    },

    /// Network or connection failure talking to the provider
    #[error("Transport error calling {provider}")]
    Transport {
        provider: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// The provider answered with a body that could not be decoded
    #[error("Protocol error: {provider} returned an undecodable response: {body}")]
    Protocol {
        provider: &'static str,
        body: String,
        #[source]
        source: anyhow::Error,
    },

    /// The provider accepted the request but reported a failure
    #[error("Delivery rejected by {provider}: {detail}")]
    DeliveryRejected {
        provider: &'static str,
        detail: String,
    },
}

/// A classified failure annotated with the operation that detected it.
///
/// Created once, where the failure is first observed, and propagated
/// unchanged with `?` afterwards. The source location is captured through
/// `#[track_caller]`, so constructors must be called directly at the
/// detection site.
#[derive(Debug)]
pub struct SenderError {
    operation: &'static str,
    location: &'static Location<'static>,
    kind: ErrorKind,
}

impl SenderError {
    #[track_caller]
    pub fn new(operation: &'static str, kind: ErrorKind) -> Self {
        Self {
            operation,
            location: Location::caller(),
            kind,
        }
    }

    #[track_caller]
    pub fn validation(
        operation: &'static str,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(
            operation,
            ErrorKind::Validation {
                field: field.into(),
                reason: reason.into(),
            },
        )
    }

    #[track_caller]
    pub fn configuration(operation: &'static str, message: impl Into<String>) -> Self {
        Self::new(
            operation,
            ErrorKind::Configuration {
                message: message.into(),
            },
        )
    }

    #[track_caller]
    pub fn transport(
        operation: &'static str,
        provider: &'static str,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::new(
            operation,
            ErrorKind::Transport {
                provider,
                source: source.into(),
            },
        )
    }

    #[track_caller]
    pub fn protocol(
        operation: &'static str,
        provider: &'static str,
        body: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::new(
            operation,
            ErrorKind::Protocol {
                provider,
                body: body.into(),
                source: source.into(),
            },
        )
    }

    #[track_caller]
    pub fn rejected(
        operation: &'static str,
        provider: &'static str,
        detail: impl Into<String>,
    ) -> Self {
        Self::new(
            operation,
            ErrorKind::DeliveryRejected {
                provider,
                detail: detail.into(),
            },
        )
    }

    /// Name of the operation that detected the failure, e.g. `mxc.send_email`
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Source location where the failure was detected
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation { .. })
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self.kind, ErrorKind::Configuration { .. })
    }

    pub fn is_routing(&self) -> bool {
        matches!(self.kind, ErrorKind::Routing { .. })
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self.kind, ErrorKind::Unsupported { .. })
    }
}

impl fmt::Display for SenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.operation,
            self.location.file(),
            self.location.line(),
            self.kind
        )
    }
}

impl std::error::Error for SenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}

/// Type alias for Result with SenderError to simplify function signatures
pub type SenderResult<T> = Result<T, SenderError>;

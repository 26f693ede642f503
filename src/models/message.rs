//! Message and connection models for the dispatch layer.
//!
//! Values here are built per call and dropped when the call returns. Nothing
//! is cached or persisted.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Service Configuration
// ============================================================================

/// Per-provider connection parameters for a single send attempt
///
/// Field meaning depends on the provider:
/// - `api_user`: SendCloud API user, Submail app id, AWS access key id
/// - `api_secret`: SendCloud API key, Submail signature, AWS secret access key
/// - `region`: AWS only
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub api_user: String,
    #[serde(default)]
    pub api_secret: String,
    #[serde(default)]
    pub api_url: String,
}

impl ServiceConfig {
    pub fn new(api_user: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_user: api_user.into(),
            api_secret: api_secret.into(),
            ..Default::default()
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("region", &self.region)
            .field("api_user", &self.api_user)
            .field("api_secret", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Email to deliver through a named provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Registered provider name, e.g. "sendcloud"
    pub provider: String,
    /// Recipient identifier, only used by the mxc provider
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub from_name: String,
    #[serde(default)]
    pub to: String,
    pub subject: String,
    pub html_body: String,
    #[serde(default)]
    pub text_body: Option<String>,
    /// File parts keyed by filename
    #[serde(default, skip_serializing)]
    pub attachments: BTreeMap<String, Vec<u8>>,
}

impl EmailMessage {
    pub fn new(
        provider: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            subject: subject.into(),
            html_body: html_body.into(),
            ..Default::default()
        }
    }

    pub fn from_address(mut self, from: impl Into<String>, from_name: impl Into<String>) -> Self {
        self.from = from.into();
        self.from_name = from_name.into();
        self
    }

    pub fn to_address(mut self, to: impl Into<String>) -> Self {
        self.to = to.into();
        self
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn with_text_body(mut self, text_body: impl Into<String>) -> Self {
        self.text_body = Some(text_body.into());
        self
    }

    pub fn with_attachment(mut self, filename: impl Into<String>, content: Vec<u8>) -> Self {
        self.attachments.insert(filename.into(), content);
        self
    }
}

/// SMS to deliver through a named provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SmsMessage {
    /// Registered provider name, e.g. "aws"
    pub provider: String,
    /// Recipient identifier, only used by the mxc provider
    #[serde(default)]
    pub uid: Option<String>,
    /// Destination in `"+<area> <subscriber>"` form
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub template_id: Option<String>,
    /// Template variables, serialized to JSON text by template-based providers
    #[serde(default)]
    pub values: Option<JsonValue>,
    #[serde(default)]
    pub body: Option<String>,
}

impl SmsMessage {
    pub fn new(provider: impl Into<String>, phone_number: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            phone_number: phone_number.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_template(mut self, template_id: impl Into<String>, values: JsonValue) -> Self {
        self.template_id = Some(template_id.into());
        self.values = Some(values);
        self
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// Message channel a dispatch went through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Successful dispatch outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// Provider that accepted the message
    pub provider: String,
    pub channel: Channel,
    /// Time taken for the provider round-trip in milliseconds
    pub duration_ms: u64,
}

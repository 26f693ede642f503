//! Submail provider implementation.
//!
//! Submail trusts a pre-shared secret: the `signature` field is the raw API
//! secret, not a computed digest. Email goes out as multipart (attachments
//! allowed), SMS as a URL-encoded form.
//!
//! Success is reported as `{"status": "success", ...}`.

use super::provider::{SenderProvider, parse_json, require, require_some};
use crate::error::{SenderError, SenderResult};
use crate::external::form::{FormFields, post_multipart, post_urlencoded};
use crate::models::{EmailMessage, ServiceConfig, SmsMessage};
use crate::utils::{EmailAddress, PhoneNumber};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::debug;

const NAME: &str = "submail";

/// Submail provider (email and plain-text SMS)
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmailProvider;

impl SubmailProvider {
    pub fn new() -> Self {
        Self
    }

    fn email_fields(
        email: &EmailMessage,
        config: &ServiceConfig,
        from: &EmailAddress,
        to: &EmailAddress,
    ) -> FormFields {
        let mut fields = vec![
            ("appid", config.api_user.clone()),
            ("to", to.to_string()),
            ("from", from.to_string()),
            ("subject", email.subject.clone()),
            ("html", email.html_body.clone()),
            ("signature", config.api_secret.clone()),
        ];
        if let Some(text) = email.text_body.as_deref().filter(|text| !text.is_empty()) {
            fields.push(("text", text.to_string()));
        }
        fields
    }

    fn sms_fields(config: &ServiceConfig, phone: &PhoneNumber, content: &str) -> FormFields {
        vec![
            ("appid", config.api_user.clone()),
            ("to", phone.to_string()),
            ("signature", config.api_secret.clone()),
            ("content", content.to_string()),
        ]
    }

    /// Requires `status == "success"`; otherwise the raw body is the rejection detail
    #[track_caller]
    fn check_status(operation: &'static str, body: String) -> SenderResult<()> {
        let response: JsonValue = parse_json(operation, NAME, &body)?;
        if response.get("status").and_then(JsonValue::as_str) != Some("success") {
            return Err(SenderError::rejected(operation, NAME, body));
        }
        Ok(())
    }
}

#[async_trait]
impl SenderProvider for SubmailProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn send_email(&self, email: &EmailMessage, config: &ServiceConfig) -> SenderResult<()> {
        const OP: &str = "submail.send_email";

        require(OP, "api_user", &config.api_user)?;
        require(OP, "api_secret", &config.api_secret)?;
        require(OP, "api_url", &config.api_url)?;
        require(OP, "subject", &email.subject)?;
        require(OP, "html_body", &email.html_body)?;
        let from = EmailAddress::parse(&email.from)?;
        let to = EmailAddress::parse(&email.to)?;

        debug!(
            provider = NAME,
            to = %to,
            attachments = email.attachments.len(),
            "Sending email via Submail"
        );

        let fields = Self::email_fields(email, config, &from, &to);
        let body = post_multipart(&config.api_url, &fields, &email.attachments)
            .await
            .map_err(|e| SenderError::transport(OP, NAME, e))?;

        Self::check_status(OP, body)
    }

    async fn send_sms(&self, sms: &SmsMessage, config: &ServiceConfig) -> SenderResult<()> {
        const OP: &str = "submail.send_sms";

        let phone = PhoneNumber::parse(&sms.phone_number)?;
        require(OP, "api_url", &config.api_url)?;
        let content = require_some(OP, "body", sms.body.as_deref())?;

        debug!(provider = NAME, area = phone.area(), "Sending SMS via Submail");

        let fields = Self::sms_fields(config, &phone, content);
        let body = post_urlencoded(&config.api_url, &fields)
            .await
            .map_err(|e| SenderError::transport(OP, NAME, e))?;

        Self::check_status(OP, body)
    }
}

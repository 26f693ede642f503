//! SendCloud provider implementation.
//!
//! Email and SMS both go out as `multipart/form-data`. SMS requests carry an
//! MD5 signature over a canonical parameter string wrapped in the API secret;
//! the shape of that string depends on whether the destination is domestic.
//!
//! Success is reported as `{"result": true, ...}`; anything else is a
//! rejection and the raw body is kept for diagnostics.

use super::provider::{SenderProvider, parse_json, require, require_some};
use crate::error::{SenderError, SenderResult};
use crate::external::form::{FormFields, post_multipart};
use crate::models::{EmailMessage, ServiceConfig, SmsMessage};
use crate::utils::{EmailAddress, PhoneNumber, md5_hex};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use tracing::debug;

const NAME: &str = "sendcloud";

/// Area code the vendor treats as domestic
const DOMESTIC_AREA: &str = "+86";

/// `msgType` marking an international SMS
const INTERNATIONAL_MSG_TYPE: &str = "2";

/// SendCloud provider (email and template SMS)
#[derive(Debug, Clone, Copy, Default)]
pub struct SendCloudProvider;

impl SendCloudProvider {
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
            ("apiUser", config.api_user.clone()),
            ("apiKey", config.api_secret.clone()),
            ("from", from.to_string()),
            ("fromName", email.from_name.clone()),
            ("to", to.to_string()),
            ("subject", email.subject.clone()),
            ("html", email.html_body.clone()),
        ];
        if let Some(plain) = email.text_body.as_deref().filter(|text| !text.is_empty()) {
            fields.push(("plain", plain.to_string()));
        }
        fields
    }

    /// Canonical string the SMS signature is computed over
    ///
    /// Domestic numbers sign the bare subscriber number; everything else adds
    /// `msgType=2` and signs the full `"+area subscriber"` form.
    pub fn sms_signature_payload(
        config: &ServiceConfig,
        template_id: &str,
        vars: &str,
        phone: &PhoneNumber,
    ) -> String {
        let secret = &config.api_secret;
        if phone.area() == DOMESTIC_AREA {
            format!(
                "{secret}&phone={}&smsUser={}&templateId={template_id}&vars={vars}&{secret}",
                phone.subscriber(),
                config.api_user,
            )
        } else {
            format!(
                "{secret}&msgType={INTERNATIONAL_MSG_TYPE}&phone={}&smsUser={}&templateId={template_id}&vars={vars}&{secret}",
                phone, config.api_user,
            )
        }
    }

    fn sms_fields(
        config: &ServiceConfig,
        template_id: &str,
        vars: &str,
        phone: &PhoneNumber,
    ) -> FormFields {
        let mut fields = vec![
            ("smsUser", config.api_user.clone()),
            ("templateId", template_id.to_string()),
            ("vars", vars.to_string()),
        ];
        if phone.area() == DOMESTIC_AREA {
            fields.push(("phone", phone.subscriber().to_string()));
        } else {
            fields.push(("msgType", INTERNATIONAL_MSG_TYPE.to_string()));
            fields.push(("phone", phone.to_string()));
        }

        let payload = Self::sms_signature_payload(config, template_id, vars, phone);
        fields.push(("signature", md5_hex(&payload)));
        fields
    }

    /// Posts the multipart form and requires `result == true` in the response
    async fn post(
        operation: &'static str,
        url: &str,
        fields: &FormFields,
        attachments: &BTreeMap<String, Vec<u8>>,
    ) -> SenderResult<()> {
        let body = post_multipart(url, fields, attachments)
            .await
            .map_err(|e| SenderError::transport(operation, NAME, e))?;

        let response: JsonValue = parse_json(operation, NAME, &body)?;
        if response.get("result") != Some(&JsonValue::Bool(true)) {
            return Err(SenderError::rejected(operation, NAME, body));
        }

        Ok(())
    }
}

#[async_trait]
impl SenderProvider for SendCloudProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn send_email(&self, email: &EmailMessage, config: &ServiceConfig) -> SenderResult<()> {
        const OP: &str = "sendcloud.send_email";

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
            "Sending email via SendCloud"
        );

        let fields = Self::email_fields(email, config, &from, &to);
        Self::post(OP, &config.api_url, &fields, &email.attachments).await
    }

    async fn send_sms(&self, sms: &SmsMessage, config: &ServiceConfig) -> SenderResult<()> {
        const OP: &str = "sendcloud.send_sms";

        let phone = PhoneNumber::parse(&sms.phone_number)?;
        require(OP, "api_user", &config.api_user)?;
        require(OP, "api_secret", &config.api_secret)?;
        require(OP, "api_url", &config.api_url)?;
        let template_id = require_some(OP, "template_id", sms.template_id.as_deref())?;
        let vars = serde_json::to_string(&sms.values)
            .map_err(|e| SenderError::validation(OP, "values", e.to_string()))?;

        debug!(
            provider = NAME,
            area = phone.area(),
            template_id = template_id,
            "Sending SMS via SendCloud"
        );

        let fields = Self::sms_fields(config, template_id, &vars, &phone);
        Self::post(OP, &config.api_url, &fields, &BTreeMap::new()).await
    }
}

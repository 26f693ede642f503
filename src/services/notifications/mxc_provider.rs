//! MXC custom endpoint provider.
//!
//! Addresses recipients by an opaque user id instead of an email address or
//! phone number, and posts plain URL-encoded forms to the configured endpoint.
//!
//! Response contract: `{"success": bool, "message": string}`.

use super::provider::{SenderProvider, parse_json, require, require_some};
use crate::error::{SenderError, SenderResult};
use crate::external::form::{FormFields, post_urlencoded};
use crate::models::{EmailMessage, ServiceConfig, SmsMessage};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

const NAME: &str = "mxc";

#[derive(Debug, Deserialize)]
struct MxcResponse {
    /// Absent means not accepted
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: String,
}

/// MXC provider (email and SMS to a user id)
#[derive(Debug, Clone, Copy, Default)]
pub struct MxcProvider;

impl MxcProvider {
    pub fn new() -> Self {
        Self
    }

    fn email_fields(email: &EmailMessage, uid: &str) -> FormFields {
        vec![
            ("uid", uid.to_string()),
            ("title", email.subject.clone()),
            ("content", email.html_body.clone()),
        ]
    }

    fn sms_fields(uid: &str, body: &str) -> FormFields {
        vec![("uid", uid.to_string()), ("content", body.to_string())]
    }

    /// Posts the form and maps `success == false` to a rejection carrying `message`
    async fn post(operation: &'static str, url: &str, fields: &FormFields) -> SenderResult<()> {
        let body = post_urlencoded(url, fields)
            .await
            .map_err(|e| SenderError::transport(operation, NAME, e))?;

        let response: MxcResponse = parse_json(operation, NAME, &body)?;
        if !response.success {
            return Err(SenderError::rejected(operation, NAME, response.message));
        }

        Ok(())
    }
}

#[async_trait]
impl SenderProvider for MxcProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn send_email(&self, email: &EmailMessage, config: &ServiceConfig) -> SenderResult<()> {
        const OP: &str = "mxc.send_email";

        require(OP, "api_url", &config.api_url)?;
        let uid = require_some(OP, "uid", email.uid.as_deref())?;
        require(OP, "subject", &email.subject)?;
        require(OP, "html_body", &email.html_body)?;

        debug!(provider = NAME, uid = %uid, "Sending email via MXC");
        Self::post(OP, &config.api_url, &Self::email_fields(email, uid)).await
    }

    async fn send_sms(&self, sms: &SmsMessage, config: &ServiceConfig) -> SenderResult<()> {
        const OP: &str = "mxc.send_sms";

        require(OP, "api_url", &config.api_url)?;
        let uid = require_some(OP, "uid", sms.uid.as_deref())?;
        let body = require_some(OP, "body", sms.body.as_deref())?;

        debug!(provider = NAME, uid = %uid, "Sending SMS via MXC");
        Self::post(OP, &config.api_url, &Self::sms_fields(uid, body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::MockVendor;
    use serde_json::json;

    fn config(url: &str) -> ServiceConfig {
        ServiceConfig::default().with_api_url(url)
    }

    fn email() -> EmailMessage {
        EmailMessage::new(NAME, "Hi", "<b>hi</b>").with_uid("42")
    }

    #[tokio::test]
    async fn test_send_email_success() {
        let vendor = MockVendor::start(json!({"success": true, "message": ""})).await;

        MxcProvider::new()
            .send_email(&email(), &config(&vendor.url()))
            .await
            .unwrap();

        let request = vendor.single_request();
        assert!(request.is_urlencoded());
        let fields = request.fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["uid"], "42");
        assert_eq!(fields["title"], "Hi");
        assert_eq!(fields["content"], "<b>hi</b>");
    }

    #[tokio::test]
    async fn test_send_email_rejected_surfaces_message() {
        let vendor = MockVendor::start(json!({"success": false, "message": "blocked"})).await;

        let err = MxcProvider::new()
            .send_email(&email(), &config(&vendor.url()))
            .await
            .unwrap_err();

        assert_eq!(err.operation(), "mxc.send_email");
        match err.kind() {
            ErrorKind::DeliveryRejected { provider, detail } => {
                assert_eq!(*provider, "mxc");
                assert_eq!(detail, "blocked");
            }
            other => panic!("Expected DeliveryRejected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_email_does_not_validate_addresses() {
        let vendor = MockVendor::start(json!({"success": true})).await;
        let message = email().from_address("not an address", "").to_address("also not");

        MxcProvider::new()
            .send_email(&message, &config(&vendor.url()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_send_email_missing_fields() {
        let provider = MxcProvider::new();
        let url = "http://127.0.0.1:9/never-called";

        let cases = [
            (email(), ServiceConfig::default(), "api_url"),
            (EmailMessage::new(NAME, "Hi", "<b>hi</b>"), config(url), "uid"),
            (EmailMessage::new(NAME, "", "<b>hi</b>").with_uid("42"), config(url), "subject"),
            (EmailMessage::new(NAME, "Hi", "").with_uid("42"), config(url), "html_body"),
        ];

        for (message, config, expected) in cases {
            let err = provider.send_email(&message, &config).await.unwrap_err();
            match err.kind() {
                ErrorKind::Validation { field, .. } => assert_eq!(field, expected),
                other => panic!("Expected Validation error, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_send_sms_success() {
        let vendor = MockVendor::start(json!({"success": true, "message": "ok"})).await;
        let sms = SmsMessage::new(NAME, "").with_uid("7").with_body("your code is 1234");

        MxcProvider::new()
            .send_sms(&sms, &config(&vendor.url()))
            .await
            .unwrap();

        let fields = vendor.single_request().fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["uid"], "7");
        assert_eq!(fields["content"], "your code is 1234");
    }

    #[tokio::test]
    async fn test_send_sms_requires_body() {
        let sms = SmsMessage::new(NAME, "").with_uid("7");
        let err = MxcProvider::new()
            .send_sms(&sms, &config("http://127.0.0.1:9/never-called"))
            .await
            .unwrap_err();

        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_send_sms_undecodable_response() {
        let vendor = MockVendor::start_raw("internal error").await;
        let sms = SmsMessage::new(NAME, "").with_uid("7").with_body("hi");

        let err = MxcProvider::new()
            .send_sms(&sms, &config(&vendor.url()))
            .await
            .unwrap_err();

        assert!(matches!(err.kind(), ErrorKind::Protocol { .. }));
    }

    #[tokio::test]
    async fn test_send_sms_missing_success_is_rejection() {
        let vendor = MockVendor::start(json!({"message": "unknown uid"})).await;
        let sms = SmsMessage::new(NAME, "").with_uid("7").with_body("hi");

        let err = MxcProvider::new()
            .send_sms(&sms, &config(&vendor.url()))
            .await
            .unwrap_err();

        match err.kind() {
            ErrorKind::DeliveryRejected { provider, detail } => {
                assert_eq!(*provider, "mxc");
                assert_eq!(detail, "unknown uid");
            }
            other => panic!("Expected DeliveryRejected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_sms_transport_failure() {
        let sms = SmsMessage::new(NAME, "").with_uid("7").with_body("hi");

        let err = MxcProvider::new()
            .send_sms(&sms, &config("http://127.0.0.1:9/unreachable"))
            .await
            .unwrap_err();

        assert!(matches!(err.kind(), ErrorKind::Transport { provider: "mxc", .. }));
    }
}

//! AWS SNS provider implementation.
//!
//! Publishes SMS directly to a phone number. Email is not supported by this
//! provider and fails without touching the network.
//!
//! Connection parameters map as follows:
//! - `region`: AWS region the client is created in
//! - `api_user` / `api_secret`: static access key id and secret access key
//! - `api_url`: optional endpoint override (e.g. a local SNS emulator)

use super::provider::{SenderProvider, require, require_some};
use crate::error::{ErrorKind, SenderError, SenderResult};
use crate::models::{EmailMessage, ServiceConfig, SmsMessage};
use crate::utils::PhoneNumber;
use async_trait::async_trait;
use aws_sdk_sns::Client;
use aws_sdk_sns::config::retry::RetryConfig;
use aws_sdk_sns::config::{BehaviorVersion, Credentials, Region};
use tracing::debug;

const NAME: &str = "aws";

/// Provider name reported on the static credentials handed to the SDK
const CREDENTIALS_PROVIDER: &str = "sender-static";

/// AWS SNS provider (SMS only)
#[derive(Debug, Clone, Copy, Default)]
pub struct SnsProvider;

impl SnsProvider {
    pub fn new() -> Self {
        Self
    }

    /// Builds a client session from static credentials in the configured region
    ///
    /// SDK retries are disabled: one send is one publish attempt.
    fn client(config: &ServiceConfig) -> Client {
        let credentials = Credentials::new(
            config.api_user.clone(),
            config.api_secret.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER,
        );

        let mut builder = aws_sdk_sns::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled());
        if !config.api_url.is_empty() {
            builder = builder.endpoint_url(config.api_url.clone());
        }

        Client::from_conf(builder.build())
    }
}

#[async_trait]
impl SenderProvider for SnsProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn send_email(&self, _email: &EmailMessage, _config: &ServiceConfig) -> SenderResult<()> {
        Err(SenderError::new(
            "aws.send_email",
            ErrorKind::Unsupported {
                provider: NAME,
                operation: "send_email",
            },
        ))
    }

    async fn send_sms(&self, sms: &SmsMessage, config: &ServiceConfig) -> SenderResult<()> {
        const OP: &str = "aws.send_sms";

        let phone = PhoneNumber::parse(&sms.phone_number)?;
        require(OP, "region", &config.region)?;
        let message = require_some(OP, "body", sms.body.as_deref())?;

        debug!(
            provider = NAME,
            region = %config.region,
            area = phone.area(),
            "Publishing SMS via SNS"
        );

        Self::client(config)
            .publish()
            .phone_number(phone.to_string())
            .message(message)
            .send()
            .await
            .map_err(|e| SenderError::transport(OP, NAME, e))?;

        Ok(())
    }
}

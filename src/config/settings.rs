//! Configuration settings structures for sender-rs
//!
//! Provider credentials are keyed by channel and provider name:
//!
//! ```toml
//! [providers.email.sendcloud]
//! api_user = "user"
//! api_secret = "key"
//! api_url = "https://api.sendcloud.net/apiv2/mail/send"
//!
//! [providers.sms.aws]
//! region = "us-east-1"
//! api_user = "AKID..."
//! api_secret = "..."
//!
//! # Destinations in area +86 publish from a different region
//! [providers.sms.aws.areas.86]
//! region = "cn-north-1"
//! ```

use std::collections::BTreeMap;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::LoggerConfig;
use crate::models::ServiceConfig;
use crate::services::notifications::{EmailConfigResolver, SmsConfigResolver};
use crate::utils::PhoneNumber;

/// Root settings loaded by [`ConfigLoader`](crate::config::ConfigLoader)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logger: LoggerConfig,

    #[serde(default)]
    pub providers: ProviderSettings,
}

impl Settings {
    /// Validates all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logger
            .validate()
            .map_err(|e| ConfigError::invalid("logger", format!("{:#}", e)))?;
        self.providers.validate()
    }
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Connection parameters for every configured provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Email provider configs keyed by provider name
    #[serde(default)]
    pub email: BTreeMap<String, ServiceConfig>,

    /// SMS provider configs keyed by provider name
    #[serde(default)]
    pub sms: BTreeMap<String, SmsServiceConfig>,
}

impl ProviderSettings {
    pub fn email_config(&self, provider: &str) -> Option<ServiceConfig> {
        self.email.get(provider).cloned()
    }

    /// SMS config for `provider`, with the destination's area override applied
    pub fn sms_config(&self, provider: &str, phone_number: &str) -> Option<ServiceConfig> {
        self.sms
            .get(provider)
            .map(|config| config.for_destination(phone_number))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, config) in &self.email {
            validate_api_url(&format!("providers.email.{}.api_url", name), &config.api_url)?;
        }

        for (name, config) in &self.sms {
            validate_api_url(&format!("providers.sms.{}.api_url", name), &config.api_url)?;

            for (area, area_config) in &config.areas {
                let field = format!("providers.sms.{}.areas.{}", name, area);
                if area.is_empty() || !area.chars().all(|c| c.is_ascii_digit()) {
                    return Err(ConfigError::invalid(
                        field,
                        "Area code must contain digits only, without the leading '+'",
                    ));
                }
                validate_api_url(&format!("{}.api_url", field), &area_config.api_url)?;
            }
        }

        Ok(())
    }
}

impl EmailConfigResolver for ProviderSettings {
    fn resolve_email(&self, provider: &str) -> Option<ServiceConfig> {
        self.email_config(provider)
    }
}

impl SmsConfigResolver for ProviderSettings {
    fn resolve_sms(&self, provider: &str, phone_number: &str) -> Option<ServiceConfig> {
        self.sms_config(provider, phone_number)
    }
}

/// SMS provider config with optional per-area overrides
///
/// Empty fields in an area override inherit the provider-level value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsServiceConfig {
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub api_user: String,
    #[serde(default)]
    pub api_secret: String,
    #[serde(default)]
    pub api_url: String,

    /// Overrides keyed by area code digits, e.g. "86"
    #[serde(default)]
    pub areas: BTreeMap<String, ServiceConfig>,
}

impl SmsServiceConfig {
    /// Provider-level config without any area override
    pub fn base(&self) -> ServiceConfig {
        ServiceConfig {
            region: self.region.clone(),
            api_user: self.api_user.clone(),
            api_secret: self.api_secret.clone(),
            api_url: self.api_url.clone(),
        }
    }

    /// Config for a destination; unparsable numbers fall back to the base
    pub fn for_destination(&self, phone_number: &str) -> ServiceConfig {
        let base = self.base();
        let Ok(phone) = PhoneNumber::parse(phone_number) else {
            return base;
        };

        match self.areas.get(phone.area_digits()) {
            Some(area) => overlay(base, area),
            None => base,
        }
    }
}

fn overlay(base: ServiceConfig, area: &ServiceConfig) -> ServiceConfig {
    let pick = |value: &String, fallback: String| {
        if value.is_empty() { fallback } else { value.clone() }
    };

    ServiceConfig {
        region: pick(&area.region, base.region),
        api_user: pick(&area.api_user, base.api_user),
        api_secret: pick(&area.api_secret, base.api_secret),
        api_url: pick(&area.api_url, base.api_url),
    }
}

fn validate_api_url(field: &str, api_url: &str) -> Result<(), ConfigError> {
    if api_url.is_empty() {
        return Ok(());
    }

    let url = Url::parse(api_url)
        .map_err(|e| ConfigError::invalid(field, format!("Invalid URL format: {}", e)))?;
    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::invalid(field, "URL must use http or https protocol"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(source: &str) -> ProviderSettings {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    fn sms_settings() -> ProviderSettings {
        from_toml(
            r#"
            [sms.aws]
            region = "us-east-1"
            api_user = "AKID"
            api_secret = "secret"

            [sms.aws.areas.86]
            region = "cn-north-1"

            [sms.submail]
            api_user = "app"
            api_secret = "sig"
            api_url = "https://api.example.com/sms/send"
            "#,
        )
    }

    #[test]
    fn test_sms_area_override_inherits_base() {
        let settings = sms_settings();

        let china = settings.sms_config("aws", "+86 13800000000").unwrap();
        assert_eq!(china.region, "cn-north-1");
        assert_eq!(china.api_user, "AKID");
        assert_eq!(china.api_secret, "secret");

        let us = settings.sms_config("aws", "+1 5550100").unwrap();
        assert_eq!(us.region, "us-east-1");
    }

    #[test]
    fn test_sms_unparsable_phone_uses_base() {
        let settings = sms_settings();
        let config = settings.sms_config("aws", "not a phone").unwrap();
        assert_eq!(config.region, "us-east-1");
    }

    #[test]
    fn test_unknown_provider_resolves_to_none() {
        let settings = sms_settings();
        assert!(settings.sms_config("mxc", "+1 5550100").is_none());
        assert!(settings.email_config("sendcloud").is_none());
    }

    #[test]
    fn test_resolver_impls() {
        let mut settings = sms_settings();
        settings.email.insert(
            "mxc".to_string(),
            ServiceConfig::default().with_api_url("https://mxc.example.com/notify"),
        );

        assert_eq!(
            settings.resolve_email("mxc").unwrap().api_url,
            "https://mxc.example.com/notify"
        );
        assert_eq!(
            settings.resolve_sms("submail", "+44 7700900123").unwrap().api_user,
            "app"
        );
    }

    #[test]
    fn test_validate_rejects_bad_area_key() {
        let mut settings = sms_settings();
        settings
            .sms
            .get_mut("aws")
            .unwrap()
            .areas
            .insert("+1".to_string(), ServiceConfig::default());

        match settings.validate() {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "providers.sms.aws.areas.+1"),
            other => panic!("Expected Invalid error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut settings = ProviderSettings::default();
        settings.email.insert(
            "mxc".to_string(),
            ServiceConfig::default().with_api_url("ftp://mxc.example.com"),
        );
        assert!(settings.validate().is_err());

        settings.email.insert(
            "mxc".to_string(),
            ServiceConfig::default().with_api_url("not a url"),
        );
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!(settings.providers.email.is_empty());
    }
}

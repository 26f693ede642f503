//! Configuration resolver collaborators.
//!
//! The dispatcher never stores credentials. It asks a resolver for the
//! connection parameters of one provider right before each send. Closures
//! implement both traits, so tests and small hosts can pass a function
//! directly.

use crate::models::ServiceConfig;

/// Resolves connection parameters for an email provider
pub trait EmailConfigResolver: Send + Sync {
    fn resolve_email(&self, provider: &str) -> Option<ServiceConfig>;
}

/// Resolves connection parameters for an SMS provider
///
/// Receives the destination as well, so routing can depend on the
/// destination region.
pub trait SmsConfigResolver: Send + Sync {
    fn resolve_sms(&self, provider: &str, phone_number: &str) -> Option<ServiceConfig>;
}

impl<F> EmailConfigResolver for F
where
    F: Fn(&str) -> Option<ServiceConfig> + Send + Sync,
{
    fn resolve_email(&self, provider: &str) -> Option<ServiceConfig> {
        self(provider)
    }
}

impl<F> SmsConfigResolver for F
where
    F: Fn(&str, &str) -> Option<ServiceConfig> + Send + Sync,
{
    fn resolve_sms(&self, provider: &str, phone_number: &str) -> Option<ServiceConfig> {
        self(provider, phone_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_resolvers() {
        let email = |provider: &str| (provider == "mxc").then(ServiceConfig::default);
        let sms = |provider: &str, phone: &str| {
            (provider == "aws" && phone.starts_with("+1")).then(|| ServiceConfig::default().with_region("us-east-1"))
        };

        assert!(email.resolve_email("mxc").is_some());
        assert!(email.resolve_email("submail").is_none());
        assert_eq!(sms.resolve_sms("aws", "+1 5550100").unwrap().region, "us-east-1");
        assert!(sms.resolve_sms("aws", "+86 13800000000").is_none());
    }
}

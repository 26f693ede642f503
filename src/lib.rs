//! Sender-RS Library
//!
//! Multi-provider notification dispatch: email and SMS routed by provider
//! name to AWS SNS, SendCloud, Submail or MXC.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use error::{ErrorKind, SenderError, SenderResult};
pub use models::{Channel, DeliveryReceipt, EmailMessage, ServiceConfig, SmsMessage};
pub use services::{Dispatcher, ProviderRegistry, SenderProvider};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}

//! Notification dispatch with pluggable providers.
//!
//! The `SenderProvider` trait is implemented once per delivery backend. The
//! `Dispatcher` picks a provider from the `ProviderRegistry` by name and asks
//! an injected resolver for that provider's connection parameters.

mod dispatcher;
mod mxc_provider;
mod provider;
mod registry;
mod resolver;
mod sendcloud_provider;
mod sns_provider;
mod submail_provider;

pub use dispatcher::Dispatcher;
pub use mxc_provider::MxcProvider;
pub use provider::SenderProvider;
pub use registry::ProviderRegistry;
pub use resolver::{EmailConfigResolver, SmsConfigResolver};
pub use sendcloud_provider::SendCloudProvider;
pub use sns_provider::SnsProvider;
pub use submail_provider::SubmailProvider;

pub mod notifications;

pub use notifications::{Dispatcher, ProviderRegistry, SenderProvider};

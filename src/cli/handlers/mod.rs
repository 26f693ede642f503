//! Command handlers for CLI operations
//!
//! Each handler turns parsed arguments into a message and hands it to the
//! dispatcher.

pub mod email;
pub mod sms;

pub use email::EmailCommandHandler;
pub use sms::SmsCommandHandler;

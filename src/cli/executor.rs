//! Command executor for dispatching CLI commands

use super::handlers::{EmailCommandHandler, SmsCommandHandler};
use super::parser::Commands;
use crate::models::DeliveryReceipt;
use crate::services::Dispatcher;

/// Execute a parsed command against the dispatcher
///
/// # Errors
/// Returns handler errors, including every dispatch failure
pub async fn execute_command(
    command: Commands,
    dispatcher: &Dispatcher,
) -> anyhow::Result<DeliveryReceipt> {
    match command {
        Commands::Email(args) => EmailCommandHandler::new(dispatcher).execute(args).await,
        Commands::Sms(args) => SmsCommandHandler::new(dispatcher).execute(args).await,
    }
}

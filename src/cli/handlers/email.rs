//! Email command handler

use anyhow::Context;
use std::path::Path;

use crate::cli::parser::EmailArgs;
use crate::models::{DeliveryReceipt, EmailMessage};
use crate::services::Dispatcher;

/// Handler for the email command
pub struct EmailCommandHandler<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> EmailCommandHandler<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Reads attachments, builds the message and dispatches it
    ///
    /// # Errors
    /// - An attachment cannot be read
    /// - The dispatcher or provider rejects the message
    pub async fn execute(&self, args: EmailArgs) -> anyhow::Result<DeliveryReceipt> {
        let message = Self::build_message(args).await?;
        let receipt = self.dispatcher.send_email(&message).await?;
        Ok(receipt)
    }

    async fn build_message(args: EmailArgs) -> anyhow::Result<EmailMessage> {
        let mut message = EmailMessage::new(args.provider, args.subject, args.html)
            .from_address(args.from, args.from_name)
            .to_address(args.to);
        message.text_body = args.text;
        message.uid = args.uid;

        for path in &args.attachments {
            let content = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read attachment {}", path.display()))?;
            message = message.with_attachment(attachment_name(path), content);
        }

        Ok(message)
    }
}

fn attachment_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

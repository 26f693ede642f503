//! SMS command handler

use crate::cli::parser::SmsArgs;
use crate::models::{DeliveryReceipt, SmsMessage};
use crate::services::Dispatcher;

/// Handler for the sms command
pub struct SmsCommandHandler<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> SmsCommandHandler<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn execute(&self, args: SmsArgs) -> anyhow::Result<DeliveryReceipt> {
        let message = Self::build_message(args);
        let receipt = self.dispatcher.send_sms(&message).await?;
        Ok(receipt)
    }

    fn build_message(args: SmsArgs) -> SmsMessage {
        SmsMessage {
            provider: args.provider,
            uid: args.uid,
            phone_number: args.phone,
            template_id: args.template_id,
            values: args.vars,
            body: args.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_message() {
        let message = SmsCommandHandler::build_message(SmsArgs {
            provider: "sendcloud".to_string(),
            phone: "+86 13800000000".to_string(),
            body: None,
            template_id: Some("1001".to_string()),
            vars: Some(json!({"code": "123456"})),
            uid: None,
        });

        assert_eq!(message.provider, "sendcloud");
        assert_eq!(message.phone_number, "+86 13800000000");
        assert_eq!(message.values, Some(json!({"code": "123456"})));
        assert!(message.body.is_none());
    }
}

mod message;

pub use message::{Channel, DeliveryReceipt, EmailMessage, ServiceConfig, SmsMessage};

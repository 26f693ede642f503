//! CLI argument parsing with clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value as JsonValue;
use std::path::PathBuf;

use crate::build;

/// Send email and SMS through configured providers
#[derive(Parser, Debug)]
#[command(name = "sender")]
#[command(about = "Send email and SMS through configured providers")]
#[command(long_about = "
Sends a single email or SMS through one of the registered providers
(aws, sendcloud, submail, mxc). Provider credentials come from the
layered configuration (config/default.toml, config/<env>.toml,
config/local.toml and SENDER_* environment variables).

EXAMPLES:
    # Email through SendCloud
    sender email --provider sendcloud --from noreply@example.com \\
        --to user@example.com --subject Hello --html '<b>Hi</b>'

    # Templated SMS through SendCloud
    sender sms --provider sendcloud --phone '+86 13800000000' \\
        --template-id 1001 --vars '{\"code\":\"123456\"}'

    # Plain SMS through AWS SNS with a single config file
    sender --config /etc/sender/sender.toml sms --provider aws \\
        --phone '+1 5550100' --body 'Your code is 123456'
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Loads only this file (plus SENDER_* environment overrides) instead of
    /// the layered configuration directory.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Log level override
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send an email
    Email(EmailArgs),
    /// Send an SMS
    Sms(SmsArgs),
}

#[derive(Args, Debug)]
pub struct EmailArgs {
    /// Registered provider name
    #[arg(short, long)]
    pub provider: String,

    /// Sender address
    #[arg(long, default_value = "")]
    pub from: String,

    /// Sender display name
    #[arg(long, default_value = "")]
    pub from_name: String,

    /// Recipient address
    #[arg(long, default_value = "")]
    pub to: String,

    #[arg(short, long)]
    pub subject: String,

    /// HTML body
    #[arg(long)]
    pub html: String,

    /// Plain-text alternative body
    #[arg(long)]
    pub text: Option<String>,

    /// Recipient user id (mxc)
    #[arg(long)]
    pub uid: Option<String>,

    /// File to attach; may be repeated
    #[arg(short, long = "attach", value_name = "FILE")]
    pub attachments: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SmsArgs {
    /// Registered provider name
    #[arg(short, long)]
    pub provider: String,

    /// Destination as "+<area> <subscriber>"
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Message text (aws, submail, mxc)
    #[arg(short, long)]
    pub body: Option<String>,

    /// Template id (sendcloud)
    #[arg(long)]
    pub template_id: Option<String>,

    /// Template variables as a JSON object (sendcloud)
    #[arg(long, value_name = "JSON", value_parser = super::validation::parse_json_vars)]
    pub vars: Option<JsonValue>,

    /// Recipient user id (mxc)
    #[arg(long)]
    pub uid: Option<String>,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

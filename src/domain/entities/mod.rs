//! Domain entities - Core business objects with no external dependencies

pub mod command;
pub mod identity;
pub mod message;
pub mod webhook;

pub use command::{Action, Command, CommandHandler, CommandTable};
pub use identity::BotIdentity;
pub use message::{Message, Notification, Reply};
pub use webhook::{Webhook, WebhookSpec};

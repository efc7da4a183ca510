//! Webhook-driven Webex bot framework.
//!
//! A [`SparkBot`] registers a webhook with the platform, receives
//! notifications of new messages, matches them against its command table and
//! posts each command's reply back to the room.

pub mod application;
pub mod bot;
pub mod domain;
pub mod infrastructure;

pub use application::errors::{ApiError, BotError, CommandError, ConfigError};
pub use bot::SparkBot;
pub use domain::entities::{Message, Reply};
pub use infrastructure::config::Config;

//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Core business objects (Message, Webhook, Command)
//! - Traits: Abstractions for infrastructure (MessagingApi)

pub mod entities;
pub mod traits;

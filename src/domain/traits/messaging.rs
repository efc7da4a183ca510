use async_trait::async_trait;

use crate::application::errors::ApiError;
use crate::domain::entities::{BotIdentity, Message, Reply, Webhook, WebhookSpec};

/// MessagingApi trait - abstraction over the platform's REST API
#[async_trait]
pub trait MessagingApi: Send + Sync {
    /// List every webhook registered for the account, across all pages
    async fn list_webhooks(&self) -> Result<Vec<Webhook>, ApiError>;

    /// Register a new webhook
    async fn create_webhook(&self, spec: &WebhookSpec) -> Result<Webhook, ApiError>;

    /// Change the name and target URL of an existing webhook
    async fn update_webhook(&self, id: &str, name: &str, target_url: &str) -> Result<Webhook, ApiError>;

    /// Fetch a message by id
    async fn get_message(&self, id: &str) -> Result<Message, ApiError>;

    /// Fetch the account the credential belongs to
    async fn get_self_identity(&self) -> Result<BotIdentity, ApiError>;

    /// Post a reply into a room, returning the new message id
    async fn post_message(&self, room_id: &str, reply: &Reply) -> Result<String, ApiError>;
}

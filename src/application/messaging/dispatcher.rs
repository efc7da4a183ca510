//! Command dispatcher - Turns webhook notifications into replies

use std::sync::Arc;

use crate::application::errors::BotError;
use crate::application::services::CommandService;
use crate::domain::entities::Notification;
use crate::domain::traits::MessagingApi;
use super::parser::parse_notification_bytes;

/// Resolves notifications to messages, runs the matching command and posts
/// the reply back to the room.
pub struct CommandDispatcher {
    api: Arc<dyn MessagingApi>,
    commands: Arc<CommandService>,
}

impl CommandDispatcher {
    pub fn new(api: Arc<dyn MessagingApi>, commands: Arc<CommandService>) -> Self {
        Self { api, commands }
    }

    /// Parse a raw webhook body and handle it
    pub async fn handle_payload(&self, body: &[u8]) -> Result<String, BotError> {
        let notification = parse_notification_bytes(body)?;
        self.handle(&notification).await
    }

    /// Handle one notification, returning the reply text.
    ///
    /// An empty string means nothing was posted. A reply that could not be
    /// posted is reported as `ReplyNotDelivered`, carrying the reply text.
    pub async fn handle(&self, notification: &Notification) -> Result<String, BotError> {
        let message = self.api.get_message(&notification.resource_id).await?;
        let identity = self.api.get_self_identity().await?;

        if identity.owns(&message.person_email) {
            tracing::debug!("Ignoring message {} from ourself", message.id);
            return Ok(String::new());
        }

        tracing::info!("Message from: {}", message.person_email);

        let reply = self.commands.dispatch(&message)?;
        if reply.is_empty() {
            return Ok(String::new());
        }

        match self.api.post_message(&notification.room_id, &reply).await {
            Ok(id) => {
                tracing::debug!("Posted reply {} to {}", id, notification.room_id);
                Ok(reply.markdown)
            }
            Err(e) => {
                tracing::error!("Failed to post reply to {}: {}", notification.room_id, e);
                Err(BotError::ReplyNotDelivered {
                    reply: reply.markdown,
                    reason: e,
                })
            }
        }
    }
}

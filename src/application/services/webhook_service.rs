use std::sync::Arc;

use crate::application::errors::BotError;
use crate::domain::entities::{Webhook, WebhookSpec};
use crate::domain::traits::MessagingApi;

/// Keeps exactly one webhook registered under the bot's name
pub struct WebhookReconciler {
    api: Arc<dyn MessagingApi>,
}

impl WebhookReconciler {
    pub fn new(api: Arc<dyn MessagingApi>) -> Self {
        Self { api }
    }

    /// Create the webhook if no webhook carries `name`, otherwise point the
    /// existing one at `target_url`.
    ///
    /// Listing and creation failures propagate. An update failure is logged
    /// and the previously registered webhook is returned unchanged, since the
    /// platform may still be delivering to it.
    pub async fn reconcile(&self, name: &str, target_url: &str) -> Result<Webhook, BotError> {
        let webhooks = self.api.list_webhooks().await?;
        tracing::debug!("Found {} registered webhooks", webhooks.len());

        // Duplicate names resolve to the first one listed
        let Some(existing) = webhooks.into_iter().find(|w| w.name == name) else {
            tracing::info!("Creating new webhook '{}' -> {}", name, target_url);
            let spec = WebhookSpec::messages_created(name, target_url);
            return Ok(self.api.create_webhook(&spec).await?);
        };

        tracing::info!("Found existing webhook {}, updating it", existing.id);
        match self.api.update_webhook(&existing.id, name, target_url).await {
            Ok(updated) => Ok(updated),
            Err(e) => {
                tracing::warn!("Failed to update webhook {}: {}", existing.id, e);
                Ok(existing)
            }
        }
    }
}

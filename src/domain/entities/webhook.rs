use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resource the bot subscribes to
pub const WEBHOOK_RESOURCE: &str = "messages";

/// Event the bot subscribes to
pub const WEBHOOK_EVENT: &str = "created";

/// A webhook registered with the messaging platform
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub id: String,
    pub name: String,
    pub target_url: String,
    #[serde(default = "default_resource")]
    pub resource: String,
    #[serde(default = "default_event")]
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

fn default_resource() -> String {
    WEBHOOK_RESOURCE.to_string()
}

fn default_event() -> String {
    WEBHOOK_EVENT.to_string()
}

/// Desired webhook registration, keyed by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookSpec {
    pub name: String,
    pub target_url: String,
    pub resource: String,
    pub event: String,
}

impl WebhookSpec {
    /// Subscription to newly created messages
    pub fn messages_created(name: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_url: target_url.into(),
            resource: WEBHOOK_RESOURCE.to_string(),
            event: WEBHOOK_EVENT.to_string(),
        }
    }
}

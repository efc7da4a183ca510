//! Shared test helpers: an in-memory messaging API that records every call

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};

use spark_bot::application::errors::ApiError;
use spark_bot::domain::entities::{BotIdentity, Message, Reply, Webhook, WebhookSpec};
use spark_bot::domain::traits::MessagingApi;
use spark_bot::{Config, SparkBot};

pub const BOT_EMAIL: &str = "test@test.com";
pub const BOT_TOKEN: &str = "somefaketoken";
pub const ROOM_ID: &str = "room-1";

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Recorded outbound call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListWebhooks,
    CreateWebhook(WebhookSpec),
    UpdateWebhook { id: String, name: String, target_url: String },
    GetMessage(String),
    GetSelfIdentity,
    PostMessage { room_id: String, reply: Reply },
}

#[derive(Default)]
pub struct FakeApi {
    pub webhooks: Vec<Webhook>,
    pub messages: HashMap<String, Message>,
    pub identity: BotIdentity,
    pub fail_list: bool,
    pub fail_create: bool,
    pub fail_update: bool,
    pub fail_get: bool,
    pub fail_post: bool,
    pub calls: Mutex<Vec<Call>>,
}

fn unavailable(what: &str) -> ApiError {
    ApiError::Network(format!("{} unavailable", what))
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            identity: BotIdentity::new(vec![BOT_EMAIL.to_string()]),
            ..Self::default()
        }
    }

    pub fn with_webhook(mut self, id: &str, name: &str, target_url: &str) -> Self {
        self.webhooks.push(webhook(id, name, target_url));
        self
    }

    pub fn with_message(mut self, id: &str, author: &str, text: &str) -> Self {
        let msg = Message::new(id, ROOM_ID, text).with_person_email(author);
        self.messages.insert(id.to_string(), msg);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn posted(&self) -> Vec<(String, Reply)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::PostMessage { room_id, reply } => Some((room_id, reply)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn webhook(id: &str, name: &str, target_url: &str) -> Webhook {
    Webhook {
        id: id.to_string(),
        name: name.to_string(),
        target_url: target_url.to_string(),
        resource: "messages".to_string(),
        event: "created".to_string(),
        created: None,
    }
}

#[async_trait]
impl MessagingApi for FakeApi {
    async fn list_webhooks(&self) -> Result<Vec<Webhook>, ApiError> {
        self.record(Call::ListWebhooks);
        if self.fail_list {
            return Err(unavailable("list"));
        }
        Ok(self.webhooks.clone())
    }

    async fn create_webhook(&self, spec: &WebhookSpec) -> Result<Webhook, ApiError> {
        self.record(Call::CreateWebhook(spec.clone()));
        if self.fail_create {
            return Err(unavailable("create"));
        }
        Ok(webhook("created-id", &spec.name, &spec.target_url))
    }

    async fn update_webhook(&self, id: &str, name: &str, target_url: &str) -> Result<Webhook, ApiError> {
        self.record(Call::UpdateWebhook {
            id: id.to_string(),
            name: name.to_string(),
            target_url: target_url.to_string(),
        });
        if self.fail_update {
            return Err(unavailable("update"));
        }
        Ok(webhook(id, name, target_url))
    }

    async fn get_message(&self, id: &str) -> Result<Message, ApiError> {
        self.record(Call::GetMessage(id.to_string()));
        if self.fail_get {
            return Err(unavailable("get"));
        }
        self.messages.get(id).cloned().ok_or_else(|| ApiError::Status {
            method: "GET".to_string(),
            path: format!("messages/{}", id),
            status: 404,
            body: String::new(),
        })
    }

    async fn get_self_identity(&self) -> Result<BotIdentity, ApiError> {
        self.record(Call::GetSelfIdentity);
        Ok(self.identity.clone())
    }

    async fn post_message(&self, room_id: &str, reply: &Reply) -> Result<String, ApiError> {
        self.record(Call::PostMessage {
            room_id: room_id.to_string(),
            reply: reply.clone(),
        });
        if self.fail_post {
            return Err(unavailable("post"));
        }
        Ok("posted-id".to_string())
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.bot.name = "testbot".to_string();
    config.bot.email = BOT_EMAIL.to_string();
    config.bot.token = BOT_TOKEN.to_string();
    config.bot.url = "http://fakebot.com".to_string();
    config
}

pub fn test_bot(api: Arc<FakeApi>) -> SparkBot {
    ensure_init();
    SparkBot::with_api(test_config(), api)
}

pub fn notification(message_id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "webhook-1",
        "name": "testbot",
        "resource": "messages",
        "event": "created",
        "data": {
            "id": message_id,
            "roomId": ROOM_ID,
            "personEmail": "someone@example.com"
        }
    })
}

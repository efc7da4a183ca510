//! The bot instance: configuration, API client, command table and webhook

use std::sync::Arc;
use std::time::Duration;

use crate::application::errors::{BotError, CommandError};
use crate::application::messaging::CommandDispatcher;
use crate::application::services::{CommandService, WebhookReconciler};
use crate::domain::entities::{Command, Message, Reply, Webhook};
use crate::domain::traits::MessagingApi;
use crate::infrastructure::adapters::SparkClient;
use crate::infrastructure::config::Config;
use crate::infrastructure::http::{self, AppState};

pub struct SparkBot {
    config: Config,
    api: Arc<dyn MessagingApi>,
    commands: Arc<CommandService>,
    webhook: Option<Webhook>,
}

impl SparkBot {
    /// Validate the configuration and connect to the Webex API
    pub fn new(config: Config) -> Result<Self, BotError> {
        config.validate()?;
        let api = SparkClient::new(
            config.api.base_url.clone(),
            config.bot.token.clone(),
            Duration::from_secs(config.api.timeout_seconds),
        )?;
        Ok(Self::with_api(config, Arc::new(api)))
    }

    /// Build on an existing API client
    pub fn with_api(config: Config, api: Arc<dyn MessagingApi>) -> Self {
        let commands = Arc::new(CommandService::new(config.bot.default_action.clone()));
        Self {
            config,
            api,
            commands,
            webhook: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn commands(&self) -> &Arc<CommandService> {
        &self.commands
    }

    pub fn webhook(&self) -> Option<&Webhook> {
        self.webhook.as_ref()
    }

    pub fn add_command<F>(&self, prefix: impl Into<String>, help: impl Into<String>, handler: F)
    where
        F: Fn(&Message) -> Result<Reply, CommandError> + Send + Sync + 'static,
    {
        self.commands.add_command(prefix, help, handler);
    }

    pub fn remove_command(&self, prefix: &str) -> Result<Command, BotError> {
        self.commands.remove_command(prefix)
    }

    /// Make sure the platform delivers new messages to `bot.url`
    pub async fn setup(&mut self) -> Result<&Webhook, BotError> {
        tracing::info!("Spark Bot Email: {}", self.config.bot.email);
        tracing::info!("Spark Token: REDACTED");
        tracing::info!("Configuring Webhook.");

        let reconciler = WebhookReconciler::new(self.api.clone());
        let webhook = reconciler
            .reconcile(&self.config.bot.name, &self.config.bot.url)
            .await?;
        tracing::info!("Webhook ID: {}", webhook.id);

        Ok(self.webhook.insert(webhook))
    }

    pub fn app_state(&self) -> AppState {
        let dispatcher = CommandDispatcher::new(self.api.clone(), self.commands.clone());
        AppState::new(Arc::new(dispatcher), self.config.summary())
    }

    pub fn router(&self) -> axum::Router {
        http::router(self.app_state())
    }

    /// Register the webhook, then serve until shutdown
    pub async fn run(mut self) -> Result<(), BotError> {
        self.setup().await?;
        let addr = self.config.bind_addr();
        http::serve(&addr, self.app_state())
            .await
            .map_err(|e| BotError::Internal(format!("HTTP server failed: {}", e)))
    }
}

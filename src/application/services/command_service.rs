use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::application::errors::{BotError, CommandError};
use crate::application::messaging::parser::extract_remainder;
use crate::domain::entities::{Action, Command, CommandTable, Message, Reply};

pub const HELP_COMMAND: &str = "/help";
pub const ECHO_COMMAND: &str = "/echo";

const HELP_GREETING: &str = "Hello!  I understand the following commands:  \n";

/// Service for managing and executing commands.
///
/// The table sits behind a read/write lock so commands can be added or
/// removed while notifications are being dispatched.
pub struct CommandService {
    table: RwLock<CommandTable>,
    default_action: Option<String>,
}

impl CommandService {
    /// Table with the built-in `/echo` and `/help` commands
    pub fn new(default_action: Option<String>) -> Self {
        let mut table = CommandTable::new();
        table.insert(Command::new(
            ECHO_COMMAND,
            "Reply back with the same message sent.",
            Action::Echo,
        ));
        table.insert(Command::new(HELP_COMMAND, "Get help.", Action::Help));

        Self {
            table: RwLock::new(table),
            default_action,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, CommandTable> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CommandTable> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add or replace a command. Blank prefixes are refused since they
    /// could never be selected.
    pub fn register(&self, command: Command) {
        if command.prefix.trim().is_empty() {
            tracing::warn!("Ignoring command with blank prefix (help: {})", command.help);
            return;
        }
        if self.write().insert(command).is_some() {
            tracing::debug!("Replaced existing command");
        }
    }

    /// Add a command, replacing any command with the same prefix
    pub fn add_command<F>(&self, prefix: impl Into<String>, help: impl Into<String>, handler: F)
    where
        F: Fn(&Message) -> Result<Reply, CommandError> + Send + Sync + 'static,
    {
        self.register(Command::with_handler(prefix, help, handler));
    }

    pub fn remove_command(&self, prefix: &str) -> Result<Command, BotError> {
        self.write()
            .remove(prefix)
            .ok_or_else(|| BotError::UnknownCommand(prefix.to_string()))
    }

    /// Command selected for `text`, falling back to the default action
    pub fn resolve(&self, text: &str) -> Option<Command> {
        let table = self.read();
        match table.resolve(text) {
            Some(cmd) => {
                tracing::debug!("Found command: {}", cmd.prefix);
                Some(cmd.clone())
            }
            None => self
                .default_action
                .as_deref()
                .and_then(|prefix| table.get(prefix))
                .cloned(),
        }
    }

    /// Resolve and run the command for a message.
    ///
    /// The lock is released before the handler runs.
    pub fn dispatch(&self, message: &Message) -> Result<Reply, BotError> {
        match self.resolve(&message.text) {
            Some(cmd) => self.execute(&cmd, message),
            None => Ok(Reply::default()),
        }
    }

    pub fn execute(&self, command: &Command, message: &Message) -> Result<Reply, BotError> {
        match &command.action {
            Action::Help => Ok(Reply::text(self.help_text())),
            Action::Echo => Ok(Reply::text(extract_remainder(&command.prefix, &message.text))),
            Action::Custom(handler) => Ok(handler(message)?),
        }
    }

    pub fn help_text(&self) -> String {
        self.read().iter().fold(HELP_GREETING.to_string(), |mut help, cmd| {
            help.push_str(&format!("* {}: {}\n", cmd.prefix, cmd.help));
            help
        })
    }

    pub fn prefixes(&self) -> Vec<String> {
        self.read().iter().map(|c| c.prefix.clone()).collect()
    }
}

impl Default for CommandService {
    fn default() -> Self {
        Self::new(Some(HELP_COMMAND.to_string()))
    }
}

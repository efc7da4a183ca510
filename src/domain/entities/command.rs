use std::fmt;
use std::sync::Arc;

use super::{Message, Reply};
use crate::application::errors::CommandError;

/// Command handler function type
pub type CommandHandler =
    Arc<dyn Fn(&Message) -> Result<Reply, CommandError> + Send + Sync>;

/// What a command does when selected
#[derive(Clone)]
pub enum Action {
    /// Render the help listing of the table the command lives in
    Help,
    /// Reply with the text following the command
    Echo,
    Custom(CommandHandler),
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Help => f.write_str("Help"),
            Action::Echo => f.write_str("Echo"),
            Action::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Represents a bot command
#[derive(Debug, Clone)]
pub struct Command {
    pub prefix: String,
    pub help: String,
    pub action: Action,
}

impl Command {
    pub fn new(prefix: impl Into<String>, help: impl Into<String>, action: Action) -> Self {
        Self {
            prefix: prefix.into(),
            help: help.into(),
            action,
        }
    }

    pub fn with_handler<F>(prefix: impl Into<String>, help: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Message) -> Result<Reply, CommandError> + Send + Sync + 'static,
    {
        Self::new(prefix, help, Action::Custom(Arc::new(handler)))
    }

    /// Substring match anywhere in the text, not anchored at the start
    pub fn matches(&self, text: &str) -> bool {
        !self.prefix.is_empty() && text.contains(self.prefix.as_str())
    }
}

/// Ordered command table keyed by prefix.
///
/// Insertion order decides both help listing order and match precedence.
/// Re-registering a prefix replaces the entry but keeps its position.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    commands: Vec<Command>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite, returning the replaced command if any
    pub fn insert(&mut self, command: Command) -> Option<Command> {
        match self.commands.iter_mut().find(|c| c.prefix == command.prefix) {
            Some(existing) => Some(std::mem::replace(existing, command)),
            None => {
                self.commands.push(command);
                None
            }
        }
    }

    pub fn remove(&mut self, prefix: &str) -> Option<Command> {
        let idx = self.commands.iter().position(|c| c.prefix == prefix)?;
        Some(self.commands.remove(idx))
    }

    pub fn get(&self, prefix: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.prefix == prefix)
    }

    /// First-registered command whose prefix occurs anywhere in `text`
    pub fn resolve(&self, text: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.matches(text))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

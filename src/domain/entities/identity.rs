use serde::{Deserialize, Serialize};

/// The bot's own account, as reported by the platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotIdentity {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl BotIdentity {
    pub fn new(emails: Vec<String>) -> Self {
        Self {
            emails,
            ..Self::default()
        }
    }

    /// Whether a message author is the bot itself
    pub fn owns(&self, email: &str) -> bool {
        self.emails.iter().any(|e| e == email)
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message fetched from the messaging platform
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub room_id: String,
    #[serde(default)]
    pub person_email: String,
    /// File-only messages carry no text
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl Message {
    pub fn new(id: impl Into<String>, room_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            room_id: room_id.into(),
            person_email: String::new(),
            text: text.into(),
            created: None,
        }
    }

    pub fn with_person_email(mut self, email: impl Into<String>) -> Self {
        self.person_email = email.into();
        self
    }
}

/// Inbound webhook delivery, referencing a message by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub resource_id: String,
    pub room_id: String,
}

/// Reply produced by a command handler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub markdown: String,
    /// Public URLs of files to attach
    pub files: Vec<String>,
}

impl Reply {
    pub fn text(markdown: impl Into<String>) -> Self {
        Self {
            markdown: markdown.into(),
            files: Vec::new(),
        }
    }

    pub fn with_file(mut self, url: impl Into<String>) -> Self {
        self.files.push(url.into());
        self
    }

    /// An empty reply is never posted
    pub fn is_empty(&self) -> bool {
        self.markdown.is_empty() && self.files.is_empty()
    }
}

impl From<String> for Reply {
    fn from(markdown: String) -> Self {
        Self::text(markdown)
    }
}

impl From<&str> for Reply {
    fn from(markdown: &str) -> Self {
        Self::text(markdown)
    }
}

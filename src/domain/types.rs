use chrono::Local;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// One entry in the conversation log. Entries are append-only: once pushed
/// they are never reordered or edited, only cleared wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    /// Local wall-clock time captured at creation.
    pub timestamp: String,
    /// Set only on successful bot replies; names the model that answered.
    pub model: Option<String>,
    /// True only for the synthetic message inserted after a failed request.
    pub is_error: bool,
}

impl Message {
    pub fn user(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::User,
            timestamp: local_time(),
            model: None,
            is_error: false,
        }
    }

    pub fn bot(id: u64, text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::Bot,
            timestamp: local_time(),
            model: Some(model.into()),
            is_error: false,
        }
    }

    pub fn error(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            sender: Sender::Bot,
            timestamp: local_time(),
            model: None,
            is_error: true,
        }
    }
}

fn local_time() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

//! Conversation state and its transitions.
//!
//! `Conversation` is the single owner of the session: the message log, the
//! composer, the awaiting-reply flag, and model selection. Every mutation
//! happens synchronously on the event loop; network work is delegated to the
//! caller via the `ChatTurn` a submit yields.

use crate::gateway::ModelInfo;
use crate::types::Message;
use tracing::debug;

/// Shown when a chat request fails without a backend-supplied explanation.
pub const ERROR_FALLBACK: &str = "Sorry, I encountered an error. Please try again.";

/// One outbound chat request, ready for the gateway. Produced by
/// [`Conversation::submit_user_text`], dispatched by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub text: String,
    pub model: String,
}

pub struct Conversation {
    /// Append-only log; never reordered, only appended to or cleared whole.
    pub messages: Vec<Message>,
    /// Composer text, cleared the moment a send is initiated.
    pub input: String,
    /// Cursor position in the composer, counted in chars.
    pub cursor: usize,
    /// True from send initiation until the matching success or failure event.
    /// The store does not lock; callers disable the send action themselves.
    pub awaiting_reply: bool,
    /// Replaced wholesale on a successful refresh, untouched on failure.
    pub available_models: Vec<ModelInfo>,
    /// Never validated against `available_models`.
    pub selected_model: String,
    next_id: u64,
}

impl Conversation {
    pub fn new(selected_model: impl Into<String>) -> Self {
        Self {
            messages: Vec::new(),
            input: String::new(),
            cursor: 0,
            awaiting_reply: false,
            available_models: Vec::new(),
            selected_model: selected_model.into(),
            next_id: 0,
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Submit composer text. Whitespace-only input is rejected and the
    /// composer is left untouched. Otherwise one user message is appended,
    /// the composer is cleared, and exactly one outbound turn is returned
    /// carrying the trimmed text and the currently selected model.
    pub fn submit_user_text(&mut self, text: &str) -> Option<ChatTurn> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let id = self.next_id();
        self.messages.push(Message::user(id, trimmed));
        self.input.clear();
        self.cursor = 0;
        self.awaiting_reply = true;
        debug!(id, "Appended user message, awaiting reply");

        Some(ChatTurn {
            text: trimmed.to_string(),
            model: self.selected_model.clone(),
        })
    }

    pub fn on_send_success(&mut self, reply_text: impl Into<String>, model_name: impl Into<String>) {
        let id = self.next_id();
        self.messages.push(Message::bot(id, reply_text, model_name));
        self.awaiting_reply = false;
        debug!(id, "Appended bot reply");
    }

    /// Record a failed request as a visible error message. Uses the
    /// backend-supplied detail when present and non-empty, the fixed
    /// fallback text otherwise.
    pub fn on_send_failure(&mut self, detail: Option<String>) {
        let text = detail
            .filter(|detail| !detail.is_empty())
            .unwrap_or_else(|| ERROR_FALLBACK.to_string());
        let id = self.next_id();
        self.messages.push(Message::error(id, text));
        self.awaiting_reply = false;
        debug!(id, "Appended error message");
    }

    /// Wholesale replacement after a successful model refresh. A failed
    /// refresh never reaches this point; the previous list stays.
    pub fn replace_models(&mut self, models: Vec<ModelInfo>) {
        debug!(count = models.len(), "Replacing available model list");
        self.available_models = models;
    }

    pub fn select_model(&mut self, name: impl Into<String>) {
        self.selected_model = name.into();
    }

    /// Empty the log. Leaves `awaiting_reply`, `selected_model`, and
    /// `available_models` alone.
    pub fn clear_conversation(&mut self) {
        self.messages.clear();
    }

    // Composer editing. Cursor moves in char steps; indices are converted to
    // byte offsets at the edit point so multibyte input stays intact.

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map(|(index, _)| index)
            .unwrap_or(self.input.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let index = self.byte_index();
        self.input.insert(index, c);
        self.cursor += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let index = self.byte_index();
        self.input.remove(index);
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.input.chars().count() {
            let index = self.byte_index();
            self.input.remove(index);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.input.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.input.chars().count();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }
}

//! View state for the chat screen.

use crate::store::Conversation;

/// Spinner frames for the awaiting-reply indicator.
pub(super) const SPINNER_FRAMES: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

/// Everything the renderer needs: the conversation store plus view-only
/// state that has no bearing on the conversation contract.
pub struct ChatScreen {
    pub conversation: Conversation,
    /// `u16::MAX` means "pin to bottom"; resolved against content height at
    /// render time.
    pub scroll_offset: u16,
    pub spinner_frame: usize,
    pub show_model_picker: bool,
    pub picker_selected: usize,
    pub status_message: Option<String>,
}

impl ChatScreen {
    pub fn new(selected_model: impl Into<String>) -> Self {
        Self {
            conversation: Conversation::new(selected_model),
            scroll_offset: u16::MAX,
            spinner_frame: 0,
            show_model_picker: false,
            picker_selected: 0,
            status_message: None,
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = u16::MAX;
    }

    /// Clamp the sentinel scroll offset once the rendered height is known.
    pub fn resolve_scroll(&mut self, max_scroll: u16) -> u16 {
        if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }
        self.scroll_offset
    }

    pub fn tick_spinner(&mut self) {
        if self.conversation.awaiting_reply {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn open_model_picker(&mut self) {
        self.show_model_picker = true;
        let models = &self.conversation.available_models;
        self.picker_selected = models
            .iter()
            .position(|m| m.name == self.conversation.selected_model)
            .unwrap_or(0);
    }

    pub fn close_model_picker(&mut self) {
        self.show_model_picker = false;
    }

    pub fn picker_up(&mut self) {
        self.picker_selected = self.picker_selected.saturating_sub(1);
    }

    pub fn picker_down(&mut self) {
        let len = self.conversation.available_models.len();
        if len > 0 {
            self.picker_selected = (self.picker_selected + 1).min(len - 1);
        }
    }

    /// Select the highlighted model and close the picker. No-op when the
    /// list is empty.
    pub fn picker_choose(&mut self) {
        if let Some(model) = self
            .conversation
            .available_models
            .get(self.picker_selected)
            .map(|m| m.name.clone())
        {
            self.conversation.select_model(model.clone());
            self.status_message = Some(format!("Model: {model}"));
        }
        self.show_model_picker = false;
    }
}

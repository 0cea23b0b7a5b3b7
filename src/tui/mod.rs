//! Ratatui chat interface.
//!
//! - `screen.rs`: view state wrapped around the conversation store
//! - `input.rs`: key handling and slash-command parsing
//! - `ui.rs`: frame rendering
//! - `runner.rs`: event loop and async gateway dispatch
//! - `terminal.rs`: raw-mode setup and teardown

mod input;
mod runner;
mod screen;
mod terminal;
mod ui;

pub use input::{CommandResult, InputAction, handle_input, parse_command};
pub use runner::{ResponseEvent, fetch_models, run_chat, send_chat_turn};
pub use screen::ChatScreen;

//! Key handling and slash-command parsing.

use super::screen::ChatScreen;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the event loop should do after a key was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    None,
    /// Submit the composer content as a chat message.
    Submit,
    Exit,
    /// Run a slash command (raw command text, leading slash included).
    Command(String),
    ScrollUp,
    ScrollDown,
    ScrollTop,
    ScrollBottom,
}

/// Handle one terminal event. The composer stays editable while a reply is
/// pending; only the send action itself is suppressed.
pub fn handle_input(screen: &mut ChatScreen, event: Event) -> InputAction {
    let Event::Key(key) = event else {
        return InputAction::None;
    };
    if key.kind != KeyEventKind::Press {
        return InputAction::None;
    }

    if screen.show_model_picker {
        return handle_picker_key(screen, key);
    }
    handle_key(screen, key)
}

fn handle_picker_key(screen: &mut ChatScreen, key: KeyEvent) -> InputAction {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => screen.picker_up(),
        KeyCode::Down | KeyCode::Char('j') => screen.picker_down(),
        KeyCode::Enter => screen.picker_choose(),
        KeyCode::Esc | KeyCode::Char('q') => screen.close_model_picker(),
        _ => {}
    }
    InputAction::None
}

fn handle_key(screen: &mut ChatScreen, key: KeyEvent) -> InputAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('q') => return InputAction::Exit,
            KeyCode::Char('c') => {
                screen.conversation.clear_input();
                return InputAction::None;
            }
            _ => {}
        }
    }

    let conversation = &mut screen.conversation;
    match key.code {
        KeyCode::Enter => {
            if conversation.input.is_empty() {
                return InputAction::None;
            }
            if is_command(&conversation.input) {
                let command = std::mem::take(&mut conversation.input);
                conversation.cursor = 0;
                return InputAction::Command(command);
            }
            if conversation.awaiting_reply {
                // Send is disabled while a reply is pending.
                return InputAction::None;
            }
            InputAction::Submit
        }
        KeyCode::Esc => {
            conversation.clear_input();
            InputAction::None
        }
        KeyCode::Backspace => {
            conversation.delete_char();
            InputAction::None
        }
        KeyCode::Delete => {
            conversation.delete_char_forward();
            InputAction::None
        }
        KeyCode::Left => {
            conversation.move_cursor_left();
            InputAction::None
        }
        KeyCode::Right => {
            conversation.move_cursor_right();
            InputAction::None
        }
        KeyCode::Home => {
            conversation.move_cursor_home();
            InputAction::None
        }
        KeyCode::End => {
            conversation.move_cursor_end();
            InputAction::None
        }
        KeyCode::PageUp => InputAction::ScrollUp,
        KeyCode::PageDown => InputAction::ScrollDown,
        KeyCode::Up if conversation.input.is_empty() => InputAction::ScrollUp,
        KeyCode::Down if conversation.input.is_empty() => InputAction::ScrollDown,
        KeyCode::Char(c) => {
            conversation.insert_char(c);
            InputAction::None
        }
        _ => InputAction::None,
    }
}

pub fn is_command(input: &str) -> bool {
    input.starts_with('/')
}

/// Parse a slash command into its effect.
pub fn parse_command(input: &str) -> CommandResult {
    let cmd = input.trim().trim_start_matches('/');
    let mut parts = cmd.split_whitespace();
    let name = parts.next().unwrap_or("").to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    match name.as_str() {
        "" => CommandResult::None,

        "help" | "?" => CommandResult::ShowHelp,

        "clear" | "reset" | "new" => CommandResult::Clear,

        "models" | "refresh" => CommandResult::RefreshModels,

        "model" => {
            if args.is_empty() {
                CommandResult::OpenModelPicker
            } else {
                CommandResult::SelectModel(args.join(" "))
            }
        }

        "exit" | "quit" | "q" | "bye" => CommandResult::Exit,

        _ => CommandResult::Unknown(name),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    None,
    ShowHelp,
    Clear,
    RefreshModels,
    OpenModelPicker,
    SelectModel(String),
    Exit,
    Unknown(String),
}

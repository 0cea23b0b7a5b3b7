//! Key handling and slash-command tests.

use chatterm::gateway::ModelInfo;
use chatterm::tui::{ChatScreen, CommandResult, InputAction, handle_input, parse_command};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

fn type_text(screen: &mut ChatScreen, text: &str) {
    for c in text.chars() {
        handle_input(screen, key(KeyCode::Char(c)));
    }
}

#[test]
fn typing_fills_the_composer() {
    let mut screen = ChatScreen::new("qwen3:1.7b");

    type_text(&mut screen, "Hello");

    assert_eq!(screen.conversation.input, "Hello");
    assert_eq!(screen.conversation.cursor, 5);
}

#[test]
fn enter_on_empty_composer_does_nothing() {
    let mut screen = ChatScreen::new("qwen3:1.7b");

    let action = handle_input(&mut screen, key(KeyCode::Enter));

    assert_eq!(action, InputAction::None);
}

#[test]
fn enter_submits_plain_text() {
    let mut screen = ChatScreen::new("qwen3:1.7b");
    type_text(&mut screen, "Hello");

    let action = handle_input(&mut screen, key(KeyCode::Enter));

    assert_eq!(action, InputAction::Submit);
}

#[test]
fn enter_is_suppressed_while_awaiting_reply() {
    let mut screen = ChatScreen::new("qwen3:1.7b");
    screen.conversation.awaiting_reply = true;
    type_text(&mut screen, "Hello again");

    let action = handle_input(&mut screen, key(KeyCode::Enter));

    assert_eq!(action, InputAction::None);
    // The composer itself stays editable.
    assert_eq!(screen.conversation.input, "Hello again");
}

#[test]
fn slash_input_becomes_a_command_and_clears_the_composer() {
    let mut screen = ChatScreen::new("qwen3:1.7b");
    type_text(&mut screen, "/help");

    let action = handle_input(&mut screen, key(KeyCode::Enter));

    assert_eq!(action, InputAction::Command("/help".to_string()));
    assert!(screen.conversation.input.is_empty());
    assert_eq!(screen.conversation.cursor, 0);
}

#[test]
fn commands_run_even_while_awaiting_reply() {
    let mut screen = ChatScreen::new("qwen3:1.7b");
    screen.conversation.awaiting_reply = true;
    type_text(&mut screen, "/clear");

    let action = handle_input(&mut screen, key(KeyCode::Enter));

    assert_eq!(action, InputAction::Command("/clear".to_string()));
}

#[test]
fn escape_clears_the_composer() {
    let mut screen = ChatScreen::new("qwen3:1.7b");
    type_text(&mut screen, "draft");

    handle_input(&mut screen, key(KeyCode::Esc));

    assert!(screen.conversation.input.is_empty());
    assert_eq!(screen.conversation.cursor, 0);
}

#[test]
fn ctrl_q_exits() {
    let mut screen = ChatScreen::new("qwen3:1.7b");

    assert_eq!(handle_input(&mut screen, ctrl('q')), InputAction::Exit);
}

#[test]
fn backspace_and_arrows_edit_at_the_cursor() {
    let mut screen = ChatScreen::new("qwen3:1.7b");
    type_text(&mut screen, "helo");

    handle_input(&mut screen, key(KeyCode::Left));
    handle_input(&mut screen, key(KeyCode::Char('l')));

    assert_eq!(screen.conversation.input, "hello");

    handle_input(&mut screen, key(KeyCode::End));
    handle_input(&mut screen, key(KeyCode::Backspace));

    assert_eq!(screen.conversation.input, "hell");
}

#[test]
fn up_scrolls_only_when_composer_is_empty() {
    let mut screen = ChatScreen::new("qwen3:1.7b");

    assert_eq!(handle_input(&mut screen, key(KeyCode::Up)), InputAction::ScrollUp);

    type_text(&mut screen, "x");
    assert_eq!(handle_input(&mut screen, key(KeyCode::Up)), InputAction::None);
}

#[test]
fn picker_navigation_selects_and_closes() {
    let mut screen = ChatScreen::new("qwen3:1.7b");
    screen.conversation.replace_models(vec![
        ModelInfo::named("qwen3:1.7b"),
        ModelInfo::named("llama3.2"),
    ]);
    screen.open_model_picker();
    assert_eq!(screen.picker_selected, 0);

    handle_input(&mut screen, key(KeyCode::Down));
    handle_input(&mut screen, key(KeyCode::Enter));

    assert!(!screen.show_model_picker);
    assert_eq!(screen.conversation.selected_model, "llama3.2");
}

#[test]
fn picker_escape_closes_without_selecting() {
    let mut screen = ChatScreen::new("qwen3:1.7b");
    screen.conversation.replace_models(vec![ModelInfo::named("llama3.2")]);
    screen.open_model_picker();

    handle_input(&mut screen, key(KeyCode::Esc));

    assert!(!screen.show_model_picker);
    assert_eq!(screen.conversation.selected_model, "qwen3:1.7b");
}

#[test]
fn parse_command_maps_names_and_aliases() {
    assert_eq!(parse_command("/help"), CommandResult::ShowHelp);
    assert_eq!(parse_command("/?"), CommandResult::ShowHelp);
    assert_eq!(parse_command("/clear"), CommandResult::Clear);
    assert_eq!(parse_command("/new"), CommandResult::Clear);
    assert_eq!(parse_command("/models"), CommandResult::RefreshModels);
    assert_eq!(parse_command("/model"), CommandResult::OpenModelPicker);
    assert_eq!(
        parse_command("/model llama3.2"),
        CommandResult::SelectModel("llama3.2".to_string())
    );
    assert_eq!(parse_command("/quit"), CommandResult::Exit);
    assert_eq!(parse_command("/q"), CommandResult::Exit);
    assert_eq!(
        parse_command("/frobnicate"),
        CommandResult::Unknown("frobnicate".to_string())
    );
    assert_eq!(parse_command("/"), CommandResult::None);
}

#[test]
fn parse_command_is_case_insensitive_on_the_name() {
    assert_eq!(parse_command("/HELP"), CommandResult::ShowHelp);
    assert_eq!(
        parse_command("/MODEL Qwen3:1.7B"),
        CommandResult::SelectModel("Qwen3:1.7B".to_string())
    );
}

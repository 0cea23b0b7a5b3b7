//! Chat event loop.
//!
//! Single-writer model: the loop owns the screen (and with it the
//! conversation store). Gateway calls run in spawned tasks and report back
//! over an mpsc channel as result-shaped events; the loop applies them in
//! arrival order. Overlapping completions are allowed to race, last one to
//! arrive wins.

use super::input::{CommandResult, InputAction, handle_input, parse_command};
use super::screen::ChatScreen;
use super::terminal::{Tui, init_terminal, restore_terminal};
use super::ui::ChatUI;
use crate::gateway::{BackendGateway, ModelInfo};
use crate::store::ChatTurn;
use crossterm::event;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

/// Outcome of an async gateway call, applied to the store on the loop.
#[derive(Debug)]
pub enum ResponseEvent {
    Reply { text: String, model: String },
    ChatFailed { detail: Option<String> },
    Models(Vec<ModelInfo>),
}

const HELP_TEXT: &str = "Commands: /help /clear /models /model [name] /quit";

/// Run the TUI chat interface until the user exits.
pub async fn run_chat(
    gateway: Arc<dyn BackendGateway>,
    default_model: String,
) -> Result<(), Box<dyn Error>> {
    let mut terminal = init_terminal()?;
    let mut screen = ChatScreen::new(default_model);

    let result = run_loop(&mut terminal, &mut screen, gateway).await;

    restore_terminal()?;
    result
}

async fn run_loop(
    terminal: &mut Tui,
    screen: &mut ChatScreen,
    gateway: Arc<dyn BackendGateway>,
) -> Result<(), Box<dyn Error>> {
    let (tx, mut rx) = mpsc::channel::<ResponseEvent>(16);

    // Mirror the original UI: fetch the model list once on startup.
    tokio::spawn(fetch_models(gateway.clone(), tx.clone()));

    loop {
        terminal.draw(|frame| {
            ChatUI::render(frame, screen);
        })?;

        while let Ok(response) = rx.try_recv() {
            apply_response(screen, response);
        }

        let timeout = if screen.conversation.awaiting_reply {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(50)
        };

        if event::poll(timeout)? {
            let action = handle_input(screen, event::read()?);
            match action {
                InputAction::Exit => return Ok(()),

                InputAction::Submit => {
                    let text = screen.conversation.input.clone();
                    if let Some(turn) = screen.conversation.submit_user_text(&text) {
                        screen.status_message = None;
                        screen.scroll_to_bottom();
                        tokio::spawn(send_chat_turn(gateway.clone(), turn, tx.clone()));
                    }
                }

                InputAction::Command(command) => {
                    if run_command(screen, &command, &gateway, &tx) {
                        return Ok(());
                    }
                }

                InputAction::ScrollUp => screen.scroll_up(),
                InputAction::ScrollDown => screen.scroll_down(),
                InputAction::ScrollTop => screen.scroll_to_top(),
                InputAction::ScrollBottom => screen.scroll_to_bottom(),
                InputAction::None => {}
            }
        } else {
            screen.tick_spinner();
        }
    }
}

fn apply_response(screen: &mut ChatScreen, response: ResponseEvent) {
    match response {
        ResponseEvent::Reply { text, model } => {
            screen.conversation.on_send_success(text, model);
            screen.scroll_to_bottom();
        }
        ResponseEvent::ChatFailed { detail } => {
            screen.conversation.on_send_failure(detail);
            screen.scroll_to_bottom();
        }
        ResponseEvent::Models(models) => {
            screen.conversation.replace_models(models);
            let len = screen.conversation.available_models.len();
            if len > 0 {
                screen.picker_selected = screen.picker_selected.min(len - 1);
            }
        }
    }
}

/// Returns true when the command asks to exit.
fn run_command(
    screen: &mut ChatScreen,
    command: &str,
    gateway: &Arc<dyn BackendGateway>,
    tx: &mpsc::Sender<ResponseEvent>,
) -> bool {
    match parse_command(command) {
        CommandResult::Exit => return true,

        CommandResult::ShowHelp => {
            screen.status_message = Some(HELP_TEXT.to_string());
        }

        CommandResult::Clear => {
            screen.conversation.clear_conversation();
            screen.scroll_to_top();
            screen.status_message = Some("Conversation cleared".to_string());
        }

        CommandResult::RefreshModels => {
            tokio::spawn(fetch_models(gateway.clone(), tx.clone()));
        }

        CommandResult::OpenModelPicker => {
            screen.open_model_picker();
        }

        CommandResult::SelectModel(name) => {
            screen.conversation.select_model(name.clone());
            screen.status_message = Some(format!("Model: {name}"));
        }

        CommandResult::Unknown(name) => {
            screen.status_message = Some(format!("Unknown command: /{name} (try /help)"));
        }

        CommandResult::None => {}
    }
    false
}

/// Dispatch one chat turn and report the outcome. Exactly one event is sent
/// per turn; the store substitutes its fallback text when the failure
/// carries no backend detail.
pub async fn send_chat_turn(
    gateway: Arc<dyn BackendGateway>,
    turn: ChatTurn,
    tx: mpsc::Sender<ResponseEvent>,
) {
    match gateway.send_chat(&turn.text, &turn.model).await {
        Ok(reply) => {
            let _ = tx
                .send(ResponseEvent::Reply {
                    text: reply.response,
                    model: reply.model,
                })
                .await;
        }
        Err(err) => {
            let detail = err.detail().map(str::to_string);
            let _ = tx.send(ResponseEvent::ChatFailed { detail }).await;
        }
    }
}

/// Refresh the model list. Failure is deliberately silent toward the UI:
/// no event is sent, the previous list stays, and the error only reaches
/// the diagnostic log.
pub async fn fetch_models(gateway: Arc<dyn BackendGateway>, tx: mpsc::Sender<ResponseEvent>) {
    match gateway.list_models().await {
        Ok(models) => {
            let _ = tx.send(ResponseEvent::Models(models)).await;
        }
        Err(err) => {
            warn!(error = %err, "Failed to refresh model list");
        }
    }
}

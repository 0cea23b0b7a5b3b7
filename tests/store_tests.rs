//! Conversation store transition tests.

use chatterm::gateway::ModelInfo;
use chatterm::store::{Conversation, ERROR_FALLBACK};
use chatterm::types::Sender;

#[test]
fn new_conversation_is_empty() {
    let conversation = Conversation::new("qwen3:1.7b");

    assert!(conversation.messages.is_empty());
    assert!(conversation.input.is_empty());
    assert!(!conversation.awaiting_reply);
    assert!(conversation.available_models.is_empty());
    assert_eq!(conversation.selected_model, "qwen3:1.7b");
}

#[test]
fn submit_appends_one_user_message_and_clears_composer() {
    let mut conversation = Conversation::new("qwen3:1.7b");
    conversation.input = "Hello".to_string();

    let turn = conversation.submit_user_text("Hello").expect("turn");

    assert_eq!(conversation.messages.len(), 1);
    assert_eq!(conversation.messages[0].sender, Sender::User);
    assert_eq!(conversation.messages[0].text, "Hello");
    assert!(conversation.input.is_empty());
    assert!(conversation.awaiting_reply);
    assert_eq!(turn.text, "Hello");
    assert_eq!(turn.model, "qwen3:1.7b");
}

#[test]
fn submit_trims_surrounding_whitespace() {
    let mut conversation = Conversation::new("qwen3:1.7b");

    let turn = conversation.submit_user_text("  Hello there  ").expect("turn");

    assert_eq!(conversation.messages[0].text, "Hello there");
    assert_eq!(turn.text, "Hello there");
}

#[test]
fn whitespace_only_submit_is_a_noop() {
    let mut conversation = Conversation::new("qwen3:1.7b");
    conversation.input = "   ".to_string();

    assert!(conversation.submit_user_text("   ").is_none());
    assert!(conversation.submit_user_text("").is_none());

    assert!(conversation.messages.is_empty());
    assert_eq!(conversation.input, "   ");
    assert!(!conversation.awaiting_reply);
}

#[test]
fn success_appends_bot_reply_with_model() {
    let mut conversation = Conversation::new("qwen3:1.7b");
    conversation.submit_user_text("Hello").expect("turn");
    assert!(conversation.awaiting_reply);

    conversation.on_send_success("Hi there!", "qwen3:1.7b");

    assert_eq!(conversation.messages.len(), 2);
    let reply = &conversation.messages[1];
    assert_eq!(reply.sender, Sender::Bot);
    assert_eq!(reply.text, "Hi there!");
    assert_eq!(reply.model.as_deref(), Some("qwen3:1.7b"));
    assert!(!reply.is_error);
    assert!(!conversation.awaiting_reply);
}

#[test]
fn reply_model_may_differ_from_requested() {
    let mut conversation = Conversation::new("qwen3:1.7b");
    conversation.submit_user_text("Hello").expect("turn");

    conversation.on_send_success("Hi!", "llama3.2");

    assert_eq!(conversation.messages[1].model.as_deref(), Some("llama3.2"));
}

#[test]
fn failure_with_detail_surfaces_detail_verbatim() {
    let mut conversation = Conversation::new("qwen3:1.7b");
    conversation.submit_user_text("Hello").expect("turn");

    conversation.on_send_failure(Some("Cannot connect to Ollama".to_string()));

    let message = &conversation.messages[1];
    assert_eq!(message.text, "Cannot connect to Ollama");
    assert!(message.is_error);
    assert_eq!(message.sender, Sender::Bot);
    assert!(message.model.is_none());
    assert!(!conversation.awaiting_reply);
}

#[test]
fn failure_without_detail_uses_fallback_text() {
    let mut conversation = Conversation::new("qwen3:1.7b");
    conversation.submit_user_text("Hello").expect("turn");

    conversation.on_send_failure(None);

    let message = &conversation.messages[1];
    assert_eq!(message.text, ERROR_FALLBACK);
    assert!(message.is_error);
}

#[test]
fn failure_with_empty_detail_uses_fallback_text() {
    let mut conversation = Conversation::new("qwen3:1.7b");
    conversation.submit_user_text("Hello").expect("turn");

    conversation.on_send_failure(Some(String::new()));

    assert_eq!(conversation.messages[1].text, ERROR_FALLBACK);
}

#[test]
fn clear_conversation_leaves_other_fields_alone() {
    let mut conversation = Conversation::new("qwen3:1.7b");
    conversation.replace_models(vec![ModelInfo::named("llama3.2")]);
    conversation.select_model("llama3.2");
    conversation.submit_user_text("Hello").expect("turn");
    conversation.on_send_success("Hi!", "llama3.2");
    conversation.submit_user_text("Again").expect("turn");
    assert!(conversation.awaiting_reply);

    conversation.clear_conversation();

    assert!(conversation.messages.is_empty());
    assert!(conversation.awaiting_reply);
    assert_eq!(conversation.selected_model, "llama3.2");
    assert_eq!(conversation.available_models.len(), 1);
}

#[test]
fn replace_models_swaps_list_wholesale() {
    let mut conversation = Conversation::new("qwen3:1.7b");
    conversation.replace_models(vec![
        ModelInfo::named("a"),
        ModelInfo::named("b"),
        ModelInfo::named("c"),
    ]);

    conversation.replace_models(vec![ModelInfo::named("d")]);

    let names: Vec<&str> = conversation
        .available_models
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(names, vec!["d"]);
}

#[test]
fn select_model_accepts_unknown_names() {
    let mut conversation = Conversation::new("qwen3:1.7b");
    assert!(conversation.available_models.is_empty());

    conversation.select_model("not-in-the-list");

    assert_eq!(conversation.selected_model, "not-in-the-list");
}

#[test]
fn send_is_allowed_with_empty_model_list() {
    let mut conversation = Conversation::new("qwen3:1.7b");
    assert!(conversation.available_models.is_empty());

    let turn = conversation.submit_user_text("Hello").expect("turn");
    assert_eq!(turn.model, "qwen3:1.7b");
}

#[test]
fn messages_keep_insertion_order() {
    let mut conversation = Conversation::new("qwen3:1.7b");
    conversation.submit_user_text("first").expect("turn");
    conversation.on_send_success("reply one", "m");
    conversation.submit_user_text("second").expect("turn");
    conversation.on_send_failure(None);

    let texts: Vec<&str> = conversation.messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "reply one", "second", ERROR_FALLBACK]);

    let ids: Vec<u64> = conversation.messages.iter().map(|m| m.id).collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn overlapping_completions_apply_in_arrival_order() {
    // The store places no guard against racing sends; both completions
    // land, in the order they arrive.
    let mut conversation = Conversation::new("qwen3:1.7b");
    conversation.submit_user_text("one").expect("turn");
    conversation.submit_user_text("two").expect("turn");

    conversation.on_send_success("late reply", "m");
    conversation.on_send_failure(Some("early failure".to_string()));

    assert_eq!(conversation.messages.len(), 4);
    assert_eq!(conversation.messages[2].text, "late reply");
    assert_eq!(conversation.messages[3].text, "early failure");
    assert!(!conversation.awaiting_reply);
}

//! Frame rendering for the chat screen.

use super::screen::{ChatScreen, SPINNER_FRAMES};
use crate::types::Sender;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};

pub struct ChatUI;

impl ChatUI {
    pub fn render(frame: &mut Frame, screen: &mut ChatScreen) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // status bar
                Constraint::Min(5),    // messages
                Constraint::Length(3), // composer
                Constraint::Length(1), // help bar
            ])
            .split(area);

        Self::render_status_bar(frame, chunks[0], screen);
        Self::render_messages(frame, chunks[1], screen);
        Self::render_composer(frame, chunks[2], screen);
        Self::render_help_bar(frame, chunks[3], screen);

        if screen.show_model_picker {
            Self::render_model_picker(frame, area, screen);
        }
    }

    fn render_status_bar(frame: &mut Frame, area: Rect, screen: &ChatScreen) {
        let conversation = &screen.conversation;

        let spinner = if conversation.awaiting_reply {
            Span::styled(
                format!(" {} ", SPINNER_FRAMES[screen.spinner_frame]),
                Style::default().fg(Color::Yellow),
            )
        } else {
            Span::raw("")
        };

        let status = screen
            .status_message
            .as_ref()
            .map(|s| Span::styled(format!(" │ {s} "), Style::default().fg(Color::DarkGray)))
            .unwrap_or_else(|| Span::raw(""));

        let line = Line::from(vec![
            Span::styled(" 💬 Chat ", Style::default().fg(Color::Cyan)),
            Span::styled("│ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Model: {}", conversation.selected_model),
                Style::default().fg(Color::Magenta),
            ),
            spinner,
            status,
        ]);

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_messages(frame: &mut Frame, area: Rect, screen: &mut ChatScreen) {
        // Side borders only: they cost width, not height.
        let inner_height = area.height as usize;
        let inner_width = area.width.saturating_sub(2) as usize;
        let conversation = &screen.conversation;

        let mut lines: Vec<Line> = Vec::new();

        if conversation.messages.is_empty() && !conversation.awaiting_reply {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "  Welcome! Start a conversation with the assistant.",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(Span::styled(
                "  Type a message and press Enter, or /help for commands.",
                Style::default().fg(Color::DarkGray),
            )));
        }

        for message in &conversation.messages {
            let (prefix, style) = match message.sender {
                Sender::User => (
                    "You: ",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Sender::Bot if message.is_error => ("AI: ", Style::default().fg(Color::Red)),
                Sender::Bot => ("AI: ", Style::default().fg(Color::Green)),
            };

            let body_style = if message.is_error {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };

            let indent = " ".repeat(prefix.len());
            let wrap_width = inner_width.saturating_sub(prefix.len());
            for (row_index, row) in wrap_text(&message.text, wrap_width).into_iter().enumerate() {
                if row_index == 0 {
                    lines.push(Line::from(vec![
                        Span::styled(prefix, style),
                        Span::styled(row, body_style),
                    ]));
                } else {
                    lines.push(Line::styled(format!("{indent}{row}"), body_style));
                }
            }

            // Caption: timestamp, plus the producing model on bot replies.
            let caption = match &message.model {
                Some(model) => format!("{} • {}", message.timestamp, model),
                None => message.timestamp.clone(),
            };
            lines.push(Line::from(Span::styled(
                format!("     {caption}"),
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
        }

        if conversation.awaiting_reply {
            lines.push(Line::from(Span::styled(
                format!("AI: {} Thinking...", SPINNER_FRAMES[screen.spinner_frame]),
                Style::default().fg(Color::Yellow),
            )));
        }

        // Lines are pre-wrapped to the inner width, so their count is the
        // rendered height and the scroll offset maps one-to-one onto rows.
        let scroll = screen.resolve_scroll(max_scroll(lines.len(), inner_height));

        let block = Block::default()
            .borders(Borders::LEFT | Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray));
        let para = Paragraph::new(lines).block(block).scroll((scroll, 0));
        frame.render_widget(para, area);
    }

    fn render_composer(frame: &mut Frame, area: Rect, screen: &ChatScreen) {
        let conversation = &screen.conversation;

        let display = if conversation.input.is_empty() {
            Span::styled(
                "Type your message...",
                Style::default().fg(Color::DarkGray),
            )
        } else {
            let mut chars: Vec<char> = conversation.input.chars().collect();
            if conversation.cursor >= chars.len() {
                chars.push('_');
            } else {
                chars.insert(conversation.cursor, '|');
            }
            Span::styled(
                chars.into_iter().collect::<String>(),
                Style::default().fg(Color::White),
            )
        };

        let line = Line::from(vec![
            Span::styled(
                "> ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            display,
        ]);

        let border_style = if conversation.awaiting_reply {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let title = if is_command_input(&conversation.input) {
            " Command "
        } else {
            " Message "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title);
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_help_bar(frame: &mut Frame, area: Rect, screen: &ChatScreen) {
        let help = if screen.show_model_picker {
            Line::from(vec![
                Span::styled(" ↑/↓", Style::default().fg(Color::Green)),
                Span::raw(": Navigate │ "),
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::raw(": Select │ "),
                Span::styled("Esc", Style::default().fg(Color::Red)),
                Span::raw(": Close "),
            ])
        } else if screen.conversation.awaiting_reply {
            Line::from(Span::styled(
                " Waiting for reply... (you can keep typing) ",
                Style::default().fg(Color::Yellow),
            ))
        } else {
            Line::from(vec![
                Span::styled(" Enter", Style::default().fg(Color::Green)),
                Span::raw(": Send │ "),
                Span::styled("/help", Style::default().fg(Color::Green)),
                Span::raw(": Commands │ "),
                Span::styled("PgUp/PgDn", Style::default().fg(Color::Green)),
                Span::raw(": Scroll │ "),
                Span::styled("Ctrl+Q", Style::default().fg(Color::Red)),
                Span::raw(": Quit "),
            ])
        };
        frame.render_widget(Paragraph::new(help), area);
    }

    fn render_model_picker(frame: &mut Frame, area: Rect, screen: &ChatScreen) {
        let popup = centered_rect(50, 50, area);
        frame.render_widget(Clear, popup);

        let conversation = &screen.conversation;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Select Model ");

        if conversation.available_models.is_empty() {
            let text = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  No models available.",
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(Span::styled(
                    "  Use /models to refresh the list.",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            frame.render_widget(Paragraph::new(text).block(block), popup);
            return;
        }

        let items: Vec<ListItem> = conversation
            .available_models
            .iter()
            .map(|model| {
                let marker = if model.name == conversation.selected_model {
                    "● "
                } else {
                    "  "
                };
                let mut spans = vec![Span::raw(marker), Span::raw(model.name.clone())];
                if let Some(size) = &model.size {
                    spans.push(Span::styled(
                        format!("  ({size})"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let mut state = ListState::default();
        state.select(Some(
            screen
                .picker_selected
                .min(conversation.available_models.len() - 1),
        ));

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(Color::Rgb(50, 60, 80))
                .add_modifier(Modifier::BOLD),
        );
        frame.render_stateful_widget(list, popup, &mut state);
    }
}

fn is_command_input(input: &str) -> bool {
    super::input::is_command(input)
}

fn max_scroll(total_rows: usize, viewport_rows: usize) -> u16 {
    u16::try_from(total_rows.saturating_sub(viewport_rows)).unwrap_or(u16::MAX)
}

/// Greedy word wrap to a fixed column width, counted in chars. Words wider
/// than the viewport are hard-split; empty source lines survive as empty
/// rows.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for source in text.lines() {
        let mut current = String::new();
        let mut used = 0usize;
        for word in source.split_whitespace() {
            let len = word.chars().count();
            if used > 0 && used + 1 + len <= width {
                current.push(' ');
                current.push_str(word);
                used += 1 + len;
                continue;
            }
            if used > 0 {
                rows.push(std::mem::take(&mut current));
                used = 0;
            }
            if len <= width {
                current.push_str(word);
                used = len;
            } else {
                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(width) {
                    if used > 0 {
                        rows.push(std::mem::take(&mut current));
                    }
                    current = chunk.iter().collect();
                    used = chunk.len();
                }
            }
        }
        rows.push(current);
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1])[1]
}

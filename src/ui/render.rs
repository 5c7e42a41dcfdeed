//! Top-level rendering
//!
//! Draws the chat panel, the status bar, and the model selector modal when
//! it is open. Returns the model badge area so the event loop can detect
//! clicks on it.

use crate::panels::ChatPanel;
use crate::state::AppState;
use crate::ui::layout::get_layout;
use crate::ui::model_selector::ModelSelector;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the whole frame; returns the model badge area for hit testing
pub fn render(
    frame: &mut Frame,
    state: &AppState,
    chat: &mut ChatPanel,
    selector: &mut ModelSelector,
) -> Rect {
    let layout = get_layout(frame.area());

    let modal_open = state.input_mode.is_modal_open("model_selector");
    chat.render(frame, layout.chat, !modal_open);

    let badge_area = render_status_bar(frame, state, chat, layout.status);

    if modal_open {
        selector.render(frame, frame.area());
    }

    badge_area
}

/// Render the bottom status bar; returns the model badge area
fn render_status_bar(
    frame: &mut Frame,
    state: &AppState,
    chat: &ChatPanel,
    area: Rect,
) -> Rect {
    let badge_text = format!(" {} ", chat.current_model());
    let mut spans = vec![Span::styled(
        badge_text.clone(),
        Style::default()
            .fg(Color::White)
            .bg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(message) = &state.status_message {
        let color = if message.is_error {
            Color::Red
        } else {
            Color::Green
        };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            message.text.clone(),
            Style::default().fg(color),
        ));
    } else if chat.is_waiting() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "Waiting for response…".to_string(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let hints = "Ctrl+M: Model  Ctrl+T: Thinking  Ctrl+Q: Quit ";
    let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let pad = (area.width as usize).saturating_sub(used + hints.chars().count());
    spans.push(Span::raw(" ".repeat(pad)));
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    Rect::new(
        area.x,
        area.y,
        (badge_text.chars().count() as u16).min(area.width),
        1,
    )
}

//! Response rendering
//!
//! Splits a raw model message into its `<think>` reasoning section and the
//! answer body, then assembles the styled transcript fragment for one entry:
//! a model label, a collapsible "Thinking" block keyed by the entry's
//! fragment id, and the transformed answer text.

use super::markdown::MarkdownRenderer;
use crate::llm::Role;
use crate::transcript::ChatMessage;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";

/// Literal separator between the reasoning section and the answer body
const ANSWER_SEPARATOR: &str = "</think>\n\n";

/// Thinking/answer halves of a raw model message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub thinking: Option<String>,
    pub answer: String,
}

/// Split a raw model message into reasoning and answer.
///
/// The reasoning section is the substring strictly between the first
/// `<think>` and the last `</think>`. The answer is the text after the
/// first `"</think>\n\n"`. Absent or inverted delimiters degrade: no
/// thinking block, and the answer falls back to the text after the last
/// `</think>`, or to the whole message when no delimiter exists.
pub fn split_response(message: &str) -> ParsedResponse {
    let open = message.find(THINK_OPEN);
    let close = message.rfind(THINK_CLOSE);

    let thinking = match (open, close) {
        (Some(start), Some(end)) if start + THINK_OPEN.len() <= end => {
            let body = message[start + THINK_OPEN.len()..end].trim();
            if body.is_empty() {
                None
            } else {
                Some(body.to_string())
            }
        }
        _ => None,
    };

    let answer = if let Some(idx) = message.find(ANSWER_SEPARATOR) {
        message[idx + ANSWER_SEPARATOR.len()..].to_string()
    } else if let Some(end) = close {
        message[end + THINK_CLOSE.len()..]
            .trim_start_matches('\n')
            .to_string()
    } else {
        message.to_string()
    };

    ParsedResponse { thinking, answer }
}

/// Styled lines for one transcript entry
pub struct RenderedFragment {
    /// Fragment id of the source entry
    pub id: String,

    pub lines: Vec<Line<'static>>,

    /// Index into `lines` of the clickable "Thinking" toggle, when present
    pub toggle_line: Option<usize>,
}

/// Builds the styled transcript fragment for a single entry
pub struct ResponseRenderer {
    markdown: MarkdownRenderer,
}

impl Default for ResponseRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseRenderer {
    pub fn new() -> Self {
        Self {
            markdown: MarkdownRenderer::new(Style::default().fg(Color::White)),
        }
    }

    /// Render one transcript entry to display lines.
    ///
    /// `expanded` controls whether the thinking section body is shown.
    pub fn render_entry(&self, entry: &ChatMessage, expanded: bool) -> RenderedFragment {
        match entry.role {
            Role::User => self.render_user(entry),
            Role::Assistant => self.render_assistant(entry, expanded),
            Role::Notice => self.render_notice(entry),
        }
    }

    fn render_user(&self, entry: &ChatMessage) -> RenderedFragment {
        let mut lines = vec![Line::from(Span::styled(
            "You:".to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ))];
        for content_line in entry.raw_text.lines() {
            lines.push(Line::from(Span::styled(
                format!("  {}", content_line),
                Style::default().fg(Color::Green),
            )));
        }
        RenderedFragment {
            id: entry.fragment_id.clone(),
            lines,
            toggle_line: None,
        }
    }

    fn render_assistant(&self, entry: &ChatMessage, expanded: bool) -> RenderedFragment {
        let parsed = split_response(&entry.raw_text);
        let mut lines = Vec::new();
        let mut toggle_line = None;

        let mut header = vec![Span::styled(
            format!("{}:", entry.model),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )];
        if entry.tokens_used > 0 {
            header.push(Span::styled(
                format!("  {} tokens", entry.tokens_used),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(header));

        if let Some(ref thinking) = parsed.thinking {
            let marker = if expanded { "[-]" } else { "[+]" };
            toggle_line = Some(lines.len());
            lines.push(Line::from(Span::styled(
                format!("  {} Thinking", marker),
                Style::default().fg(Color::Yellow),
            )));
            if expanded {
                for thought_line in thinking.lines() {
                    lines.push(Line::from(Span::styled(
                        format!("    {}", thought_line),
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::ITALIC),
                    )));
                }
            }
        }

        for line in self.markdown.render(&parsed.answer) {
            let mut indented = vec![Span::raw("  ")];
            indented.extend(line.spans);
            lines.push(Line::from(indented));
        }

        RenderedFragment {
            id: entry.fragment_id.clone(),
            lines,
            toggle_line,
        }
    }

    fn render_notice(&self, entry: &ChatMessage) -> RenderedFragment {
        let lines = entry
            .raw_text
            .lines()
            .map(|content_line| {
                Line::from(Span::styled(
                    content_line.to_string(),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ))
            })
            .collect();
        RenderedFragment {
            id: entry.fragment_id.clone(),
            lines,
            toggle_line: None,
        }
    }
}

//! Chat panel
//!
//! Input editing, request submission, transcript rendering with collapsible
//! thinking sections, and stick-to-bottom scrolling. The transcript store is
//! the source of truth; display lines are derived from it every frame.

use crate::events::Event;
use crate::llm::{ModelResponse, SharedBackend};
use crate::transcript::{ChatMessage, Transcript};
use crate::ui::fragment::{split_response, ResponseRenderer};
use crate::ui::scroll;
use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::collections::HashSet;

/// Chat panel state
pub struct ChatPanel {
    /// Ordered chat history
    transcript: Transcript,

    renderer: ResponseRenderer,

    /// Current input buffer
    input: String,

    /// Input cursor position (byte offset)
    cursor: usize,

    /// Monotonic request generation counter
    generation: u64,

    /// Generation of the request currently in flight, if any
    in_flight: Option<u64>,

    /// Text of the outstanding submission, restored to the input on error
    last_sent: Option<String>,

    backend: SharedBackend,

    /// Event sender handed to the backend for completions
    event_tx: Sender<Event>,

    /// Scroll offset from the bottom (0 = pinned to the newest line)
    scroll_offset: usize,

    /// Expanded thinking sections by fragment id
    expanded: HashSet<String>,

    /// Send the previous answer as the `context` form parameter
    send_context: bool,

    /// Expand new thinking sections instead of collapsing them
    expand_thinking: bool,

    /// Model label override from the selector (display only)
    model_label: Option<String>,

    /// History inner area from the last render, for mouse hit testing
    history_area: Rect,

    /// Absolute line index of each thinking toggle, from the last render
    toggle_lines: Vec<(usize, String)>,

    /// Total history line count from the last render
    history_line_count: usize,
}

impl ChatPanel {
    /// Create a new chat panel talking to the given backend
    pub fn new(event_tx: Sender<Event>, backend: SharedBackend) -> Self {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::notice(format!(
            "Chatting with {}. Type a message and press Enter.",
            backend.model()
        )));

        Self {
            transcript,
            renderer: ResponseRenderer::new(),
            input: String::new(),
            cursor: 0,
            generation: 0,
            in_flight: None,
            last_sent: None,
            backend,
            event_tx,
            scroll_offset: 0,
            expanded: HashSet::new(),
            send_context: true,
            expand_thinking: false,
            model_label: None,
            history_area: Rect::default(),
            toggle_lines: Vec::new(),
            history_line_count: 0,
        }
    }

    /// Enable or disable the `context` form parameter
    pub fn set_send_context(&mut self, enabled: bool) {
        self.send_context = enabled;
    }

    /// Expand new thinking sections by default
    pub fn set_expand_thinking(&mut self, enabled: bool) {
        self.expand_thinking = enabled;
    }

    /// Override the displayed model label (selector choice)
    pub fn set_model_label(&mut self, model: &str) {
        self.model_label = Some(model.to_string());
    }

    /// Model label shown in the title and status bar
    pub fn current_model(&self) -> String {
        self.model_label
            .clone()
            .unwrap_or_else(|| self.backend.model())
    }

    /// Whether a request is outstanding
    pub fn is_waiting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Transcript entries (read-only view)
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Submit the current input
    ///
    /// Empty or whitespace-only input is ignored, and so is a submit while a
    /// request is outstanding.
    pub fn send_message(&mut self) {
        let trimmed = self.input.trim().to_string();
        if trimmed.is_empty() || self.in_flight.is_some() {
            return;
        }

        self.input.clear();
        self.cursor = 0;

        let context = if self.send_context {
            self.transcript
                .last_answer()
                .map(|m| split_response(&m.raw_text).answer)
        } else {
            None
        };

        self.transcript.push(ChatMessage::user(trimmed.clone()));
        self.scroll_offset = 0;

        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.last_sent = Some(trimmed.clone());

        self.backend.send(
            &trimmed,
            context.as_deref(),
            self.generation,
            self.event_tx.clone(),
        );
    }

    /// Handle a completed round-trip; completions from superseded requests
    /// are discarded.
    pub fn handle_response(&mut self, generation: u64, response: &ModelResponse) {
        if self.in_flight != Some(generation) {
            return;
        }
        self.in_flight = None;
        self.last_sent = None;

        let entry = ChatMessage::assistant(&response.model, &response.message, response.token_used);
        if self.expand_thinking {
            self.expanded.insert(entry.fragment_id.clone());
        }
        self.transcript.push(entry);
        self.scroll_offset = 0;
    }

    /// Handle a failed round-trip: inline notice, typed text restored.
    pub fn handle_error(&mut self, generation: u64, message: &str) {
        if self.in_flight != Some(generation) {
            return;
        }
        self.in_flight = None;

        self.transcript
            .push(ChatMessage::notice(format!("Error: {}", message)));
        if let Some(text) = self.last_sent.take() {
            self.cursor = text.len();
            self.input = text;
        }
        self.scroll_offset = 0;
    }

    /// Toggle a thinking section by fragment id
    pub fn toggle_thinking(&mut self, id: &str) {
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
    }

    /// Toggle the most recent thinking section
    pub fn toggle_last_thinking(&mut self) {
        let id = self
            .transcript
            .entries()
            .iter()
            .rev()
            .find(|m| split_response(&m.raw_text).thinking.is_some())
            .map(|m| m.fragment_id.clone());
        if let Some(id) = id {
            self.toggle_thinking(&id);
        }
    }

    /// Whether a fragment's thinking section is expanded
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: &KeyEvent) {
        match key.code {
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.toggle_last_thinking();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
            }
            KeyCode::Backspace => {
                self.backspace();
            }
            // Shift+Enter or Alt+Enter: insert newline
            KeyCode::Enter
                if key.modifiers.contains(KeyModifiers::SHIFT)
                    || key.modifiers.contains(KeyModifiers::ALT) =>
            {
                self.insert_char('\n');
            }
            // Plain Enter: send message
            KeyCode::Enter => {
                self.send_message();
            }
            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    while self.cursor > 0 && !self.input.is_char_boundary(self.cursor) {
                        self.cursor -= 1;
                    }
                }
            }
            KeyCode::Right => {
                if self.cursor < self.input.len() {
                    self.cursor += 1;
                    while self.cursor < self.input.len() && !self.input.is_char_boundary(self.cursor)
                    {
                        self.cursor += 1;
                    }
                }
            }
            KeyCode::Home => {
                self.cursor = self.input[..self.cursor]
                    .rfind('\n')
                    .map(|p| p + 1)
                    .unwrap_or(0);
            }
            KeyCode::End => {
                self.cursor = self.input[self.cursor..]
                    .find('\n')
                    .map(|p| self.cursor + p)
                    .unwrap_or(self.input.len());
            }
            KeyCode::PageUp => {
                let page = (self.history_area.height as usize).max(1);
                self.scroll_offset = self.scroll_offset.saturating_add(page);
            }
            KeyCode::PageDown => {
                let page = (self.history_area.height as usize).max(1);
                self.scroll_offset = self.scroll_offset.saturating_sub(page);
            }
            _ => {}
        }
    }

    /// Handle a mouse event
    pub fn handle_mouse(&mut self, mouse: &MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.scroll_offset = self.scroll_offset.saturating_add(3);
            }
            MouseEventKind::ScrollDown => {
                self.scroll_offset = self.scroll_offset.saturating_sub(3);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_click(mouse.column, mouse.row);
            }
            _ => {}
        }
    }

    /// Click on a "Thinking" toggle line expands or collapses that section
    fn handle_click(&mut self, x: u16, y: u16) {
        let area = self.history_area;
        if x < area.x || x >= area.x + area.width || y < area.y || y >= area.y + area.height {
            return;
        }
        let visible = area.height as usize;
        let top = scroll::max_scroll(visible, self.history_line_count)
            .saturating_sub(self.scroll_offset);
        let line_index = top + (y - area.y) as usize;

        let id = self
            .toggle_lines
            .iter()
            .find(|(idx, _)| *idx == line_index)
            .map(|(_, id)| id.clone());
        if let Some(id) = id {
            self.toggle_thinking(&id);
        }
    }

    /// Insert character at cursor
    fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete character before cursor
    fn backspace(&mut self) {
        if self.cursor > 0 {
            let mut new_cursor = self.cursor - 1;
            while !self.input.is_char_boundary(new_cursor) && new_cursor > 0 {
                new_cursor -= 1;
            }
            self.input.remove(new_cursor);
            self.cursor = new_cursor;
        }
    }

    /// Derive display lines from the transcript, refreshing toggle indices
    fn format_history(&mut self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        self.toggle_lines.clear();

        let mut toggles = Vec::new();
        for entry in self.transcript.entries() {
            let expanded = self.expanded.contains(&entry.fragment_id);
            let fragment = self.renderer.render_entry(entry, expanded);
            if let Some(idx) = fragment.toggle_line {
                toggles.push((lines.len() + idx, fragment.id.clone()));
            }
            lines.extend(fragment.lines);
            lines.push(Line::from("")); // Spacing between messages
        }
        self.toggle_lines = toggles;

        if self.in_flight.is_some() {
            lines.push(Line::from(Span::styled(
                "▌".to_string(),
                Style::default().fg(Color::Cyan),
            )));
        }

        lines
    }

    /// Calculate input height based on content
    fn input_height(&self, width: u16) -> u16 {
        if width == 0 {
            return 3;
        }
        let inner_width = width.saturating_sub(2) as usize;
        if inner_width == 0 {
            return 3;
        }

        let mut line_count = 0;
        for line in self.input.split('\n') {
            line_count += (line.len() / inner_width) + 1;
        }

        (line_count as u16 + 2).clamp(3, 8)
    }

    /// Render the panel
    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let input_height = self.input_height(area.width);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(input_height)])
            .split(area);

        let history_inner = Block::default().borders(Borders::ALL).inner(chunks[0]);
        let history_lines = self.format_history();

        self.history_area = history_inner;
        self.history_line_count = history_lines.len();

        // Stick to the bottom unless the user scrolled up
        let visible_height = history_inner.height as usize;
        let max_scroll = scroll::max_scroll(visible_height, history_lines.len());
        self.scroll_offset = self.scroll_offset.min(max_scroll);
        let top = max_scroll - self.scroll_offset;

        let scroll_info = scroll::scroll_indicator(top, visible_height, history_lines.len());
        let waiting = if self.in_flight.is_some() { " …" } else { "" };
        let title = format!(" Chat ({}){}{} ", self.current_model(), waiting, scroll_info);

        let history = Paragraph::new(history_lines)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
            .wrap(Wrap { trim: false })
            .scroll((top as u16, 0));
        frame.render_widget(history, chunks[0]);

        let input = Paragraph::new(self.input.as_str())
            .block(
                Block::default()
                    .title(" Message (Shift+Enter: newline) ")
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(input, chunks[1]);

        if focused {
            let input_inner = Block::default().borders(Borders::ALL).inner(chunks[1]);
            let inner_width = input_inner.width.max(1) as usize;

            let before = &self.input[..self.cursor];
            let row = before.matches('\n').count()
                + before
                    .split('\n')
                    .last()
                    .map_or(0, |l| l.len() / inner_width.max(1));
            let col = before.split('\n').last().map_or(0, |l| l.len() % inner_width);

            let cursor_x = input_inner.x + col as u16;
            let cursor_y = input_inner.y + row as u16;
            if cursor_x < input_inner.x + input_inner.width
                && cursor_y < input_inner.y + input_inner.height
            {
                frame.set_cursor_position((cursor_x, cursor_y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventBus;
    use crate::llm::ChatBackend;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    /// Records submissions instead of hitting the network
    struct MockBackend {
        sent: Mutex<Vec<(String, Option<String>, u64)>>,
    }

    impl MockBackend {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<(String, Option<String>, u64)> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl ChatBackend for MockBackend {
        fn send(
            &self,
            user_input: &str,
            context: Option<&str>,
            generation: u64,
            _event_tx: Sender<Event>,
        ) {
            self.sent.lock().unwrap().push((
                user_input.to_string(),
                context.map(str::to_string),
                generation,
            ));
        }

        fn model(&self) -> String {
            "mock-model".to_string()
        }
    }

    fn panel_with_mock() -> (ChatPanel, Arc<MockBackend>) {
        let bus = EventBus::new(16);
        let mock = MockBackend::new();
        let panel = ChatPanel::new(bus.sender(), mock.clone());
        (panel, mock)
    }

    fn type_text(panel: &mut ChatPanel, text: &str) {
        for c in text.chars() {
            panel.insert_char(c);
        }
    }

    fn response(message: &str) -> ModelResponse {
        serde_json::from_str(&serde_json::json!({
            "model": "mock-model",
            "message": message,
            "token_used": 5
        })
        .to_string())
        .unwrap()
    }

    #[test]
    fn test_send_posts_trimmed_input_exactly_once() {
        let (mut panel, mock) = panel_with_mock();
        type_text(&mut panel, "  hello world  ");
        panel.send_message();

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "hello world");
    }

    #[test]
    fn test_whitespace_input_produces_no_request_and_no_entry() {
        let (mut panel, mock) = panel_with_mock();
        let before = panel.transcript().len();

        type_text(&mut panel, "   \n  ");
        panel.send_message();

        assert!(mock.requests().is_empty());
        assert_eq!(panel.transcript().len(), before);
    }

    #[test]
    fn test_send_suppressed_while_request_outstanding() {
        let (mut panel, mock) = panel_with_mock();
        type_text(&mut panel, "first");
        panel.send_message();
        assert!(panel.is_waiting());

        type_text(&mut panel, "second");
        panel.send_message();

        assert_eq!(mock.requests().len(), 1);
    }

    #[test]
    fn test_response_appends_entry_and_pins_scroll() {
        let (mut panel, _mock) = panel_with_mock();
        type_text(&mut panel, "q");
        panel.send_message();
        panel.scroll_offset = 40;

        panel.handle_response(1, &response("<think>hm</think>\n\nanswer"));

        assert!(!panel.is_waiting());
        assert_eq!(panel.scroll_offset, 0);
        let last = panel.transcript().entries().last().unwrap();
        assert_eq!(last.raw_text, "<think>hm</think>\n\nanswer");
        assert_eq!(last.tokens_used, 5);
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let (mut panel, _mock) = panel_with_mock();
        type_text(&mut panel, "q");
        panel.send_message();
        let before = panel.transcript().len();

        panel.handle_response(99, &response("late"));

        assert_eq!(panel.transcript().len(), before);
        assert!(panel.is_waiting());
    }

    #[test]
    fn test_error_adds_notice_and_restores_input() {
        let (mut panel, _mock) = panel_with_mock();
        type_text(&mut panel, "lost text");
        panel.send_message();
        assert!(panel.input.is_empty());

        panel.handle_error(1, "Connection error: refused");

        assert!(!panel.is_waiting());
        assert_eq!(panel.input, "lost text");
        let last = panel.transcript().entries().last().unwrap();
        assert_eq!(last.raw_text, "Error: Connection error: refused");
    }

    #[test]
    fn test_stale_error_is_discarded() {
        let (mut panel, _mock) = panel_with_mock();
        type_text(&mut panel, "q");
        panel.send_message();
        let before = panel.transcript().len();

        panel.handle_error(99, "too late");

        assert_eq!(panel.transcript().len(), before);
        assert!(panel.input.is_empty());
    }

    #[test]
    fn test_context_carries_previous_answer() {
        let (mut panel, mock) = panel_with_mock();
        type_text(&mut panel, "q1");
        panel.send_message();
        panel.handle_response(1, &response("<think>t</think>\n\nfirst answer"));

        type_text(&mut panel, "q2");
        panel.send_message();

        let requests = mock.requests();
        assert_eq!(requests[0].1, None);
        assert_eq!(requests[1].1.as_deref(), Some("first answer"));
    }

    #[test]
    fn test_context_disabled() {
        let (mut panel, mock) = panel_with_mock();
        panel.set_send_context(false);
        type_text(&mut panel, "q1");
        panel.send_message();
        panel.handle_response(1, &response("answer"));

        type_text(&mut panel, "q2");
        panel.send_message();

        assert_eq!(mock.requests()[1].1, None);
    }

    #[test]
    fn test_generations_increase_per_request() {
        let (mut panel, mock) = panel_with_mock();
        type_text(&mut panel, "a");
        panel.send_message();
        panel.handle_response(1, &response("x"));
        type_text(&mut panel, "b");
        panel.send_message();

        let generations: Vec<u64> = mock.requests().iter().map(|r| r.2).collect();
        assert_eq!(generations, vec![1, 2]);
    }

    #[test]
    fn test_sequential_responses_get_unique_fragment_ids() {
        let (mut panel, _mock) = panel_with_mock();
        for i in 0..20 {
            type_text(&mut panel, "q");
            panel.send_message();
            panel.handle_response(i + 1, &response("<think>t</think>\n\na"));
        }

        let ids: HashSet<&str> = panel
            .transcript()
            .entries()
            .iter()
            .map(|m| m.fragment_id.as_str())
            .collect();
        assert_eq!(ids.len(), panel.transcript().len());
    }

    #[test]
    fn test_toggle_last_thinking() {
        let (mut panel, _mock) = panel_with_mock();
        type_text(&mut panel, "q");
        panel.send_message();
        panel.handle_response(1, &response("<think>why</think>\n\nbecause"));

        let id = panel.transcript().entries().last().unwrap().fragment_id.clone();
        assert!(!panel.is_expanded(&id));

        panel.toggle_last_thinking();
        assert!(panel.is_expanded(&id));

        panel.toggle_last_thinking();
        assert!(!panel.is_expanded(&id));
    }

    #[test]
    fn test_enter_key_sends() {
        let (mut panel, mock) = panel_with_mock();
        type_text(&mut panel, "hi");
        panel.handle_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(mock.requests().len(), 1);
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let (mut panel, mock) = panel_with_mock();
        type_text(&mut panel, "line1");
        panel.handle_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
        type_text(&mut panel, "line2");
        assert!(mock.requests().is_empty());
        assert_eq!(panel.input, "line1\nline2");
    }

    #[test]
    fn test_backspace_respects_char_boundaries() {
        let (mut panel, _mock) = panel_with_mock();
        type_text(&mut panel, "aé");
        panel.backspace();
        assert_eq!(panel.input, "a");
        panel.backspace();
        assert!(panel.input.is_empty());
        panel.backspace();
        assert!(panel.input.is_empty());
    }
}

//! Model selector modal
//!
//! Independent dropdown helper with no hooks into the chat logic: a list of
//! model names filtered by case-insensitive substring match against typed
//! text. Closed by Esc or a click outside the modal.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Model selector state
pub struct ModelSelector {
    /// All model names
    models: Vec<String>,

    /// Typed filter text
    filter: String,

    /// Selected index into the filtered list
    selected: usize,

    /// Currently active model (the one being displayed)
    current_model: String,

    /// Cached modal area for hit testing
    modal_area: Option<Rect>,

    /// Cached list area for hit testing
    list_area: Option<Rect>,
}

impl Default for ModelSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSelector {
    pub fn new() -> Self {
        Self {
            models: Vec::new(),
            filter: String::new(),
            selected: 0,
            current_model: String::new(),
            modal_area: None,
            list_area: None,
        }
    }

    /// Set available models and reset the filter
    pub fn set_models(&mut self, models: Vec<String>, current: &str) {
        self.current_model = current.to_string();
        self.filter.clear();
        self.selected = models.iter().position(|m| m == current).unwrap_or(0);
        self.models = models;
    }

    /// Models matching the current filter, case-insensitive substring
    pub fn filtered(&self) -> Vec<&String> {
        let needle = self.filter.to_uppercase();
        self.models
            .iter()
            .filter(|m| needle.is_empty() || m.to_uppercase().contains(&needle))
            .collect()
    }

    /// Append a character to the filter
    pub fn insert_char(&mut self, c: char) {
        self.filter.push(c);
        self.selected = 0;
    }

    /// Remove the last filter character
    pub fn backspace(&mut self) {
        self.filter.pop();
        self.selected = 0;
    }

    /// Move selection up
    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Move selection down
    pub fn down(&mut self) {
        let count = self.filtered().len();
        if count > 0 && self.selected < count - 1 {
            self.selected += 1;
        }
    }

    /// Get the selected model
    pub fn selected_model(&self) -> Option<String> {
        self.filtered().get(self.selected).map(|s| s.to_string())
    }

    /// Check if a point is inside the modal
    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.modal_area
            .map(|r| x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height)
            .unwrap_or(false)
    }

    /// Handle mouse click at position, returns true if an item was clicked
    pub fn handle_click(&mut self, x: u16, y: u16) -> bool {
        if let Some(list_area) = self.list_area {
            if x >= list_area.x
                && x < list_area.x + list_area.width
                && y >= list_area.y
                && y < list_area.y + list_area.height
            {
                let clicked_index = (y - list_area.y) as usize;
                if clicked_index < self.filtered().len() {
                    self.selected = clicked_index;
                    return true;
                }
            }
        }
        false
    }

    /// Render the modal centered on the screen
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = 44.min(area.width);
        let height = 14.min(area.height);
        let modal = Rect::new(
            area.x + (area.width.saturating_sub(width)) / 2,
            area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        );
        self.modal_area = Some(modal);

        frame.render_widget(Clear, modal);

        let block = Block::default()
            .title(" Model ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        // First inner line: filter text
        let filter_line = Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(Color::DarkGray)),
            Span::raw(self.filter.clone()),
            Span::styled("▌", Style::default().fg(Color::Cyan)),
        ]);
        let filter_area = Rect::new(inner.x, inner.y, inner.width, 1);
        frame.render_widget(Paragraph::new(filter_line), filter_area);

        // Remaining lines: filtered model list
        let list_area = Rect::new(
            inner.x,
            inner.y + 1,
            inner.width,
            inner.height.saturating_sub(1),
        );
        self.list_area = Some(list_area);

        let items: Vec<ListItem> = self
            .filtered()
            .iter()
            .map(|m| {
                let style = if **m == self.current_model {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Span::styled((*m).clone(), style))
            })
            .collect();

        let mut state = ListState::default();
        state.select(Some(self.selected));

        let list = List::new(items).highlight_style(
            Style::default()
                .bg(Color::Rgb(50, 60, 70))
                .add_modifier(Modifier::BOLD),
        );
        frame.render_stateful_widget(list, list_area, &mut state);
    }
}

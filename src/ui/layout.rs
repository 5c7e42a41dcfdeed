//! Layout management
//!
//! Single-column layout: the chat panel fills the screen above a one-line
//! status bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen areas
pub struct AppLayout {
    /// Chat panel (transcript + input)
    pub chat: Rect,

    /// Bottom status bar
    pub status: Rect,
}

/// Calculate layout areas
pub fn get_layout(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    AppLayout {
        chat: chunks[0],
        status: chunks[1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_bar_is_one_line() {
        let layout = get_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.chat.height, 23);
        assert_eq!(layout.chat.width, 80);
    }
}

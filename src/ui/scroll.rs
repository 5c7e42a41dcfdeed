//! Scroll math for the transcript panel
//!
//! The transcript sticks to the bottom: an offset of 0 means the view is
//! pinned to the newest line, and any append resets it there.

/// Maximum scrollable offset for the given content and viewport
pub fn max_scroll(visible: usize, total: usize) -> usize {
    total.saturating_sub(visible)
}

/// Check if content overflows the viewport
pub fn is_scrollable(visible: usize, total: usize) -> bool {
    total > visible
}

/// Scroll indicator string for panel titles, e.g. " [31-50/120]"
///
/// Empty when the content fits the viewport.
pub fn scroll_indicator(current: usize, visible: usize, total: usize) -> String {
    if !is_scrollable(visible, total) {
        return String::new();
    }
    let start = current + 1;
    let end = (current + visible).min(total);
    format!(" [{}-{}/{}]", start, end, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_scroll() {
        assert_eq!(max_scroll(20, 100), 80);
        assert_eq!(max_scroll(20, 20), 0);
        assert_eq!(max_scroll(20, 5), 0);
    }

    #[test]
    fn test_indicator_empty_when_content_fits() {
        assert_eq!(scroll_indicator(0, 20, 10), "");
        assert_eq!(scroll_indicator(0, 20, 20), "");
    }

    #[test]
    fn test_indicator_at_top_and_bottom() {
        assert_eq!(scroll_indicator(0, 20, 100), " [1-20/100]");
        assert_eq!(scroll_indicator(80, 20, 100), " [81-100/100]");
    }
}

//! Whitelisted markdown transforms for answer text
//!
//! Only three transformations introduce styling: fenced code spans become
//! preformatted boxes, `**bold**` spans become bold text, and newlines
//! become separate lines. Everything else renders as inert plain spans.
//! Code spans are lifted out before the bold rule runs, so their contents
//! are never re-processed.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use regex::Regex;

/// Renders the markdown subset to styled lines
pub struct MarkdownRenderer {
    bold: Regex,
    fenced: Regex,
    base_style: Style,
}

impl MarkdownRenderer {
    pub fn new(base_style: Style) -> Self {
        Self {
            bold: Regex::new(r"\*\*(.*?)\*\*").unwrap(),
            fenced: Regex::new(r"(?s)```(.*?)```").unwrap(),
            base_style,
        }
    }

    /// Render answer text to styled lines
    pub fn render(&self, text: &str) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        let mut cursor = 0;

        for caps in self.fenced.captures_iter(text) {
            let whole = caps.get(0).expect("capture 0 always present");
            let body = caps.get(1).map_or("", |m| m.as_str());

            self.render_text_segment(&text[cursor..whole.start()], &mut lines);
            self.render_code_box(body, &mut lines);
            cursor = whole.end();
        }
        self.render_text_segment(&text[cursor..], &mut lines);

        lines
    }

    /// Plain text segment: one line per newline, bold spans applied
    fn render_text_segment(&self, text: &str, lines: &mut Vec<Line<'static>>) {
        if text.is_empty() {
            return;
        }
        for part in text.split('\n') {
            lines.push(self.render_inline(part));
        }
    }

    /// Bold spans on a single line; text outside the markers stays inert
    fn render_inline(&self, text: &str) -> Line<'static> {
        let mut spans = Vec::new();
        let mut cursor = 0;

        for caps in self.bold.captures_iter(text) {
            let whole = caps.get(0).expect("capture 0 always present");
            let word = caps.get(1).map_or("", |m| m.as_str());

            if whole.start() > cursor {
                spans.push(Span::styled(
                    text[cursor..whole.start()].to_string(),
                    self.base_style,
                ));
            }
            spans.push(Span::styled(
                word.to_string(),
                self.base_style.add_modifier(Modifier::BOLD),
            ));
            cursor = whole.end();
        }
        if cursor < text.len() {
            spans.push(Span::styled(text[cursor..].to_string(), self.base_style));
        }

        Line::from(spans)
    }

    /// Preformatted box for a fenced code span
    fn render_code_box(&self, content: &str, lines: &mut Vec<Line<'static>>) {
        let content = content.strip_prefix('\n').unwrap_or(content);
        let content = content.strip_suffix('\n').unwrap_or(content);
        let body: Vec<&str> = if content.is_empty() {
            vec![""]
        } else {
            content.lines().collect()
        };
        let inner_width = body.iter().map(|l| l.len()).max().unwrap_or(0).max(8);

        let border_style = Style::default().fg(Color::Rgb(80, 80, 90));
        let code_style = Style::default()
            .fg(Color::Rgb(212, 212, 212))
            .bg(Color::Rgb(30, 34, 42));

        lines.push(Line::from(Span::styled(
            format!("┌{}┐", "─".repeat(inner_width + 2)),
            border_style,
        )));
        for line in body {
            let padding = inner_width.saturating_sub(line.len());
            lines.push(Line::from(vec![
                Span::styled("│ ".to_string(), border_style),
                Span::styled(line.to_string(), code_style),
                Span::styled(" ".repeat(padding), code_style),
                Span::styled(" │".to_string(), border_style),
            ]));
        }
        lines.push(Line::from(Span::styled(
            format!("└{}┘", "─".repeat(inner_width + 2)),
            border_style,
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> MarkdownRenderer {
        MarkdownRenderer::new(Style::default())
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn has_bold_span(lines: &[Line], content: &str) -> bool {
        lines.iter().any(|line| {
            line.spans.iter().any(|s| {
                s.content.as_ref() == content && s.style.add_modifier.contains(Modifier::BOLD)
            })
        })
    }

    #[test]
    fn test_bold_markers_removed() {
        let lines = renderer().render("a **word** b");
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "a word b");
        assert!(has_bold_span(&lines, "word"));
    }

    #[test]
    fn test_newlines_become_separate_lines() {
        let lines = renderer().render("one\ntwo\nthree");
        assert_eq!(lines.len(), 3);
        assert_eq!(line_text(&lines[0]), "one");
        assert_eq!(line_text(&lines[2]), "three");
    }

    #[test]
    fn test_fenced_code_is_preformatted() {
        let lines = renderer().render("before\n```\nlet x = 1;\n```\nafter");
        // before + trailing empty + box top + code + box bottom + after
        let texts: Vec<String> = lines.iter().map(line_text).collect();
        assert!(texts.iter().any(|t| t.contains("let x = 1;")));
        assert!(texts.iter().any(|t| t.starts_with('┌')));
        assert!(texts.iter().any(|t| t.starts_with('└')));
        assert!(texts.iter().any(|t| t == "after"));
    }

    #[test]
    fn test_bold_rule_skips_code_contents() {
        let lines = renderer().render("```**x**```");
        // Markers survive verbatim inside the box
        assert!(lines.iter().map(line_text).any(|t| t.contains("**x**")));
        assert!(!has_bold_span(&lines, "x"));
    }

    #[test]
    fn test_plain_text_is_inert() {
        let lines = renderer().render("<b>not markup</b>");
        assert_eq!(line_text(&lines[0]), "<b>not markup</b>");
        assert!(lines[0]
            .spans
            .iter()
            .all(|s| !s.style.add_modifier.contains(Modifier::BOLD)));
    }

    #[test]
    fn test_multiple_bold_spans_on_one_line() {
        let lines = renderer().render("**a** mid **b**");
        assert_eq!(line_text(&lines[0]), "a mid b");
        assert!(has_bold_span(&lines, "a"));
        assert!(has_bold_span(&lines, "b"));
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        assert!(renderer().render("").is_empty());
    }
}

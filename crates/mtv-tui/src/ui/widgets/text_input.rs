//! Single-line text input widget used by the event editor.

use crate::ui::theme::Styles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A labelled single-line text input.
#[derive(Debug, Clone)]
pub struct TextInput<'a> {
    /// The text content.
    content: &'a str,
    /// Cursor position (character index).
    cursor: usize,
    /// Label drawn before the field (e.g., "Start").
    label: &'a str,
    /// Whether the input is focused.
    focused: bool,
}

impl<'a> TextInput<'a> {
    /// Create a new text input.
    pub fn new(label: &'a str, content: &'a str) -> Self {
        Self {
            content,
            cursor: content.chars().count(),
            label,
            focused: false,
        }
    }

    /// Set focus state.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set the cursor position.
    #[must_use]
    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 1 {
            return;
        }

        let field_style = if self.focused {
            Styles::active()
        } else {
            Styles::default()
        };

        let mut spans = vec![
            Span::styled(format!("{}: ", self.label), Styles::dim()),
            Span::styled("[", Styles::border()),
        ];

        if self.focused {
            // Cursor drawn as '|' before the character it sits on, '_' at the end
            let before: String = self.content.chars().take(self.cursor).collect();
            let after: String = self.content.chars().skip(self.cursor).collect();
            spans.push(Span::styled(before, field_style));
            let marker = if after.is_empty() { "_" } else { "|" };
            spans.push(Span::styled(marker, Styles::highlight()));
            spans.push(Span::styled(after, field_style));
        } else {
            spans.push(Span::styled(self.content.to_string(), field_style));
        }
        spans.push(Span::styled("]", Styles::border()));

        Paragraph::new(Line::from(spans))
            .style(Style::default())
            .render(area, buf);
    }
}

/// State for a text input, managing content and cursor position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInputState {
    /// The text content.
    content: String,
    /// Cursor position (character index).
    cursor: usize,
}

impl TextInputState {
    /// Create a state pre-filled with `content`, cursor at the end.
    pub fn with_content(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = content.chars().count();
        Self { content, cursor }
    }

    /// Get the current content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position (character index).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the content is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map_or(self.content.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, ch);
        self.cursor += 1;
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character at the cursor (delete).
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Create a widget from this state.
    pub fn widget<'a>(&'a self, label: &'a str) -> TextInput<'a> {
        TextInput::new(label, &self.content).cursor(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    #[test]
    fn test_text_input_state_basic() {
        let mut state = TextInputState::default();
        assert!(state.is_empty());

        state.insert('1');
        state.insert('2');
        assert_eq!(state.content(), "12");
        assert_eq!(state.cursor(), 2);

        state.backspace();
        assert_eq!(state.content(), "1");
    }

    #[test]
    fn test_text_input_state_cursor_movement() {
        let mut state = TextInputState::with_content("00:05:00");
        assert_eq!(state.cursor(), 8);

        state.move_left();
        state.move_left();
        assert_eq!(state.cursor(), 6);

        state.backspace();
        state.insert('3');
        assert_eq!(state.content(), "00:05300");

        state.move_home();
        state.delete();
        assert_eq!(state.content(), "0:05300");

        state.move_end();
        state.move_right();
        assert_eq!(state.cursor(), 7);
    }

    #[test]
    fn test_text_input_state_multibyte() {
        let mut state = TextInputState::with_content("é1");
        state.move_home();
        state.move_right();
        state.insert('x');
        assert_eq!(state.content(), "éx1");
        state.backspace();
        state.backspace();
        assert_eq!(state.content(), "1");
    }

    #[test]
    fn test_render_focused_field() {
        let state = TextInputState::with_content("00:05:00");
        let area = Rect::new(0, 0, 24, 1);
        let mut buf = Buffer::empty(area);
        state.widget("Start").focused(true).render(area, &mut buf);
        insta::assert_snapshot!(buffer_to_string(&buf), @"Start: [00:05:00_]");
    }

    #[test]
    fn test_render_unfocused_field() {
        let state = TextInputState::with_content("01:00:00");
        let area = Rect::new(0, 0, 24, 1);
        let mut buf = Buffer::empty(area);
        state.widget("End").render(area, &mut buf);
        insta::assert_snapshot!(buffer_to_string(&buf), @"End: [01:00:00]");
    }
}

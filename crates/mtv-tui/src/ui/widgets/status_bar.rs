//! Status bar widget.

use crate::app::NoticeLevel;
use crate::ui::theme::{Palette, Styles};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

/// A key hint for the status bar.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub label: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Status bar at the bottom of the screen.
///
/// Shows a mode badge followed by key hints. A pending notice replaces the
/// hints until it expires.
#[derive(Debug, Clone)]
pub struct StatusBar<'a> {
    mode: &'a str,
    hints: Vec<KeyHint>,
    notice: Option<(NoticeLevel, &'a str)>,
    right_text: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar.
    pub fn new(mode: &'a str) -> Self {
        Self {
            mode,
            hints: Vec::new(),
            notice: None,
            right_text: None,
        }
    }

    /// Add key hints.
    #[must_use]
    pub fn hints(mut self, hints: Vec<KeyHint>) -> Self {
        self.hints = hints;
        self
    }

    /// Show a notice instead of the hints.
    #[must_use]
    pub fn notice(mut self, notice: Option<(NoticeLevel, &'a str)>) -> Self {
        self.notice = notice;
        self
    }

    /// Set right-aligned text.
    #[must_use]
    pub fn right(mut self, text: &'a str) -> Self {
        self.right_text = Some(text);
        self
    }
}

impl Widget for StatusBar<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        // Fill background with status bar color
        for x in area.x..area.x.saturating_add(area.width) {
            buf[(x, area.y)].set_char(' ').set_bg(Palette::STATUS_BG);
        }

        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.mode),
                Styles::default().bg(Palette::ACCENT).fg(Palette::BG),
            ),
            Span::styled(" ", Styles::status_bar()),
        ];

        if let Some((level, message)) = self.notice {
            let style = match level {
                NoticeLevel::Info => Styles::status_bar().fg(Palette::SUCCESS),
                NoticeLevel::Warning => Styles::status_bar().fg(Palette::WARNING),
                NoticeLevel::Error => Styles::status_bar().fg(Palette::ERROR),
            };
            spans.push(Span::styled(message, style));
        } else {
            for hint in &self.hints {
                spans.push(Span::styled(format!(" {} ", hint.key), Styles::key_hint()));
                spans.push(Span::styled(format!(" {} ", hint.label), Styles::key_label()));
            }
        }

        // Right-aligned text first so the left side wins on overlap
        if let Some(text) = self.right_text {
            let text_width = text.width() as u16;
            if text_width < area.width {
                let x = area.x + area.width - text_width - 1;
                buf.set_string(x, area.y, text, Styles::status_bar());
            }
        }

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

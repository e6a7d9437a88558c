//! Test utilities for mtv-tui snapshot and integration testing.
//!
//! This module provides helper functions for creating test terminals,
//! building a small mission, rendering screens, and converting buffers to
//! strings for snapshot testing.

use crate::app::App;
use crate::screens::Screen as ScreenTrait;
use mtv_engine::time::parse_timestamp;
use mtv_engine::{DisplayEvent, Session, ViewerConfig};
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// Create a test terminal with the default dimensions (80x24).
pub fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(TEST_WIDTH, TEST_HEIGHT);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Three events on 2024-01-01: AOS 01:00-01:10, BURN 02:00-02:30,
/// LOS 03:00-03:10.
pub fn sample_events() -> Vec<DisplayEvent> {
    let event = |name: &str, start: &str, end: &str| {
        DisplayEvent::new(
            name,
            parse_timestamp(start).expect("valid start"),
            parse_timestamp(end).expect("valid end"),
        )
    };
    vec![
        event("AOS", "2024-01-01T01:00:00Z", "2024-01-01T01:10:00Z"),
        event("BURN", "2024-01-01T02:00:00Z", "2024-01-01T02:30:00Z"),
        event("LOS", "2024-01-01T03:00:00Z", "2024-01-01T03:10:00Z"),
    ]
}

/// Session over [`sample_events`] with default settings.
pub fn sample_session() -> Session {
    Session::new(sample_events(), &ViewerConfig::default())
}

/// Create a test app over the sample session, sized to the test terminal.
pub fn create_test_app() -> App {
    let mut app = App::with_session(sample_session(), ViewerConfig::default());
    app.viewport_width = TEST_WIDTH;
    app
}

/// Convert a buffer to a string representation for snapshot testing.
///
/// This produces a simple text representation of the buffer content,
/// suitable for snapshot comparison.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        // Trim trailing whitespace from each line
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    // Remove trailing newline
    if result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Render a screen to a buffer and return it as a string.
pub fn render_screen_to_string<S: ScreenTrait>(screen: &S, app: &App) -> String {
    let area = Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT);
    let mut buffer = Buffer::empty(area);
    screen.render(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_terminal() {
        let terminal = create_test_terminal();
        let size = terminal.size().unwrap();
        assert_eq!(size.width, TEST_WIDTH);
        assert_eq!(size.height, TEST_HEIGHT);
    }

    #[test]
    fn test_create_test_app() {
        let app = create_test_app();
        assert_eq!(app.session.len(), 3);
        assert_eq!(app.session.playhead().max(), 15_000);
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        let result = buffer_to_string(&buffer);
        assert_eq!(result, "Hello\nWorld\n");
    }
}

//! Event grid: one cell per event with a visibility checkbox, its times,
//! and inline edit fields while the event is being edited.

use crate::app::{EditField, Editor};
use crate::ui::theme::{event_color, Styles, Symbols};
use mtv_engine::time::time_of_day;
use mtv_engine::{DisplayEvent, Session};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

/// Rows per grid cell.
pub const CELL_HEIGHT: u16 = 4;

/// Narrowest cell that still fits an edit field.
pub const MIN_CELL_WIDTH: u16 = 20;

/// Height of the grid panel for `events` laid out in `columns`, borders
/// included, capped at `max`.
pub fn grid_height(events: usize, columns: usize, max: u16) -> u16 {
    let rows = events.div_ceil(columns.max(1)).max(1);
    u16::try_from(rows)
        .unwrap_or(u16::MAX)
        .saturating_mul(CELL_HEIGHT)
        .saturating_add(2)
        .min(max)
}

/// Event grid widget.
pub struct EventGrid<'a> {
    session: &'a Session,
    columns: usize,
    selected: usize,
    editor: Option<&'a Editor>,
    focused: bool,
}

impl<'a> EventGrid<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            columns: 1,
            selected: 0,
            editor: None,
            focused: false,
        }
    }

    #[must_use]
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    #[must_use]
    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    #[must_use]
    pub fn editor(mut self, editor: Option<&'a Editor>) -> Self {
        self.editor = editor;
        self
    }

    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn render_cell(&self, index: usize, event: &DisplayEvent, cell: Rect, buf: &mut Buffer) {
        let row = |offset: u16| {
            (offset < cell.height).then(|| Rect::new(cell.x, cell.y + offset, cell.width, 1))
        };

        let color = event_color(self.session.colors().index_of(&event.event_name));
        let mut name_style = Styles::default().fg(color).add_modifier(Modifier::BOLD);
        if self.focused && index == self.selected {
            name_style = name_style.add_modifier(Modifier::REVERSED);
        }
        let check = if event.visible {
            Symbols::CHECKED
        } else {
            Symbols::UNCHECKED
        };
        if let Some(area) = row(0) {
            let line = Line::from(vec![
                Span::styled(check, Styles::default()),
                Span::styled(" ", Styles::default()),
                Span::styled(event.event_name.as_str(), name_style),
            ]);
            buf.set_line(area.x, area.y, &line, area.width);
        }

        match self.editor.filter(|e| e.index == index) {
            Some(editor) => {
                if let Some(area) = row(1) {
                    editor
                        .start
                        .widget("Start")
                        .focused(editor.field == EditField::Start)
                        .render(area, buf);
                }
                if let Some(area) = row(2) {
                    editor
                        .end
                        .widget("End")
                        .focused(editor.field == EditField::End)
                        .render(area, buf);
                }
                if let Some(area) = row(3) {
                    buf.set_stringn(
                        area.x,
                        area.y,
                        "Enter Save  Esc Cancel",
                        usize::from(area.width),
                        Styles::dim(),
                    );
                }
            }
            None => {
                for (offset, label, instant) in [
                    (1, "Start: ", &event.start_time),
                    (2, "End: ", &event.end_time),
                ] {
                    if let Some(area) = row(offset) {
                        let line = Line::from(vec![
                            Span::styled(label, Styles::dim()),
                            Span::styled(time_of_day(instant), Styles::default()),
                        ]);
                        buf.set_line(area.x, area.y, &line, area.width);
                    }
                }
            }
        }
    }
}

impl Widget for EventGrid<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Styles::border_active()
        } else {
            Styles::border()
        };
        let block = Block::default()
            .title(" Events ")
            .title_style(Styles::title())
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Styles::default());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if self.session.is_empty() {
            buf.set_stringn(
                inner.x,
                inner.y,
                "No events",
                usize::from(inner.width),
                Styles::dim(),
            );
            return;
        }

        let columns = self.columns;
        let cell_width = inner.width / columns as u16;
        let visible_rows = usize::from(inner.height / CELL_HEIGHT).max(1);

        // Scroll so the selected row stays on screen
        let first_row = (self.selected / columns).saturating_sub(visible_rows - 1);

        for (index, event) in self
            .session
            .events()
            .iter()
            .enumerate()
            .skip(first_row * columns)
        {
            let row = index / columns - first_row;
            if row >= visible_rows {
                break;
            }
            let x = inner.x + (index % columns) as u16 * cell_width;
            let y = inner.y + row as u16 * CELL_HEIGHT;
            let height = CELL_HEIGHT.min(inner.bottom().saturating_sub(y));
            let cell = Rect::new(x, y, cell_width.saturating_sub(1), height);
            self.render_cell(index, event, cell, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Action;
    use crate::test_utils::{buffer_to_string, create_test_app};
    use crate::App;
    use mtv_engine::ViewerConfig;

    fn render(app: &App, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        EventGrid::new(&app.session)
            .columns(app.grid_columns())
            .selected(app.selected)
            .editor(app.editor.as_ref())
            .focused(true)
            .render(area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_grid_height() {
        assert_eq!(grid_height(3, 3, 40), 6);
        assert_eq!(grid_height(12, 5, 40), 14);
        assert_eq!(grid_height(12, 5, 10), 10);
        assert_eq!(grid_height(0, 5, 40), 6);
    }

    #[test]
    fn test_cells_show_checkbox_and_times() {
        let mut app = create_test_app();
        app.session.set_visible(1, false);
        let out = render(&app, 80, 6);
        assert!(out.contains(" Events "));
        assert!(out.contains("[x] AOS"));
        assert!(out.contains("[ ] BURN"));
        assert!(out.contains("[x] LOS"));
        assert!(out.contains("Start: 01:00:00"));
        assert!(out.contains("End: 03:10:00"));
    }

    #[test]
    fn test_editor_replaces_times() {
        let mut app = create_test_app();
        app.handle_action(Action::Edit);
        let out = render(&app, 80, 6);
        assert!(out.contains("Start: [01:00:00_]"));
        assert!(out.contains("End: [01:10:00]"));
        assert!(out.contains("Enter Save  Esc Cancel"));
        // Other cells keep their plain times
        assert!(out.contains("Start: 02:00:00"));
    }

    #[test]
    fn test_scrolls_to_selected_row() {
        let events = (0..12)
            .map(|i| {
                let start = mtv_engine::time::parse_timestamp("2024-01-01T00:00:00Z").unwrap()
                    + chrono::TimeDelta::minutes(i * 10);
                DisplayEvent::new(format!("E{i}"), start, start + chrono::TimeDelta::minutes(5))
            })
            .collect();
        let mut app = App::with_session(
            Session::new(events, &ViewerConfig::default()),
            ViewerConfig::default(),
        );
        app.viewport_width = 80;
        app.selected = 7;
        let out = render(&app, 80, 6);
        assert!(out.contains("[x] E6"));
        assert!(out.contains("[x] E8"));
        assert!(!out.contains("[x] E0"));
        assert!(!out.contains("[x] E9"));
    }

    #[test]
    fn test_empty_grid() {
        let app = App::with_session(
            Session::new(Vec::new(), &ViewerConfig::default()),
            ViewerConfig::default(),
        );
        let out = render(&app, 40, 6);
        assert!(out.contains("No events"));
    }
}

//! Viewer screen: title, chart, slider, event grid and status bar.

use crate::app::{App, Focus};
use crate::screens::Screen;
use crate::timeline::{grid_height, EventGrid, TimelineChart};
use crate::ui::theme::Styles;
use crate::ui::viewer_layout;
use crate::ui::widgets::{KeyHint, PlayheadSlider, StatusBar};
use mtv_engine::ChartModel;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Widget},
};

/// The main (and only) screen.
pub struct ViewerScreen;

impl Screen for ViewerScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        Block::default().style(Styles::default()).render(area, buf);

        let grid = match app.focus {
            Focus::Grid => grid_height(app.session.len(), app.grid_columns(), area.height / 2),
            Focus::Chart => 0,
        };
        let layout = viewer_layout(area, grid);

        let model = ChartModel::build(&app.session);
        Line::styled(model.title, Styles::title())
            .centered()
            .render(layout.title, buf);

        TimelineChart::new(&model)
            .empty_message(app.session.load_error())
            .render(layout.chart, buf);

        PlayheadSlider::new(app.session.playhead())
            .focused(app.focus == Focus::Chart)
            .render(layout.slider, buf);

        if grid > 0 {
            EventGrid::new(&app.session)
                .columns(app.grid_columns())
                .selected(app.selected)
                .editor(app.editor.as_ref())
                .focused(app.focus == Focus::Grid)
                .render(layout.grid, buf);
        }

        render_status_bar(app, layout.status, buf);
    }
}

fn render_status_bar(app: &App, area: Rect, buf: &mut Buffer) {
    let (mode, hints) = if app.editor.is_some() {
        (
            "EDIT",
            vec![
                KeyHint::new("Tab", "Field"),
                KeyHint::new("Enter", "Save"),
                KeyHint::new("Esc", "Cancel"),
            ],
        )
    } else if app.focus == Focus::Grid {
        (
            "GRID",
            vec![
                KeyHint::new("Space", "Show/Hide"),
                KeyHint::new("e", "Edit"),
                KeyHint::new("g", "Close"),
                KeyHint::new("Esc", "Back"),
            ],
        )
    } else {
        (
            "VIEW",
            vec![
                KeyHint::new("p", "Play"),
                KeyHint::new("+/-", "Zoom"),
                KeyHint::new("g", "Grid"),
                KeyHint::new("?", "Help"),
                KeyHint::new("q", "Quit"),
            ],
        )
    };

    let play_state = if app.session.playhead().is_playing() {
        "Playing"
    } else {
        "Paused"
    };
    let right = format!("{play_state}  Zoom: {}", app.session.zoom().level());

    StatusBar::new(mode)
        .hints(hints)
        .notice(app.notice.as_ref().map(|n| (n.level, n.message.as_str())))
        .right(&right)
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Action;
    use crate::test_utils::{create_test_app, render_screen_to_string};

    #[test]
    fn test_viewer_screen_default() {
        let app = create_test_app();
        let out = render_screen_to_string(&ViewerScreen, &app);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0].trim(), "Mission Events Display");
        assert!(out.contains("■ AOS"));
        assert!(out.contains("Current Time: 00:00:00"));
        assert!(out.contains("|| Slider Value: 0 / 15000"));
        assert!(lines[23].starts_with(" VIEW "));
        assert!(lines[23].ends_with("Paused  Zoom: 1h"));
        assert!(!out.contains(" Events "));
    }

    #[test]
    fn test_viewer_screen_with_grid() {
        let mut app = create_test_app();
        app.handle_action(Action::ToggleGrid);
        let out = render_screen_to_string(&ViewerScreen, &app);
        assert!(out.contains(" Events "));
        assert!(out.contains("[x] BURN"));
        assert!(out.contains(" GRID "));
    }

    #[test]
    fn test_viewer_screen_editing() {
        let mut app = create_test_app();
        app.handle_action(Action::Edit);
        let out = render_screen_to_string(&ViewerScreen, &app);
        assert!(out.contains(" EDIT "));
        assert!(out.contains("Start: [01:00:00_]"));
    }

    #[test]
    fn test_viewer_screen_shows_warning_and_zoom() {
        let mut app = create_test_app();
        for _ in 0..4 {
            app.handle_action(Action::ZoomOut);
        }
        let out = render_screen_to_string(&ViewerScreen, &app);
        assert!(out.contains("Cannot zoom out more"));
        assert!(out.contains("Zoom: 12h"));
    }
}

//! Layout helpers for the timeline viewer.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Create a centered rect with fixed dimensions.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Areas of the viewer screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerLayout {
    pub title: Rect,
    pub chart: Rect,
    pub slider: Rect,
    pub grid: Rect,
    pub status: Rect,
}

/// Split the screen into title, chart, slider, optional grid and status bar.
///
/// `grid_height` of 0 hides the grid.
pub fn viewer_layout(area: Rect, grid_height: u16) -> ViewerLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(2),
            Constraint::Length(grid_height),
            Constraint::Length(1),
        ])
        .split(area);
    ViewerLayout {
        title: chunks[0],
        chart: chunks[1],
        slider: chunks[2],
        grid: chunks[3],
        status: chunks[4],
    }
}

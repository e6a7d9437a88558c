//! Screen definitions for the timeline viewer.

pub mod viewer;

use crate::app::App;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

/// Trait for screens that can be rendered.
pub trait Screen {
    /// Render the screen to the buffer.
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

/// Render the help overlay.
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    use crate::ui::centered_fixed;
    use crate::ui::theme::Styles;
    use ratatui::widgets::{Block, Borders, Clear, Paragraph};

    let help_text = r"
  Playback
    p / Space         Play/pause (chart)
    Left / Right      Nudge playhead
    PgUp / PgDn       Large nudge
    Home / End        Slider start/end
    r                 Reset slider
    + / -             Zoom in/out

  Events
    g / Tab           Show/hide event grid
    Arrows            Select event
    Space             Show/hide event
    e / Enter         Edit start/end times
    Tab               Switch edit field
    Enter / Esc       Save/cancel edit

    ?                 Toggle this help
    q                 Quit

  [Press any key to close]
";

    // Calculate overlay size
    let width = 50.min(area.width.saturating_sub(4));
    let height = 24.min(area.height.saturating_sub(2));
    let overlay_area = centered_fixed(width, height, area);

    // Clear the area
    Clear.render(overlay_area, buf);

    let block = Block::default()
        .title(" Help ")
        .title_style(Styles::title())
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .style(Styles::default());

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .style(Styles::default());

    paragraph.render(overlay_area, buf);
}

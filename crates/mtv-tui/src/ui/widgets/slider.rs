//! Playhead slider widget.

use crate::ui::theme::{slider_track, Styles, Symbols};
use mtv_engine::Playhead;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

/// Two-row slider: value label with play state, then the track.
#[derive(Debug, Clone, Copy)]
pub struct PlayheadSlider<'a> {
    playhead: &'a Playhead,
    focused: bool,
}

impl<'a> PlayheadSlider<'a> {
    pub fn new(playhead: &'a Playhead) -> Self {
        Self {
            playhead,
            focused: false,
        }
    }

    /// Highlight the track when the slider has focus.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for PlayheadSlider<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 3 {
            return;
        }

        let (symbol, symbol_style) = if self.playhead.is_playing() {
            (Symbols::PLAY, Styles::success())
        } else {
            (Symbols::PAUSE, Styles::dim())
        };
        let label = Line::from(vec![
            Span::styled(symbol, symbol_style),
            Span::styled(" Slider Value: ", Styles::dim()),
            Span::styled(self.playhead.elapsed().to_string(), Styles::highlight()),
            Span::styled(format!(" / {}", self.playhead.max()), Styles::dim()),
        ]);
        buf.set_line(area.x, area.y, &label, area.width);

        if area.height < 2 {
            return;
        }
        let track_style = if self.focused {
            Styles::active()
        } else {
            Styles::default()
        };
        let track = slider_track(self.playhead.progress(), usize::from(area.width - 2));
        buf.set_string(area.x, area.y + 1, track, track_style);
    }
}

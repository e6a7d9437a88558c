//! Chart widget: a vertical time axis with one bar per visible event.
//!
//! Time runs top to bottom. Tick labels sit on the left axis, event bars
//! are vertical glyph runs at fixed spacing, and the playhead is a
//! horizontal line through the middle of the window with the current time
//! above it and the next-event countdown below.

use crate::ui::theme::{Styles, Symbols};
use chrono::{DateTime, Utc};
use mtv_engine::{ChartModel, LegendEntry, TimeWindow};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use std::borrow::Cow;
use unicode_width::UnicodeWidthStr;

/// Columns taken by the tick labels and the axis line.
pub const AXIS_WIDTH: u16 = 6;

/// Horizontal distance between event bar columns.
pub const BAR_SPACING: u16 = 3;

/// Width reserved for the playhead annotations.
const ANNOTATION_WIDTH: u16 = 30;

const MAX_LEGEND_ROWS: usize = 2;
const LEGEND_MARKER: &str = "■ ";
const LEGEND_GAP: usize = 2;

/// Timeline chart widget.
pub struct TimelineChart<'a> {
    model: &'a ChartModel,
    empty_message: Option<&'a str>,
}

impl<'a> TimelineChart<'a> {
    pub fn new(model: &'a ChartModel) -> Self {
        Self {
            model,
            empty_message: None,
        }
    }

    /// Message shown instead of the plot when there is nothing to draw.
    #[must_use]
    pub fn empty_message(mut self, message: Option<&'a str>) -> Self {
        self.empty_message = message;
        self
    }

    fn render_legend(&self, area: Rect, buf: &mut Buffer) -> u16 {
        let x = area.x + AXIS_WIDTH;
        let width = area.width - AXIS_WIDTH;
        let rows = legend_rows(&self.model.legend, usize::from(width));
        let mut height = 0;
        for (y, row) in (area.y..area.bottom()).zip(rows.iter().take(MAX_LEGEND_ROWS)) {
            let mut spans = Vec::new();
            for (i, entry) in row.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(" ".repeat(LEGEND_GAP), Styles::default()));
                }
                spans.push(Span::styled(LEGEND_MARKER, Styles::event_bar(entry.color, false)));
                spans.push(Span::styled(entry.name.as_str(), Styles::default()));
            }
            buf.set_line(x, y, &Line::from(spans), width);
            height += 1;
        }
        height
    }

    fn render_axis(&self, window: TimeWindow, plot: Rect, buf: &mut Buffer) {
        let axis_x = plot.x + AXIS_WIDTH - 1;
        for y in plot.y..plot.bottom() {
            buf[(axis_x, y)].set_symbol("│").set_style(Styles::border());
        }

        let mut last_row = None;
        for tick in &self.model.ticks {
            let Some(row) = window.row_of(*tick, plot.height) else {
                continue;
            };
            // Dense ticks share rows when zoomed out on a short terminal
            if last_row == Some(row) {
                continue;
            }
            last_row = Some(row);
            let y = plot.y + row;
            buf.set_string(plot.x, y, tick_label(*tick), Styles::dim());
            buf[(axis_x, y)].set_symbol("┤").set_style(Styles::border());
        }
    }

    fn render_bars(&self, window: TimeWindow, lane: Rect, buf: &mut Buffer) {
        for bar in &self.model.bars {
            let Some(x) = bar_column(bar.index, lane) else {
                continue;
            };
            if !window.overlaps(bar.start, bar.end) {
                continue;
            }
            let top = window.clamped_row(bar.start, lane.height);
            let bottom = window.clamped_row(bar.end, lane.height);
            let symbol = if bar.faded {
                Symbols::BAR_FADED
            } else {
                Symbols::BAR
            };
            let style = Styles::event_bar(bar.color, bar.faded);
            for row in top..=bottom {
                buf[(x, lane.y + row)].set_symbol(symbol).set_style(style);
            }
        }
    }

    fn render_annotations(&self, playhead_row: u16, lane: Rect, buf: &mut Buffer) {
        let x = lane.right().saturating_sub(ANNOTATION_WIDTH).max(lane.x);
        let width = usize::from(lane.right() - x);
        if width == 0 {
            return;
        }

        let above: Vec<Cow<'_, str>> = textwrap::wrap(&self.model.current_time, width);
        let below: Vec<Cow<'_, str>> = self
            .model
            .next_event
            .iter()
            .flat_map(|line| textwrap::wrap(line, width))
            .collect();

        let above_len = u16::try_from(above.len()).unwrap_or(u16::MAX);
        let first = playhead_row.saturating_sub(above_len);
        for (row, line) in (first..playhead_row).zip(&above) {
            buf.set_stringn(x, lane.y + row, line, width, Styles::playhead());
        }
        for (row, line) in (playhead_row + 1..lane.height).zip(&below) {
            buf.set_stringn(x, lane.y + row, line, width, Styles::playhead());
        }
    }
}

impl Widget for TimelineChart<'_> {
    #[allow(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width <= AXIS_WIDTH + 1 || area.height < 2 {
            return;
        }

        let legend_height = self.render_legend(area, buf);
        let plot = Rect {
            y: area.y + legend_height,
            height: area.height - legend_height,
            ..area
        };
        if plot.height == 0 {
            return;
        }

        let (Some(window), Some(playhead)) = (self.model.window, self.model.playhead) else {
            let message = self.empty_message.unwrap_or("No events to display");
            let x = plot.x + plot.width.saturating_sub(message.width() as u16) / 2;
            let y = plot.y + plot.height / 2;
            buf.set_stringn(x, y, message, usize::from(plot.width), Styles::dim());
            return;
        };

        self.render_axis(window, plot, buf);

        let lane = Rect {
            x: plot.x + AXIS_WIDTH,
            width: plot.width - AXIS_WIDTH,
            ..plot
        };
        let playhead_row = window.clamped_row(playhead, lane.height);
        buf.set_string(
            lane.x,
            lane.y + playhead_row,
            Symbols::PLAYHEAD.repeat(usize::from(lane.width)),
            Styles::playhead(),
        );
        self.render_bars(window, lane, buf);
        self.render_annotations(playhead_row, lane, buf);
    }
}

/// Flow legend entries into rows that fit `width`.
fn legend_rows(legend: &[LegendEntry], width: usize) -> Vec<Vec<&LegendEntry>> {
    let mut rows: Vec<Vec<&LegendEntry>> = Vec::new();
    let mut used = 0;
    for entry in legend {
        let entry_width = LEGEND_MARKER.width() + entry.name.width();
        match rows.last_mut() {
            Some(row) if used + LEGEND_GAP + entry_width <= width => {
                row.push(entry);
                used += LEGEND_GAP + entry_width;
            }
            _ => {
                rows.push(vec![entry]);
                used = entry_width;
            }
        }
    }
    rows
}

/// Column of an event's bar; `None` when it falls off the right edge.
fn bar_column(index: usize, lane: Rect) -> Option<u16> {
    let offset = u16::try_from(index).ok()?.checked_mul(BAR_SPACING)?;
    let x = lane.x.checked_add(1)?.checked_add(offset)?;
    (x < lane.right()).then_some(x)
}

fn tick_label(tick: DateTime<Utc>) -> String {
    tick.format("%H:%M").to_string()
}

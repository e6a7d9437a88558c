//! Render-agnostic chart model.
//!
//! [`ChartModel::build`] turns a [`Session`] into everything a renderer
//! needs: the visible time window and its ticks, a color-coded legend, one
//! bar per visible event and the playhead annotations.

use chrono::{DateTime, TimeDelta, Utc};

use crate::next_event::NextEvent;
use crate::session::Session;
use crate::time::{format_countdown, format_elapsed};

/// Chart title.
pub const CHART_TITLE: &str = "Mission Events Display";

/// Visible slice of the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window of `half` on each side of `center`.
    ///
    /// Returns `None` when either edge falls outside the representable range.
    pub fn around(center: DateTime<Utc>, half: TimeDelta) -> Option<Self> {
        Some(Self {
            start: center.checked_sub_signed(half)?,
            end: center.checked_add_signed(half)?,
        })
    }

    /// Whether an instant falls inside the window (inclusive).
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Whether `[start, end]` overlaps the window.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        end >= self.start && start <= self.end
    }

    /// Tick instants inside the window, aligned to multiples of `tick_seconds`.
    pub fn ticks(&self, tick_seconds: i64) -> Vec<DateTime<Utc>> {
        if tick_seconds <= 0 {
            return Vec::new();
        }
        let start = self.start.timestamp();
        let end = self.end.timestamp();
        let mut tick = start.div_euclid(tick_seconds) * tick_seconds;
        if tick < start {
            tick += tick_seconds;
        }
        let mut ticks = Vec::new();
        while tick <= end {
            if let Some(instant) = DateTime::from_timestamp(tick, 0) {
                ticks.push(instant);
            }
            tick += tick_seconds;
        }
        ticks
    }

    /// Row of an instant on a plot `rows` tall, top row = window start.
    ///
    /// Returns `None` outside the window.
    pub fn row_of(&self, instant: DateTime<Utc>, rows: u16) -> Option<u16> {
        if rows == 0 || !self.contains(instant) {
            return None;
        }
        Some(self.clamped_row(instant, rows))
    }

    /// Like [`row_of`](Self::row_of) but pins instants outside the window
    /// to the first or last row.
    pub fn clamped_row(&self, instant: DateTime<Utc>, rows: u16) -> u16 {
        if rows == 0 {
            return 0;
        }
        let span = (self.end - self.start).num_seconds().max(1);
        let offset = (instant - self.start).num_seconds().clamp(0, span);
        let last = i64::from(rows - 1);
        let row = (offset * last + span / 2) / span;
        u16::try_from(row).unwrap_or(rows - 1)
    }
}

/// Legend entry on the top axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub name: String,
    pub color: usize,
}

/// One vertical event bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    /// Index of the event; also its horizontal slot.
    pub index: usize,
    pub name: String,
    pub color: usize,
    /// Drawn at reduced intensity; alternates between adjacent events.
    pub faded: bool,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Everything needed to draw one frame of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartModel {
    pub title: &'static str,
    /// `None` when there are no events or the window cannot be represented.
    pub window: Option<TimeWindow>,
    pub playhead: Option<DateTime<Utc>>,
    pub tick_seconds: i64,
    pub ticks: Vec<DateTime<Utc>>,
    pub legend: Vec<LegendEntry>,
    pub bars: Vec<Bar>,
    /// Number of horizontal slots (one per event, visible or not).
    pub slots: usize,
    /// `Current Time: HH:MM:SS`.
    pub current_time: String,
    /// Next-event annotation, one entry per line.
    pub next_event: Vec<String>,
}

impl ChartModel {
    /// Build the chart for the session's current state.
    pub fn build(session: &Session) -> Self {
        let level = session.zoom().level();
        let playhead = session.playhead_time();
        let window = playhead.and_then(|at| TimeWindow::around(at, level.half_window()));
        let ticks = window
            .map(|w| w.ticks(level.tick_seconds()))
            .unwrap_or_default();

        let colors = session.colors();
        let legend = colors
            .names()
            .iter()
            .map(|name| LegendEntry {
                name: name.clone(),
                color: colors.index_of(name),
            })
            .collect();

        let bars = session
            .events()
            .iter()
            .enumerate()
            .filter(|(_, e)| e.visible)
            .map(|(index, e)| Bar {
                index,
                name: e.event_name.clone(),
                color: colors.index_of(&e.event_name),
                faded: index % 2 == 1,
                start: e.start_time,
                end: e.end_time,
            })
            .collect();

        let elapsed = format_elapsed(session.playhead().elapsed());
        let next_event = match session.next_event() {
            NextEvent::Upcoming { event, until } => vec![
                format!("Time Until Next Event: {}", format_countdown(until)),
                format!("Next Event: {}", event.event_name),
            ],
            NextEvent::NoMoreEvents => vec![
                "No Upcoming Events".to_string(),
                format!("(Current Time: {elapsed})"),
            ],
        };

        Self {
            title: CHART_TITLE,
            window,
            playhead,
            tick_seconds: level.tick_seconds(),
            ticks,
            legend,
            bars,
            slots: session.len(),
            current_time: format!("Current Time: {elapsed}"),
            next_event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;
    use crate::event::DisplayEvent;
    use crate::loader::{join, DictionaryEntry, EventDictionary, TimelineEntry};
    use crate::time::parse_timestamp;

    fn ts(s: &str) -> DateTime<Utc> {
        parse_timestamp(s).unwrap()
    }

    fn session() -> Session {
        Session::new(
            vec![
                DisplayEvent::new("AOS", ts("2024-01-01T01:00:00Z"), ts("2024-01-01T01:10:00Z")),
                DisplayEvent::new("BURN", ts("2024-01-01T02:00:00Z"), ts("2024-01-01T02:30:00Z")),
                DisplayEvent::new("AOS", ts("2024-01-01T03:00:00Z"), ts("2024-01-01T03:10:00Z")),
            ],
            &ViewerConfig::default(),
        )
    }

    #[test]
    fn test_window_centered_on_playhead() {
        let model = ChartModel::build(&session());
        let window = model.window.unwrap();
        let playhead = model.playhead.unwrap();
        assert_eq!(playhead, ts("2024-01-01T00:00:00Z"));
        assert_eq!(window.start, ts("2023-12-31T12:00:00Z"));
        assert_eq!(window.end, ts("2024-01-01T12:00:00Z"));
        assert_eq!(model.ticks.len(), 25);
        assert_eq!(model.ticks[0], window.start);
    }

    #[test]
    fn test_window_follows_zoom() {
        let mut s = session();
        for _ in 0..4 {
            s.zoom_in().unwrap();
        }
        let model = ChartModel::build(&s);
        let window = model.window.unwrap();
        assert_eq!(window.end - window.start, TimeDelta::minutes(24));
        assert_eq!(model.tick_seconds, 60);
        assert_eq!(model.ticks.len(), 25);
    }

    #[test]
    fn test_ticks_align_to_granularity() {
        let window = TimeWindow {
            start: ts("2024-01-01T00:07:30Z"),
            end: ts("2024-01-01T00:31:00Z"),
        };
        let ticks = window.ticks(15 * 60);
        assert_eq!(
            ticks,
            vec![ts("2024-01-01T00:15:00Z"), ts("2024-01-01T00:30:00Z")]
        );
    }

    #[test]
    fn test_row_projection() {
        let window = TimeWindow {
            start: ts("2024-01-01T00:00:00Z"),
            end: ts("2024-01-01T01:00:00Z"),
        };
        assert_eq!(window.row_of(ts("2024-01-01T00:00:00Z"), 11), Some(0));
        assert_eq!(window.row_of(ts("2024-01-01T00:30:00Z"), 11), Some(5));
        assert_eq!(window.row_of(ts("2024-01-01T01:00:00Z"), 11), Some(10));
        assert_eq!(window.row_of(ts("2024-01-01T01:00:01Z"), 11), None);
        assert_eq!(window.row_of(ts("2024-01-01T00:30:00Z"), 0), None);
        assert_eq!(window.clamped_row(ts("2023-12-31T00:00:00Z"), 11), 0);
        assert_eq!(window.clamped_row(ts("2024-01-02T00:00:00Z"), 11), 10);
    }

    #[test]
    fn test_bars_skip_hidden_events_but_keep_slots() {
        let mut s = session();
        s.toggle_visible(1);
        let model = ChartModel::build(&s);
        assert_eq!(model.slots, 3);
        let indices: Vec<usize> = model.bars.iter().map(|b| b.index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert!(!model.bars[0].faded);
        assert!(!model.bars[1].faded);
        // Same name, same color
        assert_eq!(model.bars[0].color, model.bars[1].color);
    }

    #[test]
    fn test_alternating_fade() {
        let model = ChartModel::build(&session());
        let faded: Vec<bool> = model.bars.iter().map(|b| b.faded).collect();
        assert_eq!(faded, vec![false, true, false]);
    }

    #[test]
    fn test_legend_lists_unique_names() {
        let model = ChartModel::build(&session());
        let names: Vec<&str> = model.legend.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["AOS", "BURN"]);
        assert_eq!(model.legend[1].color, 1);
    }

    #[test]
    fn test_annotations() {
        let mut s = session();
        let model = ChartModel::build(&s);
        assert_eq!(model.current_time, "Current Time: 00:00:00");
        assert_eq!(
            model.next_event,
            vec!["Time Until Next Event: 1:00:00", "Next Event: AOS"]
        );

        s.set_playhead(i64::MAX);
        let model = ChartModel::build(&s);
        // 03:10 - 01:00 + 2h = 4h10m
        assert_eq!(model.current_time, "Current Time: 04:10:00");
        assert_eq!(
            model.next_event,
            vec!["No Upcoming Events", "(Current Time: 04:10:00)"]
        );
    }

    #[test]
    fn test_window_at_end_of_calendar_is_none() {
        let dict: EventDictionary =
            [("A".to_string(), DictionaryEntry { duration: 60 })].into_iter().collect();
        let timeline = [TimelineEntry {
            event_id: "A".to_string(),
            start_time: "+262142-12-31T20:00:00Z".to_string(),
        }];
        let events = join(&dict, &timeline).unwrap();
        let s = Session::new(events, &ViewerConfig::default());

        let model = ChartModel::build(&s);
        assert!(model.playhead.is_some());
        assert!(model.window.is_none());
        assert!(model.ticks.is_empty());
        assert_eq!(model.bars.len(), 1);
    }

    #[test]
    fn test_around_checks_both_edges() {
        let half = TimeDelta::hours(1);
        assert!(TimeWindow::around(DateTime::<Utc>::MAX_UTC, half).is_none());
        assert!(TimeWindow::around(DateTime::<Utc>::MIN_UTC, half).is_none());
        let window = TimeWindow::around(ts("2024-01-01T12:00:00Z"), half).unwrap();
        assert_eq!(window.start, ts("2024-01-01T11:00:00Z"));
        assert_eq!(window.end, ts("2024-01-01T13:00:00Z"));
    }

    #[test]
    fn test_empty_session() {
        let s = Session::new(Vec::new(), &ViewerConfig::default());
        let model = ChartModel::build(&s);
        assert!(model.window.is_none());
        assert!(model.ticks.is_empty());
        assert!(model.bars.is_empty());
        assert_eq!(model.next_event[0], "No Upcoming Events");
    }
}

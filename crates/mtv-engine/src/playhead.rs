//! Playhead: the moving "current time" marker.
//!
//! The playhead is a single offset in seconds from the reference start,
//! which sits one hour before the earliest event. It is moved either by
//! direct slider sets or by auto-play ticks.

use chrono::{DateTime, TimeDelta, Utc};

use crate::event::DisplayEvent;

/// Default simulated seconds advanced per auto-play tick.
pub const DEFAULT_PLAY_STEP_SECONDS: u64 = 300;

/// Default real-time interval between auto-play ticks, in milliseconds.
pub const DEFAULT_PLAY_INTERVAL_MS: u64 = 1000;

/// Lead time between the reference start and the earliest event, in seconds.
pub const REFERENCE_LEAD_SECONDS: i64 = 3600;

/// Extra range past the span of the events.
pub const RANGE_PADDING_SECONDS: i64 = 7200;

/// Reference start for a set of events: one hour before the earliest start.
///
/// `None` for no events, or when that instant is before the earliest
/// representable time.
pub fn reference_start(events: &[DisplayEvent]) -> Option<DateTime<Utc>> {
    events
        .iter()
        .map(|e| e.start_time)
        .min()
        .and_then(|earliest| {
            earliest.checked_sub_signed(TimeDelta::seconds(REFERENCE_LEAD_SECONDS))
        })
}

/// Upper bound of the playhead: `latest_end - earliest_start + 7200`.
pub fn playhead_bound(events: &[DisplayEvent]) -> u64 {
    let earliest = events.iter().map(|e| e.start_time).min();
    let latest = events.iter().map(|e| e.end_time).max();
    match (earliest, latest) {
        (Some(earliest), Some(latest)) => {
            let span = (latest - earliest).num_seconds() + RANGE_PADDING_SECONDS;
            u64::try_from(span).unwrap_or(0)
        }
        _ => 0,
    }
}

/// Playhead position and play state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playhead {
    elapsed: u64,
    max: u64,
    step: u64,
    playing: bool,
}

impl Playhead {
    /// Create a paused playhead at 0 with the given bound and play step.
    ///
    /// A zero step is raised to one second so auto-play always reaches the bound.
    pub fn new(max: u64, step: u64) -> Self {
        Self {
            elapsed: 0,
            max,
            step: step.max(1),
            playing: false,
        }
    }

    /// Seconds since the reference start.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Upper bound of the slider.
    pub fn max(&self) -> u64 {
        self.max
    }

    /// Whether auto-play is running.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Fraction of the range covered, in `[0, 1]`.
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            self.elapsed as f64 / self.max as f64
        }
    }

    /// Set the slider. Out-of-range values are clamped.
    pub fn set(&mut self, seconds: i64) -> u64 {
        self.elapsed = u64::try_from(seconds.max(0)).unwrap_or(0).min(self.max);
        self.elapsed
    }

    /// Move the slider by a signed amount, clamped.
    pub fn nudge(&mut self, delta: i64) -> u64 {
        let current = i64::try_from(self.elapsed).unwrap_or(i64::MAX);
        self.set(current.saturating_add(delta))
    }

    /// Flip play/pause. Returns the new playing flag.
    pub fn toggle_play(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Stop auto-play without moving.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Advance one auto-play step.
    ///
    /// Does nothing when paused. Play stops once the bound is reached.
    /// Returns whether play is still running.
    pub fn tick(&mut self) -> bool {
        if !self.playing {
            return false;
        }
        if self.elapsed >= self.max {
            self.playing = false;
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(self.step).min(self.max);
        if self.elapsed >= self.max {
            self.playing = false;
        }
        self.playing
    }

    /// Back to 0, paused.
    pub fn reset(&mut self) {
        self.elapsed = 0;
        self.playing = false;
    }
}

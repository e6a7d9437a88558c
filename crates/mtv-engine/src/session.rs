//! Viewer session: the event list plus all interactive view state.
//!
//! Every user interaction is a method on [`Session`]. The session owns the
//! events, zoom ladder, playhead and per-event edit flags; nothing is kept
//! in ambient state, so each handler can be exercised on its own.

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info, warn};

use crate::config::ViewerConfig;
use crate::event::{ColorMap, DisplayEvent};
use crate::loader::load_events;
use crate::next_event::{find_next_event, NextEvent};
use crate::playhead::{playhead_bound, reference_start, Playhead};
use crate::time::{combine, parse_time_of_day, time_of_day, TimeError};
use crate::zoom::{ZoomController, ZoomError, ZoomLevel};

/// Text pre-filled into the edit fields of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    /// Start time of day, `HH:MM:SS`.
    pub start: String,
    /// End time of day, `HH:MM:SS`.
    pub end: String,
}

/// Interactive state of one viewer session.
#[derive(Debug, Clone)]
pub struct Session {
    events: Vec<DisplayEvent>,
    colors: ColorMap,
    reference: Option<DateTime<Utc>>,
    zoom: ZoomController,
    playhead: Playhead,
    editing: Vec<bool>,
    nudge_seconds: u64,
    load_error: Option<String>,
}

impl Session {
    /// Create a session over already-joined events.
    pub fn new(events: Vec<DisplayEvent>, config: &ViewerConfig) -> Self {
        let colors = ColorMap::new(&events);
        let reference = reference_start(&events);
        let playhead = Playhead::new(playhead_bound(&events), config.play_step_seconds);
        let editing = vec![false; events.len()];
        Self {
            events,
            colors,
            reference,
            zoom: ZoomController::new(config.initial_zoom),
            playhead,
            editing,
            nudge_seconds: config.nudge_seconds,
            load_error: None,
        }
    }

    /// Load the configured documents.
    ///
    /// A load failure is kept as a user-visible message and the session
    /// continues with no events.
    pub fn load(config: &ViewerConfig) -> Self {
        match load_events(&config.event_dictionary, &config.events_timeline) {
            Ok(events) => Self::new(events, config),
            Err(e) => {
                warn!(error = %e, "Failed to load mission events");
                let mut session = Self::new(Vec::new(), config);
                session.load_error = Some(e.to_string());
                session
            }
        }
    }

    /// Message describing why loading failed, if it did.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// All events, in timeline order.
    pub fn events(&self) -> &[DisplayEvent] {
        &self.events
    }

    /// One event by index.
    pub fn event(&self, index: usize) -> Option<&DisplayEvent> {
        self.events.get(index)
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether there are no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Color assignment for event names.
    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    /// Zoom state.
    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    /// Playhead state.
    pub fn playhead(&self) -> &Playhead {
        &self.playhead
    }

    /// One hour before the earliest event, fixed at load.
    pub fn reference_start(&self) -> Option<DateTime<Utc>> {
        self.reference
    }

    /// Absolute instant of the playhead.
    pub fn playhead_time(&self) -> Option<DateTime<Utc>> {
        let elapsed = i64::try_from(self.playhead.elapsed()).ok()?;
        self.reference
            .and_then(|r| r.checked_add_signed(TimeDelta::try_seconds(elapsed)?))
    }

    /// Next event after the playhead, recomputed from the current events.
    pub fn next_event(&self) -> NextEvent<'_> {
        match self.playhead_time() {
            Some(at) => find_next_event(&self.events, at),
            None => NextEvent::NoMoreEvents,
        }
    }

    // ------------------------------------------------------------------
    // Zoom
    // ------------------------------------------------------------------

    /// Step to the next finer tick granularity.
    pub fn zoom_in(&mut self) -> Result<ZoomLevel, ZoomError> {
        let result = self.zoom.zoom_in();
        debug!(?result, "Zoom in");
        result
    }

    /// Step to the next coarser tick granularity.
    pub fn zoom_out(&mut self) -> Result<ZoomLevel, ZoomError> {
        let result = self.zoom.zoom_out();
        debug!(?result, "Zoom out");
        result
    }

    // ------------------------------------------------------------------
    // Playhead
    // ------------------------------------------------------------------

    /// Set the slider to an absolute offset, clamped to the range.
    pub fn set_playhead(&mut self, seconds: i64) -> u64 {
        self.playhead.set(seconds)
    }

    /// Move the slider by a number of nudge steps (negative moves back).
    pub fn nudge_playhead(&mut self, steps: i64) -> u64 {
        let nudge = i64::try_from(self.nudge_seconds).unwrap_or(i64::MAX);
        self.playhead.nudge(steps.saturating_mul(nudge))
    }

    /// Flip play/pause.
    pub fn toggle_play(&mut self) -> bool {
        let playing = self.playhead.toggle_play();
        debug!(playing, elapsed = self.playhead.elapsed(), "Toggle play");
        playing
    }

    /// One auto-play tick. Returns whether play continues.
    pub fn play_tick(&mut self) -> bool {
        let playing = self.playhead.tick();
        if !playing {
            debug!(elapsed = self.playhead.elapsed(), "Auto-play stopped");
        }
        playing
    }

    /// Slider back to 0 and play stopped.
    pub fn reset(&mut self) {
        self.playhead.reset();
    }

    // ------------------------------------------------------------------
    // Event grid
    // ------------------------------------------------------------------

    /// Flip an event's visibility. Returns the new flag.
    pub fn toggle_visible(&mut self, index: usize) -> Option<bool> {
        let event = self.events.get_mut(index)?;
        event.visible = !event.visible;
        Some(event.visible)
    }

    /// Set an event's visibility.
    pub fn set_visible(&mut self, index: usize, visible: bool) {
        if let Some(event) = self.events.get_mut(index) {
            event.visible = visible;
        }
    }

    /// Whether an event is in edit mode.
    pub fn is_editing(&self, index: usize) -> bool {
        self.editing.get(index).copied().unwrap_or(false)
    }

    /// Flip an event's edit mode. Returns the new flag.
    pub fn toggle_edit(&mut self, index: usize) -> Option<bool> {
        let flag = self.editing.get_mut(index)?;
        *flag = !*flag;
        Some(*flag)
    }

    /// Current times of day of an event, for pre-filling the edit fields.
    pub fn draft_for(&self, index: usize) -> Option<EditDraft> {
        self.events.get(index).map(|e| EditDraft {
            start: time_of_day(&e.start_time),
            end: time_of_day(&e.end_time),
        })
    }

    /// Leave edit mode without changing the event.
    pub fn cancel_edit(&mut self, index: usize) {
        if let Some(flag) = self.editing.get_mut(index) {
            *flag = false;
        }
    }

    /// Apply edited times of day to an event.
    ///
    /// Each time is recombined with the calendar date of the timestamp it
    /// replaces. Malformed times and an end before the start are rejected;
    /// the event is left untouched and stays in edit mode.
    pub fn save_edit(
        &mut self,
        index: usize,
        start: &str,
        end: &str,
    ) -> Result<&DisplayEvent, EditError> {
        if !self.is_editing(index) {
            return Err(EditError::NotEditing(index));
        }
        let event = self
            .events
            .get(index)
            .ok_or(EditError::UnknownEvent(index))?;

        let new_start = combine(event.start_time.date_naive(), parse_time_of_day(start)?);
        let new_end = combine(event.end_time.date_naive(), parse_time_of_day(end)?);
        if new_end < new_start {
            return Err(EditError::EndBeforeStart {
                start: time_of_day(&new_start),
                end: time_of_day(&new_end),
            });
        }

        self.editing[index] = false;
        let event = &mut self.events[index];
        event.start_time = new_start;
        event.end_time = new_end;
        info!(
            event = %event.event_name,
            start = %event.start_str(),
            end = %event.end_str(),
            "Event times edited"
        );
        Ok(&self.events[index])
    }
}

/// Rejected event edit.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    #[error("No event at index {0}")]
    UnknownEvent(usize),

    #[error("Event {0} is not in edit mode")]
    NotEditing(usize),

    #[error(transparent)]
    Time(#[from] TimeError),

    #[error("End time {end} is before start time {start}")]
    EndBeforeStart { start: String, end: String },
}

//! Finding the next upcoming event relative to the playhead.

use chrono::{DateTime, TimeDelta, Utc};

use crate::event::DisplayEvent;

/// Result of a next-event lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextEvent<'a> {
    /// The first event starting strictly after the playhead.
    Upcoming {
        event: &'a DisplayEvent,
        /// Time from the playhead to the event start.
        until: TimeDelta,
    },
    /// Nothing left to start.
    NoMoreEvents,
}

impl NextEvent<'_> {
    /// Name of the upcoming event, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Upcoming { event, .. } => Some(event.event_name.as_str()),
            Self::NoMoreEvents => None,
        }
    }
}

/// Find the first event (by start time) that starts after `at`.
///
/// Events are sorted by start on every call; ties keep input order.
pub fn find_next_event(events: &[DisplayEvent], at: DateTime<Utc>) -> NextEvent<'_> {
    let mut sorted: Vec<&DisplayEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.start_time);

    match sorted.into_iter().find(|e| e.start_time > at) {
        Some(event) => NextEvent::Upcoming {
            event,
            until: event.start_time - at,
        },
        None => NextEvent::NoMoreEvents,
    }
}

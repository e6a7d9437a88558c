//! mtv-engine: Headless engine for the mission timeline viewer
//!
//! This crate provides everything the viewer does that is not drawing:
//! - Loading and joining the event dictionary and timeline documents
//! - Zoom ladder, playhead and next-event lookup
//! - Session state with visibility toggles and in-place time edits
//! - A render-agnostic chart model

pub mod chart;
pub mod config;
pub mod event;
pub mod loader;
pub mod next_event;
pub mod playhead;
pub mod session;
pub mod time;
pub mod zoom;

// Re-export commonly used types
pub use chart::{Bar, ChartModel, LegendEntry, TimeWindow, CHART_TITLE};
pub use config::{ConfigError, ViewerConfig};
pub use event::{ColorMap, DisplayEvent, PALETTE_SIZE};
pub use loader::{join, load_events, DictionaryEntry, EventDictionary, LoadError, TimelineEntry};
pub use next_event::{find_next_event, NextEvent};
pub use playhead::{playhead_bound, reference_start, Playhead};
pub use session::{EditDraft, EditError, Session};
pub use time::TimeError;
pub use zoom::{ZoomController, ZoomError, ZoomLevel};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

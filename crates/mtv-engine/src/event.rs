//! Display events and their color assignment.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::time::format_timestamp;

/// Number of entries in the qualitative color palette.
pub const PALETTE_SIZE: usize = 10;

/// An event as shown on the chart: a timeline entry joined with its duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayEvent {
    /// Event id from the dictionary.
    pub event_name: String,

    /// Start instant.
    #[serde(with = "document_timestamp")]
    pub start_time: DateTime<Utc>,

    /// End instant (start + dictionary duration, or as edited).
    #[serde(with = "document_timestamp")]
    pub end_time: DateTime<Utc>,

    /// Whether the event is drawn on the chart.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl DisplayEvent {
    /// Create a visible event.
    pub fn new(name: impl Into<String>, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            event_name: name.into(),
            start_time,
            end_time,
            visible: true,
        }
    }

    /// Length of the event.
    pub fn duration(&self) -> TimeDelta {
        self.end_time - self.start_time
    }

    /// Start time formatted in the document layout.
    pub fn start_str(&self) -> String {
        format_timestamp(&self.start_time)
    }

    /// End time formatted in the document layout.
    pub fn end_str(&self) -> String {
        format_timestamp(&self.end_time)
    }
}

/// Stable color index per unique event name.
///
/// Names are numbered in order of first appearance and the index wraps
/// around the palette, so the same name always gets the same color.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    names: Vec<String>,
}

impl ColorMap {
    /// Build the map from the loaded events.
    pub fn new(events: &[DisplayEvent]) -> Self {
        let mut names: Vec<String> = Vec::new();
        for event in events {
            if !names.contains(&event.event_name) {
                names.push(event.event_name.clone());
            }
        }
        Self { names }
    }

    /// Unique names in first-appearance order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Palette index for a name. Unknown names get index 0.
    pub fn index_of(&self, name: &str) -> usize {
        self.names
            .iter()
            .position(|n| n == name)
            .map_or(0, |i| i % PALETTE_SIZE)
    }
}

/// Serde adapter for `YYYY-MM-DDTHH:MM:SSZ` timestamps.
mod document_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        crate::time::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_timestamp;

    fn event(name: &str, start: &str, end: &str) -> DisplayEvent {
        DisplayEvent::new(
            name,
            parse_timestamp(start).unwrap(),
            parse_timestamp(end).unwrap(),
        )
    }

    #[test]
    fn test_serializes_in_document_layout() {
        let e = event("A", "2024-01-01T00:00:00Z", "2024-01-01T00:01:00Z");
        let json = serde_json::to_string(&e).unwrap();
        assert_eq!(
            json,
            r#"{"event_name":"A","start_time":"2024-01-01T00:00:00Z","end_time":"2024-01-01T00:01:00Z","visible":true}"#
        );
        let back: DisplayEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }

    #[test]
    fn test_duration() {
        let e = event("BURN", "2024-01-01T01:02:03Z", "2024-01-01T01:12:03Z");
        assert_eq!(e.duration(), TimeDelta::minutes(10));
    }

    #[test]
    fn test_color_map_is_stable_per_name() {
        let events = vec![
            event("A", "2024-01-01T00:00:00Z", "2024-01-01T00:01:00Z"),
            event("B", "2024-01-01T00:02:00Z", "2024-01-01T00:03:00Z"),
            event("A", "2024-01-01T00:04:00Z", "2024-01-01T00:05:00Z"),
        ];
        let colors = ColorMap::new(&events);
        assert_eq!(colors.names(), ["A".to_string(), "B".to_string()]);
        assert_eq!(colors.index_of("A"), 0);
        assert_eq!(colors.index_of("B"), 1);
        assert_eq!(colors.index_of("missing"), 0);
    }

    #[test]
    fn test_color_map_wraps_palette() {
        let events: Vec<DisplayEvent> = (0..12)
            .map(|i| event(&format!("E{i}"), "2024-01-01T00:00:00Z", "2024-01-01T00:01:00Z"))
            .collect();
        let colors = ColorMap::new(&events);
        assert_eq!(colors.index_of("E10"), 0);
        assert_eq!(colors.index_of("E11"), 1);
    }
}

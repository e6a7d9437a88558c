//! Loading and joining the event dictionary and event timeline documents.
//!
//! The dictionary maps an event id to its nominal duration; the timeline
//! schedules occurrences of those ids. Joining them produces the
//! [`DisplayEvent`] list the viewer works on.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::event::DisplayEvent;
use crate::time::{parse_timestamp, TimeError};

/// Event id → dictionary entry.
pub type EventDictionary = HashMap<String, DictionaryEntry>;

/// One entry of the event dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// Nominal duration in seconds.
    pub duration: i64,
}

/// One scheduled occurrence in the event timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub event_id: String,
    /// `YYYY-MM-DDTHH:MM:SSZ`.
    pub start_time: String,
}

/// Load both documents from disk and join them.
pub fn load_events(
    dictionary_path: &Path,
    timeline_path: &Path,
) -> Result<Vec<DisplayEvent>, LoadError> {
    let dictionary: EventDictionary = read_json(dictionary_path)?;
    let timeline: Vec<TimelineEntry> = read_json(timeline_path)?;
    let events = join(&dictionary, &timeline)?;
    info!(
        dictionary = dictionary.len(),
        timeline = timeline.len(),
        events = events.len(),
        "Loaded mission events"
    );
    Ok(events)
}

/// Join timeline entries with their dictionary durations.
///
/// Entries whose id is not in the dictionary are dropped. Output order
/// follows the timeline. A negative duration would put the end before the
/// start, so it is rejected.
pub fn join(
    dictionary: &EventDictionary,
    timeline: &[TimelineEntry],
) -> Result<Vec<DisplayEvent>, LoadError> {
    let mut events = Vec::with_capacity(timeline.len());
    for entry in timeline {
        let Some(definition) = dictionary.get(&entry.event_id) else {
            debug!(event_id = %entry.event_id, "Dropping timeline entry with unknown event id");
            continue;
        };
        if definition.duration < 0 {
            return Err(LoadError::NegativeDuration {
                event_id: entry.event_id.clone(),
                duration: definition.duration,
            });
        }
        let start = parse_timestamp(&entry.start_time)?;
        let end = TimeDelta::try_seconds(definition.duration)
            .and_then(|d| start.checked_add_signed(d))
            .ok_or_else(|| LoadError::DurationOutOfRange {
                event_id: entry.event_id.clone(),
                duration: definition.duration,
            })?;
        events.push(DisplayEvent::new(entry.event_id.clone(), start, end));
    }
    Ok(events)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Errors that can occur while loading the input documents.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A document does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A document could not be read.
    #[error("Error reading file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document is not valid JSON of the expected shape.
    #[error("Error decoding JSON from file: {}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A timeline start time is malformed.
    #[error(transparent)]
    Time(#[from] TimeError),

    /// A dictionary duration is below zero.
    #[error("Duration {duration}s of event '{event_id}' is negative")]
    NegativeDuration { event_id: String, duration: i64 },

    /// A duration pushes the end time outside the representable range.
    #[error("Duration {duration}s of event '{event_id}' is out of range")]
    DurationOutOfRange { event_id: String, duration: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::format_timestamp;
    use tempfile::TempDir;

    fn dictionary(entries: &[(&str, i64)]) -> EventDictionary {
        entries
            .iter()
            .map(|(id, duration)| ((*id).to_string(), DictionaryEntry { duration: *duration }))
            .collect()
    }

    fn entry(id: &str, start: &str) -> TimelineEntry {
        TimelineEntry {
            event_id: id.to_string(),
            start_time: start.to_string(),
        }
    }

    #[test]
    fn test_join_single_event() {
        let dict = dictionary(&[("A", 60)]);
        let events = join(&dict, &[entry("A", "2024-01-01T00:00:00Z")]).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_name, "A");
        assert_eq!(format_timestamp(&events[0].start_time), "2024-01-01T00:00:00Z");
        assert_eq!(format_timestamp(&events[0].end_time), "2024-01-01T00:01:00Z");
        assert!(events[0].visible);
    }

    #[test]
    fn test_join_end_is_start_plus_duration() {
        let dict = dictionary(&[("AOS", 600), ("LOS", 30), ("BURN", 7200)]);
        let timeline = vec![
            entry("AOS", "2024-03-01T23:55:00Z"),
            entry("BURN", "2024-03-02T01:00:00Z"),
            entry("LOS", "2024-03-02T04:00:00Z"),
        ];
        let events = join(&dict, &timeline).unwrap();

        assert_eq!(events.len(), 3);
        for (event, source) in events.iter().zip(&timeline) {
            let duration = dict[&source.event_id].duration;
            assert_eq!(event.duration().num_seconds(), duration);
            assert_eq!(event.start_str(), source.start_time);
        }
        // Crosses midnight
        assert_eq!(events[0].end_str(), "2024-03-02T00:05:00Z");
    }

    #[test]
    fn test_join_drops_unknown_ids() {
        let dict = dictionary(&[("A", 60)]);
        let timeline = vec![
            entry("A", "2024-01-01T00:00:00Z"),
            entry("UNKNOWN", "not even a timestamp"),
            entry("A", "2024-01-01T01:00:00Z"),
        ];
        let events = join(&dict, &timeline).unwrap();

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.event_name == "A"));
    }

    #[test]
    fn test_join_rejects_bad_start_time() {
        let dict = dictionary(&[("A", 60)]);
        let err = join(&dict, &[entry("A", "2024-01-01")]).unwrap_err();
        assert!(matches!(err, LoadError::Time(_)));
    }

    #[test]
    fn test_join_rejects_absurd_duration() {
        let dict = dictionary(&[("A", i64::MAX)]);
        let err = join(&dict, &[entry("A", "2024-01-01T00:00:00Z")]).unwrap_err();
        assert!(matches!(err, LoadError::DurationOutOfRange { .. }));
    }

    #[test]
    fn test_join_rejects_negative_duration() {
        let dict = dictionary(&[("A", -60)]);
        let err = join(&dict, &[entry("A", "2024-01-01T00:00:00Z")]).unwrap_err();
        assert!(matches!(err, LoadError::NegativeDuration { duration: -60, .. }));
        assert_eq!(err.to_string(), "Duration -60s of event 'A' is negative");
    }

    #[test]
    fn test_join_allows_zero_duration() {
        let dict = dictionary(&[("MARK", 0)]);
        let events = join(&dict, &[entry("MARK", "2024-01-01T00:00:00Z")]).unwrap();
        assert_eq!(events[0].start_time, events[0].end_time);
    }

    #[test]
    fn test_load_events_from_files() {
        let dir = TempDir::new().unwrap();
        let dict_path = dir.path().join("event_dictionary.json");
        let timeline_path = dir.path().join("events_timeline.json");
        std::fs::write(
            &dict_path,
            r#"{"A": {"duration": 60, "description": "ignored"}, "B": {"duration": 120}}"#,
        )
        .unwrap();
        std::fs::write(
            &timeline_path,
            r#"[{"event_id": "B", "start_time": "2024-01-01T00:10:00Z"},
                {"event_id": "A", "start_time": "2024-01-01T00:00:00Z"},
                {"event_id": "C", "start_time": "2024-01-01T00:20:00Z"}]"#,
        )
        .unwrap();

        let events = load_events(&dict_path, &timeline_path).unwrap();
        let names: Vec<&str> = events.iter().map(|e| e.event_name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_load_events_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json");
        let err = load_events(&missing, &missing).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
        assert!(err.to_string().starts_with("File not found: "));
    }

    #[test]
    fn test_load_events_bad_json() {
        let dir = TempDir::new().unwrap();
        let dict_path = dir.path().join("event_dictionary.json");
        let timeline_path = dir.path().join("events_timeline.json");
        std::fs::write(&dict_path, r#"{"A": {"duration": 60}}"#).unwrap();
        std::fs::write(&timeline_path, "[{").unwrap();

        let err = load_events(&dict_path, &timeline_path).unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
        assert!(err.to_string().starts_with("Error decoding JSON from file: "));
    }

    #[test]
    fn test_load_events_dictionary_without_duration() {
        let dir = TempDir::new().unwrap();
        let dict_path = dir.path().join("event_dictionary.json");
        let timeline_path = dir.path().join("events_timeline.json");
        std::fs::write(&dict_path, r#"{"A": {"length": 60}}"#).unwrap();
        std::fs::write(&timeline_path, "[]").unwrap();

        let err = load_events(&dict_path, &timeline_path).unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }
}

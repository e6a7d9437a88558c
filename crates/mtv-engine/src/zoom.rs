//! Time axis zoom ladder.
//!
//! The axis moves through a fixed sequence of tick granularities, from
//! 12 hours down to 1 minute. Each level carries a precomputed half-width
//! for the visible window and an axis spacing increment applied when
//! zooming in from it (and removed again when zooming back out to it).

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Axis spacing at the default 1-hour level.
pub const BASE_AXIS_SPACING: i64 = 600;

/// Tick granularity of the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum ZoomLevel {
    #[serde(rename = "12h")]
    TwelveHours,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "3h")]
    ThreeHours,
    #[default]
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "1m")]
    OneMinute,
}

impl ZoomLevel {
    /// All levels, coarsest first.
    pub const LADDER: [ZoomLevel; 8] = [
        Self::TwelveHours,
        Self::SixHours,
        Self::ThreeHours,
        Self::OneHour,
        Self::ThirtyMinutes,
        Self::FifteenMinutes,
        Self::FiveMinutes,
        Self::OneMinute,
    ];

    fn position(self) -> usize {
        self as usize
    }

    /// Spacing between axis ticks.
    pub fn tick_seconds(self) -> i64 {
        match self {
            Self::TwelveHours => 12 * 3600,
            Self::SixHours => 6 * 3600,
            Self::ThreeHours => 3 * 3600,
            Self::OneHour => 3600,
            Self::ThirtyMinutes => 30 * 60,
            Self::FifteenMinutes => 15 * 60,
            Self::FiveMinutes => 5 * 60,
            Self::OneMinute => 60,
        }
    }

    /// Half-width of the visible window around the playhead.
    pub fn half_window(self) -> TimeDelta {
        match self {
            Self::TwelveHours => TimeDelta::hours(144),
            Self::SixHours => TimeDelta::hours(72),
            Self::ThreeHours => TimeDelta::hours(36),
            Self::OneHour => TimeDelta::hours(12),
            Self::ThirtyMinutes => TimeDelta::hours(6),
            Self::FifteenMinutes => TimeDelta::hours(3),
            Self::FiveMinutes => TimeDelta::hours(1),
            Self::OneMinute => TimeDelta::minutes(12),
        }
    }

    /// Axis spacing added when zooming in from this level.
    fn spacing_increment(self) -> i64 {
        match self {
            Self::TwelveHours | Self::SixHours | Self::ThreeHours => 50,
            Self::OneHour | Self::ThirtyMinutes | Self::FifteenMinutes | Self::FiveMinutes => 100,
            Self::OneMinute => 0,
        }
    }

    /// Next finer level, if any.
    pub fn finer(self) -> Option<Self> {
        Self::LADDER.get(self.position() + 1).copied()
    }

    /// Next coarser level, if any.
    pub fn coarser(self) -> Option<Self> {
        self.position()
            .checked_sub(1)
            .and_then(|i| Self::LADDER.get(i).copied())
    }

    /// Short label, e.g. `1h` or `15m`.
    pub fn label(self) -> &'static str {
        match self {
            Self::TwelveHours => "12h",
            Self::SixHours => "6h",
            Self::ThreeHours => "3h",
            Self::OneHour => "1h",
            Self::ThirtyMinutes => "30m",
            Self::FifteenMinutes => "15m",
            Self::FiveMinutes => "5m",
            Self::OneMinute => "1m",
        }
    }

    /// Axis spacing this level has when reached from the default level.
    fn axis_spacing(self) -> i64 {
        let default = ZoomLevel::OneHour.position();
        let target = self.position();
        if target >= default {
            BASE_AXIS_SPACING
                + Self::LADDER[default..target]
                    .iter()
                    .map(|l| l.spacing_increment())
                    .sum::<i64>()
        } else {
            BASE_AXIS_SPACING
                - Self::LADDER[target..default]
                    .iter()
                    .map(|l| l.spacing_increment())
                    .sum::<i64>()
        }
    }
}

impl std::fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Zoom state of the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomController {
    level: ZoomLevel,
    axis_spacing: i64,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(ZoomLevel::default())
    }
}

impl ZoomController {
    /// Start at the given level.
    pub fn new(level: ZoomLevel) -> Self {
        Self {
            level,
            axis_spacing: level.axis_spacing(),
        }
    }

    /// Current tick granularity.
    pub fn level(&self) -> ZoomLevel {
        self.level
    }

    /// Current axis spacing.
    pub fn axis_spacing(&self) -> i64 {
        self.axis_spacing
    }

    /// Move to the next finer level.
    pub fn zoom_in(&mut self) -> Result<ZoomLevel, ZoomError> {
        let next = self.level.finer().ok_or(ZoomError::AtFinest)?;
        self.axis_spacing += self.level.spacing_increment();
        self.level = next;
        Ok(next)
    }

    /// Move to the next coarser level.
    pub fn zoom_out(&mut self) -> Result<ZoomLevel, ZoomError> {
        let prev = self.level.coarser().ok_or(ZoomError::AtCoarsest)?;
        self.axis_spacing -= prev.spacing_increment();
        self.level = prev;
        Ok(prev)
    }
}

/// Zoom requested past either end of the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ZoomError {
    #[error("Cannot zoom in more")]
    AtFinest,

    #[error("Cannot zoom out more")]
    AtCoarsest,
}

//! Timeline rendering.
//!
//! This module provides:
//! - [`TimelineChart`] - the time axis, event bars, legend and playhead
//! - [`EventGrid`] - the per-event visibility and edit panel

mod chart;
mod grid;

pub use chart::TimelineChart;
pub use grid::{grid_height, EventGrid, MIN_CELL_WIDTH};

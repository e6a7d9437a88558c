//! UI building blocks for the timeline viewer.

pub mod layout;
pub mod theme;
pub mod widgets;

pub use layout::{centered_fixed, viewer_layout, ViewerLayout};

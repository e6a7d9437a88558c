//! Reusable widgets for the timeline viewer.

pub mod slider;
pub mod status_bar;
pub mod text_input;

pub use slider::PlayheadSlider;
pub use status_bar::{KeyHint, StatusBar};
pub use text_input::TextInputState;

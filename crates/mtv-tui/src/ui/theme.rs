//! Theme and styling definitions for the timeline viewer.

use mtv_engine::PALETTE_SIZE;
use ratatui::style::{Color, Modifier, Style};

/// Color palette for the TUI.
pub struct Palette;

impl Palette {
    // Base colors
    pub const BG: Color = Color::Rgb(30, 30, 40);
    pub const FG: Color = Color::Rgb(220, 220, 230);
    pub const DIM: Color = Color::Rgb(140, 140, 160);

    // Accent colors
    pub const ACCENT: Color = Color::Rgb(130, 170, 255);

    // Status bar colors (high contrast)
    pub const STATUS_BG: Color = Color::Rgb(45, 45, 60);
    pub const STATUS_KEY_BG: Color = Color::Rgb(70, 90, 140);

    // Status colors
    pub const SUCCESS: Color = Color::Rgb(130, 220, 130);
    pub const WARNING: Color = Color::Rgb(240, 200, 100);
    pub const ERROR: Color = Color::Rgb(240, 100, 100);

    // Playhead line and annotations
    pub const PLAYHEAD: Color = Color::Rgb(0, 200, 80);

    // Border colors
    pub const BORDER: Color = Color::Rgb(80, 80, 100);
    pub const BORDER_ACTIVE: Color = Color::Rgb(130, 170, 255);

    /// Qualitative palette for event bars, indexed by color slot.
    pub const EVENTS: [Color; PALETTE_SIZE] = [
        Color::Rgb(99, 110, 250),  // #636efa
        Color::Rgb(239, 85, 59),   // #ef553b
        Color::Rgb(0, 204, 150),   // #00cc96
        Color::Rgb(171, 99, 250),  // #ab63fa
        Color::Rgb(255, 161, 90),  // #ffa15a
        Color::Rgb(25, 211, 243),  // #19d3f3
        Color::Rgb(255, 102, 146), // #ff6692
        Color::Rgb(182, 232, 128), // #b6e880
        Color::Rgb(255, 151, 255), // #ff97ff
        Color::Rgb(254, 203, 82),  // #fecb52
    ];
}

/// Color for an event color slot.
pub fn event_color(slot: usize) -> Color {
    Palette::EVENTS[slot % PALETTE_SIZE]
}

/// Status indicator symbols (with ASCII fallbacks).
pub struct Symbols;

impl Symbols {
    pub const CHECKED: &'static str = "[x]";
    pub const UNCHECKED: &'static str = "[ ]";
    pub const BAR: &'static str = "┃";
    pub const BAR_FADED: &'static str = "│";
    pub const PLAYHEAD: &'static str = "─";
    pub const PLAY: &'static str = ">";
    pub const PAUSE: &'static str = "||";
}

/// Common styles used throughout the TUI.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::BG)
    }

    /// Dimmed text for secondary information.
    pub fn dim() -> Style {
        Style::default().fg(Palette::DIM).bg(Palette::BG)
    }

    /// Highlighted/selected item.
    pub fn highlight() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .bg(Palette::BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Active/focused element.
    pub fn active() -> Style {
        Style::default().fg(Palette::ACCENT).bg(Palette::BG)
    }

    /// Success status.
    pub fn success() -> Style {
        Style::default().fg(Palette::SUCCESS).bg(Palette::BG)
    }

    /// Title style.
    pub fn title() -> Style {
        Style::default()
            .fg(Palette::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Playhead line and its annotations.
    pub fn playhead() -> Style {
        Style::default().fg(Palette::PLAYHEAD).bg(Palette::BG)
    }

    /// Event bar in its palette color; faded bars are dimmed.
    pub fn event_bar(slot: usize, faded: bool) -> Style {
        let style = Style::default().fg(event_color(slot)).bg(Palette::BG);
        if faded {
            style.add_modifier(Modifier::DIM)
        } else {
            style.add_modifier(Modifier::BOLD)
        }
    }

    /// Key hint style (for status bar) - bright on dark for visibility.
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Palette::FG)
            .bg(Palette::STATUS_KEY_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Key hint label style - readable on status bar background.
    pub fn key_label() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Status bar background style.
    pub fn status_bar() -> Style {
        Style::default().fg(Palette::FG).bg(Palette::STATUS_BG)
    }

    /// Border style for inactive elements.
    pub fn border() -> Style {
        Style::default().fg(Palette::BORDER)
    }

    /// Border style for active/focused elements.
    pub fn border_active() -> Style {
        Style::default().fg(Palette::BORDER_ACTIVE)
    }
}

/// Slider track rendering, e.g. `[====>     ]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn slider_track(progress: f64, width: usize) -> String {
    if width == 0 {
        return "[]".to_string();
    }
    let pos = ((progress.clamp(0.0, 1.0) * (width - 1) as f64).round() as usize).min(width - 1);
    format!(
        "[{}o{}]",
        "=".repeat(pos),
        " ".repeat(width - 1 - pos)
    )
}

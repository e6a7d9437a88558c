//! mtv-tui: Terminal UI for the mission timeline viewer
//!
//! This crate provides the interactive layer on top of `mtv-engine`:
//! - Chart with legend, tick axis, event bars and playhead annotations
//! - Playhead slider with timed auto-play
//! - Event grid with visibility toggles and inline time edits

mod app;
mod event;
mod screens;
#[cfg(test)]
pub mod test_utils;
mod timeline;
mod ui;

use screens::Screen as ScreenTrait;

pub use app::{App, EditField, Focus, NoticeLevel};
pub use event::{Action, Event, EventHandler};
pub use mtv_engine;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture, KeyEventKind, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mtv_engine::ViewerConfig;
use ratatui::{backend::CrosstermBackend, buffer::Buffer, layout::Rect, Terminal};
use std::io::{self, stdout};
use tokio::time::{interval, MissedTickBehavior};
use tracing::info;

/// Input poll and UI tick rate.
const TICK_RATE_MS: u64 = 250;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Loads the configured documents, sets up the terminal, runs the event
/// loop, and restores the terminal on exit.
pub async fn run_tui(config: ViewerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(config);
    info!(events = app.session.len(), "Viewer started");

    // Setup terminal with RAII guard for cleanup
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    app.viewport_width = terminal.size()?.width;

    let mut events = EventHandler::new(TICK_RATE_MS);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    // Restore cursor before guard drops
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut play = interval(app.config.play_interval());
    play.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            render_app(app, area, frame.buffer_mut());
        })?;

        let was_playing = app.session.playhead().is_playing();

        tokio::select! {
            event = events.next() => {
                let Some(event) = event else {
                    break;
                };
                handle_event(app, event);
            }
            // Only polled while playing
            _ = play.tick(), if was_playing => {
                app.on_play_tick();
            }
        }

        // First auto-play step lands one full interval after play starts
        if !was_playing && app.session.playhead().is_playing() {
            play.reset();
        }

        if app.should_quit {
            break;
        }
    }

    info!("Viewer closed");
    Ok(())
}

fn handle_event(app: &mut App, event: Event) {
    match event {
        Event::Key(key) => {
            if key.kind != KeyEventKind::Press {
                return;
            }
            if !app.handle_edit_key(key) {
                app.handle_action(event::key_to_action(key));
            }
        }
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => app.handle_action(Action::Left),
            MouseEventKind::ScrollDown => app.handle_action(Action::Right),
            _ => {}
        },
        Event::Tick => app.tick(),
        Event::Resize(width, _) => app.viewport_width = width,
    }
}

/// Draw the whole UI for the current app state.
fn render_app(app: &App, area: Rect, buf: &mut Buffer) {
    screens::viewer::ViewerScreen.render(app, area, buf);

    if app.show_help {
        screens::render_help_overlay(area, buf);
    }
}

/// Get the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}


#[cfg(test)]
mod navigation_tests {
    use super::*;
    use crate::test_utils::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn render(app: &App) -> String {
        let area = Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT);
        let mut buf = Buffer::empty(area);
        render_app(app, area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn test_quit_key() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_typing_q_while_editing_does_not_quit() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.editor.as_ref().unwrap().start.content(), "01:00:00q");
    }

    #[test]
    fn test_edit_round_trip_through_keys() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        for _ in 0..2 {
            press(&mut app, KeyCode::Backspace);
        }
        for c in "15".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert!(app.editor.is_none());
        assert_eq!(app.session.events()[1].start_str(), "2024-01-01T02:00:15Z");
        assert!(render(&app).contains("Changes Saved!"));
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut app = create_test_app();
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_event(&mut app, Event::Key(key));
        assert!(!app.should_quit);
    }

    #[test]
    fn test_mouse_scroll_nudges_playhead() {
        let mut app = create_test_app();
        let scroll = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        handle_event(&mut app, Event::Mouse(scroll));
        assert_eq!(app.session.playhead().elapsed(), 60);
    }

    #[test]
    fn test_resize_updates_grid_columns() {
        let mut app = create_test_app();
        handle_event(&mut app, Event::Resize(200, 50));
        assert_eq!(app.grid_columns(), 5);
    }

    #[test]
    fn test_help_overlay_renders_over_viewer() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('?'));
        let out = render(&app);
        assert!(out.contains(" Help "));
        press(&mut app, KeyCode::Char('x'));
        assert!(!app.show_help);
    }

    #[test]
    fn test_playing_shows_in_status_bar() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('p'));
        app.on_play_tick();
        let out = render(&app);
        assert!(out.contains("> Slider Value: 300 / 15000"));
        assert!(out.contains("Playing  Zoom: 1h"));
    }
}

//! Application state and update logic for the timeline viewer.

use crate::event::Action;
use crate::timeline::MIN_CELL_WIDTH;
use crate::ui::widgets::TextInputState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mtv_engine::{Session, ViewerConfig};
use tracing::{debug, warn};

/// Ticks a notice stays visible (~3 seconds at the 250ms tick rate).
const NOTICE_TICKS: usize = 12;

/// Nudge steps moved by PageUp/PageDown.
const LARGE_NUDGE_STEPS: i64 = 10;

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Chart and slider; the grid is collapsed.
    #[default]
    Chart,
    /// Event grid is expanded and has the selection.
    Grid,
}

/// Severity of a status bar notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Transient message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// `None` keeps the notice until replaced.
    ttl: Option<usize>,
}

/// Edit field with keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Start,
    End,
}

/// Open editor for one event's times.
#[derive(Debug, Clone)]
pub struct Editor {
    /// Index of the event being edited.
    pub index: usize,
    pub start: TextInputState,
    pub end: TextInputState,
    pub field: EditField,
}

impl Editor {
    fn focused_input(&mut self) -> &mut TextInputState {
        match self.field {
            EditField::Start => &mut self.start,
            EditField::End => &mut self.end,
        }
    }

    fn switch_field(&mut self) {
        self.field = match self.field {
            EditField::Start => EditField::End,
            EditField::End => EditField::Start,
        };
    }
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// Whether the help overlay is visible.
    pub show_help: bool,

    /// Events and view state.
    pub session: Session,

    /// Viewer settings.
    pub config: ViewerConfig,

    /// Panel with keyboard focus.
    pub focus: Focus,

    /// Selected event in the grid.
    pub selected: usize,

    /// Open event editor, if any.
    pub editor: Option<Editor>,

    /// Status bar notice.
    pub notice: Option<Notice>,

    /// Terminal width, 0 until known. Limits the grid columns.
    pub viewport_width: u16,

    /// Tick counter for animations.
    pub tick: usize,
}

impl App {
    /// Load the configured documents and create the app.
    pub fn new(config: ViewerConfig) -> Self {
        let session = Session::load(&config);
        Self::with_session(session, config)
    }

    /// Create the app over an existing session.
    pub fn with_session(session: Session, config: ViewerConfig) -> Self {
        let notice = session.load_error().map(|message| Notice {
            level: NoticeLevel::Error,
            message: message.to_string(),
            ttl: None,
        });
        Self {
            should_quit: false,
            show_help: false,
            session,
            config,
            focus: Focus::Chart,
            selected: 0,
            editor: None,
            notice,
            viewport_width: 0,
            tick: 0,
        }
    }

    /// Show a notice for a few seconds.
    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notice = Some(Notice {
            level,
            message: message.into(),
            ttl: Some(NOTICE_TICKS),
        });
    }

    /// Grid columns: the configured count, reduced to what fits the
    /// terminal, at least one.
    pub fn grid_columns(&self) -> usize {
        let configured = self.config.grid_columns.max(1);
        if self.viewport_width == 0 {
            return configured;
        }
        // Two columns go to the grid border
        let fit = usize::from(self.viewport_width.saturating_sub(2) / MIN_CELL_WIDTH).max(1);
        configured.min(fit)
    }

    /// Handle an action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            Action::Help => {
                self.show_help = !self.show_help;
                return;
            }
            _ => {}
        }

        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return;
        }

        // Playhead and zoom work from either panel
        match action {
            Action::ZoomIn => {
                if let Err(e) = self.session.zoom_in() {
                    self.notify(NoticeLevel::Warning, e.to_string());
                }
                return;
            }
            Action::ZoomOut => {
                if let Err(e) = self.session.zoom_out() {
                    self.notify(NoticeLevel::Warning, e.to_string());
                }
                return;
            }
            Action::TogglePlay => {
                self.session.toggle_play();
                return;
            }
            Action::Reset => {
                self.session.reset();
                return;
            }
            Action::PageUp => {
                self.session.nudge_playhead(-LARGE_NUDGE_STEPS);
                return;
            }
            Action::PageDown => {
                self.session.nudge_playhead(LARGE_NUDGE_STEPS);
                return;
            }
            Action::Home => {
                self.session.set_playhead(0);
                return;
            }
            Action::End => {
                self.session.set_playhead(i64::MAX);
                return;
            }
            Action::ToggleGrid => {
                self.focus = match self.focus {
                    Focus::Chart => Focus::Grid,
                    Focus::Grid => Focus::Chart,
                };
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Chart => self.handle_chart_action(action),
            Focus::Grid => self.handle_grid_action(action),
        }
    }

    fn handle_chart_action(&mut self, action: Action) {
        match action {
            Action::Toggle => {
                self.session.toggle_play();
            }
            Action::Left => {
                self.session.nudge_playhead(-1);
            }
            Action::Right => {
                self.session.nudge_playhead(1);
            }
            Action::Edit => {
                self.focus = Focus::Grid;
                self.begin_edit();
            }
            _ => {}
        }
    }

    fn handle_grid_action(&mut self, action: Action) {
        let last = self.session.len().saturating_sub(1);
        let columns = self.grid_columns();
        match action {
            Action::Back => self.focus = Focus::Chart,
            Action::Left => self.selected = self.selected.saturating_sub(1),
            Action::Right => self.selected = (self.selected + 1).min(last),
            Action::Up => self.selected = self.selected.saturating_sub(columns),
            Action::Down => {
                if self.selected + columns <= last {
                    self.selected += columns;
                }
            }
            Action::Toggle => {
                if let Some(visible) = self.session.toggle_visible(self.selected) {
                    debug!(index = self.selected, visible, "Toggle visibility");
                }
            }
            Action::Edit | Action::Select => self.begin_edit(),
            _ => {}
        }
    }

    /// Open the editor on the selected event.
    fn begin_edit(&mut self) {
        if let Some(editor) = self.editor.take() {
            self.session.cancel_edit(editor.index);
        }
        let index = self.selected;
        let Some(draft) = self.session.draft_for(index) else {
            return;
        };
        if self.session.toggle_edit(index) == Some(true) {
            self.editor = Some(Editor {
                index,
                start: TextInputState::with_content(draft.start),
                end: TextInputState::with_content(draft.end),
                field: EditField::Start,
            });
        }
    }

    /// Close the editor without changing the event.
    fn cancel_edit(&mut self) {
        if let Some(editor) = self.editor.take() {
            self.session.cancel_edit(editor.index);
        }
    }

    /// Apply the editor's text to its event.
    fn save_edit(&mut self) {
        let Some(editor) = &self.editor else {
            return;
        };
        let index = editor.index;
        let result = self
            .session
            .save_edit(index, editor.start.content(), editor.end.content())
            .map(|_| ());
        match result {
            Ok(()) => {
                self.editor = None;
                self.notify(NoticeLevel::Info, "Changes Saved!");
            }
            Err(e) => {
                warn!(index, error = %e, "Edit rejected");
                self.notify(NoticeLevel::Error, e.to_string());
            }
        }
    }

    /// Route a key to the open editor.
    ///
    /// Returns true if the key was consumed and must not become an action.
    pub fn handle_edit_key(&mut self, key: KeyEvent) -> bool {
        if self.show_help {
            return false;
        }
        // Let Ctrl+C through to quit
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        let Some(editor) = self.editor.as_mut() else {
            return false;
        };

        match key.code {
            KeyCode::Esc => self.cancel_edit(),
            KeyCode::Enter => self.save_edit(),
            KeyCode::Tab | KeyCode::BackTab => editor.switch_field(),
            KeyCode::Char(c) => editor.focused_input().insert(c),
            KeyCode::Backspace => editor.focused_input().backspace(),
            KeyCode::Delete => editor.focused_input().delete(),
            KeyCode::Left => editor.focused_input().move_left(),
            KeyCode::Right => editor.focused_input().move_right(),
            KeyCode::Home => editor.focused_input().move_home(),
            KeyCode::End => editor.focused_input().move_end(),
            _ => {}
        }
        true
    }

    /// One auto-play interval elapsed.
    pub fn on_play_tick(&mut self) {
        self.session.play_tick();
    }

    /// Increment tick counter and update time-based state.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);

        // Clear notice after TTL expires
        let expired = match self.notice.as_mut().and_then(|n| n.ttl.as_mut()) {
            Some(ttl) => {
                *ttl = ttl.saturating_sub(1);
                *ttl == 0
            }
            None => false,
        };
        if expired {
            self.notice = None;
        }
    }
}

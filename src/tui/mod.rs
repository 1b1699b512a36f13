//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Input Model
//!
//! Key meaning depends on the active mode:
//!
//! - **Category / shuffle modes**: single keys are commands (`c` choose,
//!   Space next, `r` reveal, `h` hide, arrows and `-`/`+` step).
//! - **Number / keyword modes**: typed characters edit the query box and the
//!   search reruns on every edit, so commands there use Ctrl chords.
//!
//! The category picker overlay, when open, swallows every key except Ctrl+C.
//!
//! ## Redraw Strategy
//!
//! Nothing animates. The loop sleeps up to 500ms in `poll` and only redraws
//! after an event (key, paste, resize).

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::selection::Mode;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{CategoryPickerEvent, CategoryPickerState, QueryEvent, QueryInput};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub query_input: QueryInput,
    // Category picker overlay (None = hidden)
    pub category_picker: Option<CategoryPickerState>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            query_input: QueryInput::new(),
            category_picker: None,
        }
    }

    fn open_category_picker(&mut self, app: &App) {
        self.category_picker = Some(CategoryPickerState::new(
            app.dataset.categories().to_vec(),
            app.selection.category(),
        ));
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Release events are filtered in event.rs; terminals without the
        // protocol ignore the flags
        execute!(
            stdout(),
            EnableBracketedPaste,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape,
            Show
        );
    }
}

pub fn run(mut app: App) -> std::io::Result<()> {
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(500));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain everything pending before the next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, event) == Effect::Quit {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }
    }

    info!("TUI exiting");
    ratatui::restore();
    Ok(())
}

/// Apply one event to the session. Returns `Effect::Quit` when the loop should end.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    match event {
        TuiEvent::Resize => return Effect::None,
        TuiEvent::ForceQuit => return update(app, Action::Quit),
        _ => {}
    }

    // When the picker is open, route all events to it
    if let Some(picker) = tui.category_picker.as_mut() {
        match picker.handle_event(&event) {
            Some(CategoryPickerEvent::Select(category)) => {
                tui.category_picker = None;
                return update(app, Action::SelectCategory(Some(category)));
            }
            Some(CategoryPickerEvent::Dismiss) => tui.category_picker = None,
            None => {}
        }
        return Effect::None;
    }

    let mode = app.selection.active_mode();
    match event {
        TuiEvent::Escape => update(app, Action::Quit),
        TuiEvent::NextMode => switch_mode(app, tui, mode.next()),
        TuiEvent::PreviousMode => switch_mode(app, tui, mode.previous()),
        TuiEvent::Reveal => update(app, Action::Reveal),
        TuiEvent::ToggleHide => update(app, Action::ToggleHideResolution),
        TuiEvent::CycleFieldScope if mode == Mode::KeywordSearch => {
            let scope = app.field_scope.next();
            update(app, Action::SetFieldScope(scope))
        }
        TuiEvent::CycleCategoryScope if mode == Mode::KeywordSearch => {
            let scope = app.category_scope.next(app.dataset.categories());
            update(app, Action::SetCategoryScope(scope))
        }
        event if mode.uses_text_query() => handle_query_event(app, tui, event),
        event => handle_command_key(app, tui, event),
    }
}

fn switch_mode(app: &mut App, tui: &mut TuiState, mode: Mode) -> Effect {
    debug!("Switching mode to {:?}", mode);
    tui.query_input.clear();
    update(app, Action::SetMode(mode))
}

/// Number and keyword modes: editing keys go to the query box.
fn handle_query_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    let keyword = app.selection.active_mode() == Mode::KeywordSearch;
    match event {
        TuiEvent::CursorUp if keyword => update(app, Action::Previous),
        TuiEvent::CursorDown | TuiEvent::Submit if keyword => update(app, Action::Next),
        event => match tui.query_input.handle_event(&event) {
            Some(QueryEvent::Changed(query)) => update(app, Action::SetQuery(query)),
            None => Effect::None,
        },
    }
}

/// Category, sequential and shuffle modes: single keys are commands.
fn handle_command_key(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    let mode = app.selection.active_mode();
    match event {
        TuiEvent::InputChar('c') if mode.uses_category() => {
            tui.open_category_picker(app);
            Effect::None
        }
        TuiEvent::InputChar(' ') | TuiEvent::Submit => update(app, Action::Next),
        TuiEvent::InputChar('+') | TuiEvent::CursorRight if mode == Mode::Sequential => {
            update(app, Action::Next)
        }
        TuiEvent::InputChar('-') | TuiEvent::CursorLeft if mode == Mode::Sequential => {
            update(app, Action::Previous)
        }
        TuiEvent::InputChar('r') => update(app, Action::Reveal),
        TuiEvent::InputChar('h') => update(app, Action::ToggleHideResolution),
        _ => Effect::None,
    }
}

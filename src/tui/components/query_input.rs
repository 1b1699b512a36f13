//! # QueryInput Component
//!
//! Single-line text box for the number and keyword searches.
//!
//! ## Responsibilities
//!
//! - Capture typed and pasted text (newlines are dropped)
//! - Handle editing (backspace, delete, cursor movement)
//! - Emit the full query after every edit so the search stays live
//!
//! The buffer and cursor are internal state. The title is a prop from the
//! parent, which knows the active mode and scopes.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Left border.
const BORDER_OFFSET: u16 = 1;

/// High-level events emitted by the QueryInput
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryEvent {
    /// The text changed; carries the new query.
    Changed(String),
}

pub struct QueryInput {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Block title (Prop)
    pub title: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    /// First visible column when the text is wider than the box
    scroll: u16,
}

impl Default for QueryInput {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryInput {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            title: String::new(),
            cursor: 0,
            scroll: 0,
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    fn insert(&mut self, text: &str) -> Option<QueryEvent> {
        let clean: String = text.chars().filter(|c| !c.is_control()).collect();
        if clean.is_empty() {
            return None;
        }
        self.buffer.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
        Some(self.changed())
    }

    fn changed(&self) -> QueryEvent {
        QueryEvent::Changed(self.buffer.clone())
    }

    /// Keep the cursor column inside the visible width.
    fn update_scroll(&mut self, visible: u16) {
        let col = self.buffer[..self.cursor].width() as u16;
        if col < self.scroll {
            self.scroll = col;
        } else if visible > 0 && col >= self.scroll + visible {
            self.scroll = col + 1 - visible;
        }
    }
}

impl Component for QueryInput {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let visible = area.width.saturating_sub(2 * BORDER_OFFSET);
        self.update_scroll(visible);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(self.title.as_str());
        let input = Paragraph::new(self.buffer.as_str())
            .block(block)
            .scroll((0, self.scroll))
            .style(Style::default().fg(Color::Green));
        frame.render_widget(input, area);

        let col = (self.buffer[..self.cursor].width() as u16).saturating_sub(self.scroll);
        frame.set_cursor_position((area.x + BORDER_OFFSET + col, area.y + BORDER_OFFSET));
    }
}

impl EventHandler for QueryInput {
    type Event = QueryEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Paste(text) => self.insert(text),
            TuiEvent::Backspace => {
                let prev = self.buffer[..self.cursor].chars().next_back()?;
                self.cursor -= prev.len_utf8();
                self.buffer.remove(self.cursor);
                Some(self.changed())
            }
            TuiEvent::Delete => {
                self.buffer[self.cursor..].chars().next()?;
                self.buffer.remove(self.cursor);
                Some(self.changed())
            }
            TuiEvent::CursorLeft => {
                if let Some(prev) = self.buffer[..self.cursor].chars().next_back() {
                    self.cursor -= prev.len_utf8();
                }
                None
            }
            TuiEvent::CursorRight => {
                if let Some(next) = self.buffer[self.cursor..].chars().next() {
                    self.cursor += next.len_utf8();
                }
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            _ => None,
        }
    }
}

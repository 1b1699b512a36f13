//! # Category Picker Component
//!
//! Centered overlay for choosing the category in the two category modes.
//! Opened with `c`.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CategoryPickerState` lives in `TuiState` while the overlay is open
//! - `CategoryPicker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::tui::event::TuiEvent;

/// Persistent state for the category picker overlay.
pub struct CategoryPickerState {
    pub categories: Vec<String>,
    pub selected: usize,
    pub list_state: ListState,
}

impl CategoryPickerState {
    /// Open on `current` when it is one of `categories`, else on the first.
    pub fn new(categories: Vec<String>, current: Option<&str>) -> Self {
        let selected = current
            .and_then(|c| categories.iter().position(|x| x == c))
            .unwrap_or(0);
        let mut list_state = ListState::default();
        if !categories.is_empty() {
            list_state.select(Some(selected));
        }
        Self {
            categories,
            selected,
            list_state,
        }
    }

    /// Handle a key event, returning a CategoryPickerEvent if the overlay should act.
    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<CategoryPickerEvent> {
        match event {
            TuiEvent::Escape => Some(CategoryPickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                if !self.categories.is_empty() {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.categories.is_empty() {
                    self.selected = (self.selected + 1).min(self.categories.len() - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit => self
                .categories
                .get(self.selected)
                .map(|c| CategoryPickerEvent::Select(c.clone())),
            _ => None,
        }
    }
}

/// Events emitted by the category picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryPickerEvent {
    Select(String),
    Dismiss,
}

/// Transient render wrapper for the category picker overlay.
pub struct CategoryPicker<'a> {
    state: &'a mut CategoryPickerState,
    category_label: &'a str,
    current: Option<&'a str>,
}

impl<'a> CategoryPicker<'a> {
    pub fn new(
        state: &'a mut CategoryPickerState,
        category_label: &'a str,
        current: Option<&'a str>,
    ) -> Self {
        Self {
            state,
            category_label,
            current,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 60, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Choose a {} ", self.category_label))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Select  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        if self.state.categories.is_empty() {
            let empty = Paragraph::new("The dataset has no categories.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let items: Vec<ListItem> = self
            .state
            .categories
            .iter()
            .enumerate()
            .map(|(i, category)| {
                let is_active = self.current == Some(category.as_str());
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if is_active {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let marker = if is_active { " *" } else { "" };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>2}. ", i + 1), style),
                    Span::styled(category.clone(), style),
                    Span::styled(marker, style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn categories() -> Vec<String> {
        vec!["Backstroke".into(), "Butterfly".into(), "Freestyle".into()]
    }

    #[test]
    fn test_opens_on_current_category() {
        let state = CategoryPickerState::new(categories(), Some("Freestyle"));
        assert_eq!(state.selected, 2);

        let state = CategoryPickerState::new(categories(), Some("Gone"));
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_navigation_clamps() {
        let mut state = CategoryPickerState::new(categories(), None);
        assert_eq!(state.handle_event(&TuiEvent::CursorUp), None);
        assert_eq!(state.selected, 0);

        for _ in 0..5 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(state.selected, 2);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(CategoryPickerEvent::Select("Freestyle".into()))
        );
    }

    #[test]
    fn test_escape_dismisses() {
        let mut state = CategoryPickerState::new(categories(), None);
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(CategoryPickerEvent::Dismiss)
        );
    }

    #[test]
    fn test_empty_picker_submit_does_nothing() {
        let mut state = CategoryPickerState::new(Vec::new(), None);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_render_lists_categories() {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = CategoryPickerState::new(categories(), Some("Butterfly"));

        terminal
            .draw(|f| {
                let area = f.area();
                CategoryPicker::new(&mut state, "Stroke", Some("Butterfly")).render(f, area);
            })
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Choose a Stroke"));
        assert!(text.contains("Backstroke"));
        assert!(text.contains("Butterfly *"));
    }
}

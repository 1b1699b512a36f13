//! # TitleBar Component
//!
//! Top line: application name, dataset size, and an optional status
//! (e.g. "Resolution hidden").
//!
//! Stateless. Every prop comes from the parent:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.dataset.len(), "Stroke".into(), status);
//! title_bar.render(frame, title_area);
//! ```

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;

const APP_TITLE: &str = "Stroke & Turn Situations and Resolutions";

pub struct TitleBar {
    /// Number of entries in the dataset
    pub entry_count: usize,
    /// Name of the grouping column (e.g. "Section")
    pub category_label: String,
    /// Transient status, empty for none
    pub status: String,
}

impl TitleBar {
    pub fn new(entry_count: usize, category_label: String, status: String) -> Self {
        Self {
            entry_count,
            category_label,
            status,
        }
    }

    fn text(&self) -> String {
        let base = format!(
            "{} ({} situations by {})",
            APP_TITLE,
            self.entry_count,
            self.category_label.to_lowercase()
        );
        if self.status.is_empty() {
            base
        } else {
            format!("{} | {}", base, self.status)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let span = Span::styled(self.text(), Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(span, area);
    }
}

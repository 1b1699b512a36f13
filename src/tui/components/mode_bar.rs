//! Tab strip for the five study modes. Tab / Shift+Tab move between them.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Tabs};

use crate::core::selection::Mode;
use crate::tui::component::Component;

pub struct ModeBar {
    pub active: Mode,
}

impl ModeBar {
    pub fn new(active: Mode) -> Self {
        Self { active }
    }
}

impl Component for ModeBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let titles = Mode::ALL.iter().map(|m| m.label());
        let tabs = Tabs::new(titles)
            .block(
                Block::bordered()
                    .border_type(ratatui::widgets::BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Mode "),
            )
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
            .select(self.active.index());
        frame.render_widget(tabs, area);
    }
}

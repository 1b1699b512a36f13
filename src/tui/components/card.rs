use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::dataset::Entry;
use crate::render::{card_header, highlight_segments};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;

/// A stateless component that renders the current situation card.
///
/// Created fresh each frame. With no entry it shows `placeholder` instead,
/// which is how "nothing selected" looks on screen.
#[derive(Clone, Copy)]
pub struct Card<'a> {
    pub entry: Option<&'a Entry>,
    pub category_label: &'a str,
    /// Resolution and rule are drawn only when this is set
    pub show_resolution: bool,
    /// Search text to mark in the situation and resolution
    pub highlight: Option<&'a str>,
    pub placeholder: &'a str,
}

impl<'a> Card<'a> {
    pub fn new(entry: Option<&'a Entry>, category_label: &'a str) -> Self {
        Self {
            entry,
            category_label,
            show_resolution: true,
            highlight: None,
            placeholder: "",
        }
    }

    fn lines(&self, entry: &'a Entry) -> Vec<Line<'a>> {
        let heading = |text: &'a str, color: Color| {
            Line::from(Span::styled(
                text,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        };

        let mut lines = vec![
            Line::from(Span::styled(
                card_header(entry, self.category_label),
                Style::default().fg(Color::Cyan),
            )),
            Line::default(),
            heading("Situation", Color::Yellow),
            self.highlighted(&entry.situation),
            Line::default(),
        ];

        if self.show_resolution {
            lines.push(heading("Recommended Resolution", Color::Green));
            lines.push(self.highlighted(&entry.resolution));
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled("Applicable Rule: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(entry.rule.as_str()),
            ]));
        } else {
            lines.push(Line::from(Span::styled(
                "Resolution hidden. Press r to reveal.",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )));
        }
        lines
    }

    fn highlighted(&self, text: &'a str) -> Line<'a> {
        let mark = Style::default().fg(Color::Black).bg(Color::Yellow);
        let spans: Vec<Span> = highlight_segments(text, self.highlight.unwrap_or(""))
            .into_iter()
            .map(|s| {
                if s.matched {
                    Span::styled(s.text, mark)
                } else {
                    Span::raw(s.text)
                }
            })
            .collect();
        Line::from(spans)
    }
}

impl<'a> Widget for Card<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let paragraph = match self.entry {
            Some(entry) => Paragraph::new(self.lines(entry)).wrap(Wrap { trim: true }),
            None => Paragraph::new(self.placeholder)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
        };

        paragraph.block(block).render(area, buf);
    }
}

impl<'a> Component for Card<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::entry;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    fn draw(card: Card) -> Buffer {
        let backend = TestBackend::new(70, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                f.render_widget(card, f.area());
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn text(buffer: &Buffer) -> String {
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_card_shows_situation_and_resolution() {
        let e = entry("17", "Butterfly", "Kick is alternating");
        let buffer = draw(Card::new(Some(&e), "Stroke"));
        let text = text(&buffer);
        assert!(text.contains("--- STROKE: Butterfly  #17 ---"));
        assert!(text.contains("Kick is alternating"));
        assert!(text.contains("Recommended Resolution"));
        assert!(text.contains("Applicable Rule: 101.2.2"));
    }

    #[test]
    fn test_hidden_resolution_shows_hint() {
        let e = entry("17", "Butterfly", "Kick is alternating");
        let card = Card {
            show_resolution: false,
            ..Card::new(Some(&e), "Stroke")
        };
        let text = text(&draw(card));
        assert!(text.contains("Resolution hidden"));
        assert!(!text.contains("Resolution for:"));
        assert!(!text.contains("Applicable Rule"));
    }

    #[test]
    fn test_placeholder_without_entry() {
        let card = Card {
            placeholder: "Type a situation number",
            ..Card::new(None, "Stroke")
        };
        assert!(text(&draw(card)).contains("Type a situation number"));
    }

    #[test]
    fn test_highlight_marks_matches() {
        let e = entry("3", "Starts", "Swimmer commits a Foot Fault");
        let card = Card {
            highlight: Some("foot"),
            ..Card::new(Some(&e), "Section")
        };
        let buffer = draw(card);

        let marked: String = buffer
            .content()
            .iter()
            .filter(|c| c.bg == Color::Yellow)
            .map(|c| c.symbol())
            .collect();
        // Once in the situation, once in the derived resolution
        assert_eq!(marked, "FootFoot");
    }
}

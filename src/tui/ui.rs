use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::selection::Mode;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Card, CategoryPicker, ModeBar, TitleBar};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(3), Length(3), Min(0), Length(1)]);
    let [title_area, mode_area, control_area, card_area, status_area] =
        layout.areas(frame.area());

    let status = if app.hide_resolution {
        "Resolution hidden until revealed".to_string()
    } else {
        String::new()
    };
    TitleBar::new(
        app.dataset.len(),
        app.dataset.category_label().to_string(),
        status,
    )
    .render(frame, title_area);

    ModeBar::new(app.selection.active_mode()).render(frame, mode_area);

    draw_controls(frame, control_area, app, tui);

    let mode = app.selection.active_mode();
    let prompt = placeholder(app);
    let mut card = Card {
        show_resolution: app.resolution_visible(),
        highlight: (mode == Mode::KeywordSearch).then_some(app.query.as_str()),
        placeholder: &prompt,
        ..Card::new(app.current(), app.dataset.category_label())
    };
    card.render(frame, card_area);

    draw_status(frame, status_area, app);

    // Overlay last so it sits on top
    if let Some(picker) = tui.category_picker.as_mut() {
        let area = frame.area();
        CategoryPicker::new(
            picker,
            app.dataset.category_label(),
            app.selection.category(),
        )
        .render(frame, area);
    }
}

/// The per-mode line under the tabs: chosen category, query box or counter.
fn draw_controls(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let label = app.dataset.category_label();
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));

    let text = match app.selection.active_mode() {
        Mode::ByNumber => {
            tui.query_input.title = match app.dataset.number_range() {
                Some((min, max)) => format!(" Situation # ({min} to {max}) "),
                None => " Situation # ".to_string(),
            };
            tui.query_input.render(frame, area);
            return;
        }
        Mode::KeywordSearch => {
            tui.query_input.title = format!(
                " Keyword | {} | {} | {} ",
                app.field_scope.label(),
                app.category_scope.label(),
                match_summary(app)
            );
            tui.query_input.render(frame, area);
            return;
        }
        Mode::ByCategoryRandom => category_line(app),
        Mode::Sequential => {
            let mut line = category_line(app);
            if app.current().is_some() {
                line.spans.push(Span::styled(
                    format!(
                        "   Item {} of {}",
                        app.selection.sequential_position(),
                        app.sequential_count()
                    ),
                    Style::default().fg(Color::Gray),
                ));
            }
            line
        }
        Mode::TotalRandom => Line::from(format!("Reviewed this session: {}", app.reviewed)),
    };

    let paragraph = Paragraph::new(text).block(block.title(format!(" {label} ")));
    frame.render_widget(paragraph, area);
}

fn category_line(app: &App) -> Line<'static> {
    match app.selection.category() {
        Some(category) => Line::from(Span::styled(
            category.to_string(),
            Style::default().fg(Color::Cyan),
        )),
        None => Line::from(Span::styled(
            "None chosen (press c)",
            Style::default().fg(Color::DarkGray),
        )),
    }
}

fn match_summary(app: &App) -> String {
    match app.matches.len() {
        0 => "no matches".to_string(),
        n => format!("match {} of {}", app.match_cursor + 1, n),
    }
}

fn placeholder(app: &App) -> String {
    match app.selection.active_mode() {
        Mode::ByCategoryRandom | Mode::Sequential if app.selection.category().is_none() => {
            format!(
                "Press c to choose a {}",
                app.dataset.category_label().to_lowercase()
            )
        }
        Mode::ByNumber => "Type a situation number".to_string(),
        Mode::KeywordSearch => "Type a keyword to search situations and resolutions".to_string(),
        _ => "Press Space for a situation".to_string(),
    }
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.notice {
        Some(notice) => Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        )),
        None => Line::from(Span::styled(
            help_text(app.selection.active_mode()),
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(line, area);
}

fn help_text(mode: Mode) -> &'static str {
    match mode {
        Mode::ByCategoryRandom => {
            "c Choose  Space Next  r Reveal  h Hide  Tab Mode  Esc Quit"
        }
        Mode::Sequential => {
            "c Choose  Space Next  ←/→ Step  r Reveal  h Hide  Tab Mode  Esc Quit"
        }
        Mode::KeywordSearch => {
            "↑/↓ Match  ^F Fields  ^G Category  ^R Reveal  ^A Hide  Tab Mode  Esc Quit"
        }
        Mode::ByNumber => "Type a number  ^R Reveal  ^A Hide  Tab Mode  Esc Quit",
        Mode::TotalRandom => "Space Next  r Reveal  h Hide  Tab Mode  Esc Quit",
    }
}

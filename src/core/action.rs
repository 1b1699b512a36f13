//! # Actions
//!
//! Everything a user can do while studying becomes an `Action`.
//! User picks a category? That's `Action::SelectCategory(Some(name))`.
//! User presses Enter for the next card? That's `Action::Next`.
//!
//! The `update()` function takes the current state and an action and moves
//! the state forward. No I/O here; both front ends feed the same reducer.
//!
//! ```text
//! State + Action  →  update()  →  New State (+ Effect)
//! ```

use log::{debug, info};

use crate::core::error::Notice;
use crate::core::search::{CategoryScope, FieldScope, keyword_search};
use crate::core::selection::{Filter, Mode};
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetMode(Mode),
    /// Category for the category modes. `None` deselects.
    SelectCategory(Option<String>),
    /// Keyword (KeywordSearch) or number (ByNumber) query text.
    SetQuery(String),
    SetFieldScope(FieldScope),
    SetCategoryScope(CategoryScope),
    /// Next random card, next sequential position, or next search match.
    Next,
    /// Previous sequential position or previous search match.
    Previous,
    /// Jump to a 1-based sequential position (wraps when out of range).
    JumpTo(i64),
    Reveal,
    ToggleHideResolution,
    Quit,
}

/// Side effects the front end must carry out after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);

    match action {
        Action::SetMode(mode) => {
            app.selection.set_mode(mode);
            app.query.clear();
            app.matches.clear();
            app.match_cursor = 0;
            app.reviewed = 0;
            app.notice = None;
            if mode == Mode::TotalRandom {
                draw_random(app);
            }
        }
        Action::SelectCategory(category) => select_category(app, category),
        Action::SetQuery(query) => match app.selection.active_mode() {
            Mode::ByNumber => search_number(app, query),
            Mode::KeywordSearch => {
                app.query = query;
                search_keyword(app);
            }
            mode => debug!("SetQuery ignored in {:?}", mode),
        },
        Action::SetFieldScope(scope) => {
            if scope != app.field_scope {
                app.field_scope = scope;
                rescope_search(app);
            }
        }
        Action::SetCategoryScope(scope) => {
            if scope != app.category_scope {
                app.category_scope = scope;
                rescope_search(app);
            }
        }
        Action::Next => step(app, 1),
        Action::Previous => step(app, -1),
        Action::JumpTo(position) => {
            if app.selection.active_mode() == Mode::Sequential {
                show_sequential(app, position);
            }
        }
        Action::Reveal => app.selection.reveal_resolution(),
        Action::ToggleHideResolution => {
            app.hide_resolution = !app.hide_resolution;
        }
        Action::Quit => return Effect::Quit,
    }

    Effect::None
}

fn select_category(app: &mut App, category: Option<String>) {
    let mode = app.selection.active_mode();
    if !mode.uses_category() {
        debug!("SelectCategory ignored in {:?}", mode);
        return;
    }

    let dataset = app.dataset.clone();
    app.notice = None;
    app.selection
        .set_filter(category.clone().map(Filter::Category), &dataset);

    let Some(category) = category else {
        return;
    };

    if dataset.category_pool(&category).is_empty() {
        info!("Empty pool for category {}", category);
        app.notice = Some(Notice::EmptyPool { category });
        return;
    }

    match mode {
        Mode::ByCategoryRandom if app.selection.current_entry().is_none() => draw_random(app),
        Mode::Sequential => {
            let position = app.selection.sequential_position() as i64;
            show_sequential(app, position);
        }
        _ => {}
    }
}

fn search_number(app: &mut App, query: String) {
    let dataset = app.dataset.clone();
    app.notice = None;
    app.selection
        .set_filter(Some(Filter::Number(query.clone())), &dataset);
    app.query = query;

    if app.query.trim().is_empty() {
        app.selection.show(None);
        return;
    }

    match dataset.lookup_by_number(&app.query) {
        Some(index) => app.selection.show(Some(index)),
        None => {
            info!("Number not found: {}", app.query.trim());
            app.selection.show(None);
            app.notice = Some(Notice::NotFound {
                query: app.query.trim().to_string(),
            });
        }
    }
}

fn search_keyword(app: &mut App) {
    let dataset = app.dataset.clone();
    app.notice = None;
    app.selection
        .set_filter(Some(Filter::Keyword(app.query.clone())), &dataset);

    app.matches = keyword_search(&dataset, &app.query, app.field_scope, &app.category_scope);
    app.match_cursor = 0;
    debug!("Keyword {:?}: {} matches", app.query, app.matches.len());

    if app.matches.is_empty() && !app.query.trim().is_empty() {
        app.notice = Some(Notice::NoMatches {
            query: app.query.trim().to_string(),
        });
    }
    app.selection.show(app.matches.first().copied());
}

/// A scope change recomputes the match set, so the shown match is dropped
/// and the first new match takes its place.
fn rescope_search(app: &mut App) {
    if app.selection.active_mode() != Mode::KeywordSearch {
        return;
    }
    let dataset = app.dataset.clone();
    app.selection.set_filter(None, &dataset);
    search_keyword(app);
}

fn step(app: &mut App, delta: i64) {
    match app.selection.active_mode() {
        Mode::ByCategoryRandom | Mode::TotalRandom => {
            if delta > 0 {
                draw_random(app);
            }
        }
        Mode::Sequential => {
            let position = app.selection.sequential_position() as i64 + delta;
            show_sequential(app, position);
        }
        Mode::KeywordSearch => {
            let count = app.matches.len();
            if count == 0 {
                return;
            }
            app.match_cursor = if delta > 0 {
                (app.match_cursor + 1) % count
            } else {
                (app.match_cursor + count - 1) % count
            };
            app.selection.show(app.matches.get(app.match_cursor).copied());
        }
        Mode::ByNumber => {}
    }
}

fn draw_random(app: &mut App) {
    let dataset = app.dataset.clone();
    let pool = match app.selection.active_mode() {
        Mode::TotalRandom => dataset.all(),
        _ => match app.selection.category() {
            Some(category) => dataset.category_pool(category),
            None => {
                app.notice = Some(Notice::NoCategory);
                return;
            }
        },
    };

    if app.selection.advance_random(&pool, &mut app.rng).is_some() {
        app.notice = None;
        if app.selection.active_mode() == Mode::TotalRandom {
            app.reviewed += 1;
        }
    } else if let Some(category) = app.selection.category() {
        app.notice = Some(Notice::EmptyPool {
            category: category.to_string(),
        });
    }
}

fn show_sequential(app: &mut App, position: i64) {
    let dataset = app.dataset.clone();
    let Some(category) = app.selection.category().map(str::to_string) else {
        app.notice = Some(Notice::NoCategory);
        return;
    };
    let pool = dataset.sequential_pool(&category);
    if app.selection.advance_sequential(&pool, position).is_none() {
        app.notice = Some(Notice::EmptyPool { category });
    }
}

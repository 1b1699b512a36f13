use rand::SeedableRng;
use rand::rngs::StdRng;
use situations::console::Console;
use situations::core::error::Notice;
use situations::core::{Action, App, Dataset, Effect, Entry, EntryNumber, Mode, update};
use std::collections::HashSet;
use std::io::Cursor;
use std::sync::Arc;

// ============================================================================
// Helper Functions
// ============================================================================

fn entry(number: &str, section: &str, situation: &str) -> Entry {
    Entry {
        number: EntryNumber::new(number),
        category: section.to_string(),
        situation: situation.to_string(),
        resolution: format!("Resolution {number}"),
        rule: format!("101.{number}"),
    }
}

/// Section "Starts" holds 2, 10 and 3 (unsorted on purpose), "Turns" holds 1 and 5.
fn dataset() -> Arc<Dataset> {
    Arc::new(Dataset::new(
        vec![
            entry("2", "Starts", "Early start by the lane 4 swimmer"),
            entry("1", "Turns", "Open turn with one hand"),
            entry("10", "Starts", "Swimmer loses balance on the block"),
            entry("5", "Turns", "Flip turn, no wall touch"),
            entry("3", "Starts", "Relay exchange is early"),
        ],
        "Section",
    ))
}

fn app(seed: u64) -> App {
    App::new(dataset(), StdRng::seed_from_u64(seed))
}

fn shown(app: &App) -> Option<&str> {
    app.current().map(|e| e.number.as_str())
}

// ============================================================================
// Reducer Scenarios
// ============================================================================

#[test]
fn test_sequential_walks_in_number_order() {
    let mut app = app(1);
    update(&mut app, Action::SetMode(Mode::Sequential));
    update(&mut app, Action::SelectCategory(Some("Starts".into())));

    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.push(shown(&app).unwrap().to_string());
        update(&mut app, Action::Next);
    }
    // 10 sorts after 3 numerically, then the walk wraps to the first
    assert_eq!(seen, ["2", "3", "10", "2"]);
}

#[test]
fn test_random_review_covers_category() {
    let mut app = app(7);
    update(&mut app, Action::SelectCategory(Some("Starts".into())));

    let mut seen = HashSet::new();
    for _ in 0..100 {
        let current = app.current().unwrap();
        assert_eq!(current.category, "Starts");
        seen.insert(current.number.to_string());
        update(&mut app, Action::Next);
    }
    assert_eq!(seen.len(), 3);
}

#[test]
fn test_same_seed_same_shuffle() {
    let draws = |seed| {
        let mut app = app(seed);
        update(&mut app, Action::SetMode(Mode::TotalRandom));
        (0..10)
            .map(|_| {
                let n = shown(&app).unwrap().to_string();
                update(&mut app, Action::Next);
                n
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(draws(99), draws(99));
}

#[test]
fn test_mode_switch_never_keeps_selection() {
    let mut app = app(3);
    update(&mut app, Action::SetMode(Mode::ByNumber));
    update(&mut app, Action::SetQuery("5".into()));
    update(&mut app, Action::Reveal);
    assert_eq!(shown(&app), Some("5"));

    update(&mut app, Action::SetMode(Mode::KeywordSearch));
    assert_eq!(shown(&app), None);
    assert!(!app.selection.resolution_revealed());
}

#[test]
fn test_keyword_search_then_number_lookup() {
    let mut app = app(3);
    update(&mut app, Action::SetMode(Mode::KeywordSearch));
    update(&mut app, Action::SetQuery("TURN".into()));
    assert_eq!(app.matches.len(), 2);
    assert_eq!(shown(&app), Some("1"));
    update(&mut app, Action::Next);
    assert_eq!(shown(&app), Some("5"));

    update(&mut app, Action::SetMode(Mode::ByNumber));
    update(&mut app, Action::SetQuery("42".into()));
    assert_eq!(app.notice, Some(Notice::NotFound { query: "42".into() }));
    assert_eq!(
        app.notice.as_ref().map(|n| n.to_string()).as_deref(),
        Some("No situation found with number: 42")
    );
}

#[test]
fn test_quit_is_an_effect() {
    let mut app = app(0);
    assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
}

// ============================================================================
// Console Scenarios
// ============================================================================

fn console(script: &str) -> String {
    let mut console = Console::new(app(5), Cursor::new(script.to_string()), Vec::new(), 60);
    console.run().unwrap();
    let (_, out) = console.into_parts();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_console_lists_sections() {
    let out = console("1\nb\nq\n");
    assert!(out.contains("Available Sections:"));
    assert!(out.contains("1. Starts"));
    assert!(out.contains("2. Turns"));
    assert!(out.contains("Happy Officiating!"));
}

#[test]
fn test_console_random_review_switches_section() {
    // Pick Turns, reveal, switch to Starts, reveal, back to menu
    let out = console("1\n2\n\ns\n1\n\nm\nq\n");
    assert!(out.contains("--- SECTION: Turns"));
    assert!(out.contains("Currently Studying: Turns"));
    assert!(out.contains("--- SECTION: Starts"));
    assert!(out.contains("Currently Studying: Starts"));
}

#[test]
fn test_console_sequential_completion_returns_to_chooser() {
    // Turns has two entries: reveal + next twice, then acknowledge
    let out = console("2\n2\n\n\n\n\n\nb\nq\n");
    assert!(out.contains("--- Starting sequential review of: Turns ---"));
    assert!(out.contains("*** You have completed all situations in Turns! ***"));
    assert_eq!(out.matches("Available Sections:").count(), 2);
}

#[test]
fn test_console_number_search_trims_input() {
    let out = console("3\n  10  \n\nm\nq\n");
    assert!(out.contains("Available Situations: 1 to 10"));
    assert!(out.contains("Swimmer loses balance on the block"));
    assert!(out.contains("APPLICABLE RULE: 101.10"));
}

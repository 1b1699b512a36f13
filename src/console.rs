//! # Console Adapter
//!
//! The line-based study loop: a numbered menu, one card at a time, Enter to
//! reveal and advance. Generic over `BufRead`/`Write` so a scripted session
//! can be replayed in tests.
//!
//! Like the TUI, this module never touches `Selection` directly. Every
//! keypress becomes an `Action` fed to `update()`.

use log::info;
use std::io::{self, BufRead, Write};

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::selection::Mode;
use crate::core::state::App;
use crate::render::{self, CardOptions};

const RULE_WIDE: usize = 50;

/// Where a mode loop hands control back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Next {
    Menu,
    /// Input closed (EOF) or the user quit.
    Exit,
}

/// Result of a prompt that can be backed out of.
enum Prompted<T> {
    Value(T),
    Back,
    Closed,
}

pub struct Console<R, W> {
    app: App,
    input: R,
    out: W,
    wrap_width: usize,
}

/// Run the console front end on stdin/stdout.
pub fn run(app: App, config: &ResolvedConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(app, stdin.lock(), stdout.lock(), config.wrap_width);
    console.run()
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(app: App, input: R, out: W, wrap_width: usize) -> Self {
        Self {
            app,
            input,
            out,
            wrap_width,
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn into_parts(self) -> (App, W) {
        (self.app, self.out)
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("\nSelect a Mode: ")? else {
                return self.farewell();
            };

            let next = match choice.to_lowercase().as_str() {
                "1" => self.review_by_category()?,
                "2" => self.sequential_review()?,
                "3" => self.search_by_number()?,
                "4" => self.total_shuffle()?,
                "q" => Next::Exit,
                _ => {
                    writeln!(self.out, "Invalid selection. Please try again.")?;
                    Next::Menu
                }
            };

            if next == Next::Exit {
                return self.farewell();
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        let bar = "=".repeat(RULE_WIDE);
        let label = self.app.dataset.category_label().to_string();
        writeln!(self.out, "\n{bar}")?;
        writeln!(self.out, "          USA SWIMMING OFFICIALS")?;
        writeln!(self.out, "              Stroke & Turn")?;
        writeln!(self.out, "         Situations and Resolutions")?;
        writeln!(self.out, "{bar}")?;
        writeln!(self.out, "1. Review by {label} (Random Item)")?;
        writeln!(self.out, "2. Sequential Review (Item-by-Item)")?;
        writeln!(self.out, "3. Search by Situation Number")?;
        writeln!(self.out, "4. Total Random Shuffle")?;
        writeln!(self.out, "Q. Quit")?;
        writeln!(self.out, "{bar}")
    }

    fn farewell(&mut self) -> io::Result<()> {
        if update(&mut self.app, Action::Quit) == Effect::Quit {
            writeln!(self.out, "Happy Officiating! See you on the deck.")?;
        }
        self.out.flush()
    }

    // ------------------------------------------------------------------
    // Modes
    // ------------------------------------------------------------------

    fn review_by_category(&mut self) -> io::Result<Next> {
        info!("Console: review by category");
        self.dispatch(Action::SetMode(Mode::ByCategoryRandom));

        let mut category = match self.choose_category()? {
            Prompted::Value(c) => c,
            Prompted::Back => return Ok(Next::Menu),
            Prompted::Closed => return Ok(Next::Exit),
        };
        self.dispatch(Action::SelectCategory(Some(category.clone())));

        loop {
            self.report_notice()?;
            if self.app.current().is_none() {
                return Ok(Next::Menu);
            }
            if !self.show_card()? {
                return Ok(Next::Exit);
            }

            writeln!(self.out, "\nCurrently Studying: {category}")?;
            let Some(choice) =
                self.prompt("Enter: Next random situation | 's': Change section | 'm': Main Menu: ")?
            else {
                return Ok(Next::Exit);
            };

            match choice.to_lowercase().as_str() {
                "m" => return Ok(Next::Menu),
                "s" => match self.choose_category()? {
                    Prompted::Value(c) => {
                        let before = self.app.selection.current_entry();
                        self.dispatch(Action::SelectCategory(Some(c.clone())));
                        // Same category again still matches, so draw explicitly
                        if self.app.selection.current_entry() == before {
                            self.dispatch(Action::Next);
                        }
                        category = c;
                    }
                    Prompted::Back => return Ok(Next::Menu),
                    Prompted::Closed => return Ok(Next::Exit),
                },
                _ => self.dispatch(Action::Next),
            }
        }
    }

    fn sequential_review(&mut self) -> io::Result<Next> {
        info!("Console: sequential review");
        self.dispatch(Action::SetMode(Mode::Sequential));

        loop {
            let category = match self.choose_category()? {
                Prompted::Value(c) => c,
                Prompted::Back => return Ok(Next::Menu),
                Prompted::Closed => return Ok(Next::Exit),
            };

            // Deselect first so picking the same category starts over at 1
            self.dispatch(Action::SelectCategory(None));
            self.dispatch(Action::SelectCategory(Some(category.clone())));
            if self.report_notice()? {
                continue;
            }

            writeln!(self.out, "\n--- Starting sequential review of: {category} ---")?;
            let total = self.app.sequential_count();

            loop {
                if !self.show_card()? {
                    return Ok(Next::Exit);
                }

                writeln!(self.out, "\n[Studying: {category}]")?;
                let Some(choice) =
                    self.prompt("Enter: Next Item | 's': Switch Section | 'm': Main Menu: ")?
                else {
                    return Ok(Next::Exit);
                };

                match choice.to_lowercase().as_str() {
                    "m" => return Ok(Next::Menu),
                    "s" => break,
                    _ if self.app.selection.sequential_position() >= total => {
                        writeln!(
                            self.out,
                            "\n*** You have completed all situations in {category}! ***"
                        )?;
                        if self
                            .prompt("[Press Enter to return to Section Selection]")?
                            .is_none()
                        {
                            return Ok(Next::Exit);
                        }
                        break;
                    }
                    _ => self.dispatch(Action::Next),
                }
            }
        }
    }

    fn search_by_number(&mut self) -> io::Result<Next> {
        info!("Console: search by number");
        self.dispatch(Action::SetMode(Mode::ByNumber));

        if let Some((min, max)) = self.app.dataset.number_range() {
            writeln!(self.out, "\nAvailable Situations: {min} to {max}")?;
        }

        loop {
            writeln!(self.out, "\n{}", "-".repeat(40))?;
            let Some(choice) = self.prompt("Enter Situation # to Find | 'm' for Main Menu: ")? else {
                return Ok(Next::Exit);
            };
            if choice.eq_ignore_ascii_case("m") {
                return Ok(Next::Menu);
            }

            self.dispatch(Action::SetQuery(choice));
            if self.report_notice()? {
                writeln!(self.out, "Please try a different number.")?;
                continue;
            }
            if self.app.current().is_some() && !self.show_card()? {
                return Ok(Next::Exit);
            }
        }
    }

    fn total_shuffle(&mut self) -> io::Result<Next> {
        info!("Console: total random shuffle");
        let bang = "!".repeat(40);
        writeln!(self.out, "\n{bang}")?;
        writeln!(self.out, "ENTERING TOTAL SHUFFLE MODE")?;
        writeln!(self.out, "Picking random situations from all sections...")?;
        writeln!(self.out, "{bang}")?;

        self.dispatch(Action::SetMode(Mode::TotalRandom));

        loop {
            if !self.show_card()? {
                return Ok(Next::Exit);
            }

            writeln!(self.out, "\n[Total reviewed this session: {}]", self.app.reviewed)?;
            let Some(choice) =
                self.prompt("Enter: Next random situation | 'm': Back to Main Menu: ")?
            else {
                return Ok(Next::Exit);
            };

            if choice.eq_ignore_ascii_case("m") {
                writeln!(
                    self.out,
                    "Shuffle session ended. You reviewed {} situations.",
                    self.app.reviewed
                )?;
                return Ok(Next::Menu);
            }
            self.dispatch(Action::Next);
        }
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn dispatch(&mut self, action: Action) {
        update(&mut self.app, action);
    }

    /// Print the current notice, if any. Returns whether one was printed.
    fn report_notice(&mut self) -> io::Result<bool> {
        match &self.app.notice {
            Some(notice) => {
                writeln!(self.out, "\n[!] {notice}")?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn choose_category(&mut self) -> io::Result<Prompted<String>> {
        let categories = self.app.dataset.categories().to_vec();
        let label = self.app.dataset.category_label().to_string();

        writeln!(self.out, "\nAvailable {label}s:")?;
        for (i, category) in categories.iter().enumerate() {
            writeln!(self.out, "{}. {}", i + 1, category)?;
        }

        loop {
            let prompt = format!("\nSelect a {label} number (or 'b' to go back): ");
            let Some(choice) = self.prompt(&prompt)? else {
                return Ok(Prompted::Closed);
            };
            if choice.eq_ignore_ascii_case("b") {
                return Ok(Prompted::Back);
            }
            match choice.parse::<usize>() {
                Ok(n) if (1..=categories.len()).contains(&n) => {
                    return Ok(Prompted::Value(categories[n - 1].clone()));
                }
                Ok(_) => writeln!(self.out, "Invalid number.")?,
                Err(_) => writeln!(self.out, "Please enter a valid number.")?,
            }
        }
    }

    /// Situation, wait for Enter, then resolution and rule.
    ///
    /// Returns `false` if input closed before the reveal.
    fn show_card(&mut self) -> io::Result<bool> {
        let Some(entry) = self.app.current().cloned() else {
            return Ok(true);
        };
        let label = self.app.dataset.category_label().to_string();
        let mut options = CardOptions {
            wrap_width: self.wrap_width,
            show_resolution: self.app.selection.resolution_revealed(),
        };

        writeln!(self.out, "\n{}", render::format_card(&entry, &label, &options))?;
        if options.show_resolution {
            return Ok(true);
        }
        if self.prompt("\n[Press Enter to see the Resolution...]")?.is_none() {
            return Ok(false);
        }

        self.dispatch(Action::Reveal);
        options.show_resolution = true;
        writeln!(self.out, "\n{}", render::format_resolution(&entry, &label, &options))?;
        Ok(true)
    }

    /// Write `text`, flush, and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

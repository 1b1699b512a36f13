//! Situations library exports for the binary and integration tests

use clap::ValueEnum;

pub mod console;
pub mod core;
pub mod render;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Which front end drives the session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Frontend {
    /// Full-screen terminal interface
    #[default]
    Tui,
    /// Line-by-line prompts on stdin/stdout
    Console,
}

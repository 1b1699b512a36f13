//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields:
//! - `TitleBar`: top line with dataset size and status
//! - `ModeBar`: tab strip of the study modes
//! - `Card`: the current situation, resolution and rule
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `QueryInput`: single-line query box for number and keyword search
//! - `CategoryPicker`: overlay list for choosing a category
//!
//! Each file holds the component's state, events, rendering and tests.
//! Components never read `App` directly; `ui.rs` hands them what they draw.
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs
//! ├── mode_bar.rs
//! ├── card.rs
//! ├── query_input.rs
//! └── category_picker.rs
//! ```

mod card;
mod category_picker;
mod mode_bar;
mod query_input;
mod title_bar;

pub use card::Card;
pub use category_picker::{CategoryPicker, CategoryPickerEvent, CategoryPickerState};
pub use mode_bar::ModeBar;
pub use query_input::{QueryEvent, QueryInput};
pub use title_bar::TitleBar;

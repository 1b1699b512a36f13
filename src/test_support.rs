//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

use crate::core::dataset::{Dataset, Entry, EntryNumber};
use crate::core::state::App;

/// Builds an entry with a derived resolution and a fixed rule.
pub fn entry(number: &str, category: &str, situation: &str) -> Entry {
    Entry {
        number: EntryNumber::new(number),
        category: category.to_string(),
        situation: situation.to_string(),
        resolution: format!("Resolution for: {situation}"),
        rule: "101.2.2".to_string(),
    }
}

/// Forty entries, numbered 1..=40, stored in descending order.
///
/// Multiples of 4 are Backstroke (ten entries), the rest Freestyle.
/// Multiples of 3 mention a "Foot Fault" in the situation.
pub fn sample_dataset() -> Dataset {
    let entries = (1..=40)
        .rev()
        .map(|n| {
            let category = if n % 4 == 0 { "Backstroke" } else { "Freestyle" };
            let situation = if n % 3 == 0 {
                format!("Swimmer commits a Foot Fault at the start of heat {n}")
            } else {
                format!("Swimmer touches the wall early in heat {n}")
            };
            entry(&n.to_string(), category, &situation)
        })
        .collect();
    Dataset::new(entries, "Stroke")
}

/// Creates a test App over the sample dataset with a fixed seed.
pub fn test_app() -> App {
    App::new(Arc::new(sample_dataset()), StdRng::seed_from_u64(42))
}

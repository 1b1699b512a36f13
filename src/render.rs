//! # Renderer
//!
//! Pure formatting of one entry. No terminal, no styling framework: the
//! console prints the strings as-is and the TUI turns highlight segments
//! into styled spans.

use crate::core::dataset::Entry;
use crate::core::search::fold_case;

/// A run of text that either matches the search query or doesn't.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// Split `text` into plain and matching runs for a case-insensitive `query`.
///
/// A blank query yields the whole text as one plain segment.
pub fn highlight_segments<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    let needle: Vec<char> = fold_case(query.trim()).chars().collect();
    if needle.is_empty() || text.is_empty() {
        return vec![Segment { text, matched: false }];
    }

    // Compare char by char so byte offsets always land on boundaries of `text`
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while i < chars.len() {
        match match_len(&chars[i..], &needle) {
            Some(len) => {
                let start = chars[i].0;
                let end = chars.get(i + len).map(|(b, _)| *b).unwrap_or(text.len());
                if plain_start < start {
                    segments.push(Segment { text: &text[plain_start..start], matched: false });
                }
                segments.push(Segment { text: &text[start..end], matched: true });
                plain_start = end;
                i += len;
            }
            None => i += 1,
        }
    }
    if plain_start < text.len() {
        segments.push(Segment { text: &text[plain_start..], matched: false });
    }
    segments
}

/// Number of chars of `haystack` consumed by a case-insensitive match of `needle`.
///
/// The needle may end partway through a char whose lowercase form is
/// several chars ('İ' folds to "i̇"); that char is then part of the match.
fn match_len(haystack: &[(usize, char)], needle: &[char]) -> Option<usize> {
    let mut n = 0;
    for (consumed, (_, c)) in haystack.iter().enumerate() {
        for lower in c.to_lowercase() {
            if needle.get(n) != Some(&lower) {
                return None;
            }
            n += 1;
            if n == needle.len() {
                return Some(consumed + 1);
            }
        }
    }
    None
}

/// Wrap every match of `query` in `open` / `close` markers.
pub fn highlight_markup(text: &str, query: &str, open: &str, close: &str) -> String {
    highlight_segments(text, query)
        .into_iter()
        .map(|s| {
            if s.matched {
                format!("{open}{}{close}", s.text)
            } else {
                s.text.to_string()
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct CardOptions {
    pub wrap_width: usize,
    pub show_resolution: bool,
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            wrap_width: crate::core::config::DEFAULT_WRAP_WIDTH,
            show_resolution: true,
        }
    }
}

/// `--- SECTION: Starts  #12 ---`
pub fn card_header(entry: &Entry, category_label: &str) -> String {
    format!(
        "--- {}: {}  #{} ---",
        category_label.to_uppercase(),
        entry.category,
        entry.number
    )
}

/// The situation half of a console card.
fn format_situation(entry: &Entry, category_label: &str, options: &CardOptions) -> String {
    format!(
        "{}\nSituation:\n\n{}",
        card_header(entry, category_label),
        fill(&entry.situation, options)
    )
}

/// The resolution half of a console card.
pub fn format_resolution(entry: &Entry, category_label: &str, options: &CardOptions) -> String {
    let rule = "-".repeat(30);
    format!(
        "{rule}\n{}\nRECOMMENDED RESOLUTION:\n{}\n\nAPPLICABLE RULE: {}\n{rule}",
        card_header(entry, category_label),
        fill(&entry.resolution, options),
        entry.rule,
    )
}

/// A whole card: situation, then the resolution when `show_resolution` is set.
pub fn format_card(entry: &Entry, category_label: &str, options: &CardOptions) -> String {
    let mut card = format_situation(entry, category_label, options);
    if options.show_resolution {
        card.push_str("\n\n");
        card.push_str(&format_resolution(entry, category_label, options));
    }
    card
}

fn fill(text: &str, options: &CardOptions) -> String {
    textwrap::fill(text, options.wrap_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::entry;

    fn joined(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_blank_query_is_one_plain_segment() {
        let segs = highlight_segments("Foot Fault", "  ");
        assert_eq!(segs, vec![Segment { text: "Foot Fault", matched: false }]);
    }

    #[test]
    fn test_highlight_is_case_insensitive() {
        let segs = highlight_segments("A Foot Fault, then another foot", "FOOT");
        assert_eq!(joined(&segs), "A Foot Fault, then another foot");
        let matched: Vec<&str> = segs.iter().filter(|s| s.matched).map(|s| s.text).collect();
        assert_eq!(matched, ["Foot", "foot"]);
    }

    #[test]
    fn test_highlight_handles_multibyte_text() {
        let segs = highlight_segments("Café touché", "touché");
        assert_eq!(segs.last(), Some(&Segment { text: "touché", matched: true }));
        assert_eq!(joined(&segs), "Café touché");
    }

    #[test]
    fn test_highlight_agrees_with_keyword_search_on_expanding_chars() {
        // 'İ' lowercases to "i" plus a combining dot, so "i" finds it
        let segs = highlight_segments("İzmir relay", "i");
        assert_eq!(segs[0], Segment { text: "İ", matched: true });
        assert_eq!(joined(&segs), "İzmir relay");

        let segs = highlight_segments("Relay at İzmir", "at i");
        let matched: Vec<&str> = segs.iter().filter(|s| s.matched).map(|s| s.text).collect();
        assert_eq!(matched, ["at İ"]);
    }

    #[test]
    fn test_highlight_markup() {
        assert_eq!(
            highlight_markup("Open turn, one hand", "one", "<mark>", "</mark>"),
            "Open turn, <mark>one</mark> hand"
        );
        assert_eq!(highlight_markup("no match", "xyz", "[", "]"), "no match");
    }

    #[test]
    fn test_card_header_uses_category_label() {
        let e = entry("12", "Starts", "Early start");
        assert_eq!(card_header(&e, "Section"), "--- SECTION: Starts  #12 ---");
    }

    #[test]
    fn test_format_card_hides_resolution() {
        let e = entry("3", "Turns", "Swimmer misses the wall");
        let hidden = CardOptions {
            show_resolution: false,
            ..Default::default()
        };
        let card = format_card(&e, "Stroke", &hidden);
        assert!(card.contains("Swimmer misses the wall"));
        assert!(!card.contains("RECOMMENDED RESOLUTION"));

        let card = format_card(&e, "Stroke", &CardOptions::default());
        assert!(card.contains("RECOMMENDED RESOLUTION:"));
        assert!(card.contains("APPLICABLE RULE: 101.2.2"));
    }

    #[test]
    fn test_format_card_wraps() {
        let e = entry("1", "Starts", &"word ".repeat(40));
        let options = CardOptions {
            wrap_width: 30,
            ..Default::default()
        };
        let card = format_situation(&e, "Section", &options);
        assert!(card.lines().skip(3).all(|l| l.chars().count() <= 30));
    }
}

//! Heading extraction from markdown text.

use std::sync::LazyLock;

use regex::Regex;

use crate::node::Headings;

/// A line starting with a run of `#`, capturing marker and remainder.
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^(#+)(.*)$").unwrap());

/// Marker of a level-1 heading.
const H1: &str = "#";

/// Collect all headings of `text`, grouped by marker, in document order.
///
/// Matches are consumed left to right without overlap, so each line is
/// examined once. Heading text is trimmed; markers of any depth are kept.
///
/// ```
/// let headings = docbundle_tree::extract_headings("# A\n## B\n# C\n");
/// assert_eq!(headings["#"], ["A", "C"]);
/// assert_eq!(headings["##"], ["B"]);
/// ```
#[must_use]
pub fn extract_headings(text: &str) -> Headings {
    let mut headings = Headings::new();
    for caps in HEADING_RE.captures_iter(text) {
        headings
            .entry(caps[1].to_owned())
            .or_default()
            .push(caps[2].trim().to_owned());
    }
    headings
}

/// First non-empty level-1 heading, if any.
#[must_use]
pub fn first_title(headings: &Headings) -> Option<&str> {
    headings
        .get(H1)?
        .iter()
        .map(String::as_str)
        .find(|title| !title.is_empty())
}

use std::cmp::Ordering;

use deunicode::deunicode;

use crate::models::SortMode;

use super::name::NameParts;

/// Letter bucket used when a display name has no alphanumeric character.
pub const UNSORTED_LETTER: char = '#';

/// Display string, comparison key and letter bucket for one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKeys {
    pub display: String,
    pub sort_key: String,
    pub letter_key: char,
}

/// Build the display and comparison keys for a parsed name.
pub fn build_sort_keys(name: &NameParts, mode: SortMode) -> SortKeys {
    let (lead, tail) = match mode {
        SortMode::Last => (name.last.as_str(), name.first.as_str()),
        SortMode::First => (name.first.as_str(), name.last.as_str()),
    };

    let display = [lead, tail]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    let sort_key = normalize_for_sort(&format!("{} {}", lead, tail));
    let letter_key = letter_key(&display);

    SortKeys {
        display,
        sort_key,
        letter_key,
    }
}

/// Lower-case `s` and collapse every run of non-alphanumeric characters
/// into a single space. Applying it twice gives the same result.
pub fn normalize_for_sort(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_space = false;

    for c in s.to_lowercase().chars() {
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }

    out
}

/// First alphanumeric character of `display`, upper-cased, or `#`.
pub fn letter_key(display: &str) -> char {
    display
        .chars()
        .find(|c| c.is_alphanumeric())
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or(UNSORTED_LETTER)
}

/// Accent- and case-folded form of `s` used as the primary collation key.
pub fn collation_key(s: &str) -> String {
    deunicode(s).to_lowercase()
}

/// Locale-style comparison: accents and case are ignored first, then the
/// raw strings break ties so the ordering stays total.
pub fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

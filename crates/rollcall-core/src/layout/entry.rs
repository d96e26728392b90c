use crate::models::{RosterEntry, SortMode};

use super::group_key::canonical_group_key;
use super::name::parse_name;
use super::sort_key::{build_sort_keys, collation_key};

/// A roster entry with every key the layout needs, derived for one sort mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub raw_name: String,
    pub first: String,
    pub last: String,
    pub display: String,
    pub sort_key: String,
    pub letter_key: char,
    pub group_key: String,
}

impl ParsedEntry {
    pub fn from_entry(entry: &RosterEntry, mode: SortMode) -> Self {
        let name = parse_name(&entry.name);
        let keys = build_sort_keys(&name, mode);
        Self {
            raw_name: entry.name.clone(),
            first: name.first,
            last: name.last,
            display: keys.display,
            sort_key: keys.sort_key,
            letter_key: keys.letter_key,
            group_key: canonical_group_key(&entry.group),
        }
    }
}

/// Parse every row and sort by collated sort key. The sort is stable, so
/// rows with identical keys keep their fetched order.
pub fn prepare_entries(rows: &[RosterEntry], mode: SortMode) -> Vec<ParsedEntry> {
    let mut entries: Vec<ParsedEntry> = rows
        .iter()
        .map(|row| ParsedEntry::from_entry(row, mode))
        .collect();
    entries.sort_by_cached_key(|e| (collation_key(&e.sort_key), e.sort_key.clone()));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[ParsedEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.display.as_str()).collect()
    }

    #[test]
    fn test_prepare_entries_by_last() {
        let rows = vec![
            RosterEntry::new("Bob Zed", ""),
            RosterEntry::new("Doe, Jane", "2"),
            RosterEntry::new("Ann Lee", "02"),
        ];
        let entries = prepare_entries(&rows, SortMode::Last);
        assert_eq!(names(&entries), vec!["Doe, Jane", "Lee, Ann", "Zed, Bob"]);
        assert_eq!(entries[1].group_key, "2");
        assert_eq!(entries[1].raw_name, "Ann Lee");
    }

    #[test]
    fn test_prepare_entries_by_first() {
        let rows = vec![
            RosterEntry::new("Bob Zed", ""),
            RosterEntry::new("Doe, Jane", "2"),
            RosterEntry::new("Ann Lee", "2"),
        ];
        let entries = prepare_entries(&rows, SortMode::First);
        assert_eq!(names(&entries), vec!["Ann, Lee", "Bob, Zed", "Jane, Doe"]);
    }

    #[test]
    fn test_prepare_entries_accents_sort_with_base_letter() {
        let rows = vec![
            RosterEntry::new("Zoe Young", ""),
            RosterEntry::new("Émile Durand", ""),
            RosterEntry::new("Eve Adams", ""),
            RosterEntry::new("Frank Ford", ""),
        ];
        let entries = prepare_entries(&rows, SortMode::First);
        assert_eq!(
            names(&entries),
            vec!["Émile, Durand", "Eve, Adams", "Frank, Ford", "Zoe, Young"]
        );
    }

    #[test]
    fn test_prepare_entries_stable_for_equal_keys() {
        let rows = vec![
            RosterEntry::new("Sam Lee", "1"),
            RosterEntry::new("Lee, Sam", "2"),
        ];
        let entries = prepare_entries(&rows, SortMode::Last);
        assert_eq!(entries[0].raw_name, "Sam Lee");
        assert_eq!(entries[1].raw_name, "Lee, Sam");
    }
}

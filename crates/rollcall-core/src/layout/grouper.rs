use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::GroupByMode;

use super::entry::ParsedEntry;
use super::group_key::{cmp_numeric_keys, is_numeric_key};
use super::sort_key::{collate, UNSORTED_LETTER};

/// Label for the bucket of entries with no group.
pub const UNKNOWN_GROUP_LABEL: &str = "Group Unknown";

/// A labeled run of entries sharing one classification key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub key: String,
    pub label: String,
    pub entries: Vec<ParsedEntry>,
}

impl Bucket {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Partition already-sorted entries into ordered buckets.
pub fn group_entries(entries: Vec<ParsedEntry>, mode: GroupByMode) -> Vec<Bucket> {
    match mode {
        GroupByMode::Alpha => group_by_letter(entries),
        GroupByMode::Group => group_by_group(entries),
    }
}

/// Bucket by first letter; `#` always comes last.
pub fn group_by_letter(entries: Vec<ParsedEntry>) -> Vec<Bucket> {
    let (mut keys, mut map) = partition(entries, |e| e.letter_key.to_string());
    keys.sort_by(|a, b| cmp_letter_keys(a, b));

    keys.into_iter()
        .map(|key| {
            let entries = map.remove(&key).unwrap_or_default();
            Bucket {
                label: key.clone(),
                key,
                entries,
            }
        })
        .collect()
}

/// Bucket by canonical group key: numeric groups by value, then named
/// groups, then the unassigned bucket.
pub fn group_by_group(entries: Vec<ParsedEntry>) -> Vec<Bucket> {
    let (mut keys, mut map) = partition(entries, |e| e.group_key.clone());
    keys.sort_by(|a, b| cmp_group_keys(a, b));

    keys.into_iter()
        .map(|key| {
            let entries = map.remove(&key).unwrap_or_default();
            Bucket {
                label: group_label(&key),
                key,
                entries,
            }
        })
        .collect()
}

pub fn group_label(key: &str) -> String {
    if key.is_empty() {
        UNKNOWN_GROUP_LABEL.to_string()
    } else {
        format!("Group {}", key)
    }
}

pub fn cmp_letter_keys(a: &str, b: &str) -> Ordering {
    let unsorted = UNSORTED_LETTER.to_string();
    match (a == unsorted, b == unsorted) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => collate(a, b),
    }
}

pub fn cmp_group_keys(a: &str, b: &str) -> Ordering {
    fn rank(key: &str) -> u8 {
        if key.is_empty() {
            2
        } else if is_numeric_key(key) {
            0
        } else {
            1
        }
    }

    rank(a).cmp(&rank(b)).then_with(|| match rank(a) {
        0 => cmp_numeric_keys(a, b),
        1 => collate(a, b),
        _ => Ordering::Equal,
    })
}

/// Split entries by key, remembering each key once. Entry order within a
/// key follows the input order.
fn partition(
    entries: Vec<ParsedEntry>,
    key_of: impl Fn(&ParsedEntry) -> String,
) -> (Vec<String>, HashMap<String, Vec<ParsedEntry>>) {
    let mut keys = Vec::new();
    let mut map: HashMap<String, Vec<ParsedEntry>> = HashMap::new();

    for entry in entries {
        let key = key_of(&entry);
        if !map.contains_key(&key) {
            keys.push(key.clone());
        }
        map.entry(key).or_default().push(entry);
    }

    (keys, map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::entry::prepare_entries;
    use crate::models::{RosterEntry, SortMode};

    fn sorted(mut keys: Vec<&str>, cmp: fn(&str, &str) -> Ordering) -> Vec<&str> {
        keys.sort_by(|a, b| cmp(a, b));
        keys
    }

    #[test]
    fn test_group_key_ordering() {
        assert_eq!(
            sorted(vec!["2", "10", "1", "", "B"], cmp_group_keys),
            vec!["1", "2", "10", "B", ""]
        );
        assert_eq!(
            sorted(vec!["blue", "", "Alpha", "3", "0"], cmp_group_keys),
            vec!["0", "3", "Alpha", "blue", ""]
        );
    }

    #[test]
    fn test_letter_key_ordering() {
        assert_eq!(sorted(vec!["B", "#", "A"], cmp_letter_keys), vec!["A", "B", "#"]);
        assert_eq!(sorted(vec!["#", "Z", "1", "É", "E"], cmp_letter_keys), vec!["1", "E", "É", "Z", "#"]);
    }

    #[test]
    fn test_group_by_group_labels_and_order() {
        let rows = vec![
            RosterEntry::new("Doe, Jane", "2"),
            RosterEntry::new("Ann Lee", "2"),
            RosterEntry::new("Bob Zed", ""),
            RosterEntry::new("Cy Ames", "Red"),
            RosterEntry::new("Al Bo", "010"),
        ];
        let buckets = group_by_group(prepare_entries(&rows, SortMode::Last));

        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Group 2", "Group 10", "Group Red", "Group Unknown"]);

        let group2: Vec<&str> = buckets[0].entries.iter().map(|e| e.display.as_str()).collect();
        assert_eq!(group2, vec!["Doe, Jane", "Lee, Ann"]);
        assert_eq!(buckets[3].entries[0].display, "Zed, Bob");
    }

    #[test]
    fn test_group_by_letter() {
        let rows = vec![
            RosterEntry::new("Bob Zed", ""),
            RosterEntry::new("Amy Zane", ""),
            RosterEntry::new("Cal Abbot", ""),
            RosterEntry::new("", ""),
        ];
        let buckets = group_by_letter(prepare_entries(&rows, SortMode::Last));

        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "Z", "#"]);
        let z: Vec<&str> = buckets[1].entries.iter().map(|e| e.display.as_str()).collect();
        assert_eq!(z, vec!["Zane, Amy", "Zed, Bob"]);
        assert_eq!(buckets[2].len(), 1);
    }

    #[test]
    fn test_every_entry_in_exactly_one_bucket() {
        let rows: Vec<RosterEntry> = (0..40)
            .map(|i| RosterEntry::new(format!("Kid{} Name{}", i, 40 - i), (i % 7).to_string()))
            .collect();
        for mode in [GroupByMode::Group, GroupByMode::Alpha] {
            let buckets = group_entries(prepare_entries(&rows, SortMode::First), mode);
            let total: usize = buckets.iter().map(Bucket::len).sum();
            assert_eq!(total, rows.len());
            assert!(buckets.iter().all(|b| !b.is_empty()));
        }
    }
}

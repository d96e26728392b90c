use serde::{Deserialize, Serialize};

/// Which name part leads the display string and the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Last,
    First,
}

impl SortMode {
    pub fn toggle(&self) -> Self {
        match self {
            SortMode::Last => SortMode::First,
            SortMode::First => SortMode::Last,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Last => "Last Name",
            SortMode::First => "First Name",
        }
    }
}

/// How entries are bucketed before column packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupByMode {
    #[default]
    Group,
    Alpha,
}

impl GroupByMode {
    pub fn toggle(&self) -> Self {
        match self {
            GroupByMode::Group => GroupByMode::Alpha,
            GroupByMode::Alpha => GroupByMode::Group,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupByMode::Group => "Group",
            GroupByMode::Alpha => "A-Z",
        }
    }
}

/// View options persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayOptions {
    pub dark_mode: bool,
    pub group_by_mode: GroupByMode,
    pub sort_mode: SortMode,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            dark_mode: true,
            group_by_mode: GroupByMode::Group,
            sort_mode: SortMode::Last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_wire_format() {
        let opts = DisplayOptions {
            dark_mode: false,
            group_by_mode: GroupByMode::Alpha,
            sort_mode: SortMode::First,
        };
        let json = serde_json::to_string(&opts).unwrap();
        assert_eq!(json, r#"{"darkMode":false,"groupByMode":"alpha","sortMode":"first"}"#);
    }

    #[test]
    fn test_options_missing_fields_use_defaults() {
        let opts: DisplayOptions = serde_json::from_str(r#"{"sortMode":"first"}"#).unwrap();
        assert!(opts.dark_mode);
        assert_eq!(opts.group_by_mode, GroupByMode::Group);
        assert_eq!(opts.sort_mode, SortMode::First);
    }

    #[test]
    fn test_mode_toggles() {
        assert_eq!(SortMode::Last.toggle(), SortMode::First);
        assert_eq!(SortMode::First.toggle(), SortMode::Last);
        assert_eq!(GroupByMode::Group.toggle(), GroupByMode::Alpha);
        assert_eq!(GroupByMode::Alpha.toggle(), GroupByMode::Group);
    }
}

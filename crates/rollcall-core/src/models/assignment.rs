use std::fmt;

/// Highest group number offered by the picker.
pub const MAX_GROUP: u8 = 10;

/// Group number to apply to the submitted names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupAssignment {
    /// Leave each student's group as it is.
    #[default]
    Unchanged,
    Group(u8),
}

impl GroupAssignment {
    /// Group `n`, if it is within 1..=MAX_GROUP.
    pub fn group(n: u8) -> Option<Self> {
        (1..=MAX_GROUP).contains(&n).then_some(GroupAssignment::Group(n))
    }

    /// Value sent in the `group` form field.
    pub fn form_value(&self) -> String {
        match self {
            GroupAssignment::Unchanged => "none".to_string(),
            GroupAssignment::Group(n) => n.to_string(),
        }
    }

    /// All picker choices in display order.
    pub fn choices() -> impl Iterator<Item = GroupAssignment> {
        std::iter::once(GroupAssignment::Unchanged).chain((1..=MAX_GROUP).map(GroupAssignment::Group))
    }
}

impl fmt::Display for GroupAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupAssignment::Unchanged => write!(f, "Do Not Change"),
            GroupAssignment::Group(n) => write!(f, "{}", n),
        }
    }
}

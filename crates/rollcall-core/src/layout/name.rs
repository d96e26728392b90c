/// First and last name parts split out of a free-form roster name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameParts {
    pub first: String,
    pub last: String,
}

/// Split a raw roster name into first and last parts.
///
/// "Last, First ..." puts everything after the first comma into `first`
/// (further commas are kept, so suffixes survive). Otherwise the final
/// whitespace token is the last name and the rest is the first name.
/// A single token is treated as a first name only.
pub fn parse_name(raw: &str) -> NameParts {
    let s = raw.trim();
    if s.is_empty() {
        return NameParts::default();
    }

    if let Some((last, rest)) = s.split_once(',') {
        return NameParts {
            first: rest.trim().to_string(),
            last: last.trim().to_string(),
        };
    }

    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    match tokens.pop() {
        Some(only) if tokens.is_empty() => NameParts {
            first: only.to_string(),
            last: String::new(),
        },
        Some(last) => NameParts {
            first: tokens.join(" "),
            last: last.to_string(),
        },
        None => NameParts::default(),
    }
}

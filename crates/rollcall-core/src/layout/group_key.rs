use std::cmp::Ordering;

/// Normalize a raw group label into its canonical bucket key.
///
/// Blank labels map to `""` (unassigned). All-digit labels lose their
/// leading zeros, so `"007"` and `"7"` land in the same bucket. Anything
/// else is kept verbatim after trimming.
pub fn canonical_group_key(raw: &str) -> String {
    let trimmed = raw.trim();
    if is_numeric_key(trimmed) {
        let stripped = trimmed.trim_start_matches('0');
        if stripped.is_empty() {
            "0".to_string()
        } else {
            stripped.to_string()
        }
    } else {
        trimmed.to_string()
    }
}

/// True for a non-empty string of ASCII digits.
pub fn is_numeric_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

/// Compare two canonical numeric keys by integer value.
///
/// Canonical keys carry no leading zeros, so a shorter key is always the
/// smaller number and equal lengths compare digit by digit.
pub fn cmp_numeric_keys(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_group_key() {
        assert_eq!(canonical_group_key("007"), "7");
        assert_eq!(canonical_group_key(" 3 "), "3");
        assert_eq!(canonical_group_key("A"), "A");
        assert_eq!(canonical_group_key(""), "");
    }

    #[test]
    fn test_canonical_group_key_zero_and_blank() {
        assert_eq!(canonical_group_key("000"), "0");
        assert_eq!(canonical_group_key("   "), "");
    }

    #[test]
    fn test_canonical_group_key_free_text_verbatim() {
        assert_eq!(canonical_group_key("  Red Team "), "Red Team");
        assert_eq!(canonical_group_key("3a"), "3a");
        assert_eq!(canonical_group_key("-4"), "-4");
    }

    #[test]
    fn test_canonical_group_key_huge_number() {
        let raw = "000123456789012345678901234567890";
        assert_eq!(canonical_group_key(raw), "123456789012345678901234567890");
    }

    #[test]
    fn test_cmp_numeric_keys() {
        assert_eq!(cmp_numeric_keys("2", "10"), Ordering::Less);
        assert_eq!(cmp_numeric_keys("10", "9"), Ordering::Greater);
        assert_eq!(cmp_numeric_keys("42", "42"), Ordering::Equal);
    }
}

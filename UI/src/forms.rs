//! Reading and validating form fields.

use std::sync::OnceLock;

use regex::Regex;

static LEADING_INTEGER: OnceLock<Regex> = OnceLock::new();

/// Trimmed field value, or `None` when the field is missing or blank.
pub fn trimmed(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Resolves the requested number of context items.
///
/// Reads the leading integer of the field (so `"5 results"` is 5), and falls
/// back to `default` when there is none or it is not positive.
pub fn resolve_top_k(raw: Option<&str>, default: u32) -> u32 {
    let re = LEADING_INTEGER.get_or_init(|| Regex::new(r"^\s*([+-]?\d+)").unwrap());
    raw.and_then(|raw| re.captures(raw))
        .and_then(|caps| caps[1].parse::<i64>().ok())
        .filter(|k| *k > 0)
        .map(|k| u32::try_from(k).unwrap_or(u32::MAX))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_none() {
        assert_eq!(trimmed(None), None);
        assert_eq!(trimmed(Some("   \n\t".to_string())), None);
        assert_eq!(trimmed(Some("  hi ".to_string())), Some("hi".to_string()));
    }

    #[test]
    fn top_k_defaults_when_empty_or_absent() {
        assert_eq!(resolve_top_k(None, 3), 3);
        assert_eq!(resolve_top_k(Some(""), 3), 3);
        assert_eq!(resolve_top_k(Some("many"), 3), 3);
    }

    #[test]
    fn top_k_defaults_when_not_positive() {
        assert_eq!(resolve_top_k(Some("0"), 3), 3);
        assert_eq!(resolve_top_k(Some("-4"), 3), 3);
    }

    #[test]
    fn top_k_reads_leading_integer() {
        assert_eq!(resolve_top_k(Some("5"), 3), 5);
        assert_eq!(resolve_top_k(Some(" 7 results"), 3), 7);
        assert_eq!(resolve_top_k(Some("2.9"), 3), 2);
        assert_eq!(resolve_top_k(Some("+8"), 3), 8);
    }
}

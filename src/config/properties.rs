//! Minimal key-value properties reader.
//!
//! Understands the subset of the `.properties` format the rule files use:
//! one `key=value` (or `key: value`, or `key value`) pair per line, `#` and
//! `!` comment lines, blank lines. Later duplicates of a key win. Escapes and
//! line continuations are not supported.

use std::collections::HashMap;

/// Parsed key-value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    /// Parses properties text.
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();

        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let key_end = line
                .find(|c: char| c == '=' || c == ':' || c.is_whitespace())
                .unwrap_or(line.len());
            let key = &line[..key_end];

            let rest = line[key_end..].trim_start();
            let value = rest
                .strip_prefix(['=', ':'])
                .unwrap_or(rest)
                .trim_start();

            entries.insert(key.to_string(), value.to_string());
        }

        Self { entries }
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no keys were parsed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_equals_separated_pairs() {
        let props = Properties::parse("entry.0.dimensions=300x300x150x1000\nentry.0.price=3.89\n");
        assert_eq!(props.get("entry.0.dimensions"), Some("300x300x150x1000"));
        assert_eq!(props.get("entry.0.price"), Some("3.89"));
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let text = "#Package Configurations\n! legacy comment\n\n   \nkey=value\n";
        let props = Properties::parse(text);
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("key"), Some("value"));
    }

    #[test]
    fn test_colon_and_whitespace_separators() {
        let props = Properties::parse("a: 1\nb 2\nc = 3\n");
        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.get("b"), Some("2"));
        assert_eq!(props.get("c"), Some("3"));
    }

    #[test]
    fn test_later_duplicate_wins() {
        let props = Properties::parse("k=first\nk=second\n");
        assert_eq!(props.get("k"), Some("second"));
    }

    #[test]
    fn test_key_without_value_maps_to_empty_string() {
        let props = Properties::parse("lonely\n");
        assert!(props.contains_key("lonely"));
        assert_eq!(props.get("lonely"), Some(""));
    }

    #[test]
    fn test_windows_line_endings() {
        let props = Properties::parse("k=v\r\nother=w\r\n");
        assert_eq!(props.get("k"), Some("v"));
        assert_eq!(props.get("other"), Some("w"));
    }

    #[test]
    fn test_empty_text() {
        assert!(Properties::parse("").is_empty());
    }
}

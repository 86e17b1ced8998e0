//! GEDCOM line grammar
//!
//! Every record line has the shape `LEVEL [ID] TAG [VALUE]`:
//!
//! ```text
//! 0 @I1@ INDI
//! 1 NAME Robert /Cox/
//! 2 DATE 11 FEB 2006
//! ```
//!
//! The level is a non-negative integer, the optional id is an `@…@`
//! cross-reference token, the tag is an uppercase keyword (user-defined
//! tags start with `_`), and the value is whatever follows the tag.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<level>[0-9]+) ((?P<id>@[-a-zA-Z0-9]+@) )?(?P<tag>[_A-Z0-9]+)( (?P<value>.*))?$",
    )
    .expect("valid GEDCOM line regex")
});

/// One decoded GEDCOM line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub level: u32,
    pub id: Option<String>,
    pub tag: String,
    pub value: Option<String>,
}

/// Decode a single, already trimmed line.
///
/// Returns `None` if the line does not follow the grammar. A level too large
/// for `u32` is treated the same way.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let caps = LINE_REGEX.captures(line)?;
    let level = caps.name("level")?.as_str().parse().ok()?;

    Some(ParsedLine {
        level,
        id: caps.name("id").map(|m| m.as_str().to_string()),
        tag: caps.name("tag")?.as_str().to_string(),
        value: caps.name("value").map(|m| m.as_str().to_string()),
    })
}

/// True if the line's first token is the level `0`
pub(crate) fn starts_at_level_zero(line: &str) -> bool {
    line.split_whitespace().next() == Some("0")
}

/// Encode one line. An absent id is omitted, as is an absent or empty value.
pub fn encode_line(level: u32, id: Option<&str>, tag: &str, value: Option<&str>) -> String {
    let mut line = level.to_string();
    if let Some(id) = id {
        line.push(' ');
        line.push_str(id);
    }
    line.push(' ');
    line.push_str(tag);
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        line.push(' ');
        line.push_str(value);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_line() {
        let line = parse_line("0 @I1@ INDI").unwrap();
        assert_eq!(line.level, 0);
        assert_eq!(line.id.as_deref(), Some("@I1@"));
        assert_eq!(line.tag, "INDI");
        assert!(line.value.is_none());

        let line = parse_line("1 NAME Robert /Cox/").unwrap();
        assert_eq!(line.level, 1);
        assert!(line.id.is_none());
        assert_eq!(line.tag, "NAME");
        assert_eq!(line.value.as_deref(), Some("Robert /Cox/"));
    }

    #[test]
    fn test_parse_custom_tag_and_dashed_id() {
        let line = parse_line("0 @I1-123@ INDI").unwrap();
        assert_eq!(line.id.as_deref(), Some("@I1-123@"));

        let line = parse_line("2 _FREL Natural").unwrap();
        assert_eq!(line.tag, "_FREL");
        assert_eq!(line.value.as_deref(), Some("Natural"));
    }

    #[test]
    fn test_value_keeps_inner_spacing() {
        let line = parse_line("1 NOTE  two  spaces").unwrap();
        assert_eq!(line.value.as_deref(), Some(" two  spaces"));
    }

    #[test]
    fn test_rejects_malformed_lines() {
        assert!(parse_line("foo").is_none());
        assert!(parse_line("1 name lowercase").is_none());
        assert!(parse_line("-1 NAME x").is_none());
        assert!(parse_line("1 @bad id@ INDI").is_none());
        assert!(parse_line("99999999999 NAME x").is_none());
    }

    #[test]
    fn test_level_zero_detection() {
        assert!(starts_at_level_zero("0 HEAD"));
        assert!(starts_at_level_zero("0"));
        assert!(!starts_at_level_zero("1 SOUR x"));
        assert!(!starts_at_level_zero("01 HEAD"));
        assert!(!starts_at_level_zero("foo"));
    }

    #[test]
    fn test_encode_line() {
        assert_eq!(encode_line(0, Some("@F1@"), "FAM", None), "0 @F1@ FAM");
        assert_eq!(encode_line(2, None, "DATE", Some("1980")), "2 DATE 1980");
        assert_eq!(encode_line(0, None, "HEAD", Some("")), "0 HEAD");
    }
}

//! Row/column suffix detection.
//!
//! A suffix is a trailing annotation such as `:339:12`, `(339, 12)` or
//! `", line 339, col 12"` that tools append to a file path. There is no
//! formal grammar for these; this module recognizes the handful of
//! punctuation and keyword conventions that show up in real compiler,
//! linter, and stack-trace output.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{LinkSuffix, TextSpan};

/// Space or non-breaking space. Every whitespace position in the suffix
/// grammar accepts either interchangeably.
const SP: &str = "[ \u{00A0}]";

/// One matcher per suffix family, tried independently at every position.
///
/// Keeping the families separate (rather than one monolithic pattern) makes
/// the precedence rule explicit: earliest start wins, longest match on a tied
/// start, declaration order on an exact tie.
static SUFFIX_FAMILIES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let patterns = [
        // foo:339 / foo:339:12 / foo 339 / foo 339:12
        format!("(?::|{SP})(?P<row>[0-9]+)(?::(?P<col>[0-9]+))?"),
        // "foo",339 / "foo",339:12 / foo,339 (quote-close is optional)
        format!("['\"]?,(?P<row>[0-9]+)(?::(?P<col>[0-9]+))?"),
        // "foo", line 339, col 12 / foo: line 339 / foo on line 339, column 12
        format!(
            "(?i)['\"]?(?:{SP}on{SP}|,?{SP}|:{SP}?|^)line{SP}(?P<row>[0-9]+)\
             (?:(?:[,:]{SP}?|{SP})col(?:umn)?{SP}(?P<col>[0-9]+))?"
        ),
        // foo(339) / foo (339, 12) / foo: (339,12)
        format!(r"(?::{SP}|{SP})?\((?P<row>[0-9]+)(?:,{SP}?(?P<col>[0-9]+))?\)"),
        // foo[339] / foo [339, 12] / foo: [339,12]
        format!(r"(?::{SP}|{SP})?\[(?P<row>[0-9]+)(?:,{SP}?(?P<col>[0-9]+))?\]"),
    ];
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("valid suffix regex"))
        .collect()
});

/// A family match before non-overlap selection.
struct Candidate {
    start: usize,
    end: usize,
    row: u32,
    col: Option<u32>,
    family: usize,
}

/// Return all non-overlapping suffix matches in `line`, left to right.
///
/// Once a suffix span is consumed, scanning resumes strictly after its end,
/// so the returned spans never overlap.
pub fn detect_link_suffixes(line: &str) -> Vec<LinkSuffix<'_>> {
    let mut candidates: Vec<Candidate> = Vec::new();
    for (family, regex) in SUFFIX_FAMILIES.iter().enumerate() {
        for caps in regex.captures_iter(line) {
            let Some(whole) = caps.get(0) else { continue };
            // A number too large for the row/col type disqualifies the match.
            let Some(row) = caps.name("row").and_then(|m| m.as_str().parse().ok()) else {
                continue;
            };
            let col = match caps.name("col") {
                Some(m) => match m.as_str().parse() {
                    Ok(col) => Some(col),
                    Err(_) => continue,
                },
                None => None,
            };
            candidates.push(Candidate {
                start: whole.start(),
                end: whole.end(),
                row,
                col,
                family,
            });
        }
    }

    candidates.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(b.end.cmp(&a.end))
            .then(a.family.cmp(&b.family))
    });

    let mut suffixes = Vec::new();
    let mut consumed = 0;
    for candidate in candidates {
        if candidate.start < consumed {
            continue;
        }
        suffixes.push(LinkSuffix {
            row: Some(candidate.row),
            col: candidate.col,
            span: TextSpan {
                index: candidate.start,
                text: &line[candidate.start..candidate.end],
            },
        });
        consumed = candidate.end;
    }
    suffixes
}

/// Return the first (left-to-right) suffix match in `line`, if any.
pub fn get_link_suffix(line: &str) -> Option<LinkSuffix<'_>> {
    detect_link_suffixes(line).into_iter().next()
}

/// Strip the first recognized suffix from the end of `line`.
///
/// The suffix is removed only when its span reaches the end of the line;
/// otherwise `line` is returned unchanged. Idempotent: suffix detection
/// anchors to the token preceding it, so the shortened line has no suffix
/// left at its new end.
pub fn remove_link_suffix(line: &str) -> &str {
    match get_link_suffix(line) {
        Some(suffix) if suffix.span.end() == line.len() => &line[..suffix.span.index],
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffix_at<'a>(
        line: &'a str,
        index: usize,
        text: &str,
        row: u32,
        col: Option<u32>,
    ) -> LinkSuffix<'a> {
        LinkSuffix {
            row: Some(row),
            col,
            span: TextSpan { index, text: &line[index..index + text.len()] },
        }
    }

    #[test]
    fn no_suffix_means_no_match() {
        assert_eq!(get_link_suffix("foo"), None);
        assert_eq!(detect_link_suffixes("foo bar baz"), Vec::new());
        assert_eq!(remove_link_suffix("foo"), "foo");
    }

    #[test]
    fn empty_line_yields_nothing() {
        assert_eq!(get_link_suffix(""), None);
        assert_eq!(remove_link_suffix(""), "");
    }

    #[test]
    fn colon_family_prefers_longest_match() {
        // ":339:12" must win over ":339" at the same start.
        let found = get_link_suffix("foo:339:12").unwrap();
        assert_eq!(found, suffix_at("foo:339:12", 3, ":339:12", 339, Some(12)));
    }

    #[test]
    fn keyword_family_is_case_insensitive() {
        let found = get_link_suffix("foo ON LINE 339, COL 12").unwrap();
        assert_eq!(found.row, Some(339));
        assert_eq!(found.col, Some(12));
        assert_eq!(found.span.index, 3);
    }

    #[test]
    fn keyword_at_line_start_needs_no_separator() {
        let found = get_link_suffix("line 7").unwrap();
        assert_eq!(found.row, Some(7));
        assert_eq!(found.span.index, 0);
    }

    #[test]
    fn interior_keyword_requires_a_separator() {
        // "airline 339" must not match as "line 339".
        assert_eq!(detect_link_suffixes("airline"), Vec::new());
        let found = detect_link_suffixes("airline 339");
        // The bare space family still sees " 339"; the keyword family must not.
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].span.text, " 339");
    }

    #[test]
    fn parenthesized_with_colon_lead() {
        let found = get_link_suffix("foo: (339, 12)").unwrap();
        assert_eq!(found, suffix_at("foo: (339, 12)", 3, ": (339, 12)", 339, Some(12)));
    }

    #[test]
    fn bracketed_with_nbsp_lead() {
        let line = "foo\u{00A0}[339, 12]";
        let found = get_link_suffix(line).unwrap();
        assert_eq!(found.span.index, 3);
        assert_eq!(found.span.text, "\u{00A0}[339, 12]");
        assert_eq!(found.row, Some(339));
        assert_eq!(found.col, Some(12));
    }

    #[test]
    fn oversized_row_is_not_a_match() {
        assert_eq!(get_link_suffix("foo:99999999999999999999"), None);
    }

    #[test]
    fn non_overlapping_matches_scan_left_to_right() {
        let found = detect_link_suffixes("a:1 b:2 c:3");
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].span.text, ":1");
        assert_eq!(found[1].span.text, ":2");
        assert_eq!(found[2].span.text, ":3");
    }

    #[test]
    fn remove_is_idempotent() {
        for line in ["foo:339:12", "foo (339, 12)", "\"foo\", line 339, col 12", "plain"] {
            let once = remove_link_suffix(line);
            assert_eq!(remove_link_suffix(once), once, "not idempotent for {line:?}");
        }
    }

    #[test]
    fn interior_suffix_is_not_stripped() {
        // The first suffix does not reach the end of the line, so nothing
        // is removed.
        assert_eq!(remove_link_suffix("foo:339 trailing"), "foo:339 trailing");
    }
}

//! Path-link detection over a single terminal line.
//!
//! The detector pairs path-like tokens with the suffix candidates found by
//! [`crate::suffix`], disambiguates quote prefixes, and falls back to an
//! OS-aware path pattern for paths that carry no suffix. Git diff headers
//! are recognized up front and bypass the heuristics entirely.

use std::sync::LazyLock;

use regex::Regex;

use crate::suffix::detect_link_suffixes;
use crate::types::{OperatingSystem, ParsedLink, TextSpan};

/// Windows path token: an optional drive-letter, `~`, `.` or `..` head
/// followed by at least one slash- or backslash-separated component.
/// Quotes, pipes, brackets, and common interstitial punctuation are
/// separators, not path characters.
static WINDOWS_PATH: LazyLock<Regex> = LazyLock::new(|| {
    let excluded = "[^\\x00<>?|/\\s!&*()\\[\\]'\":;`]";
    let pattern = format!(r"(?:(?:[A-Za-z]:|\.\.?|~)|{excluded}+)?(?:[\\/]{excluded}+)+");
    Regex::new(&pattern).expect("valid windows path regex")
});

/// Unix path token: an optional `~`, `.` or `..` head followed by at least
/// one slash-separated component. Backslash is an ordinary character on the
/// exclusion list here, never a separator.
static UNIX_PATH: LazyLock<Regex> = LazyLock::new(|| {
    let excluded = "[^\\x00|\\s!&*()\\[\\]'\":;\\\\`]";
    let pattern = format!(r"(?:(?:\.\.?|~)|{excluded}+)?(?:/{excluded}+)+");
    Regex::new(&pattern).expect("valid unix path regex")
});

/// Detect all links in `line`, ordered by path start.
///
/// Diff header lines short-circuit the heuristics: they are never also
/// scanned for suffixes or standalone paths. Every other line is scanned for
/// suffix-adjacent paths first, then for standalone paths that do not
/// conflict with them.
pub fn detect_links<'a>(line: &'a str, os: OperatingSystem) -> Vec<ParsedLink<'a>> {
    if let Some(links) = detect_diff_header_links(line) {
        return links;
    }
    let mut links = detect_links_via_suffix(line);
    merge_standalone_paths(&mut links, detect_paths_without_suffix(line, os));
    links
}

/// Recognize `--- a/<path>`, `+++ b/<path>` and `diff --git a/<p> b/<p>`
/// lines. The `a/`/`b/` markers are excluded from the emitted path spans.
fn detect_diff_header_links(line: &str) -> Option<Vec<ParsedLink<'_>>> {
    if line.starts_with("--- a/") || line.starts_with("+++ b/") {
        let marker_len = "--- a/".len();
        let rest = &line[marker_len..];
        let path_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let mut links = Vec::new();
        if path_len > 0 {
            links.push(ParsedLink {
                path: TextSpan {
                    index: marker_len,
                    text: &rest[..path_len],
                },
                prefix: None,
                suffix: None,
            });
        }
        return Some(links);
    }

    let rest = line.strip_prefix("diff --git ")?;
    let header_len = line.len() - rest.len();
    let mut links = Vec::new();
    let mut offset = header_len;
    for token in rest.split(' ') {
        if let Some(path) = token
            .strip_prefix("a/")
            .or_else(|| token.strip_prefix("b/"))
            && !path.is_empty()
        {
            links.push(ParsedLink {
                path: TextSpan {
                    index: offset + 2,
                    text: path,
                },
                prefix: None,
                suffix: None,
            });
        }
        offset += token.len() + 1;
    }
    Some(links)
}

/// Pair each suffix candidate with the token immediately preceding it.
///
/// A suffix with nothing before it yields no link and is not consumed, so
/// it does not block a later standalone path at the same position. The
/// backward token scan never crosses the end of the previously emitted link,
/// keeping emitted spans disjoint.
fn detect_links_via_suffix(line: &str) -> Vec<ParsedLink<'_>> {
    let mut links = Vec::new();
    let mut consumed = 0;
    for suffix in detect_link_suffixes(line) {
        let suffix_start = suffix.span.index;
        if suffix_start < consumed {
            continue;
        }
        let token_start = path_token_start(line, suffix_start, consumed);
        if token_start == suffix_start {
            continue;
        }
        let token = &line[token_start..suffix_start];
        let quote_len = token.chars().take_while(|&c| c == '"' || c == '\'').count();
        let (prefix, path_index) = link_prefix(line, token_start, quote_len, suffix.span.text);
        let path = &line[path_index..suffix_start];
        if path.is_empty() {
            continue;
        }
        links.push(ParsedLink {
            path: TextSpan {
                index: path_index,
                text: path,
            },
            prefix,
            suffix: Some(suffix),
        });
        consumed = suffix.span.end();
    }
    links
}

/// Start of the maximal token run ending at `suffix_start`.
///
/// The run excludes whitespace (including U+00A0) and the pipe character,
/// and is floored at the end of the previously emitted link.
fn path_token_start(line: &str, suffix_start: usize, floor: usize) -> usize {
    let region = &line[floor..suffix_start];
    let mut start = suffix_start;
    for (i, ch) in region.char_indices().rev() {
        if ch.is_whitespace() || ch == '|' {
            break;
        }
        start = floor + i;
    }
    start
}

/// Resolve the quote prefix for a token with `quote_len` leading quotes.
///
/// Returns the prefix span (if any) and the path start index. When the
/// suffix opens with a quote, only the nearest preceding quote of the same
/// character counts as the prefix; outer quotes are excluded from the link
/// entirely, and a mismatched quote produces no prefix at all (the quotes
/// then stay part of the path rather than dangle unbalanced).
fn link_prefix<'a>(
    line: &'a str,
    token_start: usize,
    quote_len: usize,
    suffix_text: &str,
) -> (Option<TextSpan<'a>>, usize) {
    if quote_len == 0 {
        return (None, token_start);
    }
    let path_index = token_start + quote_len;
    let suffix_quote = suffix_text
        .chars()
        .next()
        .filter(|&c| c == '"' || c == '\'');

    match suffix_quote {
        Some(quote) => {
            let innermost = line[token_start..path_index].chars().last();
            if innermost == Some(quote) {
                let span = TextSpan {
                    index: path_index - 1,
                    text: &line[path_index - 1..path_index],
                };
                (Some(span), path_index)
            } else {
                (None, token_start)
            }
        }
        None => {
            let span = TextSpan {
                index: token_start,
                text: &line[token_start..path_index],
            };
            (Some(span), path_index)
        }
    }
}

/// Find standalone path tokens with the OS-appropriate pattern.
fn detect_paths_without_suffix<'a>(line: &'a str, os: OperatingSystem) -> Vec<ParsedLink<'a>> {
    let pattern = match os {
        OperatingSystem::Windows => &*WINDOWS_PATH,
        OperatingSystem::NonWindows => &*UNIX_PATH,
    };
    pattern
        .find_iter(line)
        .map(|m| ParsedLink {
            path: TextSpan {
                index: m.start(),
                text: m.as_str(),
            },
            prefix: None,
            suffix: None,
        })
        .collect()
}

/// Merge standalone paths into the suffix-link results, keeping the list
/// ordered by path start and dropping any candidate that overlaps an
/// existing link (prefix and suffix spans included).
fn merge_standalone_paths<'a>(links: &mut Vec<ParsedLink<'a>>, standalone: Vec<ParsedLink<'a>>) {
    for candidate in standalone {
        let (candidate_start, candidate_end) = candidate.full_range();
        let conflicts = links.iter().any(|link| {
            let (start, end) = link.full_range();
            candidate_start < end && start < candidate_end
        });
        if conflicts {
            continue;
        }
        let at = links.partition_point(|link| link.path.index < candidate.path.index);
        links.insert(at, candidate);
    }
}

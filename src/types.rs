//! Core value types shared by the suffix and link detectors.
//!
//! Everything here is a read-only, line-scoped value: spans borrow from the
//! input line and nothing survives past the call that produced it.

use serde::Serialize;

/// A substring of a source line together with its byte offset.
///
/// `text` is exactly the slice of the source line starting at `index`, so
/// `index + text.len()` is the byte offset one past the span's end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextSpan<'a> {
    /// Byte offset of the span within the source line.
    pub index: usize,
    /// The spanned slice of the source line.
    pub text: &'a str,
}

impl TextSpan<'_> {
    /// Byte offset one past the end of the span.
    pub fn end(&self) -> usize {
        self.index + self.text.len()
    }
}

/// A trailing row/column annotation attached to a path-like token.
///
/// The span covers the entire suffix including its delimiters and keywords,
/// starting immediately after the preceding token. A column is never present
/// without a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkSuffix<'a> {
    /// One-based row (line) number, if the pattern carried one.
    pub row: Option<u32>,
    /// One-based column number, only ever present alongside a row.
    pub col: Option<u32>,
    /// The full suffix text and its position in the source line.
    pub span: TextSpan<'a>,
}

/// A detected link: a path, an optional quote prefix, an optional suffix.
///
/// The prefix (when present) immediately precedes the path and the suffix
/// (when present) immediately follows it, so the three spans are contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParsedLink<'a> {
    /// The candidate file-system path.
    pub path: TextSpan<'a>,
    /// Quote character(s) directly before the path, if any.
    pub prefix: Option<TextSpan<'a>>,
    /// Row/column annotation directly after the path, if any.
    pub suffix: Option<LinkSuffix<'a>>,
}

impl ParsedLink<'_> {
    /// Byte range covered by the whole link, prefix and suffix included.
    pub fn full_range(&self) -> (usize, usize) {
        let start = self.prefix.map_or(self.path.index, |p| p.index);
        let end = self.suffix.map_or(self.path.end(), |s| s.span.end());
        (start, end)
    }
}

/// Operating system flavor that governs path-token syntax.
///
/// Windows allows drive-letter prefixes and backslash separators; everywhere
/// else the backslash is an ordinary character, not a separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OperatingSystem {
    /// Drive letters and backslash separators are valid path syntax.
    Windows,
    /// Unix-like path syntax: forward slashes only.
    NonWindows,
}

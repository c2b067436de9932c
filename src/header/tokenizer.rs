//! Line classification for IOS headers

use crate::constants::{
    COMMENT_SIGIL, END_OF_HEADER, KEY_VALUE_SEPARATOR, SECTION_SIGIL, SUBSECTION_END,
    SUBSECTION_SIGIL, SUBSECTION_WINDOW,
};

/// Classification of one raw header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `*NAME` at column 0; carries the trimmed name
    SectionHeader(&'a str),

    /// `$` inside the subsection window; carries the trimmed line
    SubsectionHeader(&'a str),

    SubsectionEnd,

    /// Key and value, both trimmed
    KeyValue(&'a str, &'a str),

    Comment,

    Blank,

    EndOfHeader,

    /// A `*` or `$` line at column 0 that opens nothing; it still closes the
    /// current section
    Boundary,

    Unrecognized,
}

impl LineKind<'_> {
    /// Whether this line terminates the section currently being scanned
    pub fn closes_section(&self) -> bool {
        matches!(
            self,
            LineKind::SectionHeader(_) | LineKind::EndOfHeader | LineKind::Boundary
        )
    }
}

/// Classify a single header line
pub fn classify_line(line: &str) -> LineKind<'_> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    if line.starts_with(END_OF_HEADER) {
        return LineKind::EndOfHeader;
    }

    if let Some(rest) = line.strip_prefix(SECTION_SIGIL) {
        return match rest.chars().next() {
            Some(next) if next != SECTION_SIGIL && !next.is_whitespace() => {
                LineKind::SectionHeader(rest.trim())
            }
            _ => LineKind::Boundary,
        };
    }

    if trimmed.starts_with(SUBSECTION_END) {
        return LineKind::SubsectionEnd;
    }

    if line.starts_with(SUBSECTION_SIGIL) {
        return LineKind::Boundary;
    }

    if is_subsection_header(line) {
        return LineKind::SubsectionHeader(trimmed);
    }

    if trimmed.starts_with(COMMENT_SIGIL) {
        return LineKind::Comment;
    }

    match line.split_once(KEY_VALUE_SEPARATOR) {
        Some((key, value)) => LineKind::KeyValue(key.trim(), value.trim()),
        None => LineKind::Unrecognized,
    }
}

/// A `$` somewhere in the narrow column window after column 0
fn is_subsection_header(line: &str) -> bool {
    line.chars()
        .skip(SUBSECTION_WINDOW.start)
        .take(SUBSECTION_WINDOW.len())
        .any(|c| c == SUBSECTION_SIGIL)
}

/// Whether a subsection body line closes the subsection
pub fn is_subsection_end(line: &str) -> bool {
    line.trim_start().starts_with(SUBSECTION_END)
}

//! Section tree built from the classified header lines
//!
//! Sections keep their order of first appearance. A section name seen twice
//! accumulates into [`SectionBody::Repeated`] instead of overwriting, and the
//! free-text sections (COMMENTS, REMARKS, HISTORY) keep their lines keyed by
//! absolute line number.

use super::tokenizer::{LineKind, classify_line, is_subsection_end};
use crate::constants::{
    COMMENT_SIGIL, FIRST_SECTION_LINE, HEADER_VERSION_COLUMN, HEADER_VERSION_MARKER,
    HEADER_VERSION_WIDTH, SECTION_SIGIL, SUBSECTION_SIGIL, sections,
};
use crate::error::{IosError, Result};
use crate::report::{ParseReport, ParseWarning};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

static EMPTY_SECTION: SectionMap = SectionMap {
    entries: Vec::new(),
    subsections: Vec::new(),
};

/// Key/value entries and subsections of one section occurrence
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectionMap {
    entries: Vec<(String, String)>,
    subsections: Vec<(String, Vec<String>)>,
}

impl SectionMap {
    /// Value for a key; keys are compared exactly
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert a key, replacing the value in place when the key already exists
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Raw body lines of a subsection, e.g. `$TABLE: CHANNELS`
    pub fn subsection(&self, name: &str) -> Option<&[String]> {
        self.subsections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, lines)| lines.as_slice())
    }

    pub fn subsection_names(&self) -> impl Iterator<Item = &str> {
        self.subsections.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.subsections.is_empty()
    }

    fn push_subsection(&mut self, name: String, lines: Vec<String>) {
        self.subsections.push((name, lines));
    }
}

/// Content of a named section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SectionBody {
    Fields(SectionMap),
    Repeated(Vec<SectionMap>),
    /// Absolute 1-based line number to text
    FreeText(BTreeMap<usize, String>),
}

impl SectionBody {
    /// First occurrence of a keyed section
    pub fn first(&self) -> Option<&SectionMap> {
        match self {
            SectionBody::Fields(map) => Some(map),
            SectionBody::Repeated(maps) => maps.first(),
            SectionBody::FreeText(_) => None,
        }
    }
}

/// Section being accumulated while scanning
enum Pending {
    Keyed(String, SectionMap),
    Text(String, BTreeMap<usize, String>),
}

/// Parsed header of one IOS file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectionTree {
    created: String,
    header_version: String,
    sections: Vec<(String, SectionBody)>,
    /// Index of the `*END OF HEADER` line
    end_of_header: Option<usize>,
    data_lines: Vec<String>,
}

impl SectionTree {
    /// Build the tree from the raw lines of a file
    pub fn parse(lines: &[String], report: &mut ParseReport) -> Result<Self> {
        let mut tree = SectionTree {
            created: lines
                .first()
                .map(|l| l.trim().trim_start_matches(SECTION_SIGIL).trim().to_string())
                .unwrap_or_default(),
            header_version: header_version(lines),
            ..Default::default()
        };

        let mut pending: Option<Pending> = None;
        let mut index = FIRST_SECTION_LINE;

        while index < lines.len() {
            let line = lines[index].trim_end_matches(['\r', '\n']);

            // Free text keeps everything up to the next column-0 sigil
            if let Some(Pending::Text(_, text)) = pending.as_mut() {
                if !line.starts_with(SECTION_SIGIL) && !line.starts_with(SUBSECTION_SIGIL) {
                    if !line.trim().is_empty() && !line.starts_with(COMMENT_SIGIL) {
                        text.insert(index + 1, line.trim_end().to_string());
                    }
                    index += 1;
                    continue;
                }
            }

            let kind = classify_line(line);
            if kind.closes_section() {
                if let Some(section) = pending.take() {
                    tree.flush(section);
                }
            }

            match kind {
                LineKind::EndOfHeader => {
                    tree.end_of_header = Some(index);
                    break;
                }
                LineKind::SectionHeader(name) => {
                    debug!("Section *{} at line {}", name, index + 1);
                    pending = Some(if sections::FREE_TEXT.contains(&name) {
                        Pending::Text(name.to_string(), BTreeMap::new())
                    } else {
                        Pending::Keyed(name.to_string(), SectionMap::default())
                    });
                }
                LineKind::SubsectionHeader(name) => {
                    let (body, end) = read_subsection(lines, index, name, &report.file)?;
                    if let Some(Pending::Keyed(_, map)) = pending.as_mut() {
                        map.push_subsection(name.to_string(), body);
                    }
                    index = end;
                }
                LineKind::KeyValue(key, value) => {
                    if let Some(Pending::Keyed(_, map)) = pending.as_mut() {
                        map.insert(key, value);
                    }
                }
                LineKind::Unrecognized if pending.is_some() => {
                    report.record(ParseWarning::UnrecognizedLine {
                        line_number: index + 1,
                        line: line.trim().to_string(),
                    });
                }
                _ => {}
            }

            index += 1;
        }

        if let Some(section) = pending.take() {
            tree.flush(section);
        }

        if let Some(end) = tree.end_of_header {
            tree.data_lines = lines[end + 1..]
                .iter()
                .map(|l| l.trim_end_matches(['\r', '\n']).to_string())
                .collect();
        }

        debug!(
            "Header of {} parsed: {} sections, version '{}'",
            report.file,
            tree.sections.len(),
            tree.header_version
        );
        Ok(tree)
    }

    fn flush(&mut self, pending: Pending) {
        match pending {
            Pending::Keyed(name, map) => {
                match self.sections.iter_mut().find(|(n, _)| *n == name) {
                    Some((_, body)) => {
                        let merged = match std::mem::replace(body, SectionBody::Repeated(Vec::new())) {
                            SectionBody::Fields(first) => vec![first, map],
                            SectionBody::Repeated(mut maps) => {
                                maps.push(map);
                                maps
                            }
                            SectionBody::FreeText(_) => vec![map],
                        };
                        *body = SectionBody::Repeated(merged);
                    }
                    None => self.sections.push((name, SectionBody::Fields(map))),
                }
            }
            Pending::Text(name, text) => {
                match self.sections.iter_mut().find(|(n, _)| *n == name) {
                    Some((_, SectionBody::FreeText(existing))) => existing.extend(text),
                    Some((_, body)) => *body = SectionBody::FreeText(text),
                    None => self.sections.push((name, SectionBody::FreeText(text))),
                }
            }
        }
    }

    /// Creation stamp taken from the first line
    pub fn created(&self) -> &str {
        &self.created
    }

    pub fn header_version(&self) -> &str {
        &self.header_version
    }

    pub fn body(&self, name: &str) -> Option<&SectionBody> {
        self.sections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, body)| body)
    }

    /// First occurrence of a keyed section
    pub fn section(&self, name: &str) -> Option<&SectionMap> {
        self.body(name).and_then(SectionBody::first)
    }

    /// Section by name, or an empty map with a `MissingSection` warning
    pub fn section_or_empty(&self, name: &str, report: &mut ParseReport) -> &SectionMap {
        match self.section(name) {
            Some(map) => map,
            None => {
                report.record(ParseWarning::MissingSection {
                    section: name.to_string(),
                });
                &EMPTY_SECTION
            }
        }
    }

    /// Every occurrence of a keyed section, in file order
    pub fn repeated(&self, name: &str) -> Vec<&SectionMap> {
        match self.body(name) {
            Some(SectionBody::Fields(map)) => vec![map],
            Some(SectionBody::Repeated(maps)) => maps.iter().collect(),
            _ => Vec::new(),
        }
    }

    pub fn free_text(&self, name: &str) -> Option<&BTreeMap<usize, String>> {
        match self.body(name) {
            Some(SectionBody::FreeText(text)) => Some(text),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.body(name).is_some()
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(n, _)| n.as_str())
    }

    /// Value of `key` in the first occurrence of `section`
    pub fn value(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|map| map.get(key))
    }

    /// Lines following `*END OF HEADER`
    pub fn data_lines(&self, file: &str) -> Result<&[String]> {
        match self.end_of_header {
            Some(_) => Ok(&self.data_lines),
            None => Err(IosError::NoEndOfHeader {
                file: file.to_string(),
            }),
        }
    }
}

/// Version token at a fixed column of the `*IOS HEADER VERSION` line
fn header_version(lines: &[String]) -> String {
    lines
        .iter()
        .find(|l| l.trim_start().starts_with(HEADER_VERSION_MARKER))
        .map(|l| {
            l.chars()
                .skip(HEADER_VERSION_COLUMN)
                .take(HEADER_VERSION_WIDTH)
                .collect::<String>()
                .trim()
                .to_string()
        })
        .unwrap_or_default()
}

/// Collect a subsection body; returns the body and the index of its `$END`
fn read_subsection(
    lines: &[String],
    header: usize,
    name: &str,
    file: &str,
) -> Result<(Vec<String>, usize)> {
    let mut body = Vec::new();
    for (index, line) in lines.iter().enumerate().skip(header + 1) {
        if is_subsection_end(line) {
            return Ok((body, index));
        }
        body.push(line.trim_end_matches(['\r', '\n']).to_string());
    }

    Err(IosError::UnterminatedSubsection {
        file: file.to_string(),
        subsection: name.to_string(),
    })
}

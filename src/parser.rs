use std::iter::Enumerate;
use std::str::Lines;

use crate::{Document, validate_section_name};
use crate::error::ParseError;

/// Represents an on-going parse.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    lines: Enumerate<Lines<'a>>,
    section: Option<String>,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            section: None,
        }
    }
}

impl Parser<'_> {
    /// Feed every line into `document`, stopping at the first error.
    ///
    /// Assignments made before the failing line stay in `document`; parse into a fresh
    /// [`Document`] and swap it in on success if that matters to the caller.
    pub fn parse_into(mut self, document: &mut Document) -> Result<(), ParseError> {
        while let Some((index, raw)) = self.lines.next() {
            self.parse_line(index + 1, raw, document)?;
        }

        Ok(())
    }

    fn parse_line(
        &mut self,
        line: usize,
        raw: &str,
        document: &mut Document,
    ) -> Result<(), ParseError> {
        match Line::classify(raw) {
            Line::Blank | Line::Comment => Ok(()),
            Line::Header(name) => {
                if name.is_empty() {
                    return Err(ParseError::SectionNameEmpty { line });
                }

                validate_section_name(name)
                    .map_err(|source| ParseError::Invalid { line, source })?;

                // Repeated headers merge into the section that already exists.
                document.section_mut(name);
                self.section = Some(name.to_owned());
                Ok(())
            }
            Line::Assignment { key, value } => {
                let Some(section) = self.section.as_deref() else {
                    return Err(ParseError::OutsideSection {
                        line,
                        content: raw.trim().to_owned(),
                    });
                };

                document
                    .set(section, key, value)
                    .map_err(|source| ParseError::Invalid { line, source })?;
                Ok(())
            }
            Line::Other(content) => Err(ParseError::Syntax {
                line,
                content: content.to_owned(),
            }),
        }
    }
}

/// A single trimmed line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    Blank,
    Comment,
    Header(&'a str),
    Assignment { key: &'a str, value: &'a str },
    Other(&'a str),
}

impl<'a> Line<'a> {
    pub(crate) fn classify(raw: &'a str) -> Self {
        let line = raw.trim();

        if line.is_empty() {
            return Self::Blank;
        }

        if line.starts_with('#') || line.starts_with(';') {
            return Self::Comment;
        }

        // The inner text is the section name as-is, whitespace included.
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            return Self::Header(name);
        }

        // Only the first '=' separates; the rest belong to the value.
        if let Some((key, value)) = line.split_once('=') {
            return Self::Assignment {
                key: key.trim(),
                value: value.trim(),
            };
        }

        Self::Other(line)
    }
}

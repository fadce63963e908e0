#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::pedantic
)]

pub mod error;
mod parser;
mod section;
mod writer;

use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::{char, fs, io};

use indexmap::IndexMap;

pub use crate::error::{LoadError, LookupError, ParseError, SaveError, ValidationError};
pub use crate::parser::Parser;
pub use crate::section::Section;

/// Byte Order Marks that may lead a file. `0xFF 0xFE` means UTF-16, little-endian.
///
/// <https://en.wikipedia.org/wiki/Byte_order_mark>
const BOM_UTF16_LE: &[u8] = &[0xFF, 0xFE];
const BOM_UTF8: &[u8] = &[0xEF, 0xBB, 0xBF];

/// An INI document: named sections of key/value pairs, both kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    sections: IndexMap<String, Section>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` into a fresh document.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut document = Self::new();
        document.load_str(text)?;
        Ok(document)
    }

    /// Merge the contents of `text` into this document.
    ///
    /// On error, everything before the offending line has already been applied.
    pub fn load_str(&mut self, text: &str) -> Result<(), ParseError> {
        Parser::new(text).parse_into(self)
    }

    pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, LoadError> {
        let mut buffer = Vec::with_capacity(4096);
        reader
            .read_to_end(&mut buffer)
            .map_err(|source| LoadError::ReadFailure { source })?;
        let text = decode_data(&buffer).map_err(|source| LoadError::ReadFailure { source })?;

        Ok(Self::parse(&text)?)
    }

    /// Read and parse the file at `path` into a fresh document.
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let mut document = Self::new();
        document.load_file(path)?;
        Ok(document)
    }

    /// Merge the file at `path` into this document.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| LoadError::FileNotFound {
            path: path.to_owned(),
            source,
        })?;
        let text = decode_data(&data).map_err(|source| LoadError::ReadFailure { source })?;

        Ok(self.load_str(&text)?)
    }

    /// Write the serialized document to `path`, replacing whatever was there.
    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SaveError> {
        let path = path.as_ref();
        fs::write(path, self.serialize()).map_err(|source| SaveError::WriteFailure {
            path: path.to_owned(),
            source,
        })
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(name, section)| (name.as_str(), section))
    }

    /// An owned copy of every section; changing it leaves the document untouched.
    #[must_use]
    pub fn all_sections(&self) -> IndexMap<String, Section> {
        self.sections.clone()
    }

    pub fn section(&self, name: &str) -> Result<&Section, LookupError> {
        self.sections
            .get(name)
            .ok_or_else(|| LookupError::SectionNotFound {
                section: name.to_owned(),
            })
    }

    pub fn get(&self, section: &str, key: &str) -> Result<&str, LookupError> {
        self.section(section)?
            .get(key)
            .ok_or_else(|| LookupError::KeyNotFound {
                section: section.to_owned(),
                key: key.to_owned(),
            })
    }

    /// Assign `value` to `key` in `section`, creating the section if needed.
    ///
    /// Returns the previous value, if any. Inputs that could not be written back out and read
    /// in again unchanged are rejected, whatever the document already holds.
    pub fn set(
        &mut self,
        section: &str,
        key: &str,
        value: &str,
    ) -> Result<Option<String>, ValidationError> {
        validate(section, key, value)?;

        Ok(self
            .section_mut(section)
            .insert(key.to_owned(), value.to_owned()))
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub(crate) fn section_mut(&mut self, name: &str) -> &mut Section {
        if !self.sections.contains_key(name) {
            self.sections.insert(name.to_owned(), Section::new());
        }

        &mut self.sections[name]
    }
}

impl FromStr for Document {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\n', '\r'])
}

pub(crate) fn validate_section_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        Err(ValidationError::EmptySectionName)
    } else if has_line_break(name) {
        Err(ValidationError::LineBreak)
    } else {
        Ok(())
    }
}

fn validate(section: &str, key: &str, value: &str) -> Result<(), ValidationError> {
    validate_section_name(section)?;

    if key.is_empty() {
        return Err(ValidationError::EmptyKey);
    } else if has_line_break(key) || has_line_break(value) {
        return Err(ValidationError::LineBreak);
    }

    // `[key = value]` would read back as a section header.
    let reads_as_header = key.starts_with('[') && value.ends_with(']');

    if key.trim() != key || key.contains('=') || key.starts_with(['#', ';']) || reads_as_header {
        return Err(ValidationError::InvalidKey {
            key: key.to_owned(),
        });
    }

    if value.trim() != value {
        return Err(ValidationError::UntrimmedValue);
    }

    Ok(())
}

// Windows editors commonly save with a BOM, in UTF-8 or UTF-16 LE.
fn decode_data(data: &[u8]) -> io::Result<String> {
    if let Some(data) = data.strip_prefix(BOM_UTF16_LE) {
        let chunks = data.chunks_exact(2);

        if !chunks.remainder().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "odd number of bytes in UTF-16 data",
            ));
        }

        let utf16 = chunks.map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]));

        char::decode_utf16(utf16)
            .collect::<Result<String, _>>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    } else {
        let data = data.strip_prefix(BOM_UTF8).unwrap_or(data);

        String::from_utf8(data.to_vec()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

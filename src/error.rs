use std::path::PathBuf;
use std::{error, fmt, io};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Syntax { line: usize, content: String },
    OutsideSection { line: usize, content: String },
    SectionNameEmpty { line: usize },
    Invalid { line: usize, source: ValidationError },
}

impl ParseError {
    /// The 1-based line number the error was found on.
    #[must_use]
    pub fn line(&self) -> usize {
        match *self {
            Self::Syntax { line, .. }
            | Self::OutsideSection { line, .. }
            | Self::SectionNameEmpty { line }
            | Self::Invalid { line, .. } => line,
        }
    }
}

impl error::Error for ParseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Self::Invalid { ref source, .. } => Some(source),
            Self::Syntax { .. } | Self::OutsideSection { .. } | Self::SectionNameEmpty { .. } => {
                None
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Syntax { line, ref content } => {
                write!(f, "line {line}: invalid ini syntax: {content:?}")
            }
            Self::OutsideSection { line, ref content } => {
                write!(f, "line {line}: assignment outside any section: {content:?}")
            }
            Self::SectionNameEmpty { line } => write!(f, "line {line}: section name cannot be empty"),
            Self::Invalid { line, .. } => write!(f, "line {line}: invalid assignment"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    SectionNotFound { section: String },
    KeyNotFound { section: String, key: String },
}

impl error::Error for LookupError {}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::SectionNotFound { ref section } => write!(f, "section not found: {section:?}"),
            Self::KeyNotFound {
                ref section,
                ref key,
            } => write!(f, "key {key:?} not found in section {section:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptySectionName,
    EmptyKey,
    LineBreak,
    InvalidKey { key: String },
    UntrimmedValue,
}

impl error::Error for ValidationError {}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::EmptySectionName => "section name cannot be empty".fmt(f),
            Self::EmptyKey => "key cannot be empty".fmt(f),
            Self::LineBreak => "section names, keys and values cannot contain line breaks".fmt(f),
            Self::InvalidKey { ref key } => write!(f, "key cannot be written as ini: {key:?}"),
            Self::UntrimmedValue => "value cannot start or end with whitespace".fmt(f),
        }
    }
}

#[derive(Debug)]
pub enum LoadError {
    FileNotFound { path: PathBuf, source: io::Error },
    ReadFailure { source: io::Error },
    Parse { source: ParseError },
}

impl error::Error for LoadError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Self::FileNotFound { ref source, .. } | Self::ReadFailure { ref source } => {
                Some(source)
            }
            Self::Parse { ref source } => Some(source),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::FileNotFound { ref path, .. } => {
                write!(f, "failed to read {}", path.display())
            }
            Self::ReadFailure { .. } => "failed to read data".fmt(f),
            Self::Parse { .. } => "failed to parse data".fmt(f),
        }
    }
}

impl From<ParseError> for LoadError {
    fn from(source: ParseError) -> Self {
        Self::Parse { source }
    }
}

#[derive(Debug)]
pub enum SaveError {
    WriteFailure { path: PathBuf, source: io::Error },
}

impl error::Error for SaveError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Self::WriteFailure { ref source, .. } => Some(source),
        }
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::WriteFailure { ref path, .. } => write!(f, "failed to write {}", path.display()),
        }
    }
}

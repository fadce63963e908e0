use std::fmt;
use std::io::{self, Write};

use crate::Document;
use crate::section::Section;

impl Document {
    /// Render the document as INI text that [`Document::parse`] reads back unchanged.
    #[must_use]
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{self}")?;
        writer.flush()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, section)) in self.sections().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }

            write_section(f, name, section)?;
        }

        Ok(())
    }
}

fn write_section(f: &mut fmt::Formatter<'_>, name: &str, section: &Section) -> fmt::Result {
    writeln!(f, "[{name}]")?;

    for (key, value) in section {
        if value.is_empty() {
            writeln!(f, "{key} =")?;
        } else {
            writeln!(f, "{key} = {value}")?;
        }
    }

    Ok(())
}

use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ini::{Document, LoadError};

#[derive(Debug, Parser)]
#[command(name = "ini", version, about = "Read and edit INI files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every section name, one per line
    Sections { file: PathBuf },
    /// Print the value of a key
    Get {
        file: PathBuf,
        section: String,
        key: String,
    },
    /// Assign a value, creating the file if it does not exist
    Set {
        file: PathBuf,
        section: String,
        key: String,
        value: String,
    },
    /// Print the file in normalized form
    Print { file: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report(error.as_ref());
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    let mut stdout = io::stdout().lock();

    match command {
        Command::Sections { file } => {
            let document = Document::read_file(file)?;
            for name in document.section_names() {
                writeln!(stdout, "{name}")?;
            }
        }
        Command::Get { file, section, key } => {
            let document = Document::read_file(file)?;
            writeln!(stdout, "{}", document.get(&section, &key)?)?;
        }
        Command::Set {
            file,
            section,
            key,
            value,
        } => {
            let mut document = match Document::read_file(&file) {
                Ok(document) => document,
                Err(LoadError::FileNotFound { ref source, .. })
                    if source.kind() == io::ErrorKind::NotFound =>
                {
                    Document::new()
                }
                Err(e) => return Err(e.into()),
            };
            document.set(&section, &key, &value)?;
            document.save_file(&file)?;
        }
        Command::Print { file } => {
            Document::read_file(file)?.write_to(&mut stdout)?;
        }
    }

    Ok(())
}

fn report(error: &dyn Error) {
    eprint!("error: {error}");

    let mut source = error.source();
    while let Some(cause) = source {
        eprint!(": {cause}");
        source = cause.source();
    }

    eprintln!();
}

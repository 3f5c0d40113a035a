//! mjava: a tree-walking interpreter for a small Java-style teaching
//! language.
//!
//! Source files (`.mj`) hold an optional `package` declaration and class
//! declarations. Execution starts at the first class declaring a
//! parameterless `main` method. The runtime enforces primitive widening,
//! cost-based overload resolution, and member visibility at every access.

pub mod console;
pub mod interpreter;
pub mod memory;
pub mod parser;

use interpreter::{Interpreter, RuntimeError};
use parser::parser::ParseError;
use std::fmt;

/// Any failure a run can produce, from lexing through execution
#[derive(Debug)]
pub enum Error {
    Parse(ParseError),
    Runtime(RuntimeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "{}", e),
            Error::Runtime(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(e) => Some(e),
            Error::Runtime(e) => Some(e),
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Error::Runtime(e)
    }
}

/// Parse and run one or more source strings as a single program, returning
/// everything the program printed.
pub fn run_sources(sources: &[&str]) -> Result<String, Error> {
    let mut programs = Vec::with_capacity(sources.len());
    for source in sources {
        programs.push(parser::parse_source(source)?);
    }
    let mut interpreter = Interpreter::from_programs(&programs)?;
    interpreter.run()?;
    Ok(interpreter.console.output())
}

/// Parse and run a single source string
pub fn run_source(source: &str) -> Result<String, Error> {
    run_sources(&[source])
}

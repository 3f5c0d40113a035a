//! Source text to AST pipeline: lexer, recursive descent parser, and the
//! node types they produce.

pub mod ast;
pub mod lexer;
pub mod parser;

use ast::Program;
use lexer::Lexer;
use parser::{ParseError, Parser};

/// Convenience entry point: lex and parse a complete source string.
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::new(tokens).parse_program()
}

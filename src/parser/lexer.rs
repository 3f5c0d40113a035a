//! Lexer (tokenizer) for mjava source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! parser. Line (`//`) and block (`/* */`) comments are skipped.

use super::ast::SourceLocation;
use std::fmt;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can report
/// an accurate line and column without a separate token→location table.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    IntLiteral(i32, SourceLocation),
    LongLiteral(i64, SourceLocation),
    FloatLiteral(f32, SourceLocation),
    DoubleLiteral(f64, SourceLocation),
    CharLiteral(char, SourceLocation),
    StringLiteral(String, SourceLocation),

    // Identifiers
    Ident(String, SourceLocation),

    // Keywords
    Package(SourceLocation),
    Class(SourceLocation),
    Extends(SourceLocation),
    Public(SourceLocation),
    Private(SourceLocation),
    Protected(SourceLocation),
    New(SourceLocation),
    This(SourceLocation),
    Byte(SourceLocation),
    Short(SourceLocation),
    Int(SourceLocation),
    Long(SourceLocation),
    Float(SourceLocation),
    Double(SourceLocation),
    Char(SourceLocation),
    Boolean(SourceLocation),
    Str(SourceLocation),
    Void(SourceLocation),
    If(SourceLocation),
    Else(SourceLocation),
    While(SourceLocation),
    Do(SourceLocation),
    For(SourceLocation),
    Switch(SourceLocation),
    Case(SourceLocation),
    Default(SourceLocation),
    Break(SourceLocation),
    Continue(SourceLocation),
    Return(SourceLocation),
    True(SourceLocation),
    False(SourceLocation),
    Null(SourceLocation),

    // Operators (single and multi-character)
    Plus(SourceLocation),    // +
    Minus(SourceLocation),   // -
    Star(SourceLocation),    // *
    Slash(SourceLocation),   // /
    Percent(SourceLocation), // %

    EqEq(SourceLocation),  // ==
    NotEq(SourceLocation), // !=
    Lt(SourceLocation),    // <
    Le(SourceLocation),    // <=
    Gt(SourceLocation),    // >
    Ge(SourceLocation),    // >=

    AndAnd(SourceLocation), // &&
    OrOr(SourceLocation),   // ||
    Bang(SourceLocation),   // !

    Eq(SourceLocation),        // =
    PlusEq(SourceLocation),    // +=
    MinusEq(SourceLocation),   // -=
    StarEq(SourceLocation),    // *=
    SlashEq(SourceLocation),   // /=
    PercentEq(SourceLocation), // %=

    PlusPlus(SourceLocation),   // ++
    MinusMinus(SourceLocation), // --

    Dot(SourceLocation),      // .
    Question(SourceLocation), // ?
    Colon(SourceLocation),    // :

    LParen(SourceLocation),    // (
    RParen(SourceLocation),    // )
    LBrace(SourceLocation),    // {
    RBrace(SourceLocation),    // }
    LBracket(SourceLocation),  // [
    RBracket(SourceLocation),  // ]
    Semicolon(SourceLocation), // ;
    Comma(SourceLocation),     // ,

    // End of file
    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::IntLiteral(_, loc)
            | Token::LongLiteral(_, loc)
            | Token::FloatLiteral(_, loc)
            | Token::DoubleLiteral(_, loc)
            | Token::CharLiteral(_, loc)
            | Token::StringLiteral(_, loc)
            | Token::Ident(_, loc)
            | Token::Package(loc)
            | Token::Class(loc)
            | Token::Extends(loc)
            | Token::Public(loc)
            | Token::Private(loc)
            | Token::Protected(loc)
            | Token::New(loc)
            | Token::This(loc)
            | Token::Byte(loc)
            | Token::Short(loc)
            | Token::Int(loc)
            | Token::Long(loc)
            | Token::Float(loc)
            | Token::Double(loc)
            | Token::Char(loc)
            | Token::Boolean(loc)
            | Token::Str(loc)
            | Token::Void(loc)
            | Token::If(loc)
            | Token::Else(loc)
            | Token::While(loc)
            | Token::Do(loc)
            | Token::For(loc)
            | Token::Switch(loc)
            | Token::Case(loc)
            | Token::Default(loc)
            | Token::Break(loc)
            | Token::Continue(loc)
            | Token::Return(loc)
            | Token::True(loc)
            | Token::False(loc)
            | Token::Null(loc)
            | Token::Plus(loc)
            | Token::Minus(loc)
            | Token::Star(loc)
            | Token::Slash(loc)
            | Token::Percent(loc)
            | Token::EqEq(loc)
            | Token::NotEq(loc)
            | Token::Lt(loc)
            | Token::Le(loc)
            | Token::Gt(loc)
            | Token::Ge(loc)
            | Token::AndAnd(loc)
            | Token::OrOr(loc)
            | Token::Bang(loc)
            | Token::Eq(loc)
            | Token::PlusEq(loc)
            | Token::MinusEq(loc)
            | Token::StarEq(loc)
            | Token::SlashEq(loc)
            | Token::PercentEq(loc)
            | Token::PlusPlus(loc)
            | Token::MinusMinus(loc)
            | Token::Dot(loc)
            | Token::Question(loc)
            | Token::Colon(loc)
            | Token::LParen(loc)
            | Token::RParen(loc)
            | Token::LBrace(loc)
            | Token::RBrace(loc)
            | Token::LBracket(loc)
            | Token::RBracket(loc)
            | Token::Semicolon(loc)
            | Token::Comma(loc)
            | Token::Eof(loc) => *loc,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::IntLiteral(n, _) => write!(f, "int literal {}", n),
            Token::LongLiteral(n, _) => write!(f, "long literal {}L", n),
            Token::FloatLiteral(n, _) => write!(f, "float literal {}f", n),
            Token::DoubleLiteral(n, _) => write!(f, "double literal {}", n),
            Token::CharLiteral(c, _) => write!(f, "char literal '{}'", c),
            Token::StringLiteral(s, _) => write!(f, "string literal \"{}\"", s),
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            Token::Package(_) => write!(f, "'package'"),
            Token::Class(_) => write!(f, "'class'"),
            Token::Extends(_) => write!(f, "'extends'"),
            Token::Public(_) => write!(f, "'public'"),
            Token::Private(_) => write!(f, "'private'"),
            Token::Protected(_) => write!(f, "'protected'"),
            Token::New(_) => write!(f, "'new'"),
            Token::This(_) => write!(f, "'this'"),
            Token::Byte(_) => write!(f, "'byte'"),
            Token::Short(_) => write!(f, "'short'"),
            Token::Int(_) => write!(f, "'int'"),
            Token::Long(_) => write!(f, "'long'"),
            Token::Float(_) => write!(f, "'float'"),
            Token::Double(_) => write!(f, "'double'"),
            Token::Char(_) => write!(f, "'char'"),
            Token::Boolean(_) => write!(f, "'boolean'"),
            Token::Str(_) => write!(f, "'String'"),
            Token::Void(_) => write!(f, "'void'"),
            Token::If(_) => write!(f, "'if'"),
            Token::Else(_) => write!(f, "'else'"),
            Token::While(_) => write!(f, "'while'"),
            Token::Do(_) => write!(f, "'do'"),
            Token::For(_) => write!(f, "'for'"),
            Token::Switch(_) => write!(f, "'switch'"),
            Token::Case(_) => write!(f, "'case'"),
            Token::Default(_) => write!(f, "'default'"),
            Token::Break(_) => write!(f, "'break'"),
            Token::Continue(_) => write!(f, "'continue'"),
            Token::Return(_) => write!(f, "'return'"),
            Token::True(_) => write!(f, "'true'"),
            Token::False(_) => write!(f, "'false'"),
            Token::Null(_) => write!(f, "'null'"),
            Token::Plus(_) => write!(f, "'+'"),
            Token::Minus(_) => write!(f, "'-'"),
            Token::Star(_) => write!(f, "'*'"),
            Token::Slash(_) => write!(f, "'/'"),
            Token::Percent(_) => write!(f, "'%'"),
            Token::EqEq(_) => write!(f, "'=='"),
            Token::NotEq(_) => write!(f, "'!='"),
            Token::Lt(_) => write!(f, "'<'"),
            Token::Le(_) => write!(f, "'<='"),
            Token::Gt(_) => write!(f, "'>'"),
            Token::Ge(_) => write!(f, "'>='"),
            Token::AndAnd(_) => write!(f, "'&&'"),
            Token::OrOr(_) => write!(f, "'||'"),
            Token::Bang(_) => write!(f, "'!'"),
            Token::Eq(_) => write!(f, "'='"),
            Token::PlusEq(_) => write!(f, "'+='"),
            Token::MinusEq(_) => write!(f, "'-='"),
            Token::StarEq(_) => write!(f, "'*='"),
            Token::SlashEq(_) => write!(f, "'/='"),
            Token::PercentEq(_) => write!(f, "'%='"),
            Token::PlusPlus(_) => write!(f, "'++'"),
            Token::MinusMinus(_) => write!(f, "'--'"),
            Token::Dot(_) => write!(f, "'.'"),
            Token::Question(_) => write!(f, "'?'"),
            Token::Colon(_) => write!(f, "':'"),
            Token::LParen(_) => write!(f, "'('"),
            Token::RParen(_) => write!(f, "')'"),
            Token::LBrace(_) => write!(f, "'{{'"),
            Token::RBrace(_) => write!(f, "'}}'"),
            Token::LBracket(_) => write!(f, "'['"),
            Token::RBracket(_) => write!(f, "']'"),
            Token::Semicolon(_) => write!(f, "';'"),
            Token::Comma(_) => write!(f, "','"),
            Token::Eof(_) => write!(f, "end of file"),
        }
    }
}

/// Lexer error type
#[derive(Debug)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Lexer for mjava source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_at_end() {
                tokens.push(Token::Eof(self.current_location()));
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of file".to_string(),
            location: loc,
        })?;

        match ch {
            '"' => self.string_literal(),
            '\'' => self.char_literal(),
            '0'..='9' => self.number_literal(ch),
            c if c.is_alphabetic() || c == '_' => self.identifier_or_keyword(c),

            '+' => {
                if self.peek() == Some('+') {
                    self.advance();
                    Ok(Token::PlusPlus(loc))
                } else if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::PlusEq(loc))
                } else {
                    Ok(Token::Plus(loc))
                }
            }
            '-' => {
                if self.peek() == Some('-') {
                    self.advance();
                    Ok(Token::MinusMinus(loc))
                } else if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::MinusEq(loc))
                } else {
                    Ok(Token::Minus(loc))
                }
            }
            '*' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::StarEq(loc))
                } else {
                    Ok(Token::Star(loc))
                }
            }
            '/' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::SlashEq(loc))
                } else {
                    Ok(Token::Slash(loc))
                }
            }
            '%' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::PercentEq(loc))
                } else {
                    Ok(Token::Percent(loc))
                }
            }
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::EqEq(loc))
                } else {
                    Ok(Token::Eq(loc))
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::NotEq(loc))
                } else {
                    Ok(Token::Bang(loc))
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::Le(loc))
                } else {
                    Ok(Token::Lt(loc))
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::Ge(loc))
                } else {
                    Ok(Token::Gt(loc))
                }
            }
            '&' => {
                if self.peek() == Some('&') {
                    self.advance();
                    Ok(Token::AndAnd(loc))
                } else {
                    Err(LexError {
                        message: "Unexpected character: '&' (bitwise operators are not supported)"
                            .to_string(),
                        location: loc,
                    })
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    Ok(Token::OrOr(loc))
                } else {
                    Err(LexError {
                        message: "Unexpected character: '|' (bitwise operators are not supported)"
                            .to_string(),
                        location: loc,
                    })
                }
            }
            '.' => Ok(Token::Dot(loc)),
            '?' => Ok(Token::Question(loc)),
            ':' => Ok(Token::Colon(loc)),
            '(' => Ok(Token::LParen(loc)),
            ')' => Ok(Token::RParen(loc)),
            '{' => Ok(Token::LBrace(loc)),
            '}' => Ok(Token::RBrace(loc)),
            '[' => Ok(Token::LBracket(loc)),
            ']' => Ok(Token::RBracket(loc)),
            ';' => Ok(Token::Semicolon(loc)),
            ',' => Ok(Token::Comma(loc)),

            _ => Err(LexError {
                message: format!("Unexpected character: '{}'", ch),
                location: loc,
            }),
        }
    }

    /// Parse string literal
    fn string_literal(&mut self) -> Result<Token, LexError> {
        let loc = SourceLocation::new(self.line, self.column.saturating_sub(1));
        let mut string = String::new();

        while let Some(ch) = self.peek() {
            if ch == '"' {
                self.advance(); // consume closing quote
                return Ok(Token::StringLiteral(string, loc));
            }

            if ch == '\\' {
                self.advance();
                let escaped = self.advance().ok_or_else(|| LexError {
                    message: "Unexpected end of file in string literal".to_string(),
                    location: self.current_location(),
                })?;
                string.push(Self::unescape(escaped, self.current_location())?);
            } else {
                string.push(ch);
                self.advance();
            }
        }

        Err(LexError {
            message: "Unterminated string literal".to_string(),
            location: loc,
        })
    }

    /// Parse character literal
    fn char_literal(&mut self) -> Result<Token, LexError> {
        let loc = SourceLocation::new(self.line, self.column.saturating_sub(1));

        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of file in character literal".to_string(),
            location: self.current_location(),
        })?;

        let value = if ch == '\\' {
            let escaped = self.advance().ok_or_else(|| LexError {
                message: "Unexpected end of file in character literal".to_string(),
                location: self.current_location(),
            })?;
            Self::unescape(escaped, self.current_location())?
        } else {
            ch
        };

        // Expect closing quote
        if self.advance() != Some('\'') {
            return Err(LexError {
                message: "Expected closing quote in character literal".to_string(),
                location: self.current_location(),
            });
        }

        Ok(Token::CharLiteral(value, loc))
    }

    fn unescape(escaped: char, location: SourceLocation) -> Result<char, LexError> {
        match escaped {
            'n' => Ok('\n'),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            '\\' => Ok('\\'),
            '"' => Ok('"'),
            '\'' => Ok('\''),
            '0' => Ok('\0'),
            _ => Err(LexError {
                message: format!("Unknown escape sequence: \\{}", escaped),
                location,
            }),
        }
    }

    /// Parse numeric literal.
    ///
    /// Suffix rules follow the source language: a bare integer is `int`, `L`
    /// makes it `long`; a literal with a decimal point is `double` unless
    /// suffixed with `f` (`float`) or `d` (`double`, explicit).
    fn number_literal(&mut self, first_digit: char) -> Result<Token, LexError> {
        let loc = SourceLocation::new(self.line, self.column.saturating_sub(1));
        let mut num_str = String::new();
        num_str.push(first_digit);

        let mut is_floating = false;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_floating
                && self
                    .peek_ahead(1)
                    .map(|c| c.is_ascii_digit())
                    .unwrap_or(false)
            {
                is_floating = true;
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match self.peek() {
            Some('L') | Some('l') => {
                self.advance();
                if is_floating {
                    return Err(LexError {
                        message: format!("Invalid long literal: {}L", num_str),
                        location: loc,
                    });
                }
                let value = num_str.parse::<i64>().map_err(|_| LexError {
                    message: format!("Invalid long literal: {}", num_str),
                    location: loc,
                })?;
                Ok(Token::LongLiteral(value, loc))
            }
            Some('f') | Some('F') => {
                self.advance();
                let value = num_str.parse::<f32>().map_err(|_| LexError {
                    message: format!("Invalid float literal: {}", num_str),
                    location: loc,
                })?;
                Ok(Token::FloatLiteral(value, loc))
            }
            Some('d') | Some('D') => {
                self.advance();
                let value = num_str.parse::<f64>().map_err(|_| LexError {
                    message: format!("Invalid double literal: {}", num_str),
                    location: loc,
                })?;
                Ok(Token::DoubleLiteral(value, loc))
            }
            _ => {
                if is_floating {
                    let value = num_str.parse::<f64>().map_err(|_| LexError {
                        message: format!("Invalid double literal: {}", num_str),
                        location: loc,
                    })?;
                    Ok(Token::DoubleLiteral(value, loc))
                } else {
                    let value = num_str.parse::<i32>().map_err(|_| LexError {
                        message: format!("Invalid integer literal: {}", num_str),
                        location: loc,
                    })?;
                    Ok(Token::IntLiteral(value, loc))
                }
            }
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char) -> Result<Token, LexError> {
        let loc = SourceLocation::new(self.line, self.column.saturating_sub(1));
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // Check if it's a keyword
        let token = match ident.as_str() {
            "package" => Token::Package(loc),
            "class" => Token::Class(loc),
            "extends" => Token::Extends(loc),
            "public" => Token::Public(loc),
            "private" => Token::Private(loc),
            "protected" => Token::Protected(loc),
            "new" => Token::New(loc),
            "this" => Token::This(loc),
            "byte" => Token::Byte(loc),
            "short" => Token::Short(loc),
            "int" => Token::Int(loc),
            "long" => Token::Long(loc),
            "float" => Token::Float(loc),
            "double" => Token::Double(loc),
            "char" => Token::Char(loc),
            "boolean" => Token::Boolean(loc),
            "String" => Token::Str(loc),
            "void" => Token::Void(loc),
            "if" => Token::If(loc),
            "else" => Token::Else(loc),
            "while" => Token::While(loc),
            "do" => Token::Do(loc),
            "for" => Token::For(loc),
            "switch" => Token::Switch(loc),
            "case" => Token::Case(loc),
            "default" => Token::Default(loc),
            "break" => Token::Break(loc),
            "continue" => Token::Continue(loc),
            "return" => Token::Return(loc),
            "true" => Token::True(loc),
            "false" => Token::False(loc),
            "null" => Token::Null(loc),
            _ => Token::Ident(ident, loc),
        };

        Ok(token)
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return Ok(());
            }
            self.advance();
        }

        Err(LexError {
            message: "Unterminated block comment".to_string(),
            location: start_loc,
        })
    }

    // ===== Low-level helpers =====

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.input.get(self.position).copied();
        if let Some(c) = ch {
            self.position += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        ch
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_suffixes() {
        let mut lexer = Lexer::new("25 9876543210L 19.99f 15345.67 7d");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::IntLiteral(25, _)));
        assert!(matches!(tokens[1], Token::LongLiteral(9876543210, _)));
        assert!(matches!(tokens[2], Token::FloatLiteral(_, _)));
        assert!(matches!(tokens[3], Token::DoubleLiteral(_, _)));
        assert!(matches!(tokens[4], Token::DoubleLiteral(_, _)));
        assert!(matches!(tokens[5], Token::Eof(_)));
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let mut lexer = Lexer::new("class Carro extends Veiculo");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Class(_)));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "Carro"));
        assert!(matches!(tokens[2], Token::Extends(_)));
        assert!(matches!(tokens[3], Token::Ident(ref s, _) if s == "Veiculo"));
    }

    #[test]
    fn test_string_with_accents() {
        let mut lexer = Lexer::new("\"Maçã\" 'M'");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::StringLiteral(ref s, _) if s == "Maçã"));
        assert!(matches!(tokens[1], Token::CharLiteral('M', _)));
    }

    #[test]
    fn test_dot_after_int_is_member_access() {
        // `frutas.length` must not lex `.length` into a number
        let mut lexer = Lexer::new("nomes.length");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "nomes"));
        assert!(matches!(tokens[1], Token::Dot(_)));
        assert!(matches!(tokens[2], Token::Ident(ref s, _) if s == "length"));
    }

    #[test]
    fn test_comments_skipped() {
        let mut lexer = Lexer::new("int x; // comment\n/* block\ncomment */ int y;");
        let tokens = lexer.tokenize().unwrap();

        let idents: Vec<_> = tokens
            .iter()
            .filter(|t| matches!(t, Token::Ident(_, _)))
            .collect();
        assert_eq!(idents.len(), 2);
    }
}

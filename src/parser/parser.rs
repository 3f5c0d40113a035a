//! Recursive descent parser for mjava source code
//!
//! Produces a [`Program`] (package name plus class declarations) from the
//! token stream. Expression parsing follows the usual precedence ladder:
//! ternary, logical or/and, equality, relational, additive, multiplicative,
//! unary, postfix, primary.

use super::ast::{
    AstNode, BaseType, BinOp, CaseNode, ClassDecl, CtorDecl, FieldDecl, MethodDecl, Param,
    Program, SourceLocation, Type, UnOp, Visibility,
};
use super::lexer::{LexError, Token};
use std::fmt;
use std::mem::discriminant;

/// Parser error type
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Parser for mjava token streams
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last(), Some(Token::Eof(_))) {
            let loc = tokens
                .last()
                .map(|t| t.location())
                .unwrap_or_else(|| SourceLocation::new(1, 1));
            tokens.push(Token::Eof(loc));
        }
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse a full compilation unit: optional package declaration followed
    /// by zero or more class declarations.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        if self.check(&Token::Package(SourceLocation::new(0, 0))) {
            self.advance();
            program.unit = self.parse_dotted_name()?;
            self.expect_token(Token::Semicolon(SourceLocation::new(0, 0)))?;
        }

        while !self.is_at_end() {
            program.classes.push(self.parse_class()?);
        }

        Ok(program)
    }

    /// Parse a dotted package name such as `poo.heranca`
    fn parse_dotted_name(&mut self) -> Result<String, ParseError> {
        let (first, _) = self.expect_identifier()?;
        let mut name = first;
        while self.match_token(&Token::Dot(SourceLocation::new(0, 0))) {
            let (part, _) = self.expect_identifier()?;
            name.push('.');
            name.push_str(&part);
        }
        Ok(name)
    }

    // ===== Declarations =====

    fn parse_class(&mut self) -> Result<ClassDecl, ParseError> {
        // A leading `public` on the class itself is accepted and ignored;
        // access control applies to members, not classes.
        self.match_token(&Token::Public(SourceLocation::new(0, 0)));

        let loc = self.current_location();
        self.expect_token(Token::Class(SourceLocation::new(0, 0)))?;
        let (name, _) = self.expect_identifier()?;

        let superclass = if self.match_token(&Token::Extends(SourceLocation::new(0, 0))) {
            let (parent, _) = self.expect_identifier()?;
            Some(parent)
        } else {
            None
        };

        self.expect_token(Token::LBrace(SourceLocation::new(0, 0)))?;

        let mut decl = ClassDecl {
            name,
            superclass,
            fields: Vec::new(),
            ctors: Vec::new(),
            methods: Vec::new(),
            location: loc,
        };

        while !self.check(&Token::RBrace(SourceLocation::new(0, 0))) && !self.is_at_end() {
            self.parse_member(&mut decl)?;
        }

        self.expect_token(Token::RBrace(SourceLocation::new(0, 0)))?;
        Ok(decl)
    }

    fn parse_member(&mut self, class: &mut ClassDecl) -> Result<(), ParseError> {
        let visibility = self.parse_visibility();
        let loc = self.current_location();

        // Constructor: the class name followed by '('
        if let Token::Ident(name, _) = self.peek().clone() {
            if name == class.name
                && matches!(self.peek_ahead(1), Token::LParen(_))
            {
                self.advance();
                let params = self.parse_params()?;
                let body = self.parse_block()?;
                class.ctors.push(CtorDecl {
                    params,
                    visibility,
                    body,
                    location: loc,
                });
                return Ok(());
            }
        }

        let member_type = self.parse_type()?;
        let (name, _) = self.expect_identifier()?;

        if self.check(&Token::LParen(SourceLocation::new(0, 0))) {
            let params = self.parse_params()?;
            let body = self.parse_block()?;
            class.methods.push(MethodDecl {
                name,
                params,
                return_type: member_type,
                visibility,
                body,
                location: loc,
            });
        } else {
            if self.check(&Token::Eq(SourceLocation::new(0, 0))) {
                return Err(ParseError {
                    message: format!(
                        "Field '{}' cannot have an initializer; fields start at their zero value",
                        name
                    ),
                    location: self.current_location(),
                });
            }
            self.expect_token(Token::Semicolon(SourceLocation::new(0, 0)))?;
            class.fields.push(FieldDecl {
                name,
                field_type: member_type,
                visibility,
                location: loc,
            });
        }

        Ok(())
    }

    /// Consume an optional visibility modifier; no modifier means
    /// package-private.
    fn parse_visibility(&mut self) -> Visibility {
        match self.peek() {
            Token::Public(_) => {
                self.advance();
                Visibility::Public
            }
            Token::Private(_) => {
                self.advance();
                Visibility::Private
            }
            Token::Protected(_) => {
                self.advance();
                Visibility::Protected
            }
            _ => Visibility::Package,
        }
    }

    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.expect_token(Token::LParen(SourceLocation::new(0, 0)))?;
        let mut params = Vec::new();

        if !self.check(&Token::RParen(SourceLocation::new(0, 0))) {
            loop {
                let param_type = self.parse_type()?;
                let (name, _) = self.expect_identifier()?;
                params.push(Param { name, param_type });

                if !self.match_token(&Token::Comma(SourceLocation::new(0, 0))) {
                    break;
                }
            }
        }

        self.expect_token(Token::RParen(SourceLocation::new(0, 0)))?;
        Ok(params)
    }

    /// Parse a type: a base type or class name followed by `[]` suffixes
    fn parse_type(&mut self) -> Result<Type, ParseError> {
        let base = match self.peek().clone() {
            Token::Byte(_) => BaseType::Byte,
            Token::Short(_) => BaseType::Short,
            Token::Int(_) => BaseType::Int,
            Token::Long(_) => BaseType::Long,
            Token::Float(_) => BaseType::Float,
            Token::Double(_) => BaseType::Double,
            Token::Char(_) => BaseType::Char,
            Token::Boolean(_) => BaseType::Boolean,
            Token::Str(_) => BaseType::Str,
            Token::Void(_) => BaseType::Void,
            Token::Ident(name, _) => BaseType::Class(name),
            other => {
                return Err(ParseError {
                    message: format!("Expected a type, found {}", other),
                    location: other.location(),
                })
            }
        };
        self.advance();

        let mut parsed = Type::new(base);
        while self.check(&Token::LBracket(SourceLocation::new(0, 0)))
            && matches!(self.peek_ahead(1), Token::RBracket(_))
        {
            self.advance();
            self.advance();
            parsed = parsed.with_array();
        }

        Ok(parsed)
    }

    // ===== Statements =====

    fn parse_block(&mut self) -> Result<Vec<AstNode>, ParseError> {
        self.expect_token(Token::LBrace(SourceLocation::new(0, 0)))?;
        let mut statements = Vec::new();

        while !self.check(&Token::RBrace(SourceLocation::new(0, 0))) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        self.expect_token(Token::RBrace(SourceLocation::new(0, 0)))?;
        Ok(statements)
    }

    /// A statement body: either a braced block or a single statement
    fn parse_body(&mut self) -> Result<Vec<AstNode>, ParseError> {
        if self.check(&Token::LBrace(SourceLocation::new(0, 0))) {
            self.parse_block()
        } else {
            Ok(vec![self.parse_statement()?])
        }
    }

    fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();

        match self.peek() {
            Token::If(_) => self.parse_if(),
            Token::While(_) => self.parse_while(),
            Token::Do(_) => self.parse_do_while(),
            Token::For(_) => self.parse_for(),
            Token::Switch(_) => self.parse_switch(),
            Token::Return(_) => {
                self.advance();
                let expr = if self.check(&Token::Semicolon(SourceLocation::new(0, 0))) {
                    None
                } else {
                    Some(Box::new(self.parse_expression()?))
                };
                self.expect_token(Token::Semicolon(SourceLocation::new(0, 0)))?;
                Ok(AstNode::Return {
                    expr,
                    location: loc,
                })
            }
            Token::Break(_) => {
                self.advance();
                self.expect_token(Token::Semicolon(SourceLocation::new(0, 0)))?;
                Ok(AstNode::Break { location: loc })
            }
            Token::Continue(_) => {
                self.advance();
                self.expect_token(Token::Semicolon(SourceLocation::new(0, 0)))?;
                Ok(AstNode::Continue { location: loc })
            }
            _ => {
                let stmt = if self.at_var_decl() {
                    self.parse_var_decl()?
                } else {
                    self.parse_expr_or_assignment()?
                };
                self.expect_token(Token::Semicolon(SourceLocation::new(0, 0)))?;
                Ok(stmt)
            }
        }
    }

    /// Lookahead check: does a local variable declaration start here?
    ///
    /// Primitive type keywords and `String` always start a declaration in
    /// statement position. An identifier starts one only when followed by
    /// another identifier (`Carro c`) or by `[]` (`Carro[] frota`).
    fn at_var_decl(&self) -> bool {
        match self.peek() {
            Token::Byte(_)
            | Token::Short(_)
            | Token::Int(_)
            | Token::Long(_)
            | Token::Float(_)
            | Token::Double(_)
            | Token::Char(_)
            | Token::Boolean(_)
            | Token::Str(_) => true,
            Token::Ident(_, _) => match self.peek_ahead(1) {
                Token::Ident(_, _) => true,
                Token::LBracket(_) => matches!(self.peek_ahead(2), Token::RBracket(_)),
                _ => false,
            },
            _ => false,
        }
    }

    /// Parse a variable declaration without consuming the trailing semicolon
    fn parse_var_decl(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        let var_type = self.parse_type()?;
        let (name, _) = self.expect_identifier()?;

        let init = if self.match_token(&Token::Eq(SourceLocation::new(0, 0))) {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };

        Ok(AstNode::VarDecl {
            name,
            var_type,
            init,
            location: loc,
        })
    }

    /// Parse an expression, then fold a trailing `=` or compound assignment
    /// operator into an assignment statement. Does not consume the semicolon,
    /// so `for` headers can reuse it.
    fn parse_expr_or_assignment(&mut self) -> Result<AstNode, ParseError> {
        let expr = self.parse_expression()?;
        let loc = self.current_location();

        let compound_op = match self.peek() {
            Token::Eq(_) => {
                self.advance();
                let rhs = self.parse_expression()?;
                return Ok(AstNode::Assignment {
                    lhs: Box::new(expr),
                    rhs: Box::new(rhs),
                    location: loc,
                });
            }
            Token::PlusEq(_) => Some(BinOp::Add),
            Token::MinusEq(_) => Some(BinOp::Sub),
            Token::StarEq(_) => Some(BinOp::Mul),
            Token::SlashEq(_) => Some(BinOp::Div),
            Token::PercentEq(_) => Some(BinOp::Mod),
            _ => None,
        };

        if let Some(op) = compound_op {
            self.advance();
            let rhs = self.parse_expression()?;
            return Ok(AstNode::CompoundAssignment {
                lhs: Box::new(expr),
                op,
                rhs: Box::new(rhs),
                location: loc,
            });
        }

        let location = expr.location();
        Ok(AstNode::ExpressionStatement {
            expr: Box::new(expr),
            location,
        })
    }

    fn parse_if(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        self.expect_token(Token::If(SourceLocation::new(0, 0)))?;
        self.expect_token(Token::LParen(SourceLocation::new(0, 0)))?;
        let condition = self.parse_expression()?;
        self.expect_token(Token::RParen(SourceLocation::new(0, 0)))?;

        let then_branch = self.parse_body()?;

        let else_branch = if self.match_token(&Token::Else(SourceLocation::new(0, 0))) {
            if self.check(&Token::If(SourceLocation::new(0, 0))) {
                // else-if chains become a nested if in the else branch
                Some(vec![self.parse_if()?])
            } else {
                Some(self.parse_body()?)
            }
        } else {
            None
        };

        Ok(AstNode::If {
            condition: Box::new(condition),
            then_branch,
            else_branch,
            location: loc,
        })
    }

    fn parse_while(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        self.expect_token(Token::While(SourceLocation::new(0, 0)))?;
        self.expect_token(Token::LParen(SourceLocation::new(0, 0)))?;
        let condition = self.parse_expression()?;
        self.expect_token(Token::RParen(SourceLocation::new(0, 0)))?;
        let body = self.parse_body()?;

        Ok(AstNode::While {
            condition: Box::new(condition),
            body,
            location: loc,
        })
    }

    fn parse_do_while(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        self.expect_token(Token::Do(SourceLocation::new(0, 0)))?;
        let body = self.parse_body()?;
        self.expect_token(Token::While(SourceLocation::new(0, 0)))?;
        self.expect_token(Token::LParen(SourceLocation::new(0, 0)))?;
        let condition = self.parse_expression()?;
        self.expect_token(Token::RParen(SourceLocation::new(0, 0)))?;
        self.expect_token(Token::Semicolon(SourceLocation::new(0, 0)))?;

        Ok(AstNode::DoWhile {
            body,
            condition: Box::new(condition),
            location: loc,
        })
    }

    fn parse_for(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        self.expect_token(Token::For(SourceLocation::new(0, 0)))?;
        self.expect_token(Token::LParen(SourceLocation::new(0, 0)))?;

        // Enhanced form: `for (T name : iterable)`. Detected by trying the
        // type-and-name prefix and checking for ':'.
        if self.at_var_decl() {
            let saved = self.position;
            let var_type = self.parse_type()?;
            if let Token::Ident(var_name, _) = self.peek().clone() {
                self.advance();
                if self.match_token(&Token::Colon(SourceLocation::new(0, 0))) {
                    let iterable = self.parse_expression()?;
                    self.expect_token(Token::RParen(SourceLocation::new(0, 0)))?;
                    let body = self.parse_body()?;
                    return Ok(AstNode::ForEach {
                        var_type,
                        var_name,
                        iterable: Box::new(iterable),
                        body,
                        location: loc,
                    });
                }
            }
            self.position = saved;
        }

        let init = if self.check(&Token::Semicolon(SourceLocation::new(0, 0))) {
            None
        } else if self.at_var_decl() {
            Some(Box::new(self.parse_var_decl()?))
        } else {
            Some(Box::new(self.parse_expr_or_assignment()?))
        };
        self.expect_token(Token::Semicolon(SourceLocation::new(0, 0)))?;

        let condition = if self.check(&Token::Semicolon(SourceLocation::new(0, 0))) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.expect_token(Token::Semicolon(SourceLocation::new(0, 0)))?;

        let increment = if self.check(&Token::RParen(SourceLocation::new(0, 0))) {
            None
        } else {
            Some(Box::new(self.parse_expr_or_assignment()?))
        };
        self.expect_token(Token::RParen(SourceLocation::new(0, 0)))?;

        let body = self.parse_body()?;

        Ok(AstNode::For {
            init,
            condition,
            increment,
            body,
            location: loc,
        })
    }

    fn parse_switch(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();
        self.expect_token(Token::Switch(SourceLocation::new(0, 0)))?;
        self.expect_token(Token::LParen(SourceLocation::new(0, 0)))?;
        let expr = self.parse_expression()?;
        self.expect_token(Token::RParen(SourceLocation::new(0, 0)))?;
        self.expect_token(Token::LBrace(SourceLocation::new(0, 0)))?;

        let mut cases = Vec::new();

        while !self.check(&Token::RBrace(SourceLocation::new(0, 0))) && !self.is_at_end() {
            let case_loc = self.current_location();

            if self.match_token(&Token::Case(SourceLocation::new(0, 0))) {
                let value = self.parse_expression()?;
                self.expect_token(Token::Colon(SourceLocation::new(0, 0)))?;
                let statements = self.parse_case_statements()?;
                cases.push(CaseNode::Case {
                    value: Box::new(value),
                    statements,
                    location: case_loc,
                });
            } else if self.match_token(&Token::Default(SourceLocation::new(0, 0))) {
                self.expect_token(Token::Colon(SourceLocation::new(0, 0)))?;
                let statements = self.parse_case_statements()?;
                cases.push(CaseNode::Default {
                    statements,
                    location: case_loc,
                });
            } else {
                return Err(ParseError {
                    message: format!("Expected 'case' or 'default', found {}", self.peek()),
                    location: case_loc,
                });
            }
        }

        self.expect_token(Token::RBrace(SourceLocation::new(0, 0)))?;

        Ok(AstNode::Switch {
            expr: Box::new(expr),
            cases,
            location: loc,
        })
    }

    /// Statements belonging to a case arm, up to the next label or the
    /// closing brace
    fn parse_case_statements(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let mut statements = Vec::new();
        while !self.check(&Token::Case(SourceLocation::new(0, 0)))
            && !self.check(&Token::Default(SourceLocation::new(0, 0)))
            && !self.check(&Token::RBrace(SourceLocation::new(0, 0)))
            && !self.is_at_end()
        {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    // ===== Expressions =====

    pub fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        self.parse_ternary()
    }

    fn parse_ternary(&mut self) -> Result<AstNode, ParseError> {
        let condition = self.parse_or()?;

        if self.check(&Token::Question(SourceLocation::new(0, 0))) {
            let loc = self.current_location();
            self.advance();
            let true_expr = self.parse_expression()?;
            self.expect_token(Token::Colon(SourceLocation::new(0, 0)))?;
            let false_expr = self.parse_ternary()?;
            return Ok(AstNode::TernaryOp {
                condition: Box::new(condition),
                true_expr: Box::new(true_expr),
                false_expr: Box::new(false_expr),
                location: loc,
            });
        }

        Ok(condition)
    }

    fn parse_or(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_and()?;

        while self.check(&Token::OrOr(SourceLocation::new(0, 0))) {
            let loc = self.current_location();
            self.advance();
            let right = self.parse_and()?;
            left = AstNode::BinaryOp {
                op: BinOp::Or,
                left: Box::new(left),
                right: Box::new(right),
                location: loc,
            };
        }

        Ok(left)
    }

    fn parse_and(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_equality()?;

        while self.check(&Token::AndAnd(SourceLocation::new(0, 0))) {
            let loc = self.current_location();
            self.advance();
            let right = self.parse_equality()?;
            left = AstNode::BinaryOp {
                op: BinOp::And,
                left: Box::new(left),
                right: Box::new(right),
                location: loc,
            };
        }

        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_relational()?;

        loop {
            let op = match self.peek() {
                Token::EqEq(_) => BinOp::Eq,
                Token::NotEq(_) => BinOp::Ne,
                _ => break,
            };
            let loc = self.current_location();
            self.advance();
            let right = self.parse_relational()?;
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location: loc,
            };
        }

        Ok(left)
    }

    fn parse_relational(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_additive()?;

        loop {
            let op = match self.peek() {
                Token::Lt(_) => BinOp::Lt,
                Token::Le(_) => BinOp::Le,
                Token::Gt(_) => BinOp::Gt,
                Token::Ge(_) => BinOp::Ge,
                _ => break,
            };
            let loc = self.current_location();
            self.advance();
            let right = self.parse_additive()?;
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location: loc,
            };
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.peek() {
                Token::Plus(_) => BinOp::Add,
                Token::Minus(_) => BinOp::Sub,
                _ => break,
            };
            let loc = self.current_location();
            self.advance();
            let right = self.parse_multiplicative()?;
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location: loc,
            };
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.peek() {
                Token::Star(_) => BinOp::Mul,
                Token::Slash(_) => BinOp::Div,
                Token::Percent(_) => BinOp::Mod,
                _ => break,
            };
            let loc = self.current_location();
            self.advance();
            let right = self.parse_unary()?;
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location: loc,
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();

        let op = match self.peek() {
            Token::Minus(_) => Some(UnOp::Neg),
            Token::Bang(_) => Some(UnOp::Not),
            Token::PlusPlus(_) => Some(UnOp::PreInc),
            Token::MinusMinus(_) => Some(UnOp::PreDec),
            _ => None,
        };

        if let Some(op) = op {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(AstNode::UnaryOp {
                op,
                operand: Box::new(operand),
                location: loc,
            });
        }

        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<AstNode, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            let loc = self.current_location();
            match self.peek() {
                Token::Dot(_) => {
                    self.advance();
                    let (name, _) = self.expect_identifier()?;
                    if self.check(&Token::LParen(SourceLocation::new(0, 0))) {
                        let args = self.parse_args()?;
                        expr = AstNode::MethodCall {
                            target: Some(Box::new(expr)),
                            name,
                            args,
                            location: loc,
                        };
                    } else {
                        expr = AstNode::FieldAccess {
                            object: Box::new(expr),
                            field: name,
                            location: loc,
                        };
                    }
                }
                Token::LBracket(_) => {
                    self.advance();
                    let index = self.parse_expression()?;
                    self.expect_token(Token::RBracket(SourceLocation::new(0, 0)))?;
                    expr = AstNode::ArrayAccess {
                        array: Box::new(expr),
                        index: Box::new(index),
                        location: loc,
                    };
                }
                Token::PlusPlus(_) => {
                    self.advance();
                    expr = AstNode::UnaryOp {
                        op: UnOp::PostInc,
                        operand: Box::new(expr),
                        location: loc,
                    };
                }
                Token::MinusMinus(_) => {
                    self.advance();
                    expr = AstNode::UnaryOp {
                        op: UnOp::PostDec,
                        operand: Box::new(expr),
                        location: loc,
                    };
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.current_location();

        match self.peek().clone() {
            Token::IntLiteral(n, _) => {
                self.advance();
                Ok(AstNode::IntLiteral(n, loc))
            }
            Token::LongLiteral(n, _) => {
                self.advance();
                Ok(AstNode::LongLiteral(n, loc))
            }
            Token::FloatLiteral(n, _) => {
                self.advance();
                Ok(AstNode::FloatLiteral(n, loc))
            }
            Token::DoubleLiteral(n, _) => {
                self.advance();
                Ok(AstNode::DoubleLiteral(n, loc))
            }
            Token::CharLiteral(c, _) => {
                self.advance();
                Ok(AstNode::CharLiteral(c, loc))
            }
            Token::StringLiteral(s, _) => {
                self.advance();
                Ok(AstNode::StringLiteral(s, loc))
            }
            Token::True(_) => {
                self.advance();
                Ok(AstNode::BoolLiteral(true, loc))
            }
            Token::False(_) => {
                self.advance();
                Ok(AstNode::BoolLiteral(false, loc))
            }
            Token::Null(_) => {
                self.advance();
                Ok(AstNode::Null { location: loc })
            }
            Token::This(_) => {
                self.advance();
                Ok(AstNode::This { location: loc })
            }
            Token::New(_) => {
                self.advance();
                self.parse_new(loc)
            }
            Token::Ident(name, _) => {
                self.advance();
                if self.check(&Token::LParen(SourceLocation::new(0, 0))) {
                    let args = self.parse_args()?;
                    Ok(AstNode::MethodCall {
                        target: None,
                        name,
                        args,
                        location: loc,
                    })
                } else {
                    Ok(AstNode::Variable(name, loc))
                }
            }
            Token::LParen(_) => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_token(Token::RParen(SourceLocation::new(0, 0)))?;
                Ok(expr)
            }
            Token::LBrace(_) => self.parse_array_literal(loc),
            other => Err(ParseError {
                message: format!("Unexpected token in expression: {}", other),
                location: other.location(),
            }),
        }
    }

    /// Parse the tail of a `new` expression: `new Carro("Civic", 2022)` or
    /// `new int[5]`
    fn parse_new(&mut self, loc: SourceLocation) -> Result<AstNode, ParseError> {
        let elem_type = self.parse_new_base_type()?;

        if self.check(&Token::LBracket(SourceLocation::new(0, 0)))
            && !matches!(self.peek_ahead(1), Token::RBracket(_))
        {
            self.advance();
            let size = self.parse_expression()?;
            self.expect_token(Token::RBracket(SourceLocation::new(0, 0)))?;
            return Ok(AstNode::NewArray {
                elem_type,
                size: Box::new(size),
                location: loc,
            });
        }

        match elem_type.base {
            BaseType::Class(class) if !elem_type.is_array() => {
                let args = self.parse_args()?;
                Ok(AstNode::New {
                    class,
                    args,
                    location: loc,
                })
            }
            _ => Err(ParseError {
                message: format!("Cannot construct a value of type {}", elem_type),
                location: loc,
            }),
        }
    }

    /// Base type after `new`, without consuming the sized `[n]` suffix
    fn parse_new_base_type(&mut self) -> Result<Type, ParseError> {
        let base = match self.peek().clone() {
            Token::Byte(_) => BaseType::Byte,
            Token::Short(_) => BaseType::Short,
            Token::Int(_) => BaseType::Int,
            Token::Long(_) => BaseType::Long,
            Token::Float(_) => BaseType::Float,
            Token::Double(_) => BaseType::Double,
            Token::Char(_) => BaseType::Char,
            Token::Boolean(_) => BaseType::Boolean,
            Token::Str(_) => BaseType::Str,
            Token::Ident(name, _) => BaseType::Class(name),
            other => {
                return Err(ParseError {
                    message: format!("Expected a type after 'new', found {}", other),
                    location: other.location(),
                })
            }
        };
        self.advance();
        Ok(Type::new(base))
    }

    /// Parse a brace-delimited array literal: `{"Ana", "Bruno", "Carla"}`
    fn parse_array_literal(&mut self, loc: SourceLocation) -> Result<AstNode, ParseError> {
        self.expect_token(Token::LBrace(SourceLocation::new(0, 0)))?;
        let mut elements = Vec::new();

        if !self.check(&Token::RBrace(SourceLocation::new(0, 0))) {
            loop {
                elements.push(self.parse_expression()?);
                if !self.match_token(&Token::Comma(SourceLocation::new(0, 0))) {
                    break;
                }
            }
        }

        self.expect_token(Token::RBrace(SourceLocation::new(0, 0)))?;
        Ok(AstNode::ArrayLiteral {
            elements,
            location: loc,
        })
    }

    fn parse_args(&mut self) -> Result<Vec<AstNode>, ParseError> {
        self.expect_token(Token::LParen(SourceLocation::new(0, 0)))?;
        let mut args = Vec::new();

        if !self.check(&Token::RParen(SourceLocation::new(0, 0))) {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_token(&Token::Comma(SourceLocation::new(0, 0))) {
                    break;
                }
            }
        }

        self.expect_token(Token::RParen(SourceLocation::new(0, 0)))?;
        Ok(args)
    }

    // ===== Token stream helpers =====

    fn peek(&self) -> &Token {
        let idx = self.position.min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    fn peek_ahead(&self, n: usize) -> &Token {
        let idx = (self.position + n).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    /// Compare token kinds, ignoring payloads and locations
    fn check(&self, expected: &Token) -> bool {
        discriminant(self.peek()) == discriminant(expected)
    }

    /// Consume the next token if it matches the expected kind
    fn match_token(&mut self, expected: &Token) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_token(&mut self, expected: Token) -> Result<Token, ParseError> {
        if self.check(&expected) {
            Ok(self.advance())
        } else {
            let found = self.peek();
            Err(ParseError {
                message: format!("Expected {}, found {}", expected, found),
                location: found.location(),
            })
        }
    }

    fn expect_identifier(&mut self) -> Result<(String, SourceLocation), ParseError> {
        match self.peek().clone() {
            Token::Ident(name, loc) => {
                self.advance();
                Ok((name, loc))
            }
            other => Err(ParseError {
                message: format!("Expected identifier, found {}", other),
                location: other.location(),
            }),
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }

    fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::Lexer;

    fn parse(source: &str) -> Program {
        let tokens = Lexer::new(source).tokenize().unwrap();
        Parser::new(tokens).parse_program().unwrap()
    }

    #[test]
    fn test_package_declaration() {
        let program = parse("package poo.heranca; class Animal {}");
        assert_eq!(program.unit, "poo.heranca");
        assert_eq!(program.classes[0].name, "Animal");
    }

    #[test]
    fn test_default_unit_without_package() {
        let program = parse("class Main {}");
        assert_eq!(program.unit, "default");
    }

    #[test]
    fn test_class_with_members() {
        let program = parse(
            "class Carro {\n\
             String modelo;\n\
             private int ano;\n\
             Carro(String modelo, int ano) { this.modelo = modelo; this.ano = ano; }\n\
             public void exibirInfo() { println(this.modelo); }\n\
             }",
        );

        let carro = &program.classes[0];
        assert_eq!(carro.fields.len(), 2);
        assert_eq!(carro.fields[0].visibility, Visibility::Package);
        assert_eq!(carro.fields[1].visibility, Visibility::Private);
        assert_eq!(carro.ctors.len(), 1);
        assert_eq!(carro.ctors[0].params.len(), 2);
        assert_eq!(carro.methods.len(), 1);
        assert_eq!(carro.methods[0].visibility, Visibility::Public);
    }

    #[test]
    fn test_extends_clause() {
        let program = parse("class Cachorro extends Animal {}");
        assert_eq!(
            program.classes[0].superclass.as_deref(),
            Some("Animal")
        );
    }

    #[test]
    fn test_overloaded_methods_parse() {
        let program = parse(
            "class Calculadora {\n\
             public int somar(int a, int b) { return a + b; }\n\
             public double somar(double a, double b) { return a + b; }\n\
             public int somar(int a, int b, int c) { return a + b + c; }\n\
             }",
        );
        assert_eq!(program.classes[0].methods.len(), 3);
    }

    #[test]
    fn test_for_each_and_array_literal() {
        let program = parse(
            "class Main { void main() {\n\
             String[] nomes = {\"Ana\", \"Bruno\"};\n\
             for (String nome : nomes) { println(nome); }\n\
             } }",
        );

        let body = &program.classes[0].methods[0].body;
        assert!(matches!(body[0], AstNode::VarDecl { .. }));
        assert!(matches!(body[1], AstNode::ForEach { .. }));
    }

    #[test]
    fn test_classic_for_header() {
        let program = parse(
            "class Main { void main() { for (int i = 1; i <= 5; i++) { println(i); } } }",
        );
        let body = &program.classes[0].methods[0].body;
        match &body[0] {
            AstNode::For {
                init,
                condition,
                increment,
                ..
            } => {
                assert!(init.is_some());
                assert!(condition.is_some());
                assert!(increment.is_some());
            }
            other => panic!("expected for statement, got {:?}", other),
        }
    }

    #[test]
    fn test_ternary_precedence() {
        let program = parse(
            "class Main { void main() { String s = idade >= 18 ? \"Maior\" : \"Menor\"; } }",
        );
        let body = &program.classes[0].methods[0].body;
        match &body[0] {
            AstNode::VarDecl { init: Some(e), .. } => {
                assert!(matches!(**e, AstNode::TernaryOp { .. }));
            }
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_switch_with_default() {
        let program = parse(
            "class Main { void main() {\n\
             switch (dia) {\n\
             case 1: println(\"Domingo\"); break;\n\
             default: println(\"Outro\"); break;\n\
             }\n\
             } }",
        );
        let body = &program.classes[0].methods[0].body;
        match &body[0] {
            AstNode::Switch { cases, .. } => assert_eq!(cases.len(), 2),
            other => panic!("expected switch, got {:?}", other),
        }
    }

    #[test]
    fn test_field_initializer_rejected() {
        let tokens = Lexer::new("class A { int x = 5; }").tokenize().unwrap();
        assert!(Parser::new(tokens).parse_program().is_err());
    }

    #[test]
    fn test_method_call_on_object() {
        let program = parse("class Main { void main() { meuCarro.exibirInfo(); } }");
        let body = &program.classes[0].methods[0].body;
        match &body[0] {
            AstNode::ExpressionStatement { expr, .. } => {
                assert!(matches!(**expr, AstNode::MethodCall { target: Some(_), .. }));
            }
            other => panic!("expected expression statement, got {:?}", other),
        }
    }
}

// AST definitions for the mjava interpreter

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Base types supported by the interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseType {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    Boolean,
    Str,
    Void,
    Class(String), // Class name
}

/// Type representation: a base type plus array dimensions (`int[][]` has depth 2)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Type {
    pub base: BaseType,
    pub array_depth: usize,
}

impl Type {
    pub fn new(base: BaseType) -> Self {
        Type {
            base,
            array_depth: 0,
        }
    }

    pub fn with_array(mut self) -> Self {
        self.array_depth += 1;
        self
    }

    /// The element type obtained by indexing once into this array type
    pub fn element_type(&self) -> Type {
        Type {
            base: self.base.clone(),
            array_depth: self.array_depth.saturating_sub(1),
        }
    }

    pub fn is_array(&self) -> bool {
        self.array_depth > 0
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match &self.base {
            BaseType::Byte => "byte",
            BaseType::Short => "short",
            BaseType::Int => "int",
            BaseType::Long => "long",
            BaseType::Float => "float",
            BaseType::Double => "double",
            BaseType::Char => "char",
            BaseType::Boolean => "boolean",
            BaseType::Str => "String",
            BaseType::Void => "void",
            BaseType::Class(name) => name.as_str(),
        };
        write!(f, "{}", name)?;
        for _ in 0..self.array_depth {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

/// Member visibility tags, checked by an explicit decision function rather
/// than mapped onto any host-language privacy mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
    Protected,
    /// No modifier: visible within the declaring compilation unit only
    Package,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Private => write!(f, "private"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Package => write!(f, "package-private"),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Logical
    And,
    Or,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        };
        write!(f, "{}", s)
    }
}

/// Unary operators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnOp {
    Neg,     // -x
    Not,     // !x
    PreInc,  // ++x
    PreDec,  // --x
    PostInc, // x++
    PostDec, // x--
}

/// Method or constructor parameter
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub param_type: Type,
}

/// Class field declaration
#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub name: String,
    pub field_type: Type,
    pub visibility: Visibility,
    pub location: SourceLocation,
}

/// Method declaration
#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Type,
    pub visibility: Visibility,
    pub body: Vec<AstNode>,
    pub location: SourceLocation,
}

/// Constructor declaration (spelled with the class name, no return type)
#[derive(Debug, Clone)]
pub struct CtorDecl {
    pub params: Vec<Param>,
    pub visibility: Visibility,
    pub body: Vec<AstNode>,
    pub location: SourceLocation,
}

/// Class declaration
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: String,
    pub superclass: Option<String>,
    pub fields: Vec<FieldDecl>,
    pub ctors: Vec<CtorDecl>,
    pub methods: Vec<MethodDecl>,
    pub location: SourceLocation,
}

/// Switch case
#[derive(Debug, Clone)]
pub enum CaseNode {
    Case {
        value: Box<AstNode>,
        statements: Vec<AstNode>,
        location: SourceLocation,
    },
    Default {
        statements: Vec<AstNode>,
        location: SourceLocation,
    },
}

/// AST nodes representing statements and expressions
#[derive(Debug, Clone)]
pub enum AstNode {
    // Statements
    VarDecl {
        name: String,
        var_type: Type,
        init: Option<Box<AstNode>>,
        location: SourceLocation,
    },
    Assignment {
        lhs: Box<AstNode>,
        rhs: Box<AstNode>,
        location: SourceLocation,
    },
    CompoundAssignment {
        lhs: Box<AstNode>,
        op: BinOp,
        rhs: Box<AstNode>,
        location: SourceLocation,
    },
    Return {
        expr: Option<Box<AstNode>>,
        location: SourceLocation,
    },
    If {
        condition: Box<AstNode>,
        then_branch: Vec<AstNode>,
        else_branch: Option<Vec<AstNode>>,
        location: SourceLocation,
    },
    While {
        condition: Box<AstNode>,
        body: Vec<AstNode>,
        location: SourceLocation,
    },
    DoWhile {
        body: Vec<AstNode>,
        condition: Box<AstNode>,
        location: SourceLocation,
    },
    For {
        init: Option<Box<AstNode>>,
        condition: Option<Box<AstNode>>,
        increment: Option<Box<AstNode>>,
        body: Vec<AstNode>,
        location: SourceLocation,
    },
    /// Enhanced for: `for (T name : iterable) { body }`
    ForEach {
        var_type: Type,
        var_name: String,
        iterable: Box<AstNode>,
        body: Vec<AstNode>,
        location: SourceLocation,
    },
    Switch {
        expr: Box<AstNode>,
        cases: Vec<CaseNode>,
        location: SourceLocation,
    },
    Break {
        location: SourceLocation,
    },
    Continue {
        location: SourceLocation,
    },
    ExpressionStatement {
        expr: Box<AstNode>,
        location: SourceLocation,
    },

    // Expressions
    IntLiteral(i32, SourceLocation),
    LongLiteral(i64, SourceLocation),
    FloatLiteral(f32, SourceLocation),
    DoubleLiteral(f64, SourceLocation),
    CharLiteral(char, SourceLocation),
    StringLiteral(String, SourceLocation),
    BoolLiteral(bool, SourceLocation),
    Null {
        location: SourceLocation,
    },
    This {
        location: SourceLocation,
    },
    Variable(String, SourceLocation),
    BinaryOp {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
        location: SourceLocation,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<AstNode>,
        location: SourceLocation,
    },
    TernaryOp {
        condition: Box<AstNode>,
        true_expr: Box<AstNode>,
        false_expr: Box<AstNode>,
        location: SourceLocation,
    },
    /// Method call; `target == None` means a bare call (built-in or implicit `this`)
    MethodCall {
        target: Option<Box<AstNode>>,
        name: String,
        args: Vec<AstNode>,
        location: SourceLocation,
    },
    New {
        class: String,
        args: Vec<AstNode>,
        location: SourceLocation,
    },
    NewArray {
        elem_type: Type,
        size: Box<AstNode>,
        location: SourceLocation,
    },
    ArrayLiteral {
        elements: Vec<AstNode>,
        location: SourceLocation,
    },
    ArrayAccess {
        array: Box<AstNode>,
        index: Box<AstNode>,
        location: SourceLocation,
    },
    FieldAccess {
        object: Box<AstNode>,
        field: String,
        location: SourceLocation,
    },
}

impl AstNode {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            AstNode::VarDecl { location, .. } => *location,
            AstNode::Assignment { location, .. } => *location,
            AstNode::CompoundAssignment { location, .. } => *location,
            AstNode::Return { location, .. } => *location,
            AstNode::If { location, .. } => *location,
            AstNode::While { location, .. } => *location,
            AstNode::DoWhile { location, .. } => *location,
            AstNode::For { location, .. } => *location,
            AstNode::ForEach { location, .. } => *location,
            AstNode::Switch { location, .. } => *location,
            AstNode::Break { location } => *location,
            AstNode::Continue { location } => *location,
            AstNode::ExpressionStatement { location, .. } => *location,
            AstNode::IntLiteral(_, loc) => *loc,
            AstNode::LongLiteral(_, loc) => *loc,
            AstNode::FloatLiteral(_, loc) => *loc,
            AstNode::DoubleLiteral(_, loc) => *loc,
            AstNode::CharLiteral(_, loc) => *loc,
            AstNode::StringLiteral(_, loc) => *loc,
            AstNode::BoolLiteral(_, loc) => *loc,
            AstNode::Null { location } => *location,
            AstNode::This { location } => *location,
            AstNode::Variable(_, loc) => *loc,
            AstNode::BinaryOp { location, .. } => *location,
            AstNode::UnaryOp { location, .. } => *location,
            AstNode::TernaryOp { location, .. } => *location,
            AstNode::MethodCall { location, .. } => *location,
            AstNode::New { location, .. } => *location,
            AstNode::NewArray { location, .. } => *location,
            AstNode::ArrayLiteral { location, .. } => *location,
            AstNode::ArrayAccess { location, .. } => *location,
            AstNode::FieldAccess { location, .. } => *location,
        }
    }
}

/// A parsed compilation unit: its package name and the classes it declares
#[derive(Debug, Clone)]
pub struct Program {
    /// Package name from the `package` declaration, or `"default"`
    pub unit: String,
    pub classes: Vec<ClassDecl>,
}

impl Program {
    pub fn new() -> Self {
        Program {
            unit: "default".to_string(),
            classes: Vec::new(),
        }
    }
}

impl Default for Program {
    fn default() -> Self {
        Program::new()
    }
}

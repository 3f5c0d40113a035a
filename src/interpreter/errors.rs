//! Runtime error definitions

use crate::memory::value::Kind;
use crate::parser::ast::SourceLocation;
use std::fmt;

/// Errors that can occur while loading classes or executing a program.
///
/// Every variant carries the source location of the construct that failed,
/// so the binary can report where in the program the run stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    DivisionByZero {
        location: SourceLocation,
    },
    TypeMismatch {
        expected: String,
        found: String,
        location: SourceLocation,
    },
    /// Two methods in one class share a name and parameter kind list
    DuplicateSignature {
        class: String,
        method: String,
        signature: String,
        location: SourceLocation,
    },
    NoMatchingSignature {
        class: String,
        method: String,
        args: Vec<Kind>,
        location: SourceLocation,
    },
    /// Two candidates tie on conversion cost
    AmbiguousOverload {
        class: String,
        method: String,
        args: Vec<Kind>,
        location: SourceLocation,
    },
    AccessDenied {
        class: String,
        member: String,
        visibility: String,
        from_class: Option<String>,
        location: SourceLocation,
    },
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },
    UndefinedClass {
        name: String,
        location: SourceLocation,
    },
    UndefinedField {
        class: String,
        field: String,
        location: SourceLocation,
    },
    UndefinedMethod {
        class: String,
        method: String,
        location: SourceLocation,
    },
    /// A local was read before its first assignment
    UninitializedRead {
        name: String,
        location: SourceLocation,
    },
    NullReference {
        location: SourceLocation,
    },
    IndexOutOfBounds {
        index: i64,
        length: usize,
        location: SourceLocation,
    },
    NoStackFrame {
        location: SourceLocation,
    },
    /// No class declares a parameterless `main` method
    NoMainMethod,
    UnsupportedOperation {
        message: String,
        location: SourceLocation,
    },
}

impl RuntimeError {
    /// Get the source location where this error occurred
    pub fn location(&self) -> SourceLocation {
        match self {
            RuntimeError::DivisionByZero { location }
            | RuntimeError::TypeMismatch { location, .. }
            | RuntimeError::DuplicateSignature { location, .. }
            | RuntimeError::NoMatchingSignature { location, .. }
            | RuntimeError::AmbiguousOverload { location, .. }
            | RuntimeError::AccessDenied { location, .. }
            | RuntimeError::UndefinedVariable { location, .. }
            | RuntimeError::UndefinedClass { location, .. }
            | RuntimeError::UndefinedField { location, .. }
            | RuntimeError::UndefinedMethod { location, .. }
            | RuntimeError::UninitializedRead { location, .. }
            | RuntimeError::NullReference { location }
            | RuntimeError::IndexOutOfBounds { location, .. }
            | RuntimeError::NoStackFrame { location }
            | RuntimeError::UnsupportedOperation { location, .. } => *location,
            RuntimeError::NoMainMethod => SourceLocation::new(0, 0),
        }
    }
}

fn kinds_list(kinds: &[Kind]) -> String {
    kinds
        .iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::DivisionByZero { location } => {
                write!(
                    f,
                    "Division by zero at line {}, column {}",
                    location.line, location.column
                )
            }
            RuntimeError::TypeMismatch {
                expected,
                found,
                location,
            } => {
                write!(
                    f,
                    "Type mismatch at line {}, column {}: expected {}, found {}",
                    location.line, location.column, expected, found
                )
            }
            RuntimeError::DuplicateSignature {
                class,
                method,
                signature,
                location,
            } => {
                write!(
                    f,
                    "Duplicate signature at line {}, column {}: {}.{}({}) is declared more than once",
                    location.line, location.column, class, method, signature
                )
            }
            RuntimeError::NoMatchingSignature {
                class,
                method,
                args,
                location,
            } => {
                write!(
                    f,
                    "No matching signature at line {}, column {}: {}.{}({}) matches no declared overload",
                    location.line,
                    location.column,
                    class,
                    method,
                    kinds_list(args)
                )
            }
            RuntimeError::AmbiguousOverload {
                class,
                method,
                args,
                location,
            } => {
                write!(
                    f,
                    "Ambiguous call at line {}, column {}: {}.{}({}) matches multiple overloads at equal cost",
                    location.line,
                    location.column,
                    class,
                    method,
                    kinds_list(args)
                )
            }
            RuntimeError::AccessDenied {
                class,
                member,
                visibility,
                from_class,
                location,
            } => {
                let origin = match from_class {
                    Some(name) => format!("class {}", name),
                    None => "top level".to_string(),
                };
                write!(
                    f,
                    "Access denied at line {}, column {}: {} member {}.{} is not visible from {}",
                    location.line, location.column, visibility, class, member, origin
                )
            }
            RuntimeError::UndefinedVariable { name, location } => {
                write!(
                    f,
                    "Undefined variable '{}' at line {}, column {}",
                    name, location.line, location.column
                )
            }
            RuntimeError::UndefinedClass { name, location } => {
                write!(
                    f,
                    "Undefined class '{}' at line {}, column {}",
                    name, location.line, location.column
                )
            }
            RuntimeError::UndefinedField {
                class,
                field,
                location,
            } => {
                write!(
                    f,
                    "Class {} has no field '{}' (line {}, column {})",
                    class, field, location.line, location.column
                )
            }
            RuntimeError::UndefinedMethod {
                class,
                method,
                location,
            } => {
                write!(
                    f,
                    "Class {} has no method '{}' (line {}, column {})",
                    class, method, location.line, location.column
                )
            }
            RuntimeError::UninitializedRead { name, location } => {
                write!(
                    f,
                    "Variable '{}' read before initialization at line {}, column {}",
                    name, location.line, location.column
                )
            }
            RuntimeError::NullReference { location } => {
                write!(
                    f,
                    "Null reference at line {}, column {}",
                    location.line, location.column
                )
            }
            RuntimeError::IndexOutOfBounds {
                index,
                length,
                location,
            } => {
                write!(
                    f,
                    "Index {} out of bounds for length {} at line {}, column {}",
                    index, length, location.line, location.column
                )
            }
            RuntimeError::NoStackFrame { location } => {
                write!(
                    f,
                    "No active stack frame at line {}, column {}",
                    location.line, location.column
                )
            }
            RuntimeError::NoMainMethod => {
                write!(f, "No class declares a parameterless 'main' method")
            }
            RuntimeError::UnsupportedOperation { message, location } => {
                write!(
                    f,
                    "Unsupported operation at line {}, column {}: {}",
                    location.line, location.column, message
                )
            }
        }
    }
}

impl std::error::Error for RuntimeError {}

//! Tree-walking interpreter: class loading, overload resolution, access
//! control, and execution.

pub mod builtins;
pub mod classes;
pub mod engine;
pub mod errors;
pub mod expressions;
pub mod ops;
pub mod overload;
pub mod statements;
pub mod visibility;

pub use classes::ClassTable;
pub use engine::Interpreter;
pub use errors::RuntimeError;

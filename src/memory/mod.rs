//! Runtime memory model: values, the call stack, and the object heap.

pub mod heap;
pub mod stack;
pub mod value;

pub use heap::{Heap, HeapObject};
pub use stack::{LocalVar, Stack, StackFrame};
pub use value::{Kind, Value};

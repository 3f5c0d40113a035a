//! Call stack: one frame per active method or constructor invocation.
//!
//! Each frame owns its local variables plus a stack of block scopes. A block
//! may shadow an outer local; on exit the shadowed binding is restored and
//! everything the block declared is dropped.

use super::value::Value;
use crate::parser::ast::Type;
use rustc_hash::FxHashMap;

/// A local variable slot.
///
/// Locals declared without an initializer keep their declared type's zero
/// value but stay unreadable until first assignment.
#[derive(Debug, Clone)]
pub struct LocalVar {
    pub value: Value,
    pub declared_type: Type,
    pub initialized: bool,
}

/// Bookkeeping for one block scope inside a frame
#[derive(Debug, Default)]
struct ScopeData {
    /// Outer bindings replaced by a declaration inside this scope
    shadowed: Vec<(String, LocalVar)>,
    /// Names first declared in this scope
    declared: Vec<String>,
}

/// One activation record
#[derive(Debug)]
pub struct StackFrame {
    /// Method or constructor name, kept for error reporting
    pub method_name: String,
    /// Class the executing body belongs to
    pub class: String,
    /// Compilation unit of that class
    pub unit: String,
    /// Heap handle of the receiver
    pub this: Option<usize>,
    locals: FxHashMap<String, LocalVar>,
    scopes: Vec<ScopeData>,
}

impl StackFrame {
    pub fn new(method_name: String, class: String, unit: String, this: Option<usize>) -> Self {
        Self {
            method_name,
            class,
            unit,
            this,
            locals: FxHashMap::default(),
            scopes: Vec::new(),
        }
    }

    /// Declare a variable in the innermost scope, shadowing any outer
    /// binding of the same name
    pub fn declare(&mut self, name: &str, var: LocalVar) {
        let previous = self.locals.insert(name.to_string(), var);
        if let Some(scope) = self.scopes.last_mut() {
            match previous {
                Some(old) => scope.shadowed.push((name.to_string(), old)),
                None => scope.declared.push(name.to_string()),
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&LocalVar> {
        self.locals.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut LocalVar> {
        self.locals.get_mut(name)
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(ScopeData::default());
    }

    pub fn exit_scope(&mut self) {
        if let Some(scope) = self.scopes.pop() {
            for name in scope.declared {
                self.locals.remove(&name);
            }
            for (name, var) in scope.shadowed {
                self.locals.insert(name, var);
            }
        }
    }
}

/// The call stack
#[derive(Debug, Default)]
pub struct Stack {
    frames: Vec<StackFrame>,
}

impl Stack {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn push_frame(&mut self, frame: StackFrame) {
        self.frames.push(frame);
    }

    pub fn pop_frame(&mut self) -> Option<StackFrame> {
        self.frames.pop()
    }

    pub fn current(&self) -> Option<&StackFrame> {
        self.frames.last()
    }

    pub fn current_mut(&mut self) -> Option<&mut StackFrame> {
        self.frames.last_mut()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::BaseType;

    fn int_var(n: i32) -> LocalVar {
        LocalVar {
            value: Value::Int(n),
            declared_type: Type::new(BaseType::Int),
            initialized: true,
        }
    }

    #[test]
    fn test_scope_shadowing_restores_outer() {
        let mut frame = StackFrame::new(
            "main".to_string(),
            "Main".to_string(),
            "default".to_string(),
            None,
        );

        frame.declare("x", int_var(1));
        frame.enter_scope();
        frame.declare("x", int_var(2));
        assert_eq!(frame.get("x").unwrap().value, Value::Int(2));

        frame.exit_scope();
        assert_eq!(frame.get("x").unwrap().value, Value::Int(1));
    }

    #[test]
    fn test_scope_declared_removed_on_exit() {
        let mut frame = StackFrame::new(
            "main".to_string(),
            "Main".to_string(),
            "default".to_string(),
            None,
        );

        frame.enter_scope();
        frame.declare("i", int_var(0));
        assert!(frame.get("i").is_some());
        frame.exit_scope();
        assert!(frame.get("i").is_none());
    }
}

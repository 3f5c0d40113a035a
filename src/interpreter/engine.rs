//! Interpreter engine: owns the class table, call stack, heap, and console,
//! and drives execution from the entry class's `main` method.

use super::classes::ClassTable;
use super::errors::RuntimeError;
use super::visibility::AccessContext;
use crate::console::Console;
use crate::memory::heap::{Heap, HeapObject};
use crate::memory::stack::{LocalVar, Stack, StackFrame};
use crate::memory::value::{Kind, Value};
use crate::parser::ast::{MethodDecl, Program, SourceLocation, Type};

/// Tree-walking interpreter over a loaded set of classes
pub struct Interpreter {
    pub classes: ClassTable,
    pub stack: Stack,
    pub heap: Heap,
    pub console: Console,

    // Control flow flags threaded through statement execution
    pub(super) finished: bool,
    pub(super) return_value: Option<Value>,
    pub(super) should_break: bool,
    pub(super) should_continue: bool,
}

impl Interpreter {
    /// Build an interpreter from parsed compilation units. Class loading
    /// validates duplicate signatures and extends clauses up front.
    pub fn from_programs(programs: &[Program]) -> Result<Self, RuntimeError> {
        let classes = ClassTable::from_programs(programs)?;
        Ok(Self {
            classes,
            stack: Stack::new(),
            heap: Heap::new(),
            console: Console::new(),
            finished: false,
            return_value: None,
            should_break: false,
            should_continue: false,
        })
    }

    /// Run the program: the first declared class with a parameterless `main`
    /// method is instantiated with zeroed fields (no constructor runs) and
    /// its `main` body is executed.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        let entry = self.classes.main_class().ok_or(RuntimeError::NoMainMethod)?;
        let class_name = entry.name.clone();
        let main_decl = entry
            .methods
            .iter()
            .find(|m| m.name == "main" && m.params.is_empty())
            .cloned()
            .ok_or(RuntimeError::NoMainMethod)?;

        let handle = self.allocate_zeroed(&class_name)?;
        self.invoke_method(&class_name, &main_decl, Some(handle), Vec::new(), main_decl.location)?;
        Ok(())
    }

    /// Allocate an instance of `class` with every field (inherited ones
    /// included) at its zero value. No constructor is involved.
    pub(super) fn allocate_zeroed(&mut self, class: &str) -> Result<usize, RuntimeError> {
        let fields: Vec<(String, Value)> = self
            .classes
            .instance_fields(class)
            .into_iter()
            .map(|f| (f.name.clone(), Value::zero_of(&f.field_type)))
            .collect();

        let mut map = rustc_hash::FxHashMap::default();
        for (name, value) in fields {
            map.insert(name, value);
        }
        Ok(self.heap.allocate(HeapObject::Instance {
            class: class.to_string(),
            fields: map,
        }))
    }

    /// Execute a method body in a fresh frame and produce its return value.
    ///
    /// `owner` is the class declaring the method; access checks inside the
    /// body run against it. Arguments are coerced to the declared parameter
    /// types, which the overload resolver has already vetted.
    pub(super) fn invoke_method(
        &mut self,
        owner: &str,
        method: &MethodDecl,
        this: Option<usize>,
        args: Vec<Value>,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let unit = self.classes.unit_of(owner).to_string();
        let mut frame = StackFrame::new(
            method.name.clone(),
            owner.to_string(),
            unit,
            this,
        );

        for (param, arg) in method.params.iter().zip(args) {
            let value = self.coerce_declared(arg, &param.param_type, location)?;
            frame.declare(
                &param.name,
                LocalVar {
                    value,
                    declared_type: param.param_type.clone(),
                    initialized: true,
                },
            );
        }

        let saved_finished = self.finished;
        let saved_return = self.return_value.take();
        let saved_break = self.should_break;
        let saved_continue = self.should_continue;
        self.finished = false;
        self.should_break = false;
        self.should_continue = false;

        self.stack.push_frame(frame);
        let run = self.execute_statements(&method.body);
        self.stack.pop_frame();

        let returned = self.return_value.take();
        self.finished = saved_finished;
        self.return_value = saved_return;
        self.should_break = saved_break;
        self.should_continue = saved_continue;
        run?;

        if method.return_type.base == crate::parser::ast::BaseType::Void
            && !method.return_type.is_array()
        {
            return Ok(Value::Null);
        }

        match returned {
            Some(value) => self.coerce_declared(value, &method.return_type, location),
            None => Err(RuntimeError::TypeMismatch {
                expected: method.return_type.to_string(),
                found: "no returned value".to_string(),
                location,
            }),
        }
    }

    /// The runtime kind of a value, resolving references through the heap
    pub(super) fn kind_of(&self, value: &Value) -> Kind {
        match value {
            Value::Byte(_) => Kind::Byte,
            Value::Short(_) => Kind::Short,
            Value::Int(_) => Kind::Int,
            Value::Long(_) => Kind::Long,
            Value::Float(_) => Kind::Float,
            Value::Double(_) => Kind::Double,
            Value::Char(_) => Kind::Char,
            Value::Bool(_) => Kind::Bool,
            Value::Str(_) => Kind::Str,
            Value::Ref(handle) => match self.heap.get(*handle) {
                Some(HeapObject::Instance { class, .. }) => Kind::Object(class.clone()),
                Some(HeapObject::Array { elem_type, .. }) => {
                    Kind::Array(Box::new(Kind::of_type(elem_type)))
                }
                None => Kind::Null,
            },
            Value::Null => Kind::Null,
        }
    }

    /// Fit a value into a declared type: identity, numeric widening, an
    /// in-range `int` literal into `byte` or `short`, `null` into any
    /// reference type, or an instance into an ancestor class type.
    pub(super) fn coerce_declared(
        &self,
        value: Value,
        declared: &Type,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let target = Kind::of_type(declared);

        if let Some(widened) = value.widen_to(&target) {
            return Ok(widened);
        }
        if let Some(narrowed) = value.narrow_int_literal(&target) {
            return Ok(narrowed);
        }

        let accepted = match (&value, &target) {
            (Value::Bool(_), Kind::Bool) => true,
            (Value::Str(_), Kind::Str) => true,
            (Value::Null, t) => t.is_reference() && *t != Kind::Null,
            (Value::Ref(_), _) => {
                let actual = self.kind_of(&value);
                match (&actual, &target) {
                    (Kind::Object(class), Kind::Object(declared_class)) => {
                        self.classes.is_same_or_descendant(class, declared_class)
                    }
                    (Kind::Array(a), Kind::Array(b)) => a == b,
                    _ => false,
                }
            }
            _ => false,
        };

        if accepted {
            Ok(value)
        } else {
            Err(RuntimeError::TypeMismatch {
                expected: target.to_string(),
                found: self.kind_of(&value).to_string(),
                location,
            })
        }
    }

    /// Access context of the currently executing body
    pub(super) fn access_context(&self) -> AccessContext<'_> {
        match self.stack.current() {
            Some(frame) => AccessContext {
                unit: &frame.unit,
                class: Some(&frame.class),
            },
            None => AccessContext {
                unit: "default",
                class: None,
            },
        }
    }

    /// Name of the class whose body is currently executing
    pub(super) fn current_class(&self) -> Option<String> {
        self.stack.current().map(|f| f.class.clone())
    }

    /// Render a value for output, naming the class of instances
    pub(super) fn display_value(&self, value: &Value) -> String {
        match value {
            Value::Ref(handle) => match self.heap.get(*handle) {
                Some(HeapObject::Instance { class, .. }) => format!("{}@{}", class, handle),
                Some(HeapObject::Array { elem_type, .. }) => {
                    format!("{}[]@{}", elem_type, handle)
                }
                None => "null".to_string(),
            },
            other => other.to_string(),
        }
    }
}

//! Object construction: zeroed allocation followed by constructor dispatch.
//!
//! Fields are always at their zero values before any constructor statement
//! runs. A class with no declared constructor gets an implicit
//! parameterless one that does nothing beyond the zeroing.

use super::super::engine::Interpreter;
use super::super::errors::RuntimeError;
use super::super::overload::{self, ResolveFailure};
use super::super::visibility::is_visible;
use crate::memory::stack::{LocalVar, StackFrame};
use crate::memory::value::{Kind, Value};
use crate::parser::ast::{CtorDecl, SourceLocation};

impl Interpreter {
    /// Evaluate `new Class(args...)`
    pub(crate) fn instantiate(
        &mut self,
        class: &str,
        args: Vec<Value>,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        if self.classes.get(class).is_none() {
            return Err(RuntimeError::UndefinedClass {
                name: class.to_string(),
                location,
            });
        }

        let handle = self.allocate_zeroed(class)?;

        let arg_kinds: Vec<Kind> = args.iter().map(|a| self.kind_of(a)).collect();
        let ctor = {
            let decl = self.classes.get(class).ok_or_else(|| {
                RuntimeError::UndefinedClass {
                    name: class.to_string(),
                    location,
                }
            })?;

            if decl.ctors.is_empty() {
                if args.is_empty() {
                    return Ok(Value::Ref(handle));
                }
                return Err(RuntimeError::NoMatchingSignature {
                    class: class.to_string(),
                    method: class.to_string(),
                    args: arg_kinds,
                    location,
                });
            }

            let candidates: Vec<Vec<Kind>> = decl
                .ctors
                .iter()
                .map(|c| c.params.iter().map(|p| Kind::of_type(&p.param_type)).collect())
                .collect();

            let index = overload::resolve(&self.classes, &candidates, &arg_kinds).map_err(
                |failure| match failure {
                    ResolveFailure::NoMatch => RuntimeError::NoMatchingSignature {
                        class: class.to_string(),
                        method: class.to_string(),
                        args: arg_kinds.clone(),
                        location,
                    },
                    ResolveFailure::Ambiguous => RuntimeError::AmbiguousOverload {
                        class: class.to_string(),
                        method: class.to_string(),
                        args: arg_kinds.clone(),
                        location,
                    },
                },
            )?;

            decl.ctors[index].clone()
        };

        if !is_visible(&self.classes, class, ctor.visibility, self.access_context()) {
            return Err(RuntimeError::AccessDenied {
                class: class.to_string(),
                member: class.to_string(),
                visibility: ctor.visibility.to_string(),
                from_class: self.current_class(),
                location,
            });
        }

        self.run_ctor(class, &ctor, handle, args, location)?;
        Ok(Value::Ref(handle))
    }

    fn run_ctor(
        &mut self,
        class: &str,
        ctor: &CtorDecl,
        handle: usize,
        args: Vec<Value>,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let unit = self.classes.unit_of(class).to_string();
        let mut frame = StackFrame::new(
            class.to_string(),
            class.to_string(),
            unit,
            Some(handle),
        );

        for (param, arg) in ctor.params.iter().zip(args) {
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
        let run = self.execute_statements(&ctor.body);
        self.stack.pop_frame();

        self.return_value = saved_return;
        self.finished = saved_finished;
        self.should_break = saved_break;
        self.should_continue = saved_continue;
        run
    }
}

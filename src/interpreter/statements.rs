//! Statement execution.
//!
//! Control flow is threaded through three flags on the interpreter:
//! `finished` (a return is unwinding), `should_break` and `should_continue`
//! (a loop or switch is unwinding). Statement loops check them after every
//! statement.

use super::engine::Interpreter;
use super::errors::RuntimeError;
use crate::memory::heap::HeapObject;
use crate::memory::stack::LocalVar;
use crate::memory::value::Value;
use crate::parser::ast::{AstNode, CaseNode, SourceLocation};

impl Interpreter {
    /// Execute a statement list without opening a new scope. Used for
    /// method bodies, where parameters already live at frame level.
    pub(super) fn execute_statements(&mut self, statements: &[AstNode]) -> Result<(), RuntimeError> {
        for statement in statements {
            self.execute_statement(statement)?;
            if self.finished || self.should_break || self.should_continue {
                break;
            }
        }
        Ok(())
    }

    /// Execute a block in its own scope
    pub(super) fn execute_block(&mut self, statements: &[AstNode]) -> Result<(), RuntimeError> {
        let location = statements
            .first()
            .map(|s| s.location())
            .unwrap_or_else(|| SourceLocation::new(0, 0));

        self.current_frame_mut(location)?.enter_scope();
        let result = self.execute_statements(statements);
        if let Some(frame) = self.stack.current_mut() {
            frame.exit_scope();
        }
        result
    }

    fn execute_statement(&mut self, statement: &AstNode) -> Result<(), RuntimeError> {
        match statement {
            AstNode::VarDecl {
                name,
                var_type,
                init,
                location,
            } => {
                let (value, initialized) = match init {
                    Some(expr) => {
                        let value = self.evaluate_initializer(expr, var_type)?;
                        (self.coerce_declared(value, var_type, *location)?, true)
                    }
                    None => (Value::zero_of(var_type), false),
                };
                self.current_frame_mut(*location)?.declare(
                    name,
                    LocalVar {
                        value,
                        declared_type: var_type.clone(),
                        initialized,
                    },
                );
                Ok(())
            }

            AstNode::Assignment { lhs, rhs, .. } => {
                let value = self.evaluate_expression(rhs)?;
                self.assign_value(lhs, value)
            }

            AstNode::CompoundAssignment {
                lhs,
                op,
                rhs,
                location,
            } => {
                let current = self.evaluate_expression(lhs)?;
                let operand = self.evaluate_expression(rhs)?;
                let combined = self.apply_binary(op, current, operand, *location)?;
                self.assign_value(lhs, combined)
            }

            AstNode::Return { expr, .. } => {
                self.return_value = match expr {
                    Some(e) => Some(self.evaluate_expression(e)?),
                    None => None,
                };
                self.finished = true;
                Ok(())
            }

            AstNode::If {
                condition,
                then_branch,
                else_branch,
                location,
            } => {
                if self.evaluate_condition(condition, *location)? {
                    self.execute_block(then_branch)
                } else if let Some(branch) = else_branch {
                    self.execute_block(branch)
                } else {
                    Ok(())
                }
            }

            AstNode::While {
                condition,
                body,
                location,
            } => {
                while self.evaluate_condition(condition, *location)? {
                    self.execute_block(body)?;
                    if self.loop_unwound() {
                        break;
                    }
                }
                self.should_break = false;
                Ok(())
            }

            AstNode::DoWhile {
                body,
                condition,
                location,
            } => {
                loop {
                    self.execute_block(body)?;
                    if self.loop_unwound() {
                        break;
                    }
                    if !self.evaluate_condition(condition, *location)? {
                        break;
                    }
                }
                self.should_break = false;
                Ok(())
            }

            AstNode::For {
                init,
                condition,
                increment,
                body,
                location,
            } => {
                // The induction variable lives in a scope around the loop
                self.current_frame_mut(*location)?.enter_scope();
                let result = self.run_for(init, condition, increment, body, *location);
                if let Some(frame) = self.stack.current_mut() {
                    frame.exit_scope();
                }
                self.should_break = false;
                result
            }

            AstNode::ForEach {
                var_type,
                var_name,
                iterable,
                body,
                location,
            } => {
                let elements = self.snapshot_elements(iterable, *location)?;

                for element in elements {
                    let value = self.coerce_declared(element, var_type, *location)?;
                    self.current_frame_mut(*location)?.enter_scope();
                    self.current_frame_mut(*location)?.declare(
                        var_name,
                        LocalVar {
                            value,
                            declared_type: var_type.clone(),
                            initialized: true,
                        },
                    );
                    let result = self.execute_statements(body);
                    if let Some(frame) = self.stack.current_mut() {
                        frame.exit_scope();
                    }
                    result?;
                    if self.loop_unwound() {
                        break;
                    }
                }
                self.should_break = false;
                Ok(())
            }

            AstNode::Switch {
                expr,
                cases,
                location,
            } => self.execute_switch(expr, cases, *location),

            AstNode::Break { .. } => {
                self.should_break = true;
                Ok(())
            }

            AstNode::Continue { .. } => {
                self.should_continue = true;
                Ok(())
            }

            AstNode::ExpressionStatement { expr, .. } => {
                self.evaluate_expression(expr)?;
                Ok(())
            }

            other => Err(RuntimeError::UnsupportedOperation {
                message: "expression used in statement position".to_string(),
                location: other.location(),
            }),
        }
    }

    fn run_for(
        &mut self,
        init: &Option<Box<AstNode>>,
        condition: &Option<Box<AstNode>>,
        increment: &Option<Box<AstNode>>,
        body: &[AstNode],
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        if let Some(init) = init {
            self.execute_statement(init)?;
        }

        loop {
            if let Some(condition) = condition {
                if !self.evaluate_condition(condition, location)? {
                    break;
                }
            }

            self.execute_block(body)?;
            if self.finished || self.should_break {
                break;
            }
            self.should_continue = false;

            if let Some(increment) = increment {
                self.execute_statement(increment)?;
            }
        }

        Ok(())
    }

    /// Evaluate the subject once, find the matching label (or `default`),
    /// and run statements from there through later arms until a `break`
    fn execute_switch(
        &mut self,
        subject: &AstNode,
        cases: &[CaseNode],
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let value = self.evaluate_expression(subject)?;

        let mut match_index = None;
        let mut default_index = None;
        for (i, case) in cases.iter().enumerate() {
            match case {
                CaseNode::Case { value: label, .. } => {
                    let label_value = self.evaluate_expression(label)?;
                    if self.values_equal(&value, &label_value) {
                        match_index = Some(i);
                        break;
                    }
                }
                CaseNode::Default { .. } => {
                    if default_index.is_none() {
                        default_index = Some(i);
                    }
                }
            }
        }

        let Some(start) = match_index.or(default_index) else {
            return Ok(());
        };

        self.current_frame_mut(location)?.enter_scope();
        let mut result = Ok(());
        for case in &cases[start..] {
            let statements = match case {
                CaseNode::Case { statements, .. } => statements,
                CaseNode::Default { statements, .. } => statements,
            };
            result = self.execute_statements(statements);
            if result.is_err() || self.finished || self.should_break || self.should_continue {
                break;
            }
        }
        if let Some(frame) = self.stack.current_mut() {
            frame.exit_scope();
        }
        self.should_break = false;
        result
    }

    fn loop_unwound(&mut self) -> bool {
        if self.finished || self.should_break {
            return true;
        }
        self.should_continue = false;
        false
    }

    fn evaluate_condition(
        &mut self,
        condition: &AstNode,
        location: SourceLocation,
    ) -> Result<bool, RuntimeError> {
        let value = self.evaluate_expression(condition)?;
        value.as_bool().ok_or_else(|| RuntimeError::TypeMismatch {
            expected: "boolean".to_string(),
            found: self.kind_of(&value).to_string(),
            location,
        })
    }

    /// Materialize the elements an enhanced for iterates over. The array is
    /// snapshotted, so element writes inside the body do not affect the
    /// iteration.
    fn snapshot_elements(
        &mut self,
        iterable: &AstNode,
        location: SourceLocation,
    ) -> Result<Vec<Value>, RuntimeError> {
        let value = self.evaluate_expression(iterable)?;
        match value {
            Value::Ref(handle) => match self.heap.get(handle) {
                Some(HeapObject::Array { elements, .. }) => Ok(elements.clone()),
                _ => Err(RuntimeError::TypeMismatch {
                    expected: "array".to_string(),
                    found: self.kind_of(&Value::Ref(handle)).to_string(),
                    location,
                }),
            },
            Value::Null => Err(RuntimeError::NullReference { location }),
            other => Err(RuntimeError::TypeMismatch {
                expected: "array".to_string(),
                found: self.kind_of(&other).to_string(),
                location,
            }),
        }
    }

    pub(super) fn current_frame_mut(
        &mut self,
        location: SourceLocation,
    ) -> Result<&mut crate::memory::stack::StackFrame, RuntimeError> {
        self.stack
            .current_mut()
            .ok_or(RuntimeError::NoStackFrame { location })
    }
}

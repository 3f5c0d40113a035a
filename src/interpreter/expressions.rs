//! Expression evaluation, including method call dispatch through the
//! overload resolver and the access checker.

use super::engine::Interpreter;
use super::errors::RuntimeError;
use super::overload::{self, ResolveFailure};
use super::visibility::is_visible;
use crate::memory::heap::HeapObject;
use crate::memory::value::{Kind, Value};
use crate::parser::ast::{AstNode, BinOp, SourceLocation, Type, UnOp};

impl Interpreter {
    pub(super) fn evaluate_expression(&mut self, expr: &AstNode) -> Result<Value, RuntimeError> {
        match expr {
            AstNode::IntLiteral(n, _) => Ok(Value::Int(*n)),
            AstNode::LongLiteral(n, _) => Ok(Value::Long(*n)),
            AstNode::FloatLiteral(n, _) => Ok(Value::Float(*n)),
            AstNode::DoubleLiteral(n, _) => Ok(Value::Double(*n)),
            AstNode::CharLiteral(c, _) => Ok(Value::Char(*c)),
            AstNode::StringLiteral(s, _) => Ok(Value::Str(s.clone())),
            AstNode::BoolLiteral(b, _) => Ok(Value::Bool(*b)),
            AstNode::Null { .. } => Ok(Value::Null),

            AstNode::This { location } => {
                let frame = self
                    .stack
                    .current()
                    .ok_or(RuntimeError::NoStackFrame {
                        location: *location,
                    })?;
                match frame.this {
                    Some(handle) => Ok(Value::Ref(handle)),
                    None => Err(RuntimeError::NullReference {
                        location: *location,
                    }),
                }
            }

            AstNode::Variable(name, location) => self.read_variable(name, *location),

            AstNode::BinaryOp {
                op,
                left,
                right,
                location,
            } => {
                // && and || short-circuit; everything else evaluates both sides
                match op {
                    BinOp::And => {
                        let lhs = self.evaluate_expression(left)?;
                        if !self.expect_bool(lhs, *location)? {
                            return Ok(Value::Bool(false));
                        }
                        let rhs = self.evaluate_expression(right)?;
                        Ok(Value::Bool(self.expect_bool(rhs, *location)?))
                    }
                    BinOp::Or => {
                        let lhs = self.evaluate_expression(left)?;
                        if self.expect_bool(lhs, *location)? {
                            return Ok(Value::Bool(true));
                        }
                        let rhs = self.evaluate_expression(right)?;
                        Ok(Value::Bool(self.expect_bool(rhs, *location)?))
                    }
                    _ => {
                        let lhs = self.evaluate_expression(left)?;
                        let rhs = self.evaluate_expression(right)?;
                        self.apply_binary(op, lhs, rhs, *location)
                    }
                }
            }

            AstNode::UnaryOp {
                op,
                operand,
                location,
            } => match op {
                UnOp::Neg | UnOp::Not => {
                    let value = self.evaluate_expression(operand)?;
                    self.apply_unary(op, value, *location)
                }
                UnOp::PreInc | UnOp::PreDec | UnOp::PostInc | UnOp::PostDec => {
                    self.apply_incdec(op, operand, *location)
                }
            },

            AstNode::TernaryOp {
                condition,
                true_expr,
                false_expr,
                location,
            } => {
                let cond = self.evaluate_expression(condition)?;
                if self.expect_bool(cond, *location)? {
                    self.evaluate_expression(true_expr)
                } else {
                    self.evaluate_expression(false_expr)
                }
            }

            AstNode::MethodCall {
                target,
                name,
                args,
                location,
            } => self.evaluate_call(target.as_deref(), name, args, *location),

            AstNode::New {
                class,
                args,
                location,
            } => {
                let mut arg_values = Vec::with_capacity(args.len());
                for arg in args {
                    arg_values.push(self.evaluate_expression(arg)?);
                }
                self.instantiate(class, arg_values, *location)
            }

            AstNode::NewArray {
                elem_type,
                size,
                location,
            } => {
                let size_value = self.evaluate_expression(size)?;
                let length = size_value.as_i64().ok_or_else(|| RuntimeError::TypeMismatch {
                    expected: "int".to_string(),
                    found: self.kind_of(&size_value).to_string(),
                    location: *location,
                })?;
                if length < 0 {
                    return Err(RuntimeError::IndexOutOfBounds {
                        index: length,
                        length: 0,
                        location: *location,
                    });
                }
                let zero = Value::zero_of(elem_type);
                let handle = self.heap.allocate(HeapObject::Array {
                    elem_type: elem_type.clone(),
                    elements: vec![zero; length as usize],
                });
                Ok(Value::Ref(handle))
            }

            AstNode::ArrayLiteral { location, .. } => Err(RuntimeError::UnsupportedOperation {
                message: "array literal needs a declared array type".to_string(),
                location: *location,
            }),

            AstNode::ArrayAccess {
                array,
                index,
                location,
            } => {
                let array_value = self.evaluate_expression(array)?;
                let index_value = self.evaluate_expression(index)?;
                self.read_element(array_value, index_value, *location)
            }

            AstNode::FieldAccess {
                object,
                field,
                location,
            } => {
                let target = self.evaluate_expression(object)?;
                self.read_member(target, field, *location)
            }

            other => Err(RuntimeError::UnsupportedOperation {
                message: "statement used in expression position".to_string(),
                location: other.location(),
            }),
        }
    }

    /// Evaluate a declaration initializer. Array literals are only legal
    /// here, where the declared element type is known.
    pub(super) fn evaluate_initializer(
        &mut self,
        expr: &AstNode,
        declared: &Type,
    ) -> Result<Value, RuntimeError> {
        if let AstNode::ArrayLiteral { elements, location } = expr {
            if !declared.is_array() {
                return Err(RuntimeError::TypeMismatch {
                    expected: declared.to_string(),
                    found: "array literal".to_string(),
                    location: *location,
                });
            }
            let elem_type = declared.element_type();
            let mut values = Vec::with_capacity(elements.len());
            for element in elements {
                let value = self.evaluate_initializer(element, &elem_type)?;
                values.push(self.coerce_declared(value, &elem_type, *location)?);
            }
            let handle = self.heap.allocate(HeapObject::Array {
                elem_type,
                elements: values,
            });
            return Ok(Value::Ref(handle));
        }
        self.evaluate_expression(expr)
    }

    /// Resolve a variable name: local first, then a field of the receiver
    fn read_variable(
        &mut self,
        name: &str,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        if let Some(frame) = self.stack.current() {
            if let Some(var) = frame.get(name) {
                if !var.initialized {
                    return Err(RuntimeError::UninitializedRead {
                        name: name.to_string(),
                        location,
                    });
                }
                return Ok(var.value.clone());
            }
            if let Some(handle) = frame.this {
                let class = self.heap.class_of(handle).map(str::to_string);
                if let Some(class) = class {
                    if self.classes.find_field(&class, name).is_some() {
                        return self.read_member(Value::Ref(handle), name, location);
                    }
                }
            }
        }
        Err(RuntimeError::UndefinedVariable {
            name: name.to_string(),
            location,
        })
    }

    /// Field read on an evaluated receiver. Arrays expose only `length`.
    pub(super) fn read_member(
        &mut self,
        target: Value,
        field: &str,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match target {
            Value::Ref(handle) => match self.heap.get(handle) {
                Some(HeapObject::Array { elements, .. }) => {
                    if field == "length" {
                        Ok(Value::Int(elements.len() as i32))
                    } else {
                        Err(RuntimeError::UndefinedField {
                            class: "array".to_string(),
                            field: field.to_string(),
                            location,
                        })
                    }
                }
                Some(HeapObject::Instance { class, .. }) => {
                    let class = class.clone();
                    self.read_instance_field(handle, &class, field, location)
                }
                None => Err(RuntimeError::NullReference { location }),
            },
            Value::Null => Err(RuntimeError::NullReference { location }),
            other => Err(RuntimeError::TypeMismatch {
                expected: "object reference".to_string(),
                found: self.kind_of(&other).to_string(),
                location,
            }),
        }
    }

    fn read_instance_field(
        &mut self,
        handle: usize,
        class: &str,
        field: &str,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let (owner, visibility) = {
            let (owner, decl) = self.classes.find_field(class, field).ok_or_else(|| {
                RuntimeError::UndefinedField {
                    class: class.to_string(),
                    field: field.to_string(),
                    location,
                }
            })?;
            (owner.to_string(), decl.visibility)
        };

        if !is_visible(&self.classes, &owner, visibility, self.access_context()) {
            return Err(RuntimeError::AccessDenied {
                class: owner,
                member: field.to_string(),
                visibility: visibility.to_string(),
                from_class: self.current_class(),
                location,
            });
        }

        match self.heap.get(handle) {
            Some(HeapObject::Instance { fields, .. }) => {
                fields.get(field).cloned().ok_or_else(|| {
                    RuntimeError::UndefinedField {
                        class: owner,
                        field: field.to_string(),
                        location,
                    }
                })
            }
            _ => Err(RuntimeError::NullReference { location }),
        }
    }

    fn read_element(
        &self,
        array: Value,
        index: Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let handle = match array {
            Value::Ref(handle) => handle,
            Value::Null => return Err(RuntimeError::NullReference { location }),
            other => {
                return Err(RuntimeError::TypeMismatch {
                    expected: "array".to_string(),
                    found: self.kind_of(&other).to_string(),
                    location,
                })
            }
        };
        let idx = index.as_i64().ok_or_else(|| RuntimeError::TypeMismatch {
            expected: "int".to_string(),
            found: self.kind_of(&index).to_string(),
            location,
        })?;

        match self.heap.get(handle) {
            Some(HeapObject::Array { elements, .. }) => {
                if idx < 0 || idx as usize >= elements.len() {
                    return Err(RuntimeError::IndexOutOfBounds {
                        index: idx,
                        length: elements.len(),
                        location,
                    });
                }
                Ok(elements[idx as usize].clone())
            }
            _ => Err(RuntimeError::TypeMismatch {
                expected: "array".to_string(),
                found: self.kind_of(&Value::Ref(handle)).to_string(),
                location,
            }),
        }
    }

    /// Dispatch a call. Bare calls try the output built-ins first, then the
    /// receiver's own class. Calls on a target dispatch on its runtime
    /// value: string methods for strings, class methods for instances.
    fn evaluate_call(
        &mut self,
        target: Option<&AstNode>,
        name: &str,
        args: &[AstNode],
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let target_value = match target {
            Some(expr) => Some(self.evaluate_expression(expr)?),
            None => None,
        };

        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.evaluate_expression(arg)?);
        }

        match target_value {
            None => {
                if let Some(result) = self.try_output_builtin(name, &arg_values, location) {
                    return result;
                }
                let receiver = self.stack.current().and_then(|f| f.this);
                match receiver {
                    Some(handle) => self.call_instance_method(handle, name, arg_values, location),
                    None => Err(RuntimeError::UndefinedMethod {
                        class: self.current_class().unwrap_or_else(|| "<none>".to_string()),
                        method: name.to_string(),
                        location,
                    }),
                }
            }
            Some(Value::Str(s)) => self.call_string_method(&s, name, arg_values, location),
            Some(Value::Ref(handle)) => match self.heap.get(handle) {
                Some(HeapObject::Instance { .. }) => {
                    self.call_instance_method(handle, name, arg_values, location)
                }
                Some(HeapObject::Array { .. }) => Err(RuntimeError::UndefinedMethod {
                    class: "array".to_string(),
                    method: name.to_string(),
                    location,
                }),
                None => Err(RuntimeError::NullReference { location }),
            },
            Some(Value::Null) => Err(RuntimeError::NullReference { location }),
            Some(other) => Err(RuntimeError::TypeMismatch {
                expected: "object reference".to_string(),
                found: self.kind_of(&other).to_string(),
                location,
            }),
        }
    }

    /// Instance method call: find the overload set on the runtime class,
    /// resolve against the argument kinds, check access, and invoke.
    pub(super) fn call_instance_method(
        &mut self,
        handle: usize,
        name: &str,
        args: Vec<Value>,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let class = self
            .heap
            .class_of(handle)
            .map(str::to_string)
            .ok_or(RuntimeError::NullReference { location })?;

        let arg_kinds: Vec<Kind> = args.iter().map(|a| self.kind_of(a)).collect();

        let (owner, picked, visibility) = {
            let (owner, overloads) =
                self.classes
                    .find_methods(&class, name)
                    .ok_or_else(|| RuntimeError::UndefinedMethod {
                        class: class.clone(),
                        method: name.to_string(),
                        location,
                    })?;

            let candidates: Vec<Vec<Kind>> = overloads
                .iter()
                .map(|m| m.params.iter().map(|p| Kind::of_type(&p.param_type)).collect())
                .collect();

            let index = overload::resolve(&self.classes, &candidates, &arg_kinds).map_err(
                |failure| match failure {
                    ResolveFailure::NoMatch => RuntimeError::NoMatchingSignature {
                        class: class.clone(),
                        method: name.to_string(),
                        args: arg_kinds.clone(),
                        location,
                    },
                    ResolveFailure::Ambiguous => RuntimeError::AmbiguousOverload {
                        class: class.clone(),
                        method: name.to_string(),
                        args: arg_kinds.clone(),
                        location,
                    },
                },
            )?;

            let picked = overloads[index].clone();
            let visibility = picked.visibility;
            (owner.to_string(), picked, visibility)
        };

        if !is_visible(&self.classes, &owner, visibility, self.access_context()) {
            return Err(RuntimeError::AccessDenied {
                class: owner,
                member: name.to_string(),
                visibility: visibility.to_string(),
                from_class: self.current_class(),
                location,
            });
        }

        self.invoke_method(&owner, &picked, Some(handle), args, location)
    }

    pub(super) fn expect_bool(
        &self,
        value: Value,
        location: SourceLocation,
    ) -> Result<bool, RuntimeError> {
        value.as_bool().ok_or_else(|| RuntimeError::TypeMismatch {
            expected: "boolean".to_string(),
            found: self.kind_of(&value).to_string(),
            location,
        })
    }
}

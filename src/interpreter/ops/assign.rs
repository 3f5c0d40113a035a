//! Assignment targets: locals, instance fields, and array elements.
//!
//! Every store coerces the incoming value to the declared type of the
//! place, so a `double` field accepts an `int` and a `byte` local rejects
//! an out-of-range literal.

use super::super::engine::Interpreter;
use super::super::errors::RuntimeError;
use super::super::visibility::is_visible;
use crate::memory::heap::HeapObject;
use crate::memory::value::Value;
use crate::parser::ast::{AstNode, SourceLocation};

impl Interpreter {
    pub(crate) fn assign_value(
        &mut self,
        lhs: &AstNode,
        value: Value,
    ) -> Result<(), RuntimeError> {
        match lhs {
            AstNode::Variable(name, location) => self.assign_variable(name, value, *location),

            AstNode::FieldAccess {
                object,
                field,
                location,
            } => {
                let target = self.evaluate_expression(object)?;
                match target {
                    Value::Ref(handle) => self.assign_field(handle, field, value, *location),
                    Value::Null => Err(RuntimeError::NullReference {
                        location: *location,
                    }),
                    other => Err(RuntimeError::TypeMismatch {
                        expected: "object reference".to_string(),
                        found: self.kind_of(&other).to_string(),
                        location: *location,
                    }),
                }
            }

            AstNode::ArrayAccess {
                array,
                index,
                location,
            } => {
                let array_value = self.evaluate_expression(array)?;
                let index_value = self.evaluate_expression(index)?;
                self.assign_element(array_value, index_value, value, *location)
            }

            other => Err(RuntimeError::UnsupportedOperation {
                message: "invalid assignment target".to_string(),
                location: other.location(),
            }),
        }
    }

    /// Store into a local, falling back to a field of the receiver when no
    /// local of that name exists
    fn assign_variable(
        &mut self,
        name: &str,
        value: Value,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let declared = self
            .stack
            .current()
            .and_then(|f| f.get(name))
            .map(|var| var.declared_type.clone());

        if let Some(declared) = declared {
            let coerced = self.coerce_declared(value, &declared, location)?;
            let frame = self.current_frame_mut(location)?;
            if let Some(var) = frame.get_mut(name) {
                var.value = coerced;
                var.initialized = true;
            }
            return Ok(());
        }

        let receiver = self.stack.current().and_then(|f| f.this);
        if let Some(handle) = receiver {
            let has_field = self
                .heap
                .class_of(handle)
                .map(|class| self.classes.find_field(class, name).is_some())
                .unwrap_or(false);
            if has_field {
                return self.assign_field(handle, name, value, location);
            }
        }

        Err(RuntimeError::UndefinedVariable {
            name: name.to_string(),
            location,
        })
    }

    pub(crate) fn assign_field(
        &mut self,
        handle: usize,
        field: &str,
        value: Value,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let class = self
            .heap
            .class_of(handle)
            .map(str::to_string)
            .ok_or(RuntimeError::NullReference { location })?;

        let (owner, field_type, visibility) = {
            let (owner, decl) = self.classes.find_field(&class, field).ok_or_else(|| {
                RuntimeError::UndefinedField {
                    class: class.clone(),
                    field: field.to_string(),
                    location,
                }
            })?;
            (owner.to_string(), decl.field_type.clone(), decl.visibility)
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

        let coerced = self.coerce_declared(value, &field_type, location)?;

        match self.heap.get_mut(handle) {
            Some(HeapObject::Instance { fields, .. }) => {
                fields.insert(field.to_string(), coerced);
                Ok(())
            }
            _ => Err(RuntimeError::NullReference { location }),
        }
    }

    fn assign_element(
        &mut self,
        array: Value,
        index: Value,
        value: Value,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
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

        let elem_type = match self.heap.get(handle) {
            Some(HeapObject::Array {
                elem_type,
                elements,
            }) => {
                if idx < 0 || idx as usize >= elements.len() {
                    return Err(RuntimeError::IndexOutOfBounds {
                        index: idx,
                        length: elements.len(),
                        location,
                    });
                }
                elem_type.clone()
            }
            _ => {
                return Err(RuntimeError::TypeMismatch {
                    expected: "array".to_string(),
                    found: self.kind_of(&Value::Ref(handle)).to_string(),
                    location,
                })
            }
        };

        let coerced = self.coerce_declared(value, &elem_type, location)?;
        if let Some(HeapObject::Array { elements, .. }) = self.heap.get_mut(handle) {
            elements[idx as usize] = coerced;
        }
        Ok(())
    }
}

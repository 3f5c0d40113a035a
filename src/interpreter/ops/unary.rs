//! Unary operator semantics: negation, logical not, and the four
//! increment/decrement forms.

use super::super::engine::Interpreter;
use super::super::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{AstNode, SourceLocation, UnOp};

impl Interpreter {
    pub(crate) fn apply_unary(
        &mut self,
        op: &UnOp,
        value: Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match op {
            UnOp::Neg => match value {
                Value::Byte(n) => Ok(Value::Byte(n.wrapping_neg())),
                Value::Short(n) => Ok(Value::Short(n.wrapping_neg())),
                Value::Int(n) => Ok(Value::Int(n.wrapping_neg())),
                Value::Long(n) => Ok(Value::Long(n.wrapping_neg())),
                Value::Float(n) => Ok(Value::Float(-n)),
                Value::Double(n) => Ok(Value::Double(-n)),
                other => Err(RuntimeError::TypeMismatch {
                    expected: "numeric operand".to_string(),
                    found: self.kind_of(&other).to_string(),
                    location,
                }),
            },
            UnOp::Not => match value {
                Value::Bool(b) => Ok(Value::Bool(!b)),
                other => Err(RuntimeError::TypeMismatch {
                    expected: "boolean".to_string(),
                    found: self.kind_of(&other).to_string(),
                    location,
                }),
            },
            _ => Err(RuntimeError::UnsupportedOperation {
                message: "increment needs an assignable operand".to_string(),
                location,
            }),
        }
    }

    /// `++` and `--`: read the place, step it by one at its own width, store
    /// the new value, and produce the old (postfix) or new (prefix) value.
    pub(crate) fn apply_incdec(
        &mut self,
        op: &UnOp,
        operand: &AstNode,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let current = self.evaluate_expression(operand)?;
        let delta: i64 = match op {
            UnOp::PreInc | UnOp::PostInc => 1,
            _ => -1,
        };

        let stepped = match &current {
            Value::Byte(n) => Value::Byte(n.wrapping_add(delta as i8)),
            Value::Short(n) => Value::Short(n.wrapping_add(delta as i16)),
            Value::Int(n) => Value::Int(n.wrapping_add(delta as i32)),
            Value::Long(n) => Value::Long(n.wrapping_add(delta)),
            Value::Float(n) => Value::Float(n + delta as f32),
            Value::Double(n) => Value::Double(n + delta as f64),
            other => {
                return Err(RuntimeError::TypeMismatch {
                    expected: "numeric operand".to_string(),
                    found: self.kind_of(other).to_string(),
                    location,
                })
            }
        };

        self.assign_value(operand, stepped.clone())?;

        match op {
            UnOp::PostInc | UnOp::PostDec => Ok(current),
            _ => Ok(stepped),
        }
    }
}

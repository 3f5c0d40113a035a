//! Binary operator semantics.
//!
//! Numeric operands are promoted to the wider operand's kind before the
//! operation; `char` participates at `int` width. Integer arithmetic wraps
//! at the result width, integer division truncates toward zero, and the
//! remainder takes the dividend's sign.

use super::super::engine::Interpreter;
use super::super::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::{BinOp, SourceLocation};

/// Rank in the promotion order. `char` computes at `int` width.
fn numeric_rank(value: &Value) -> Option<u8> {
    match value {
        Value::Byte(_) => Some(0),
        Value::Short(_) => Some(1),
        Value::Int(_) | Value::Char(_) => Some(2),
        Value::Long(_) => Some(3),
        Value::Float(_) => Some(4),
        Value::Double(_) => Some(5),
        _ => None,
    }
}

/// Wrap an i64 result into the integer kind of the given rank
fn wrap_integer(rank: u8, n: i64) -> Value {
    match rank {
        0 => Value::Byte(n as i8),
        1 => Value::Short(n as i16),
        2 => Value::Int(n as i32),
        _ => Value::Long(n),
    }
}

fn float_value(rank: u8, n: f64) -> Value {
    if rank == 4 {
        Value::Float(n as f32)
    } else {
        Value::Double(n)
    }
}

/// Whether `==` and `!=` accept this operand pair. Numbers compare with
/// numbers, booleans with booleans, and references (including strings and
/// null) with references; anything else is a type error, not `false`.
fn equality_comparable(left: &Value, right: &Value) -> bool {
    if numeric_rank(left).is_some() && numeric_rank(right).is_some() {
        return true;
    }
    if matches!(left, Value::Bool(_)) && matches!(right, Value::Bool(_)) {
        return true;
    }
    let is_reference =
        |value: &Value| matches!(value, Value::Str(_) | Value::Ref(_) | Value::Null);
    is_reference(left) && is_reference(right)
}

impl Interpreter {
    pub(crate) fn apply_binary(
        &mut self,
        op: &BinOp,
        left: Value,
        right: Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match op {
            BinOp::Add if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) => {
                let mut text = self.display_value(&left);
                text.push_str(&self.display_value(&right));
                Ok(Value::Str(text))
            }

            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod => {
                self.arithmetic(op, left, right, location)
            }

            BinOp::Eq | BinOp::Ne => {
                if !equality_comparable(&left, &right) {
                    return Err(RuntimeError::TypeMismatch {
                        expected: "comparable operands".to_string(),
                        found: format!(
                            "{} {} {}",
                            self.kind_of(&left),
                            op,
                            self.kind_of(&right)
                        ),
                        location,
                    });
                }
                let equal = self.values_equal(&left, &right);
                Ok(Value::Bool(if matches!(op, BinOp::Eq) { equal } else { !equal }))
            }

            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                self.comparison(op, left, right, location)
            }

            // Short-circuit evaluation happens at the expression level;
            // compound assignment never reaches here with these
            BinOp::And | BinOp::Or => {
                let lhs = self.expect_bool(left, location)?;
                let rhs = self.expect_bool(right, location)?;
                Ok(Value::Bool(match op {
                    BinOp::And => lhs && rhs,
                    _ => lhs || rhs,
                }))
            }
        }
    }

    fn arithmetic(
        &self,
        op: &BinOp,
        left: Value,
        right: Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let (lr, rr) = match (numeric_rank(&left), numeric_rank(&right)) {
            (Some(l), Some(r)) => (l, r),
            _ => {
                return Err(RuntimeError::TypeMismatch {
                    expected: "numeric operands".to_string(),
                    found: format!(
                        "{} {} {}",
                        self.kind_of(&left),
                        op,
                        self.kind_of(&right)
                    ),
                    location,
                })
            }
        };
        let rank = lr.max(rr);

        if rank >= 4 {
            let a = left.as_f64().unwrap_or(0.0);
            let b = right.as_f64().unwrap_or(0.0);
            let result = match op {
                BinOp::Add => a + b,
                BinOp::Sub => a - b,
                BinOp::Mul => a * b,
                BinOp::Div => a / b,
                _ => a % b,
            };
            return Ok(float_value(rank, result));
        }

        let a = left.as_i64().unwrap_or(0);
        let b = right.as_i64().unwrap_or(0);
        let result = match op {
            BinOp::Add => a.wrapping_add(b),
            BinOp::Sub => a.wrapping_sub(b),
            BinOp::Mul => a.wrapping_mul(b),
            BinOp::Div => {
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero { location });
                }
                a.wrapping_div(b)
            }
            _ => {
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero { location });
                }
                a.wrapping_rem(b)
            }
        };
        Ok(wrap_integer(rank, result))
    }

    fn comparison(
        &self,
        op: &BinOp,
        left: Value,
        right: Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let comparable = numeric_rank(&left).is_some() && numeric_rank(&right).is_some();
        if !comparable {
            return Err(RuntimeError::TypeMismatch {
                expected: "numeric operands".to_string(),
                found: format!("{} {} {}", self.kind_of(&left), op, self.kind_of(&right)),
                location,
            });
        }

        let ordered = if matches!(left, Value::Float(_) | Value::Double(_))
            || matches!(right, Value::Float(_) | Value::Double(_))
        {
            let a = left.as_f64().unwrap_or(0.0);
            let b = right.as_f64().unwrap_or(0.0);
            match op {
                BinOp::Lt => a < b,
                BinOp::Le => a <= b,
                BinOp::Gt => a > b,
                _ => a >= b,
            }
        } else {
            let a = left.as_i64().unwrap_or(0);
            let b = right.as_i64().unwrap_or(0);
            match op {
                BinOp::Lt => a < b,
                BinOp::Le => a <= b,
                BinOp::Gt => a > b,
                _ => a >= b,
            }
        };
        Ok(Value::Bool(ordered))
    }

    /// Equality used by `==`, `!=`, and switch label matching. Numbers
    /// compare by promoted value, strings by content, references by handle.
    pub(crate) fn values_equal(&self, left: &Value, right: &Value) -> bool {
        match (left, right) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Ref(a), Value::Ref(b)) => a == b,
            (Value::Null, Value::Null) => true,
            _ => {
                if matches!(left, Value::Float(_) | Value::Double(_))
                    || matches!(right, Value::Float(_) | Value::Double(_))
                {
                    match (left.as_f64(), right.as_f64()) {
                        (Some(a), Some(b)) => a == b,
                        _ => false,
                    }
                } else {
                    match (left.as_i64(), right.as_i64()) {
                        (Some(a), Some(b)) => a == b,
                        _ => false,
                    }
                }
            }
        }
    }
}

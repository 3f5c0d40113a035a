//! Built-in operations: the output functions and the String methods.

use super::engine::Interpreter;
use super::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::SourceLocation;

impl Interpreter {
    /// Handle `println` and `print`. Returns `None` when the name is not an
    /// output built-in, so the caller can fall through to method dispatch.
    pub(super) fn try_output_builtin(
        &mut self,
        name: &str,
        args: &[Value],
        location: SourceLocation,
    ) -> Option<Result<Value, RuntimeError>> {
        match name {
            "println" => Some(match args {
                [] => {
                    self.console.println("");
                    Ok(Value::Null)
                }
                [value] => {
                    let text = self.display_value(value);
                    self.console.println(&text);
                    Ok(Value::Null)
                }
                _ => Err(RuntimeError::NoMatchingSignature {
                    class: "<builtin>".to_string(),
                    method: name.to_string(),
                    args: args.iter().map(|a| self.kind_of(a)).collect(),
                    location,
                }),
            }),
            "print" => Some(match args {
                [value] => {
                    let text = self.display_value(value);
                    self.console.print(&text);
                    Ok(Value::Null)
                }
                _ => Err(RuntimeError::NoMatchingSignature {
                    class: "<builtin>".to_string(),
                    method: name.to_string(),
                    args: args.iter().map(|a| self.kind_of(a)).collect(),
                    location,
                }),
            }),
            _ => None,
        }
    }

    /// String methods, dispatched on a string receiver.
    ///
    /// Index arguments count characters, and substring follows the
    /// half-open `[begin, end)` convention.
    pub(super) fn call_string_method(
        &mut self,
        receiver: &str,
        name: &str,
        args: Vec<Value>,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let chars: Vec<char> = receiver.chars().collect();

        match (name, args.as_slice()) {
            ("length", []) => Ok(Value::Int(chars.len() as i32)),
            ("isEmpty", []) => Ok(Value::Bool(chars.is_empty())),
            ("toUpperCase", []) => Ok(Value::Str(receiver.to_uppercase())),
            ("toLowerCase", []) => Ok(Value::Str(receiver.to_lowercase())),
            ("trim", []) => Ok(Value::Str(receiver.trim().to_string())),

            ("charAt", [index]) => {
                let idx = self.string_index(index, chars.len(), location)?;
                Ok(Value::Char(chars[idx]))
            }

            ("substring", [begin]) => {
                let begin = self.string_bound(begin, chars.len(), location)?;
                Ok(Value::Str(chars[begin..].iter().collect()))
            }
            ("substring", [begin, end]) => {
                let begin = self.string_bound(begin, chars.len(), location)?;
                let end = self.string_bound(end, chars.len(), location)?;
                if begin > end {
                    return Err(RuntimeError::IndexOutOfBounds {
                        index: begin as i64,
                        length: end,
                        location,
                    });
                }
                Ok(Value::Str(chars[begin..end].iter().collect()))
            }

            ("contains", [Value::Str(needle)]) => {
                Ok(Value::Bool(receiver.contains(needle.as_str())))
            }
            ("equals", [other]) => match other {
                Value::Str(s) => Ok(Value::Bool(receiver == s)),
                _ => Ok(Value::Bool(false)),
            },

            _ => Err(RuntimeError::UndefinedMethod {
                class: "String".to_string(),
                method: name.to_string(),
                location,
            }),
        }
    }

    /// An index that must land on an existing character
    fn string_index(
        &self,
        value: &Value,
        length: usize,
        location: SourceLocation,
    ) -> Result<usize, RuntimeError> {
        let idx = self.string_bound(value, length, location)?;
        if idx == length {
            return Err(RuntimeError::IndexOutOfBounds {
                index: idx as i64,
                length,
                location,
            });
        }
        Ok(idx)
    }

    /// A bound that may equal the length, as substring ends do
    fn string_bound(
        &self,
        value: &Value,
        length: usize,
        location: SourceLocation,
    ) -> Result<usize, RuntimeError> {
        let idx = value.as_i64().ok_or_else(|| RuntimeError::TypeMismatch {
            expected: "int".to_string(),
            found: self.kind_of(value).to_string(),
            location,
        })?;
        if idx < 0 || idx as usize > length {
            return Err(RuntimeError::IndexOutOfBounds {
                index: idx,
                length,
                location,
            });
        }
        Ok(idx as usize)
    }
}

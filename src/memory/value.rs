//! Runtime value representation and the primitive widening lattice.
//!
//! Each numeric width gets its own variant so that `10 / 3` stays integer
//! division while `10.0 / 3.0` is floating point, and so that overload
//! resolution can distinguish an `int` argument from a `long` one.

use crate::parser::ast::{BaseType, Type};
use std::fmt;

/// A runtime value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    Bool(bool),
    Str(String),
    /// Handle into the heap, for class instances and arrays
    Ref(usize),
    Null,
}

/// The static kind of a value, used for overload matching and error messages.
///
/// Reference kinds carry enough structure to compare against declared
/// parameter types (`Object` holds the class name, `Array` the element kind).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    Bool,
    Str,
    Object(String),
    Array(Box<Kind>),
    Null,
}

impl Kind {
    /// The kind a declared type denotes
    pub fn of_type(ty: &Type) -> Kind {
        let mut kind = match &ty.base {
            BaseType::Byte => Kind::Byte,
            BaseType::Short => Kind::Short,
            BaseType::Int => Kind::Int,
            BaseType::Long => Kind::Long,
            BaseType::Float => Kind::Float,
            BaseType::Double => Kind::Double,
            BaseType::Char => Kind::Char,
            BaseType::Boolean => Kind::Bool,
            BaseType::Str => Kind::Str,
            BaseType::Class(name) => Kind::Object(name.clone()),
            // `void` never describes a value; treat it as the null kind
            BaseType::Void => Kind::Null,
        };
        for _ in 0..ty.array_depth {
            kind = Kind::Array(Box::new(kind));
        }
        kind
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Kind::Byte | Kind::Short | Kind::Int | Kind::Long | Kind::Float | Kind::Double
        )
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Kind::Object(_) | Kind::Array(_) | Kind::Str | Kind::Null)
    }

    /// Position in the numeric widening chain byte < short < int < long <
    /// float < double. `char` widens like `int` but nothing widens into it.
    fn numeric_rank(&self) -> Option<u8> {
        match self {
            Kind::Byte => Some(0),
            Kind::Short => Some(1),
            Kind::Int | Kind::Char => Some(2),
            Kind::Long => Some(3),
            Kind::Float => Some(4),
            Kind::Double => Some(5),
            _ => None,
        }
    }

    /// Whether a value of this kind is accepted where `target` is declared,
    /// possibly via an implicit widening conversion.
    pub fn widens_to(&self, target: &Kind) -> bool {
        if self == target {
            return true;
        }
        // char accepts nothing implicitly, and bool never converts
        if matches!(target, Kind::Char) || matches!(self, Kind::Bool) {
            return false;
        }
        // char sits at int's rank, so the strict rank check below would
        // miss char -> int
        if matches!((self, target), (Kind::Char, Kind::Int)) {
            return true;
        }
        match (self.numeric_rank(), target.numeric_rank()) {
            (Some(from), Some(to)) => from < to,
            _ => false,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Byte => write!(f, "byte"),
            Kind::Short => write!(f, "short"),
            Kind::Int => write!(f, "int"),
            Kind::Long => write!(f, "long"),
            Kind::Float => write!(f, "float"),
            Kind::Double => write!(f, "double"),
            Kind::Char => write!(f, "char"),
            Kind::Bool => write!(f, "boolean"),
            Kind::Str => write!(f, "String"),
            Kind::Object(name) => write!(f, "{}", name),
            Kind::Array(elem) => write!(f, "{}[]", elem),
            Kind::Null => write!(f, "null"),
        }
    }
}

impl Value {
    /// The zero value every field and array slot starts with
    pub fn zero_of(ty: &Type) -> Value {
        if ty.is_array() {
            return Value::Null;
        }
        match &ty.base {
            BaseType::Byte => Value::Byte(0),
            BaseType::Short => Value::Short(0),
            BaseType::Int => Value::Int(0),
            BaseType::Long => Value::Long(0),
            BaseType::Float => Value::Float(0.0),
            BaseType::Double => Value::Double(0.0),
            BaseType::Char => Value::Char('\0'),
            BaseType::Boolean => Value::Bool(false),
            BaseType::Str => Value::Str(String::new()),
            BaseType::Class(_) | BaseType::Void => Value::Null,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::Byte(_)
                | Value::Short(_)
                | Value::Int(_)
                | Value::Long(_)
                | Value::Float(_)
                | Value::Double(_)
        )
    }

    /// Read any numeric value (including char) as i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Byte(n) => Some(*n as i64),
            Value::Short(n) => Some(*n as i64),
            Value::Int(n) => Some(*n as i64),
            Value::Long(n) => Some(*n),
            Value::Char(c) => Some(*c as i64),
            _ => None,
        }
    }

    /// Read any numeric value (including char) as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Byte(n) => Some(*n as f64),
            Value::Short(n) => Some(*n as f64),
            Value::Int(n) => Some(*n as f64),
            Value::Long(n) => Some(*n as f64),
            Value::Float(n) => Some(*n as f64),
            Value::Double(n) => Some(*n),
            Value::Char(c) => Some(*c as u32 as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Convert this value into the numeric kind `target`, when the
    /// conversion is an implicit widening. Returns `None` otherwise.
    pub fn widen_to(&self, target: &Kind) -> Option<Value> {
        match target {
            Kind::Byte => match self {
                Value::Byte(n) => Some(Value::Byte(*n)),
                _ => None,
            },
            Kind::Short => match self {
                Value::Byte(n) => Some(Value::Short(*n as i16)),
                Value::Short(n) => Some(Value::Short(*n)),
                _ => None,
            },
            Kind::Int => match self {
                Value::Byte(n) => Some(Value::Int(*n as i32)),
                Value::Short(n) => Some(Value::Int(*n as i32)),
                Value::Int(n) => Some(Value::Int(*n)),
                Value::Char(c) => Some(Value::Int(*c as i32)),
                _ => None,
            },
            Kind::Long => match self {
                Value::Byte(n) => Some(Value::Long(*n as i64)),
                Value::Short(n) => Some(Value::Long(*n as i64)),
                Value::Int(n) => Some(Value::Long(*n as i64)),
                Value::Long(n) => Some(Value::Long(*n)),
                Value::Char(c) => Some(Value::Long(*c as i64)),
                _ => None,
            },
            Kind::Float => match self {
                Value::Byte(n) => Some(Value::Float(*n as f32)),
                Value::Short(n) => Some(Value::Float(*n as f32)),
                Value::Int(n) => Some(Value::Float(*n as f32)),
                Value::Long(n) => Some(Value::Float(*n as f32)),
                Value::Float(n) => Some(Value::Float(*n)),
                Value::Char(c) => Some(Value::Float(*c as u32 as f32)),
                _ => None,
            },
            Kind::Double => match self {
                Value::Byte(n) => Some(Value::Double(*n as f64)),
                Value::Short(n) => Some(Value::Double(*n as f64)),
                Value::Int(n) => Some(Value::Double(*n as f64)),
                Value::Long(n) => Some(Value::Double(*n as f64)),
                Value::Float(n) => Some(Value::Double(*n as f64)),
                Value::Double(n) => Some(Value::Double(*n)),
                Value::Char(c) => Some(Value::Double(*c as u32 as f64)),
                _ => None,
            },
            Kind::Char => match self {
                Value::Char(c) => Some(Value::Char(*c)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Fit an `int` literal into a narrower integer kind when its value is
    /// in range. Declarations like `byte idade = 25;` rely on this.
    pub fn narrow_int_literal(&self, target: &Kind) -> Option<Value> {
        let Value::Int(n) = self else {
            return None;
        };
        match target {
            Kind::Byte => i8::try_from(*n).ok().map(Value::Byte),
            Kind::Short => i16::try_from(*n).ok().map(Value::Short),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Byte(n) => write!(f, "{}", n),
            Value::Short(n) => write!(f, "{}", n),
            Value::Int(n) => write!(f, "{}", n),
            Value::Long(n) => write!(f, "{}", n),
            Value::Float(n) => {
                if n.is_finite() && n.fract() == 0.0 {
                    write!(f, "{:.1}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Double(n) => write!(f, "{}", format_float(*n)),
            Value::Char(c) => write!(f, "{}", c),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => write!(f, "{}", s),
            Value::Ref(handle) => write!(f, "object@{}", handle),
            Value::Null => write!(f, "null"),
        }
    }
}

/// Floating point display: whole values keep one decimal place, so `5.0`
/// prints as `5.0` and not `5`
fn format_float(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 {
        format!("{:.1}", n)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widening_chain() {
        assert!(Kind::Byte.widens_to(&Kind::Short));
        assert!(Kind::Byte.widens_to(&Kind::Double));
        assert!(Kind::Int.widens_to(&Kind::Long));
        assert!(Kind::Int.widens_to(&Kind::Double));
        assert!(Kind::Char.widens_to(&Kind::Int));
        assert!(Kind::Char.widens_to(&Kind::Double));

        // No narrowing, nothing widens into char, bool converts to nothing
        assert!(!Kind::Double.widens_to(&Kind::Float));
        assert!(!Kind::Long.widens_to(&Kind::Int));
        assert!(!Kind::Int.widens_to(&Kind::Char));
        assert!(!Kind::Bool.widens_to(&Kind::Int));
    }

    #[test]
    fn test_zero_values() {
        let str_type = Type::new(BaseType::Str);
        assert_eq!(Value::zero_of(&str_type), Value::Str(String::new()));

        let int_type = Type::new(BaseType::Int);
        assert_eq!(Value::zero_of(&int_type), Value::Int(0));

        let char_type = Type::new(BaseType::Char);
        assert_eq!(Value::zero_of(&char_type), Value::Char('\0'));

        let obj_type = Type::new(BaseType::Class("Carro".to_string()));
        assert_eq!(Value::zero_of(&obj_type), Value::Null);

        let arr_type = Type::new(BaseType::Int).with_array();
        assert_eq!(Value::zero_of(&arr_type), Value::Null);
    }

    #[test]
    fn test_float_display_keeps_decimal() {
        assert_eq!(Value::Double(5.0).to_string(), "5.0");
        assert_eq!(Value::Double(7.5).to_string(), "7.5");
        assert_eq!(Value::Float(19.99).to_string(), "19.99");
        assert_eq!(Value::Float(1.0).to_string(), "1.0");
        assert_eq!(Value::Int(5).to_string(), "5");
    }

    #[test]
    fn test_narrow_int_literal() {
        assert_eq!(
            Value::Int(25).narrow_int_literal(&Kind::Byte),
            Some(Value::Byte(25))
        );
        assert_eq!(Value::Int(300).narrow_int_literal(&Kind::Byte), None);
        assert_eq!(
            Value::Int(1000).narrow_int_literal(&Kind::Short),
            Some(Value::Short(1000))
        );
    }
}

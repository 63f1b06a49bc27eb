//! Scalar values exposed by fact fields to the condition language.

use std::fmt;

use rust_decimal::Decimal;

use super::EvalError;

/// A field value read from a fact.
///
/// Enumerated fields surface as `Symbol` carrying their wire name; free text
/// (rationale strings baked into rules) surfaces as `Text`. Numeric fields
/// are `Int` or `Decimal` -- never `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    Symbol(&'static str),
    Int(i64),
    Decimal(Decimal),
    Text(&'static str),
}

impl Value {
    /// Returns a human-readable type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Symbol(_) => "Symbol",
            Value::Int(_) => "Int",
            Value::Decimal(_) => "Decimal",
            Value::Text(_) => "Text",
        }
    }

    /// Numeric view of the value; `Int` is promoted to `Decimal`.
    pub fn as_decimal(&self) -> Result<Decimal, EvalError> {
        match self {
            Value::Int(i) => Ok(Decimal::from(*i)),
            Value::Decimal(d) => Ok(*d),
            other => Err(EvalError::TypeError {
                message: format!("expected a numeric value, got {}", other.type_name()),
            }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Symbol(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_promotes_to_decimal() {
        assert_eq!(Value::Int(3).as_decimal().unwrap(), Decimal::from(3));
    }

    #[test]
    fn symbol_is_not_numeric() {
        let err = Value::Symbol("micro").as_decimal().unwrap_err();
        assert_eq!(
            err,
            EvalError::TypeError {
                message: "expected a numeric value, got Symbol".to_string()
            }
        );
    }

    #[test]
    fn text_displays_quoted() {
        assert_eq!(Value::Text("Canva Free").to_string(), "\"Canva Free\"");
        assert_eq!(Value::Symbol("gen_z").to_string(), "gen_z");
    }
}

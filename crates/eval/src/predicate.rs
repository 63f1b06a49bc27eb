//! Rule condition language.
//!
//! A condition is a boolean tree over the fact store. Leaves (`Match`)
//! hold when at least one fact of the given kind has a field passing the
//! leaf's test; `And`, `Or` and `Not` combine leaves. Conditions bind no
//! variables, so evaluation yields a plain `bool`.

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::Decimal;

use crate::types::{EvalError, FactKind, FactStore, Value};

/// Numeric comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl CmpOp {
    fn holds(self, ord: Ordering) -> bool {
        match self {
            CmpOp::Lt => ord == Ordering::Less,
            CmpOp::Le => ord != Ordering::Greater,
            CmpOp::Gt => ord == Ordering::Greater,
            CmpOp::Ge => ord != Ordering::Less,
            CmpOp::Eq => ord == Ordering::Equal,
            CmpOp::Ne => ord != Ordering::Equal,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Eq => "=",
            CmpOp::Ne => "!=",
        }
    }
}

/// The test applied to one field of a candidate fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Test {
    Eq(Value),
    OneOf(Vec<Value>),
    Compare { op: CmpOp, rhs: Decimal },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Match {
        kind: FactKind,
        field: &'static str,
        test: Test,
    },
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
}

// ──────────────────────────────────────────────
// Builders
// ──────────────────────────────────────────────

/// `kind.field = value`
pub fn is(kind: FactKind, field: &'static str, value: impl Into<Value>) -> Condition {
    Condition::Match {
        kind,
        field,
        test: Test::Eq(value.into()),
    }
}

/// `kind.field IN {values}`
pub fn one_of<V: Into<Value>>(
    kind: FactKind,
    field: &'static str,
    values: impl IntoIterator<Item = V>,
) -> Condition {
    Condition::Match {
        kind,
        field,
        test: Test::OneOf(values.into_iter().map(Into::into).collect()),
    }
}

/// `kind.field <op> rhs`
pub fn compare(kind: FactKind, field: &'static str, op: CmpOp, rhs: Decimal) -> Condition {
    Condition::Match {
        kind,
        field,
        test: Test::Compare { op, rhs },
    }
}

pub fn all(conditions: Vec<Condition>) -> Condition {
    Condition::And(conditions)
}

pub fn any(conditions: Vec<Condition>) -> Condition {
    Condition::Or(conditions)
}

pub fn not(condition: Condition) -> Condition {
    Condition::Not(Box::new(condition))
}

// ──────────────────────────────────────────────
// Evaluation
// ──────────────────────────────────────────────

/// Evaluate a condition against the current fact store.
///
/// `And` and `Or` short-circuit left to right. An empty `And` is true and
/// an empty `Or` is false.
pub fn eval_condition(condition: &Condition, facts: &FactStore) -> Result<bool, EvalError> {
    match condition {
        Condition::Match { kind, field, test } => {
            if kind.field_type(field).is_none() {
                return Err(unknown_field(*kind, field));
            }
            for fact in facts.of_kind(*kind) {
                let value = fact.field(field).ok_or_else(|| unknown_field(*kind, field))?;
                if test.passes(&value)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }

        Condition::And(children) => {
            for child in children {
                if !eval_condition(child, facts)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }

        Condition::Or(children) => {
            for child in children {
                if eval_condition(child, facts)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }

        Condition::Not(inner) => Ok(!eval_condition(inner, facts)?),
    }
}

impl Test {
    fn passes(&self, value: &Value) -> Result<bool, EvalError> {
        match self {
            Test::Eq(expected) => values_equal(value, expected),
            Test::OneOf(options) => {
                for option in options {
                    if values_equal(value, option)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Test::Compare { op, rhs } => {
                let lhs = value.as_decimal()?;
                Ok(op.holds(lhs.cmp(rhs)))
            }
        }
    }
}

/// Equality across value types. Numeric values compare by magnitude;
/// anything else must have matching variants.
fn values_equal(left: &Value, right: &Value) -> Result<bool, EvalError> {
    match (left, right) {
        (Value::Symbol(a), Value::Symbol(b)) | (Value::Text(a), Value::Text(b)) => Ok(a == b),
        (Value::Int(_) | Value::Decimal(_), Value::Int(_) | Value::Decimal(_)) => {
            Ok(left.as_decimal()? == right.as_decimal()?)
        }
        _ => Err(EvalError::TypeError {
            message: format!(
                "cannot compare {} with {}",
                left.type_name(),
                right.type_name()
            ),
        }),
    }
}

fn unknown_field(kind: FactKind, field: &str) -> EvalError {
    EvalError::UnknownField {
        kind,
        field: field.to_string(),
    }
}

// ──────────────────────────────────────────────
// Static validation
// ──────────────────────────────────────────────

/// Check a condition against the fact schemas without a store: every leaf
/// names a declared field and its literal has a compatible type.
pub fn validate(condition: &Condition) -> Result<(), EvalError> {
    match condition {
        Condition::Match { kind, field, test } => {
            let ty = kind
                .field_type(field)
                .ok_or_else(|| unknown_field(*kind, field))?;
            let mismatch = |what: String| EvalError::TypeError {
                message: format!("{}.{} is {:?}, {}", kind, field, ty, what),
            };
            match test {
                Test::Eq(value) => {
                    if !ty.accepts(value) {
                        return Err(mismatch(format!("tested against {}", value.type_name())));
                    }
                }
                Test::OneOf(values) => {
                    if values.is_empty() {
                        return Err(mismatch("tested against an empty set".to_string()));
                    }
                    if let Some(bad) = values.iter().find(|v| !ty.accepts(v)) {
                        return Err(mismatch(format!("tested against {}", bad.type_name())));
                    }
                }
                Test::Compare { op, .. } => {
                    if !ty.is_numeric() {
                        return Err(mismatch(format!("not numeric for '{}'", op.symbol())));
                    }
                }
            }
            Ok(())
        }
        Condition::And(children) | Condition::Or(children) => {
            children.iter().try_for_each(validate)
        }
        Condition::Not(inner) => validate(inner),
    }
}

impl Condition {
    /// Fact kinds this condition reads.
    pub fn kinds(&self) -> Vec<FactKind> {
        let mut out = Vec::new();
        self.collect_kinds(&mut out);
        out.sort();
        out.dedup();
        out
    }

    fn collect_kinds(&self, out: &mut Vec<FactKind>) {
        match self {
            Condition::Match { kind, .. } => out.push(*kind),
            Condition::And(children) | Condition::Or(children) => {
                for child in children {
                    child.collect_kinds(out);
                }
            }
            Condition::Not(inner) => inner.collect_kinds(out),
        }
    }
}

// ──────────────────────────────────────────────
// Rendering
// ──────────────────────────────────────────────

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Match { kind, field, test } => {
                write!(f, "{}.{} ", kind, field)?;
                match test {
                    Test::Eq(value) => write!(f, "= {}", value),
                    Test::OneOf(values) => {
                        f.write_str("IN {")?;
                        for (i, value) in values.iter().enumerate() {
                            if i > 0 {
                                f.write_str(", ")?;
                            }
                            write!(f, "{}", value)?;
                        }
                        f.write_str("}")
                    }
                    Test::Compare { op, rhs } => write!(f, "{} {}", op.symbol(), rhs),
                }
            }
            Condition::And(children) => join(f, children, " AND "),
            Condition::Or(children) => join(f, children, " OR "),
            Condition::Not(inner) => write!(f, "NOT ({})", inner),
        }
    }
}

fn join(f: &mut fmt::Formatter<'_>, children: &[Condition], sep: &str) -> fmt::Result {
    if children.len() == 1 {
        return write!(f, "{}", children[0]);
    }
    f.write_str("(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", child)?;
    }
    f.write_str(")")
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

//! Runtime value domain
//!
//! Equality is structural: scalars by value, arrays elementwise, dictionaries
//! by set of entries.

use crate::error::RevpadError;
use crate::lang::ast::{quote, Expr};
use crate::lang::types::Type;
use crate::RevpadResult;
use std::collections::HashMap;
use std::fmt;

/// A value produced by the evaluator
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    String(String),
    Array(Vec<Value>),
    Dictionary(HashMap<String, Value>),
    /// A lambda instance: parameter names plus the body to evaluate in a
    /// child scope on application
    Lambda { params: Vec<String>, body: Box<Expr> },
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    pub fn array(values: Vec<Value>) -> Self {
        Value::Array(values)
    }

    pub fn string_array(values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Value::Array(values.into_iter().map(Value::string).collect())
    }

    /// The type this value inhabits. Empty aggregates report `Dynamic`
    /// element types; lambda parameter types are unknown at the value level.
    pub fn type_of(&self) -> Type {
        match self {
            Value::Bool(_) => Type::Bool,
            Value::Int(_) => Type::Int,
            Value::String(_) => Type::String,
            Value::Array(items) => Type::array(
                items
                    .first()
                    .map(Value::type_of)
                    .unwrap_or(Type::Dynamic),
            ),
            Value::Dictionary(map) => Type::dict(
                map.values()
                    .next()
                    .map(Value::type_of)
                    .unwrap_or(Type::Dynamic),
            ),
            Value::Lambda { params, .. } => {
                Type::lambda(vec![Type::Dynamic; params.len()], Type::Dynamic)
            }
        }
    }

    pub fn as_bool(&self) -> RevpadResult<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(RevpadError::Engine(format!(
                "expected a boolean, got {}",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> RevpadResult<&str> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(RevpadError::Engine(format!(
                "expected a string, got {}",
                other
            ))),
        }
    }

    pub fn as_array(&self) -> RevpadResult<&[Value]> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(RevpadError::Engine(format!(
                "expected an array, got {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::String(s) => write!(f, "{}", quote(s)),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Dictionary(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", quote(key), map[*key])?;
                }
                write!(f, "}}")
            }
            Value::Lambda { params, body } => {
                write!(f, "({}) => {}", params.join(", "), body)
            }
        }
    }
}

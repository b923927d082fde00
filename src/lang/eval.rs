//! Expression evaluation
//!
//! Evaluation is strict and left-to-right. `&&` and `||` short-circuit;
//! everything else reduces its operands first. Function calls evaluate
//! their arguments in order and then invoke the built-in's host code.

use crate::error::RevpadError;
use crate::lang::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::lang::value::Value;
use crate::runtime::env::Env;
use crate::RevpadResult;
use std::collections::HashMap;

/// Reduce an expression to a value in the given environment
pub fn eval(env: &mut Env, expr: &Expr) -> RevpadResult<Value> {
    match expr {
        Expr::BoolConst(b) => Ok(Value::Bool(*b)),
        Expr::IntConst(i) => Ok(Value::Int(*i)),
        Expr::StringConst(s) => Ok(Value::String(s.clone())),

        Expr::Variable(name) => env
            .lookup(name)
            .cloned()
            .ok_or_else(|| RevpadError::Engine(format!("variable {} is not defined", name))),

        Expr::UnOp { op, expr } => {
            let value = eval(env, expr)?;
            match op {
                UnaryOperator::Not => Ok(Value::Bool(!value.as_bool()?)),
            }
        }

        Expr::BinOp { op, left, right } => eval_bin_op(env, *op, left, right),

        Expr::FunctionCall { name, args } => {
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval(env, arg)?);
            }

            let function = env
                .built_in_function(name)
                .ok_or_else(|| RevpadError::UnknownBuiltIn(name.clone()))?;

            let kind = env.target_kind();
            if !function.supported_kinds.contains(&kind) {
                return Err(RevpadError::KindMismatch {
                    name: name.clone(),
                    kind,
                });
            }

            (function.code)(env, &values)
        }

        Expr::Lambda { params, body } => {
            let names = params
                .iter()
                .map(param_name)
                .collect::<RevpadResult<Vec<_>>>()?;
            Ok(Value::Lambda {
                params: names,
                body: body.clone(),
            })
        }

        Expr::TypedExpr { expr, .. } => eval(env, expr),

        Expr::Array(elements) => {
            let mut values = Vec::with_capacity(elements.len());
            for element in elements {
                values.push(eval(env, element)?);
            }
            Ok(Value::Array(values))
        }

        Expr::Dictionary(entries) => {
            let mut map = HashMap::with_capacity(entries.len());
            for (key, value) in entries {
                map.insert(key.clone(), eval(env, value)?);
            }
            Ok(Value::Dictionary(map))
        }
    }
}

/// Apply a lambda value to already-evaluated arguments.
///
/// Parameters bind positionally in a child scope: shadowed register entries
/// are restored when the body returns.
pub fn apply_lambda(env: &mut Env, lambda: &Value, args: &[Value]) -> RevpadResult<Value> {
    let Value::Lambda { params, body } = lambda else {
        return Err(RevpadError::Engine(format!(
            "cannot apply non-lambda value {}",
            lambda
        )));
    };

    if params.len() != args.len() {
        return Err(RevpadError::ArityMismatch {
            name: "lambda".to_string(),
            expected: params.len(),
            got: args.len(),
        });
    }

    let mut shadowed: Vec<(String, Option<Value>)> = Vec::with_capacity(params.len());
    for (param, arg) in params.iter().zip(args.iter()) {
        shadowed.push((param.clone(), env.lookup(param).cloned()));
        env.register(param.clone(), arg.clone());
    }

    let result = eval(env, body);

    for (param, previous) in shadowed {
        match previous {
            Some(value) => env.register(param, value),
            None => env.unregister(&param),
        }
    }

    result
}

fn eval_bin_op(env: &mut Env, op: BinaryOperator, left: &Expr, right: &Expr) -> RevpadResult<Value> {
    match op {
        BinaryOperator::And => {
            if !eval(env, left)?.as_bool()? {
                return Ok(Value::Bool(false));
            }
            Ok(Value::Bool(eval(env, right)?.as_bool()?))
        }
        BinaryOperator::Or => {
            if eval(env, left)?.as_bool()? {
                return Ok(Value::Bool(true));
            }
            Ok(Value::Bool(eval(env, right)?.as_bool()?))
        }
        BinaryOperator::Eq => {
            let l = eval(env, left)?;
            let r = eval(env, right)?;
            Ok(Value::Bool(l == r))
        }
        BinaryOperator::Neq => {
            let l = eval(env, left)?;
            let r = eval(env, right)?;
            Ok(Value::Bool(l != r))
        }
        BinaryOperator::Less | BinaryOperator::LessEq | BinaryOperator::Greater
        | BinaryOperator::GreaterEq => {
            let l = eval(env, left)?;
            let r = eval(env, right)?;
            compare(op, &l, &r)
        }
    }
}

/// Order comparisons apply to integers and to strings (lexicographic)
fn compare(op: BinaryOperator, left: &Value, right: &Value) -> RevpadResult<Value> {
    let ordering = match (left, right) {
        (Value::Int(l), Value::Int(r)) => l.cmp(r),
        (Value::String(l), Value::String(r)) => l.cmp(r),
        _ => {
            return Err(RevpadError::Engine(format!(
                "cannot compare {} with {}",
                left, right
            )))
        }
    };

    let holds = match op {
        BinaryOperator::Less => ordering.is_lt(),
        BinaryOperator::LessEq => ordering.is_le(),
        BinaryOperator::Greater => ordering.is_gt(),
        BinaryOperator::GreaterEq => ordering.is_ge(),
        _ => {
            return Err(RevpadError::Engine(format!(
                "{} is not an ordering operator",
                op
            )))
        }
    };

    Ok(Value::Bool(holds))
}

fn param_name(param: &Expr) -> RevpadResult<String> {
    match param {
        Expr::TypedExpr { expr, .. } => param_name(expr),
        Expr::Variable(name) => Ok(name.clone()),
        other => Err(RevpadError::Engine(format!(
            "malformed lambda parameter {}",
            other
        ))),
    }
}

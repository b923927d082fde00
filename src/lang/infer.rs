//! Bottom-up type inference
//!
//! Built-ins carry explicit signatures; there is no user-defined
//! polymorphism, so inference is a single bottom-up pass with structural
//! unification at every call site.

use crate::error::RevpadError;
use crate::lang::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::lang::types::Type;
use crate::runtime::env::Env;
use crate::RevpadResult;
use std::collections::HashMap;

/// Infer the type of an expression against the environment's built-ins
/// and register map
pub fn infer(env: &Env, expr: &Expr) -> RevpadResult<Type> {
    infer_with(env, &mut HashMap::new(), expr)
}

fn infer_with(
    env: &Env,
    bindings: &mut HashMap<String, Type>,
    expr: &Expr,
) -> RevpadResult<Type> {
    match expr {
        Expr::BoolConst(_) => Ok(Type::Bool),
        Expr::IntConst(_) => Ok(Type::Int),
        Expr::StringConst(_) => Ok(Type::String),

        Expr::Variable(name) => {
            if let Some(ty) = bindings.get(name) {
                return Ok(ty.clone());
            }
            env.lookup(name)
                .map(|value| value.type_of())
                .ok_or_else(|| RevpadError::Engine(format!("no type for variable {}", name)))
        }

        Expr::UnOp { op, expr } => {
            let ty = infer_with(env, bindings, expr)?;
            match op {
                UnaryOperator::Not => {
                    if !ty.unify(&Type::Bool) {
                        return Err(RevpadError::TypeInference);
                    }
                    Ok(Type::Bool)
                }
            }
        }

        Expr::BinOp { op, left, right } => {
            let lt = infer_with(env, bindings, left)?;
            let rt = infer_with(env, bindings, right)?;
            infer_bin_op(*op, &lt, &rt)
        }

        Expr::FunctionCall { name, args } => {
            let function = env
                .built_in_function(name)
                .ok_or_else(|| RevpadError::UnknownBuiltIn(name.clone()))?;

            if function.params.len() != args.len() {
                return Err(RevpadError::ArityMismatch {
                    name: name.clone(),
                    expected: function.params.len(),
                    got: args.len(),
                });
            }

            for (param, arg) in function.params.iter().zip(args.iter()) {
                let at = infer_with(env, bindings, arg)?;
                if !param.unify(&at) {
                    return Err(RevpadError::TypeInference);
                }
            }

            Ok(function.ret.clone())
        }

        Expr::Lambda { params, body } => {
            let mut declared = Vec::with_capacity(params.len());
            let mut shadowed = Vec::with_capacity(params.len());

            for param in params {
                let (name, ty) = param_binding(param)?;
                shadowed.push((name.clone(), bindings.insert(name, ty.clone())));
                declared.push(ty);
            }

            let body_ty = infer_with(env, bindings, body);

            for (name, previous) in shadowed {
                match previous {
                    Some(ty) => {
                        bindings.insert(name, ty);
                    }
                    None => {
                        bindings.remove(&name);
                    }
                }
            }

            Ok(Type::lambda(declared, body_ty?))
        }

        Expr::TypedExpr { ty, .. } => Ok(ty.clone()),

        Expr::Array(elements) => {
            let mut element_ty = Type::Dynamic;
            for element in elements {
                let ty = infer_with(env, bindings, element)?;
                if !element_ty.unify(&ty) {
                    return Err(RevpadError::TypeInference);
                }
                if element_ty == Type::Dynamic {
                    element_ty = ty;
                }
            }
            Ok(Type::array(element_ty))
        }

        Expr::Dictionary(entries) => {
            let mut value_ty = Type::Dynamic;
            for (_, value) in entries {
                let ty = infer_with(env, bindings, value)?;
                if !value_ty.unify(&ty) {
                    return Err(RevpadError::TypeInference);
                }
                if value_ty == Type::Dynamic {
                    value_ty = ty;
                }
            }
            Ok(Type::dict(value_ty))
        }
    }
}

fn infer_bin_op(op: BinaryOperator, left: &Type, right: &Type) -> RevpadResult<Type> {
    let ok = match op {
        BinaryOperator::Eq | BinaryOperator::Neq => left.unify(right),
        BinaryOperator::Less
        | BinaryOperator::LessEq
        | BinaryOperator::Greater
        | BinaryOperator::GreaterEq => {
            (left.unify(&Type::Int) && right.unify(&Type::Int))
                || (left.unify(&Type::String) && right.unify(&Type::String))
        }
        BinaryOperator::And | BinaryOperator::Or => {
            left.unify(&Type::Bool) && right.unify(&Type::Bool)
        }
    };

    if ok {
        Ok(Type::Bool)
    } else {
        Err(RevpadError::TypeInference)
    }
}

fn param_binding(param: &Expr) -> RevpadResult<(String, Type)> {
    match param {
        Expr::TypedExpr { expr, ty } => match expr.as_ref() {
            Expr::Variable(name) => Ok((name.clone(), ty.clone())),
            other => Err(RevpadError::Engine(format!(
                "malformed lambda parameter {}",
                other
            ))),
        },
        other => Err(RevpadError::Engine(format!(
            "malformed lambda parameter {}",
            other
        ))),
    }
}

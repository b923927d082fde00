use super::{mock_env, mock_env_with_built_ins};
use crate::config::TargetKind;
use crate::error::RevpadError;
use crate::fakes::FakeTarget;
use crate::lang::ast::Expr;
use crate::lang::eval::{apply_lambda, eval};
use crate::lang::parse;
use crate::lang::types::Type;
use crate::lang::value::Value;
use crate::runtime::builtins::{BuiltInFunction, BuiltIns};
use crate::runtime::Env;
use crate::lang::ast::BinaryOperator;
use std::sync::Arc;

/// A zero-argument function that always errors; used to observe whether
/// the right operand of a short-circuit actually evaluated
fn built_ins_with_boom() -> BuiltIns {
    let mut built_ins = BuiltIns::new();
    built_ins.add_function(
        "boom",
        BuiltInFunction {
            params: vec![],
            ret: Type::Bool,
            supported_kinds: vec![TargetKind::PullRequest, TargetKind::Issue],
            code: Arc::new(|_env, _args| Err(RevpadError::Host("boom".to_string()))),
        },
    );
    built_ins
}

#[test]
fn test_eval_literals() {
    let mut env = mock_env();
    assert_eq!(eval(&mut env, &parse("42").unwrap()).unwrap(), Value::Int(42));
    assert_eq!(
        eval(&mut env, &parse("\"jane\"").unwrap()).unwrap(),
        Value::string("jane")
    );
    assert_eq!(
        eval(&mut env, &parse("true").unwrap()).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn test_eval_structural_equality() {
    let mut env = mock_env();
    assert_eq!(
        eval(&mut env, &parse("[\"a\", \"b\"] == [\"a\", \"b\"]").unwrap()).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        eval(&mut env, &parse("[\"a\", \"b\"] == [\"b\", \"a\"]").unwrap()).unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn test_eval_dictionary_equality_ignores_entry_order() {
    let mut env = mock_env();
    assert_eq!(
        eval(
            &mut env,
            &parse("{\"a\": 1, \"b\": 2} == {\"b\": 2, \"a\": 1}").unwrap()
        )
        .unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn test_eval_comparisons() {
    let mut env = mock_env();
    assert_eq!(
        eval(&mut env, &parse("1 < 2").unwrap()).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        eval(&mut env, &parse("2 <= 1").unwrap()).unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        eval(&mut env, &parse("\"abc\" < \"abd\"").unwrap()).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        eval(&mut env, &parse("\"b\" >= \"a\"").unwrap()).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn test_eval_not() {
    let mut env = mock_env();
    assert_eq!(
        eval(&mut env, &parse("!true").unwrap()).unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn test_eval_and_short_circuits() {
    let mut env = mock_env_with_built_ins(built_ins_with_boom());
    assert_eq!(
        eval(&mut env, &parse("false && $boom()").unwrap()).unwrap(),
        Value::Bool(false)
    );
    assert!(eval(&mut env, &parse("true && $boom()").unwrap()).is_err());
}

#[test]
fn test_eval_or_short_circuits() {
    let mut env = mock_env_with_built_ins(built_ins_with_boom());
    assert_eq!(
        eval(&mut env, &parse("true || $boom()").unwrap()).unwrap(),
        Value::Bool(true)
    );
    assert!(eval(&mut env, &parse("false || $boom()").unwrap()).is_err());
}

#[test]
fn test_eval_host_error_propagates_verbatim() {
    let mut env = mock_env_with_built_ins(built_ins_with_boom());
    let err = eval(&mut env, &parse("$boom()").unwrap()).unwrap_err();
    assert_eq!(err, RevpadError::Host("boom".to_string()));
    assert_eq!(err.to_string(), "boom");
}

#[test]
fn test_eval_unknown_variable() {
    let mut env = mock_env();
    assert!(eval(&mut env, &parse("$nobody").unwrap()).is_err());
}

#[test]
fn test_eval_registered_variable() {
    let mut env = mock_env();
    env.register("seniors", Value::string_array(["jane"]));
    assert_eq!(
        eval(&mut env, &parse("$seniors").unwrap()).unwrap(),
        Value::string_array(["jane"])
    );
}

#[test]
fn test_eval_kind_mismatch() {
    let mut env = Env::new(
        Arc::new(FakeTarget::issue()),
        crate::runtime::BuiltIns::default_for(crate::config::Mode::Silent),
    );
    let err = eval(&mut env, &parse("$size()").unwrap()).unwrap_err();
    assert_eq!(
        err,
        RevpadError::KindMismatch {
            name: "size".to_string(),
            kind: TargetKind::Issue,
        }
    );
}

#[test]
fn test_apply_lambda_binds_and_restores() {
    let mut env = mock_env();
    env.register("dev", Value::string("shadowed"));

    let lambda = Value::Lambda {
        params: vec!["dev".to_string()],
        body: Box::new(Expr::bin_op(
            BinaryOperator::Eq,
            Expr::variable("dev"),
            Expr::string_const("jane"),
        )),
    };

    let result = apply_lambda(&mut env, &lambda, &[Value::string("jane")]).unwrap();
    assert_eq!(result, Value::Bool(true));

    // The outer binding survives the child scope.
    assert_eq!(env.lookup("dev"), Some(&Value::string("shadowed")));
}

#[test]
fn test_eval_filter_with_lambda() {
    let mut env = mock_env_with_built_ins(crate::runtime::BuiltIns::default_for(
        crate::config::Mode::Silent,
    ));

    let expr = Expr::function_call(
        "filter",
        vec![
            Expr::array(vec![
                Expr::string_const("jane"),
                Expr::string_const("john"),
                Expr::string_const("jane"),
            ]),
            Expr::lambda(
                vec![Expr::typed(Expr::variable("dev"), Type::String)],
                Expr::bin_op(
                    BinaryOperator::Eq,
                    Expr::variable("dev"),
                    Expr::string_const("jane"),
                ),
            ),
        ],
    );

    assert_eq!(
        eval(&mut env, &expr).unwrap(),
        Value::string_array(["jane", "jane"])
    );
}

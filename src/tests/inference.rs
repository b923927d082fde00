use super::{mock_env, mock_env_with_built_ins};
use crate::error::RevpadError;
use crate::lang::infer::infer;
use crate::lang::parse;
use crate::lang::types::Type;
use crate::lang::value::Value;
use crate::runtime::builtins::{BuiltInFunction, BuiltIns};
use crate::config::TargetKind;
use std::sync::Arc;

fn built_ins_with_function(name: &str, params: Vec<Type>, ret: Type) -> BuiltIns {
    let mut built_ins = BuiltIns::new();
    built_ins.add_function(
        name,
        BuiltInFunction {
            params,
            ret,
            supported_kinds: vec![TargetKind::PullRequest, TargetKind::Issue],
            code: Arc::new(|_env, _args| Ok(Value::Bool(true))),
        },
    );
    built_ins
}

#[test]
fn test_infer_literals() {
    let env = mock_env();
    assert_eq!(infer(&env, &parse("1").unwrap()).unwrap(), Type::Int);
    assert_eq!(infer(&env, &parse("\"a\"").unwrap()).unwrap(), Type::String);
    assert_eq!(infer(&env, &parse("true").unwrap()).unwrap(), Type::Bool);
}

#[test]
fn test_infer_equality_requires_unifiable_operands() {
    let env = mock_env();
    assert_eq!(infer(&env, &parse("1 == 1").unwrap()).unwrap(), Type::Bool);

    let err = infer(&env, &parse("1 == \"a\"").unwrap()).unwrap_err();
    assert_eq!(err, RevpadError::TypeInference);
    assert_eq!(err.to_string(), "type inference failed");
}

#[test]
fn test_infer_comparison() {
    let env = mock_env();
    assert_eq!(infer(&env, &parse("1 < 2").unwrap()).unwrap(), Type::Bool);
    assert_eq!(
        infer(&env, &parse("\"a\" < \"b\"").unwrap()).unwrap(),
        Type::Bool
    );
    assert_eq!(
        infer(&env, &parse("\"a\" < 1").unwrap()).unwrap_err(),
        RevpadError::TypeInference
    );
}

#[test]
fn test_infer_boolean_operators() {
    let env = mock_env();
    assert_eq!(
        infer(&env, &parse("true && false || true").unwrap()).unwrap(),
        Type::Bool
    );
    assert_eq!(
        infer(&env, &parse("1 && true").unwrap()).unwrap_err(),
        RevpadError::TypeInference
    );
    assert_eq!(infer(&env, &parse("!true").unwrap()).unwrap(), Type::Bool);
    assert_eq!(
        infer(&env, &parse("!1").unwrap()).unwrap_err(),
        RevpadError::TypeInference
    );
}

#[test]
fn test_infer_array_requires_uniform_elements() {
    let env = mock_env();
    assert_eq!(
        infer(&env, &parse("[\"a\", \"b\"]").unwrap()).unwrap(),
        Type::array(Type::String)
    );
    assert_eq!(
        infer(&env, &parse("[]").unwrap()).unwrap(),
        Type::array(Type::Dynamic)
    );
    assert_eq!(
        infer(&env, &parse("[1, \"a\"]").unwrap()).unwrap_err(),
        RevpadError::TypeInference
    );
}

#[test]
fn test_infer_dictionary() {
    let env = mock_env();
    assert_eq!(
        infer(&env, &parse("{\"a\": 1, \"b\": 2}").unwrap()).unwrap(),
        Type::dict(Type::Int)
    );
    assert_eq!(
        infer(&env, &parse("{\"a\": 1, \"b\": true}").unwrap()).unwrap_err(),
        RevpadError::TypeInference
    );
}

#[test]
fn test_infer_unknown_built_in() {
    let env = mock_env();
    let err = infer(&env, &parse("$foo()").unwrap()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "no type for built-in foo. Please check if the mode in the reviewpad.yml file supports it."
    );
}

#[test]
fn test_infer_built_in_call() {
    let env = mock_env_with_built_ins(built_ins_with_function(
        "hasFileExtensions",
        vec![Type::array(Type::String)],
        Type::Bool,
    ));
    assert_eq!(
        infer(&env, &parse("$hasFileExtensions([\".ts\"])").unwrap()).unwrap(),
        Type::Bool
    );
}

#[test]
fn test_infer_built_in_arity_mismatch() {
    let env = mock_env_with_built_ins(built_ins_with_function(
        "hasFileExtensions",
        vec![Type::array(Type::String)],
        Type::Bool,
    ));
    let err = infer(&env, &parse("$hasFileExtensions()").unwrap()).unwrap_err();
    assert_eq!(
        err,
        RevpadError::ArityMismatch {
            name: "hasFileExtensions".to_string(),
            expected: 1,
            got: 0,
        }
    );
}

#[test]
fn test_infer_built_in_argument_mismatch() {
    let env = mock_env_with_built_ins(built_ins_with_function(
        "hasFileExtensions",
        vec![Type::array(Type::String)],
        Type::Bool,
    ));
    assert_eq!(
        infer(&env, &parse("$hasFileExtensions(1)").unwrap()).unwrap_err(),
        RevpadError::TypeInference
    );
}

#[test]
fn test_infer_dynamic_parameter_accepts_anything() {
    let env = mock_env_with_built_ins(built_ins_with_function(
        "isElementOf",
        vec![Type::Dynamic, Type::array(Type::Dynamic)],
        Type::Bool,
    ));
    assert_eq!(
        infer(&env, &parse("$isElementOf(\"jane\", [\"jane\"])").unwrap()).unwrap(),
        Type::Bool
    );
    assert_eq!(
        infer(&env, &parse("$isElementOf(1, [1, 2])").unwrap()).unwrap(),
        Type::Bool
    );
}

#[test]
fn test_infer_registered_variable() {
    let mut env = mock_env();
    env.register("seniors", Value::string_array(["jane"]));
    assert_eq!(
        infer(&env, &parse("$seniors").unwrap()).unwrap(),
        Type::array(Type::String)
    );
}

#[test]
fn test_infer_unknown_variable() {
    let env = mock_env();
    assert!(infer(&env, &parse("$nobody").unwrap()).is_err());
}

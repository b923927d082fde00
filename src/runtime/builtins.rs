//! The built-ins table
//!
//! Host-provided callables exposed to the DSL. Functions return a value,
//! actions produce side effects through the target. Each entry declares a
//! typed signature (checked by inference before any host code runs) and
//! the target kinds it supports.
//!
//! The table is constructed once per interpreter; there is no process-wide
//! registry.

use crate::config::{Mode, TargetKind};
use crate::error::RevpadError;
use crate::lang::eval;
use crate::lang::types::Type;
use crate::lang::value::Value;
use crate::runtime::env::{build_internal_label_id, Env};
use crate::RevpadResult;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub type FunctionCode = Arc<dyn Fn(&mut Env, &[Value]) -> RevpadResult<Value>>;
pub type ActionCode = Arc<dyn Fn(&mut Env, &[Value]) -> RevpadResult<()>>;

pub struct BuiltInFunction {
    pub params: Vec<Type>,
    pub ret: Type,
    pub code: FunctionCode,
    pub supported_kinds: Vec<TargetKind>,
}

pub struct BuiltInAction {
    pub params: Vec<Type>,
    pub code: ActionCode,
    pub supported_kinds: Vec<TargetKind>,
}

#[derive(Default)]
pub struct BuiltIns {
    pub functions: HashMap<String, Arc<BuiltInFunction>>,
    pub actions: HashMap<String, Arc<BuiltInAction>>,
}

fn both_kinds() -> Vec<TargetKind> {
    vec![TargetKind::PullRequest, TargetKind::Issue]
}

fn pull_request_only() -> Vec<TargetKind> {
    vec![TargetKind::PullRequest]
}

fn arity(name: &str, expected: usize, got: usize) -> RevpadError {
    RevpadError::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    }
}

impl BuiltIns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_function(&mut self, name: impl Into<String>, function: BuiltInFunction) {
        self.functions.insert(name.into(), Arc::new(function));
    }

    pub fn add_action(&mut self, name: impl Into<String>, action: BuiltInAction) {
        self.actions.insert(name.into(), Arc::new(action));
    }

    /// The standard table. The `info` and `warn` reporting actions exist
    /// only in verbose mode; in silent mode a reference to them surfaces
    /// the mode hint through the unknown-built-in error.
    pub fn default_for(mode: Mode) -> Self {
        let mut built_ins = Self::new();

        built_ins.add_function(
            "group",
            BuiltInFunction {
                params: vec![Type::String],
                ret: Type::array(Type::String),
                supported_kinds: both_kinds(),
                code: Arc::new(|env: &mut Env, args: &[Value]| {
                    let [name] = args else {
                        return Err(arity("group", 1, args.len()));
                    };
                    let name = name.as_str()?;
                    env.lookup(name).cloned().ok_or_else(|| {
                        RevpadError::Engine(format!("group {} is not defined", name))
                    })
                }),
            },
        );

        built_ins.add_function(
            "description",
            BuiltInFunction {
                params: vec![],
                ret: Type::String,
                supported_kinds: both_kinds(),
                code: Arc::new(|env: &mut Env, _args: &[Value]| {
                    Ok(Value::String(env.target().description()?))
                }),
            },
        );

        built_ins.add_function(
            "author",
            BuiltInFunction {
                params: vec![],
                ret: Type::String,
                supported_kinds: both_kinds(),
                code: Arc::new(|env: &mut Env, _args: &[Value]| {
                    Ok(Value::String(env.target().author()?))
                }),
            },
        );

        built_ins.add_function(
            "labels",
            BuiltInFunction {
                params: vec![],
                ret: Type::array(Type::String),
                supported_kinds: both_kinds(),
                code: Arc::new(|env: &mut Env, _args: &[Value]| {
                    Ok(Value::string_array(env.target().labels()?))
                }),
            },
        );

        built_ins.add_function(
            "reviewers",
            BuiltInFunction {
                params: vec![],
                ret: Type::array(Type::String),
                supported_kinds: pull_request_only(),
                code: Arc::new(|env: &mut Env, _args: &[Value]| {
                    let target = env.target();
                    let mut logins = target.requested_reviewers()?;
                    logins.extend(target.requested_teams()?);
                    Ok(Value::string_array(logins))
                }),
            },
        );

        built_ins.add_function(
            "size",
            BuiltInFunction {
                params: vec![],
                ret: Type::Int,
                supported_kinds: pull_request_only(),
                code: Arc::new(|env: &mut Env, _args: &[Value]| {
                    Ok(Value::Int(env.target().size()?))
                }),
            },
        );

        built_ins.add_function(
            "hasFileExtensions",
            BuiltInFunction {
                params: vec![Type::array(Type::String)],
                ret: Type::Bool,
                supported_kinds: pull_request_only(),
                code: Arc::new(|env: &mut Env, args: &[Value]| {
                    let [allowed] = args else {
                        return Err(arity("hasFileExtensions", 1, args.len()));
                    };
                    let mut extensions = HashSet::new();
                    for extension in allowed.as_array()? {
                        extensions.insert(extension.as_str()?.to_string());
                    }
                    let all_match = env
                        .target()
                        .file_extensions()?
                        .iter()
                        .all(|extension| extensions.contains(extension));
                    Ok(Value::Bool(all_match))
                }),
            },
        );

        built_ins.add_function(
            "isElementOf",
            BuiltInFunction {
                params: vec![Type::Dynamic, Type::array(Type::Dynamic)],
                ret: Type::Bool,
                supported_kinds: both_kinds(),
                code: Arc::new(|_env: &mut Env, args: &[Value]| {
                    let [member, list] = args else {
                        return Err(arity("isElementOf", 2, args.len()));
                    };
                    Ok(Value::Bool(list.as_array()?.contains(member)))
                }),
            },
        );

        built_ins.add_function(
            "filter",
            BuiltInFunction {
                params: vec![
                    Type::array(Type::Dynamic),
                    Type::lambda(vec![Type::Dynamic], Type::Bool),
                ],
                ret: Type::array(Type::Dynamic),
                supported_kinds: both_kinds(),
                code: Arc::new(|env: &mut Env, args: &[Value]| {
                    let [list, predicate] = args else {
                        return Err(arity("filter", 2, args.len()));
                    };
                    let mut kept = Vec::new();
                    for element in list.as_array()? {
                        let keep = eval::apply_lambda(env, predicate, std::slice::from_ref(element))?
                            .as_bool()?;
                        if keep {
                            kept.push(element.clone());
                        }
                    }
                    Ok(Value::Array(kept))
                }),
            },
        );

        built_ins.add_action(
            "addLabel",
            BuiltInAction {
                params: vec![Type::String],
                supported_kinds: both_kinds(),
                code: Arc::new(|env: &mut Env, args: &[Value]| {
                    let [id] = args else {
                        return Err(arity("addLabel", 1, args.len()));
                    };
                    let name = resolve_label(env, id.as_str()?);
                    env.target().add_label(&name)
                }),
            },
        );

        built_ins.add_action(
            "removeLabel",
            BuiltInAction {
                params: vec![Type::String],
                supported_kinds: both_kinds(),
                code: Arc::new(|env: &mut Env, args: &[Value]| {
                    let [id] = args else {
                        return Err(arity("removeLabel", 1, args.len()));
                    };
                    let name = resolve_label(env, id.as_str()?);
                    env.target().remove_label(&name)
                }),
            },
        );

        built_ins.add_action(
            "comment",
            BuiltInAction {
                params: vec![Type::String],
                supported_kinds: both_kinds(),
                code: Arc::new(|env: &mut Env, args: &[Value]| {
                    let [body] = args else {
                        return Err(arity("comment", 1, args.len()));
                    };
                    env.target().comment(body.as_str()?)
                }),
            },
        );

        built_ins.add_action(
            "assignReviewer",
            BuiltInAction {
                params: vec![Type::array(Type::String)],
                supported_kinds: pull_request_only(),
                code: Arc::new(|env: &mut Env, args: &[Value]| {
                    let [reviewers] = args else {
                        return Err(arity("assignReviewer", 1, args.len()));
                    };
                    let target = env.target();
                    for login in reviewers.as_array()? {
                        target.assign_reviewer(login.as_str()?)?;
                    }
                    Ok(())
                }),
            },
        );

        built_ins.add_action(
            "merge",
            BuiltInAction {
                params: vec![Type::String],
                supported_kinds: pull_request_only(),
                code: Arc::new(|env: &mut Env, args: &[Value]| {
                    let [method] = args else {
                        return Err(arity("merge", 1, args.len()));
                    };
                    env.target().merge(method.as_str()?)
                }),
            },
        );

        built_ins.add_action(
            "close",
            BuiltInAction {
                params: vec![],
                supported_kinds: both_kinds(),
                code: Arc::new(|env: &mut Env, _args: &[Value]| env.target().close()),
            },
        );

        if mode == Mode::Verbose {
            built_ins.add_action(
                "info",
                BuiltInAction {
                    params: vec![Type::String],
                    supported_kinds: both_kinds(),
                    code: Arc::new(|_env: &mut Env, args: &[Value]| {
                        let [message] = args else {
                            return Err(arity("info", 1, args.len()));
                        };
                        tracing::info!("{}", message.as_str()?);
                        Ok(())
                    }),
                },
            );

            built_ins.add_action(
                "warn",
                BuiltInAction {
                    params: vec![Type::String],
                    supported_kinds: both_kinds(),
                    code: Arc::new(|_env: &mut Env, args: &[Value]| {
                        let [message] = args else {
                            return Err(arity("warn", 1, args.len()));
                        };
                        tracing::warn!("{}", message.as_str()?);
                        Ok(())
                    }),
                },
            );
        }

        built_ins
    }
}

/// Labels registered from the document resolve `@label:<id>` to a display
/// name; unregistered ids pass through unchanged.
fn resolve_label(env: &Env, id: &str) -> String {
    match env.lookup(&build_internal_label_id(id)) {
        Some(Value::String(name)) => name.clone(),
        _ => id.to_string(),
    }
}

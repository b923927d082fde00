//! Interpreter façade
//!
//! Entry points for turning a canonical document into effects: register
//! groups, rules and labels into the environment, evaluate rule
//! predicates, and execute programs while accumulating the report.

use crate::config::{GroupKind, GroupType};
use crate::error::RevpadError;
use crate::lang::ast::Expr;
use crate::lang::eval::eval;
use crate::lang::infer::infer;
use crate::lang::parser::parse;
use crate::lang::types::Type;
use crate::lang::value::Value;
use crate::runtime::env::{build_internal_label_id, build_internal_rule_name, Env};
use crate::runtime::program::{Program, Statement};
use crate::RevpadResult;
use tracing::{debug, error};

pub struct Interpreter {
    pub env: Env,
}

impl Interpreter {
    pub fn new(env: Env) -> Self {
        Self { env }
    }

    /// Build, type-check and evaluate a group spec, then register the
    /// resulting array under the group's name.
    pub fn process_group(
        &mut self,
        name: &str,
        kind: GroupKind,
        group_type: GroupType,
        spec: &str,
        param: &str,
        where_clause: &str,
    ) -> RevpadResult<()> {
        debug!(group = name, ?kind, ?group_type, "processing group");

        let ast = build_group_ast(group_type, spec, param, where_clause)
            .map_err(|e| RevpadError::Engine(format!("ProcessGroup:buildGroupAST: {}", e)))?;

        let value = eval_group(&mut self.env, &ast)
            .map_err(|e| RevpadError::Engine(format!("ProcessGroup:evalGroup {}", e)))?;

        self.env.register(name, value);
        Ok(())
    }

    /// Register a rule spec for later evaluation. The spec is not parsed
    /// here; workflows evaluate it when they trigger.
    pub fn process_rule(&mut self, name: &str, spec: &str) -> RevpadResult<()> {
        self.env
            .register(build_internal_rule_name(name), Value::string(spec));
        Ok(())
    }

    pub fn process_label(&mut self, id: &str, name: &str) -> RevpadResult<()> {
        self.env
            .register(build_internal_label_id(id), Value::string(name));
        Ok(())
    }

    /// Evaluate a boolean expression against the current target
    pub fn eval_expr(&mut self, kind: &str, src: &str) -> RevpadResult<bool> {
        eval_expr(&mut self.env, kind, src)
    }

    /// Execute every statement of a program in order.
    ///
    /// A failing statement aborts execution. Host errors are the one
    /// exception: under the document's `ignore-errors` they are recorded
    /// on the report and execution continues. Engine-side failures (parse,
    /// type, unknown built-in) always abort.
    pub fn exec_program(&mut self, program: &Program) -> RevpadResult<()> {
        for statement in &program.statements {
            match self.exec_statement(statement) {
                Ok(()) => {}
                Err(e @ RevpadError::Host(_)) if self.env.ignore_errors() => {
                    error!(code = %statement.code, error = %e, "statement failed, continuing");
                    self.env.report_mut().record_failure(&statement.code, &e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Execute a single statement: parse, check it is a well-typed call to
    /// a registered action, evaluate the arguments, run the host code and
    /// record the outcome.
    pub fn exec_statement(&mut self, statement: &Statement) -> RevpadResult<()> {
        let ast = parse(&statement.code)?;

        let Expr::FunctionCall { name, args } = ast else {
            return Err(RevpadError::Engine(format!(
                "expression {} is not an action",
                statement.code
            )));
        };

        let action = self
            .env
            .built_in_action(&name)
            .ok_or_else(|| RevpadError::UnknownBuiltIn(name.clone()))?;

        if action.params.len() != args.len() {
            return Err(RevpadError::ArityMismatch {
                name: name.clone(),
                expected: action.params.len(),
                got: args.len(),
            });
        }

        for (param, arg) in action.params.iter().zip(args.iter()) {
            let arg_ty = infer(&self.env, arg)?;
            if !param.unify(&arg_ty) {
                return Err(RevpadError::TypeInference);
            }
        }

        let kind = self.env.target_kind();
        if !action.supported_kinds.contains(&kind) {
            return Err(RevpadError::KindMismatch { name, kind });
        }

        let mut values = Vec::with_capacity(args.len());
        for arg in &args {
            values.push(eval(&mut self.env, arg)?);
        }

        (action.code)(&mut self.env, &values)?;

        self.env.report_mut().record_statement(statement);
        Ok(())
    }
}

/// Build the AST for a group spec. Filter groups desugar into
/// `filter(<spec>, (param: String) => <where>)`.
pub fn build_group_ast(
    group_type: GroupType,
    spec: &str,
    param: &str,
    where_clause: &str,
) -> RevpadResult<Expr> {
    match group_type {
        GroupType::Filter => {
            let spec_ast = parse(spec)?;
            let where_ast = parse(where_clause)?;
            Ok(Expr::function_call(
                "filter",
                vec![
                    spec_ast,
                    Expr::lambda(
                        vec![Expr::typed(Expr::variable(param), Type::String)],
                        where_ast,
                    ),
                ],
            ))
        }
        GroupType::Static => parse(spec),
    }
}

/// Type-check a group AST (it must produce an array) and evaluate it
pub fn eval_group(env: &mut Env, expr: &Expr) -> RevpadResult<Value> {
    let ty = infer(env, expr)?;
    if !matches!(ty, Type::Array(_)) {
        return Err(RevpadError::NotAGroup);
    }
    eval(env, expr)
}

/// Parse, type-check and evaluate a boolean expression. Non-boolean
/// expressions are rejected before evaluation.
pub fn eval_expr(env: &mut Env, _kind: &str, src: &str) -> RevpadResult<bool> {
    let ast = parse(src)?;

    let ty = infer(env, &ast)?;
    if ty != Type::Bool {
        return Err(RevpadError::NotACondition(src.to_string()));
    }

    eval(env, &ast)?.as_bool()
}

//! Registry and environment
//!
//! One `Env` per interpreter instance: the register map binds names to
//! values, the built-ins table holds the host-provided callables, and the
//! report accumulates what fired. Not safe for concurrent mutation.

use crate::config::TargetKind;
use crate::lang::value::Value;
use crate::runtime::builtins::{BuiltInAction, BuiltInFunction, BuiltIns};
use crate::runtime::report::Report;
use crate::runtime::target::Target;
use std::collections::HashMap;
use std::sync::Arc;

/// Internal register key for a label
pub fn build_internal_label_id(id: &str) -> String {
    format!("@label:{}", id)
}

/// Internal register key for a rule spec
pub fn build_internal_rule_name(name: &str) -> String {
    format!("@rule:{}", name)
}

pub struct Env {
    register_map: HashMap<String, Value>,
    built_ins: BuiltIns,
    target: Arc<dyn Target>,
    report: Report,
    ignore_errors: bool,
}

impl Env {
    pub fn new(target: Arc<dyn Target>, built_ins: BuiltIns) -> Self {
        Self {
            register_map: HashMap::new(),
            built_ins,
            target,
            report: Report::new(),
            ignore_errors: false,
        }
    }

    pub fn with_ignore_errors(mut self, ignore_errors: bool) -> Self {
        self.ignore_errors = ignore_errors;
        self
    }

    pub fn register(&mut self, name: impl Into<String>, value: Value) {
        self.register_map.insert(name.into(), value);
    }

    pub fn unregister(&mut self, name: &str) {
        self.register_map.remove(name);
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.register_map.get(name)
    }

    pub fn register_map(&self) -> &HashMap<String, Value> {
        &self.register_map
    }

    pub fn built_in_function(&self, name: &str) -> Option<Arc<BuiltInFunction>> {
        self.built_ins.functions.get(name).cloned()
    }

    pub fn built_in_action(&self, name: &str) -> Option<Arc<BuiltInAction>> {
        self.built_ins.actions.get(name).cloned()
    }

    pub fn target(&self) -> Arc<dyn Target> {
        self.target.clone()
    }

    pub fn target_kind(&self) -> TargetKind {
        self.target.kind()
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn report_mut(&mut self) -> &mut Report {
        &mut self.report
    }

    pub fn ignore_errors(&self) -> bool {
        self.ignore_errors
    }
}

//! Execution report
//!
//! Grows monotonically while a program executes: which workflows ran,
//! which of their rules fired, and the source text of every action that
//! actually executed. Built-ins never touch it directly; the interpreter
//! appends after each successful statement.

use crate::error::RevpadError;
use crate::runtime::program::Statement;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub workflow_details: HashMap<String, ReportWorkflowDetails>,
    pub failures: Vec<ReportFailure>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportWorkflowDetails {
    pub name: String,
    pub rules: HashMap<String, bool>,
    pub actions: Vec<String>,
}

/// A statement that failed under `ignore-errors`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportFailure {
    pub code: String,
    pub error: String,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successfully executed statement under its workflow
    pub fn record_statement(&mut self, statement: &Statement) {
        let Some(metadata) = &statement.metadata else {
            return;
        };

        let details = self
            .workflow_details
            .entry(metadata.workflow.name.clone())
            .or_insert_with(|| ReportWorkflowDetails {
                name: metadata.workflow.name.clone(),
                rules: HashMap::new(),
                actions: Vec::new(),
            });

        for workflow_rule in &metadata.triggered_by {
            details.rules.insert(workflow_rule.rule.clone(), true);
        }

        details.actions.push(statement.code.clone());
    }

    pub fn record_failure(&mut self, code: &str, error: &RevpadError) {
        self.failures.push(ReportFailure {
            code: code.to_string(),
            error: error.to_string(),
        });
    }
}

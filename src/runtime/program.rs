//! Programs: the flat list of statements a document evaluates to
//!
//! Each statement carries the metadata needed for report attribution:
//! the workflow it came from and the rules whose firing put it there.

use crate::config::{PadWorkflow, PadWorkflowRule};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub code: String,
    pub metadata: Option<Metadata>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub workflow: PadWorkflow,
    pub triggered_by: Vec<PadWorkflowRule>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Statement {
    pub fn new(code: impl Into<String>, metadata: Option<Metadata>) -> Self {
        Self {
            code: code.into(),
            metadata,
        }
    }
}

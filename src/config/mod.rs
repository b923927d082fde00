//! Canonical document model
//!
//! A document declares labels, groups, rules, workflows and pipelines over
//! the DSL. The loader produces values of these types with all imports
//! resolved, inline rules desugared and free-text DSL fields normalized.

pub mod loader;
pub mod normalizer;
pub mod transform;

pub use loader::{load, Fetcher, HttpFetcher};

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Execution mode declared by the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Silent,
    Verbose,
}

/// The kind of entity a workflow or built-in applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetKind {
    PullRequest,
    Issue,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::PullRequest => write!(f, "pull-request"),
            TargetKind::Issue => write!(f, "issue"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    #[default]
    Developer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    #[default]
    Static,
    Filter,
}

/// A document in canonical form
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReviewpadFile {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub edition: String,
    #[serde(default, deserialize_with = "deserialize_mode")]
    pub mode: Mode,
    #[serde(default, rename = "ignore-errors")]
    pub ignore_errors: bool,
    #[serde(default)]
    pub imports: Vec<PadImport>,
    #[serde(default)]
    pub labels: HashMap<String, PadLabel>,
    #[serde(default)]
    pub groups: Vec<PadGroup>,
    #[serde(default)]
    pub rules: Vec<PadRule>,
    #[serde(default)]
    pub workflows: Vec<PadWorkflow>,
    #[serde(default)]
    pub pipelines: Vec<PadPipeline>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PadImport {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PadLabel {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PadGroup {
    pub name: String,
    #[serde(default)]
    pub kind: GroupKind,
    #[serde(default, rename = "type")]
    pub group_type: GroupType,
    #[serde(default)]
    pub spec: String,
    #[serde(default)]
    pub param: String,
    #[serde(default, rename = "where")]
    pub where_clause: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PadRule {
    pub name: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub spec: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PadWorkflow {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub on: Vec<TargetKind>,
    /// The raw heterogeneous rule list as written in the document. The
    /// normalizer consumes it and fills `rules`.
    #[serde(default, rename = "rules")]
    pub non_normalized_rules: Vec<serde_yaml::Value>,
    #[serde(skip)]
    pub rules: Vec<PadWorkflowRule>,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default, rename = "always-run")]
    pub always_run: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PadWorkflowRule {
    pub rule: String,
    #[serde(default, rename = "extra-actions")]
    pub extra_actions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PadPipeline {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub trigger: String,
    #[serde(default)]
    pub stages: Vec<PadStage>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PadStage {
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub until: String,
}

impl ReviewpadFile {
    /// Merge another document's labels into this one. Existing ids win.
    pub fn append_labels(&mut self, other: &ReviewpadFile) {
        for (id, label) in &other.labels {
            self.labels
                .entry(id.clone())
                .or_insert_with(|| label.clone());
        }
    }

    pub fn append_groups(&mut self, other: &ReviewpadFile) {
        self.groups.extend(other.groups.iter().cloned());
    }

    /// Merge another document's rules. Rule names stay unique document-wide;
    /// the first declaration of a name wins.
    pub fn append_rules(&mut self, other: &ReviewpadFile) {
        for rule in &other.rules {
            if !self.has_rule(&rule.name) {
                self.rules.push(rule.clone());
            }
        }
    }

    pub fn append_workflows(&mut self, other: &ReviewpadFile) {
        self.workflows.extend(other.workflows.iter().cloned());
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.iter().any(|rule| rule.name == name)
    }
}

/// The document accepts a missing or empty `mode` (defaulting to silent)
/// but rejects unknown values early.
fn deserialize_mode<'de, D>(deserializer: D) -> Result<Mode, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.as_str() {
        "" | "silent" => Ok(Mode::Silent),
        "verbose" => Ok(Mode::Verbose),
        other => Err(serde::de::Error::custom(format!(
            "unknown mode {:?}: expected \"silent\" or \"verbose\"",
            other
        ))),
    }
}

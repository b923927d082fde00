//! Free-text DSL field normalization
//!
//! Rewrites every field carrying DSL source into the call form the parser
//! expects: a bare identifier becomes an implicit `$name()` call, anything
//! already in expression form passes through. Also injects the defaults
//! the surface syntax leaves out: rule kinds default to `patch`, workflow
//! `on` lists default to `[pull-request]`.
//!
//! The pass is idempotent.

use crate::config::{PadPipeline, PadRule, PadStage, PadWorkflow, PadWorkflowRule, ReviewpadFile, TargetKind};

pub(crate) fn transform(file: ReviewpadFile) -> ReviewpadFile {
    let rules = file
        .rules
        .into_iter()
        .map(|rule| PadRule {
            name: rule.name,
            kind: if rule.kind.is_empty() {
                "patch".to_string()
            } else {
                rule.kind
            },
            description: rule.description,
            spec: transform_expression(&rule.spec),
        })
        .collect();

    let workflows = file
        .workflows
        .into_iter()
        .map(|workflow| PadWorkflow {
            name: workflow.name,
            description: workflow.description,
            on: if workflow.on.is_empty() {
                vec![TargetKind::PullRequest]
            } else {
                workflow.on
            },
            non_normalized_rules: workflow.non_normalized_rules,
            rules: workflow
                .rules
                .into_iter()
                .map(|rule| PadWorkflowRule {
                    rule: rule.rule,
                    extra_actions: rule
                        .extra_actions
                        .iter()
                        .map(|action| transform_expression(action))
                        .collect(),
                })
                .collect(),
            actions: workflow
                .actions
                .iter()
                .map(|action| transform_expression(action))
                .collect(),
            always_run: workflow.always_run,
        })
        .collect();

    let pipelines = file
        .pipelines
        .into_iter()
        .map(|pipeline| PadPipeline {
            name: pipeline.name,
            description: pipeline.description,
            trigger: transform_expression(&pipeline.trigger),
            stages: pipeline
                .stages
                .into_iter()
                .map(|stage| PadStage {
                    actions: stage
                        .actions
                        .iter()
                        .map(|action| transform_expression(action))
                        .collect(),
                    until: transform_expression(&stage.until),
                })
                .collect(),
        })
        .collect();

    ReviewpadFile {
        version: file.version,
        edition: file.edition,
        mode: file.mode,
        ignore_errors: file.ignore_errors,
        imports: file.imports,
        labels: file.labels,
        groups: file.groups,
        rules,
        workflows,
        pipelines,
    }
}

/// Normalize one free-text DSL field
pub(crate) fn transform_expression(expression: &str) -> String {
    let trimmed = expression.trim();
    if is_bare_identifier(trimmed) {
        format!("${}()", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// A bare identifier is shorthand for a zero-argument call. Boolean
/// literals and anything starting with a digit are already expressions.
fn is_bare_identifier(s: &str) -> bool {
    if s == "true" || s == "false" {
        return false;
    }
    let Some(first) = s.chars().next() else {
        return false;
    };
    if first.is_ascii_digit() {
        return false;
    }
    s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

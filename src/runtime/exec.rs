//! Document execution
//!
//! Drives a canonical document against the interpreter: registers labels,
//! groups and rules, evaluates workflows and pipelines into a program, and
//! executes it.
//!
//! Workflows are evaluated in source order. Within a workflow every rule
//! predicate is evaluated independently (no cross-rule short-circuit);
//! actions from fired rules are appended in firing order, followed by the
//! workflow's own actions.

use crate::config::{PadWorkflow, PadWorkflowRule, ReviewpadFile};
use crate::error::RevpadError;
use crate::runtime::interpreter::Interpreter;
use crate::runtime::program::{Metadata, Program, Statement};
use crate::RevpadResult;
use tracing::debug;

/// Evaluate a document and execute everything it triggers
pub fn run_file(file: &ReviewpadFile, interpreter: &mut Interpreter) -> RevpadResult<()> {
    let program = build_program(file, interpreter)?;
    interpreter.exec_program(&program)
}

/// Evaluate a document's workflows and pipelines into a program without
/// executing it
pub fn build_program(
    file: &ReviewpadFile,
    interpreter: &mut Interpreter,
) -> RevpadResult<Program> {
    for (id, label) in &file.labels {
        let name = if label.name.is_empty() {
            id
        } else {
            &label.name
        };
        interpreter.process_label(id, name)?;
    }

    for group in &file.groups {
        interpreter.process_group(
            &group.name,
            group.kind,
            group.group_type,
            &group.spec,
            &group.param,
            &group.where_clause,
        )?;
    }

    for rule in &file.rules {
        interpreter.process_rule(&rule.name, &rule.spec)?;
    }

    let mut program = Program::new();
    let target_kind = interpreter.env.target_kind();

    for workflow in &file.workflows {
        if !workflow.on.contains(&target_kind) {
            debug!(workflow = %workflow.name, kind = %target_kind, "workflow does not apply to target kind");
            continue;
        }

        let mut triggered: Vec<PadWorkflowRule> = Vec::new();

        for workflow_rule in &workflow.rules {
            let rule = file
                .rules
                .iter()
                .find(|r| r.name == workflow_rule.rule)
                .ok_or_else(|| {
                    RevpadError::Engine(format!(
                        "workflow {} references unknown rule {}",
                        workflow.name, workflow_rule.rule
                    ))
                })?;

            let activated = interpreter.eval_expr(&rule.kind, &rule.spec)?;
            debug!(workflow = %workflow.name, rule = %rule.name, activated, "evaluated rule");

            if activated {
                for action in &workflow_rule.extra_actions {
                    program.append(Statement::new(
                        action.clone(),
                        Some(Metadata {
                            workflow: workflow.clone(),
                            triggered_by: vec![workflow_rule.clone()],
                        }),
                    ));
                }
                triggered.push(workflow_rule.clone());
            }
        }

        if !triggered.is_empty() || workflow.always_run {
            for action in &workflow.actions {
                program.append(Statement::new(
                    action.clone(),
                    Some(Metadata {
                        workflow: workflow.clone(),
                        triggered_by: triggered.clone(),
                    }),
                ));
            }
        }
    }

    for pipeline in &file.pipelines {
        let triggered =
            pipeline.trigger.is_empty() || interpreter.eval_expr("", &pipeline.trigger)?;
        if !triggered {
            continue;
        }

        // The first stage whose `until` predicate is false is the current
        // stage; stages with a true `until` are already complete.
        for stage in &pipeline.stages {
            let complete = !stage.until.is_empty() && interpreter.eval_expr("", &stage.until)?;
            if complete {
                continue;
            }

            let pseudo_workflow = PadWorkflow {
                name: pipeline.name.clone(),
                ..PadWorkflow::default()
            };
            for action in &stage.actions {
                program.append(Statement::new(
                    action.clone(),
                    Some(Metadata {
                        workflow: pseudo_workflow.clone(),
                        triggered_by: Vec::new(),
                    }),
                ));
            }
            break;
        }
    }

    Ok(program)
}

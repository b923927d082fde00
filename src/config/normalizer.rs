//! Inline-rule desugaring
//!
//! A workflow's raw rule list is heterogeneous: a bare string both names
//! and specifies a rule, a mapping references one and may attach extra
//! actions. Normalization materializes missing rules into the document and
//! leaves every workflow with a uniform rule list.

use crate::config::{PadRule, PadWorkflow, PadWorkflowRule, ReviewpadFile};
use crate::error::RevpadError;
use crate::RevpadResult;

pub(crate) fn process_inline_rules(file: &mut ReviewpadFile) -> RevpadResult<()> {
    for i in 0..file.workflows.len() {
        let workflow = file.workflows[i].clone();
        let (workflow, new_rules) = process_inline_rules_on_workflow(workflow, &file.rules)?;
        file.rules.extend(new_rules);
        file.workflows[i] = workflow;
    }
    Ok(())
}

fn process_inline_rules_on_workflow(
    mut workflow: PadWorkflow,
    current_rules: &[PadRule],
) -> RevpadResult<(PadWorkflow, Vec<PadRule>)> {
    let raw_rules = std::mem::take(&mut workflow.non_normalized_rules);
    let mut rules: Vec<PadRule> = Vec::new();

    for raw_rule in raw_rules {
        let (rule, workflow_rule) = match raw_rule {
            serde_yaml::Value::String(name) => {
                let workflow_rule = PadWorkflowRule {
                    rule: name.clone(),
                    extra_actions: Vec::new(),
                };
                (decode_rule(name), workflow_rule)
            }
            serde_yaml::Value::Mapping(_) => {
                let workflow_rule: PadWorkflowRule = serde_yaml::from_value(raw_rule)
                    .map_err(|e| RevpadError::Document(e.to_string()))?;
                (decode_rule(workflow_rule.rule.clone()), workflow_rule)
            }
            other => return Err(RevpadError::UnknownRuleType(value_kind(&other).to_string())),
        };

        // A materialized rule never shadows one the document already declares.
        let exists = current_rules.iter().any(|r| r.name == rule.name)
            || rules.iter().any(|r| r.name == rule.name);
        if !exists {
            rules.push(rule);
        }

        workflow.rules.push(workflow_rule);
    }

    Ok((workflow, rules))
}

fn decode_rule(name: String) -> PadRule {
    PadRule {
        spec: name.clone(),
        name,
        kind: "patch".to_string(),
        description: String::new(),
    }
}

fn value_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "bool",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged",
    }
}

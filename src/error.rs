use crate::config::TargetKind;
use std::fmt;

/// Error types for the revpad engine
///
/// Messages are stable: callers (and the report) rely on their exact text,
/// so variants render themselves rather than delegating to sources.
#[derive(Debug, Clone, PartialEq)]
pub enum RevpadError {
    /// The document could not be deserialized from its surface syntax
    Document(String),

    /// A DSL expression could not be parsed; carries the offending source
    Parse(String),

    /// Bottom-up type inference failed on a DSL expression
    TypeInference,

    /// A rule spec did not infer to a boolean
    NotACondition(String),

    /// A group spec did not infer to an array
    NotAGroup,

    /// The import graph contains a back-edge on the current descent path
    CyclicDependency,

    /// An inline workflow rule entry had an unrecognized shape
    UnknownRuleType(String),

    /// A referenced built-in is not registered (or not enabled by the mode)
    UnknownBuiltIn(String),

    /// A built-in was invoked against a target kind it does not support
    KindMismatch { name: String, kind: TargetKind },

    /// A built-in was called with the wrong number of arguments
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    /// An error propagated verbatim from host code
    Host(String),

    /// Engine error without a more specific kind
    Engine(String),
}

impl fmt::Display for RevpadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevpadError::Document(msg) => write!(f, "{}", msg),
            RevpadError::Parse(src) => {
                write!(f, "parse error: failed to build AST on input {}", src)
            }
            RevpadError::TypeInference => write!(f, "type inference failed"),
            RevpadError::NotACondition(src) => {
                write!(f, "expression {} is not a condition", src)
            }
            RevpadError::NotAGroup => write!(f, "expression is not a valid group"),
            RevpadError::CyclicDependency => write!(f, "loader: cyclic dependency"),
            RevpadError::UnknownRuleType(shape) => write!(f, "unknown rule type {}", shape),
            RevpadError::UnknownBuiltIn(name) => {
                write!(
                    f,
                    "no type for built-in {}. Please check if the mode in the reviewpad.yml file supports it.",
                    name
                )
            }
            RevpadError::KindMismatch { name, kind } => {
                write!(f, "built-in {} does not support target kind {}", name, kind)
            }
            RevpadError::ArityMismatch {
                name,
                expected,
                got,
            } => {
                write!(f, "{} expects {} arguments, got {}", name, expected, got)
            }
            RevpadError::Host(msg) => write!(f, "{}", msg),
            RevpadError::Engine(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RevpadError {}

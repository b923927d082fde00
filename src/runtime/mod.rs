//! Interpreter runtime: environment, built-ins, target facade, programs,
//! report and the execution driver.

pub mod builtins;
pub mod env;
pub mod exec;
pub mod interpreter;
pub mod program;
pub mod report;
pub mod target;

pub use builtins::{BuiltInAction, BuiltInFunction, BuiltIns};
pub use env::{build_internal_label_id, build_internal_rule_name, Env};
pub use exec::{build_program, run_file};
pub use interpreter::{build_group_ast, eval_expr, eval_group, Interpreter};
pub use program::{Metadata, Program, Statement};
pub use report::{Report, ReportFailure, ReportWorkflowDetails};
pub use target::Target;

//! # revpad
//!
//! **Policy engine for code-review automation**
//!
//! revpad loads a declarative document describing groups, labels, rules,
//! workflows and pipelines, resolves its remote imports, and interprets a
//! small strongly-typed expression language against a live pull request or
//! issue, producing side effects through a host-provided target facade.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use revpad::fakes::{FakeFetcher, FakeTarget};
//! use revpad::runtime::{run_file, BuiltIns, Env, Interpreter};
//!
//! fn main() -> revpad::RevpadResult<()> {
//!     let source = br#"
//! mode: silent
//! labels:
//!   small:
//!     description: Small change
//! rules:
//!   - name: is-small
//!     spec: $size() < 10
//! workflows:
//!   - name: triage
//!     rules:
//!       - is-small
//!     actions:
//!       - $addLabel("small")
//! "#;
//!
//!     let file = revpad::load(source, &FakeFetcher::new())?;
//!
//!     let target = Arc::new(FakeTarget::pull_request());
//!     let env = Env::new(target, BuiltIns::default_for(file.mode))
//!         .with_ignore_errors(file.ignore_errors);
//!     let mut interpreter = Interpreter::new(env);
//!
//!     run_file(&file, &mut interpreter)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Documents
//! A document declares everything the engine needs for one run. Imports
//! are resolved eagerly at load time and merged into a single canonical
//! document, deduplicated by the SHA-256 of their fetched bytes.
//!
//! ### Rules and workflows
//! Rules are named boolean expressions over the target. Workflows bind
//! rules to actions; every action that executes is recorded in the report
//! together with the rules that triggered it.
//!
//! ### The DSL
//! Predicates and actions are written in a small expression language with
//! literals, arrays, dictionaries, `$name(...)` calls into a typed
//! built-ins table, and short-circuiting boolean operators. Expressions
//! are type-checked before anything is evaluated.

pub mod config;
pub mod error;
pub mod fakes;
pub mod lang;
pub mod runtime;

pub use config::{load, Fetcher, HttpFetcher, Mode, ReviewpadFile, TargetKind};
pub use error::RevpadError;
pub use lang::{Expr, Type, Value};
pub use runtime::{Env, Interpreter, Report, Target};

/// Result type for revpad operations
pub type RevpadResult<T> = Result<T, RevpadError>;

#[cfg(test)]
mod tests;

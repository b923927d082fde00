
// Type system tests
mod inference;

// Evaluator tests
mod eval;



use crate::fakes::FakeTarget;
use crate::runtime::{BuiltIns, Env};
use std::sync::Arc;

/// An environment over a pull-request target with no built-ins registered
fn mock_env() -> Env {
    Env::new(Arc::new(FakeTarget::pull_request()), BuiltIns::new())
}

fn mock_env_with_built_ins(built_ins: BuiltIns) -> Env {
    Env::new(Arc::new(FakeTarget::pull_request()), built_ins)
}

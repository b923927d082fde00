//! The target facade
//!
//! The entity under evaluation (a pull request or an issue) is reached
//! exclusively through this trait; the engine never talks to the forge
//! directly. Accessors that only make sense for pull requests are guarded
//! by the `supported_kinds` of the built-ins that call them.

use crate::config::TargetKind;
use crate::RevpadResult;

pub trait Target {
    fn kind(&self) -> TargetKind;

    fn description(&self) -> RevpadResult<String>;
    fn author(&self) -> RevpadResult<String>;
    fn labels(&self) -> RevpadResult<Vec<String>>;

    /// Total changed lines (pull requests only)
    fn size(&self) -> RevpadResult<i64>;
    /// Extensions of the changed files, with leading dot (pull requests only)
    fn file_extensions(&self) -> RevpadResult<Vec<String>>;
    fn requested_reviewers(&self) -> RevpadResult<Vec<String>>;
    fn requested_teams(&self) -> RevpadResult<Vec<String>>;

    fn add_label(&self, name: &str) -> RevpadResult<()>;
    fn remove_label(&self, name: &str) -> RevpadResult<()>;
    fn comment(&self, body: &str) -> RevpadResult<()>;
    fn assign_reviewer(&self, login: &str) -> RevpadResult<()>;
    fn merge(&self, method: &str) -> RevpadResult<()>;
    fn close(&self) -> RevpadResult<()>;
}

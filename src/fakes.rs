//! In-memory fakes for the external collaborators (testing only)
//!
//! `FakeFetcher` serves import bodies from a URL map and `FakeTarget`
//! records every mutation so tests can assert on side effects without a
//! forge or a network.

use crate::config::{Fetcher, TargetKind};
use crate::error::RevpadError;
use crate::runtime::target::Target;
use crate::RevpadResult;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves registered bodies; unknown URLs fail like a dead host would
#[derive(Default)]
pub struct FakeFetcher {
    responses: HashMap<String, Vec<u8>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.responses.insert(url.into(), body.into());
        self
    }
}

impl Fetcher for FakeFetcher {
    fn fetch(&self, url: &str) -> RevpadResult<Vec<u8>> {
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| RevpadError::Host(format!("GET {}: no response registered", url)))
    }
}

/// A target with fixed metadata that records mutations
pub struct FakeTarget {
    kind: TargetKind,
    description: String,
    author: String,
    size: i64,
    file_extensions: Vec<String>,
    requested_reviewers: Vec<String>,
    requested_teams: Vec<String>,
    labels: Mutex<Vec<String>>,
    comments: Mutex<Vec<String>>,
    assigned_reviewers: Mutex<Vec<String>>,
    merged_with: Mutex<Option<String>>,
    closed: Mutex<bool>,
}

impl FakeTarget {
    pub fn pull_request() -> Self {
        Self::new(TargetKind::PullRequest)
    }

    pub fn issue() -> Self {
        Self::new(TargetKind::Issue)
    }

    fn new(kind: TargetKind) -> Self {
        Self {
            kind,
            description: String::new(),
            author: String::new(),
            size: 0,
            file_extensions: Vec::new(),
            requested_reviewers: Vec::new(),
            requested_teams: Vec::new(),
            labels: Mutex::new(Vec::new()),
            comments: Mutex::new(Vec::new()),
            assigned_reviewers: Mutex::new(Vec::new()),
            merged_with: Mutex::new(None),
            closed: Mutex::new(false),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_size(mut self, size: i64) -> Self {
        self.size = size;
        self
    }

    pub fn with_file_extensions(
        mut self,
        extensions: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.file_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_requested_reviewers(
        mut self,
        logins: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.requested_reviewers = logins.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_requested_teams(
        mut self,
        slugs: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.requested_teams = slugs.into_iter().map(Into::into).collect();
        self
    }

    pub fn added_labels(&self) -> Vec<String> {
        self.labels.lock().unwrap().clone()
    }

    pub fn comments(&self) -> Vec<String> {
        self.comments.lock().unwrap().clone()
    }

    pub fn assigned_reviewers(&self) -> Vec<String> {
        self.assigned_reviewers.lock().unwrap().clone()
    }

    pub fn merged_with(&self) -> Option<String> {
        self.merged_with.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.lock().unwrap()
    }
}

impl Target for FakeTarget {
    fn kind(&self) -> TargetKind {
        self.kind
    }

    fn description(&self) -> RevpadResult<String> {
        Ok(self.description.clone())
    }

    fn author(&self) -> RevpadResult<String> {
        Ok(self.author.clone())
    }

    fn labels(&self) -> RevpadResult<Vec<String>> {
        Ok(self.labels.lock().unwrap().clone())
    }

    fn size(&self) -> RevpadResult<i64> {
        Ok(self.size)
    }

    fn file_extensions(&self) -> RevpadResult<Vec<String>> {
        Ok(self.file_extensions.clone())
    }

    fn requested_reviewers(&self) -> RevpadResult<Vec<String>> {
        Ok(self.requested_reviewers.clone())
    }

    fn requested_teams(&self) -> RevpadResult<Vec<String>> {
        Ok(self.requested_teams.clone())
    }

    fn add_label(&self, name: &str) -> RevpadResult<()> {
        self.labels.lock().unwrap().push(name.to_string());
        Ok(())
    }

    fn remove_label(&self, name: &str) -> RevpadResult<()> {
        self.labels.lock().unwrap().retain(|label| label != name);
        Ok(())
    }

    fn comment(&self, body: &str) -> RevpadResult<()> {
        self.comments.lock().unwrap().push(body.to_string());
        Ok(())
    }

    fn assign_reviewer(&self, login: &str) -> RevpadResult<()> {
        self.assigned_reviewers.lock().unwrap().push(login.to_string());
        Ok(())
    }

    fn merge(&self, method: &str) -> RevpadResult<()> {
        *self.merged_with.lock().unwrap() = Some(method.to_string());
        Ok(())
    }

    fn close(&self) -> RevpadResult<()> {
        *self.closed.lock().unwrap() = true;
        Ok(())
    }
}

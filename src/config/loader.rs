//! Document loading
//!
//! Parses the surface syntax, resolves the import DAG depth-first with
//! cycle detection and content-hash dedup, then hands the merged document
//! to the normalizer and transformer.
//!
//! Import identity is the SHA-256 of the fetched bytes, not the URL:
//! mirror URLs serving identical bytes merge once, while URLs serving
//! different bytes stay distinct even when they share a path.

use crate::config::normalizer::process_inline_rules;
use crate::config::transform::transform;
use crate::config::ReviewpadFile;
use crate::error::RevpadError;
use crate::RevpadResult;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use tracing::debug;

/// Fetches import bodies. Injected so the engine owns no network policy
/// and tests can serve documents from memory.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> RevpadResult<Vec<u8>>;
}

/// Default [`Fetcher`] backed by a blocking HTTP client
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> RevpadResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| RevpadError::Host(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RevpadError::Host(format!(
                "GET {} returned {}",
                url,
                response.status()
            )));
        }

        let body = response
            .bytes()
            .map_err(|e| RevpadError::Host(e.to_string()))?;
        Ok(body.to_vec())
    }
}

/// Per-load import resolution state. `visited` is append-only for the
/// whole load; `stack` tracks the current descent path only.
struct LoadEnv {
    visited: HashSet<String>,
    stack: HashSet<String>,
}

fn hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Load a document: parse, resolve imports, desugar inline rules and
/// normalize free-text DSL fields.
pub fn load(data: &[u8], fetcher: &dyn Fetcher) -> RevpadResult<ReviewpadFile> {
    let mut file = parse_document(data)?;

    let root = hash(data);
    let mut env = LoadEnv {
        visited: HashSet::from([root.clone()]),
        stack: HashSet::from([root]),
    };

    process_imports(&mut file, &mut env, fetcher)?;
    process_inline_rules(&mut file)?;

    Ok(transform(file))
}

fn parse_document(data: &[u8]) -> RevpadResult<ReviewpadFile> {
    serde_yaml::from_slice(data).map_err(|e| RevpadError::Document(e.to_string()))
}

/// Inline every import into `file`, depth-first in declaration order.
///
/// Post-condition: `file.imports` is empty.
fn process_imports(
    file: &mut ReviewpadFile,
    env: &mut LoadEnv,
    fetcher: &dyn Fetcher,
) -> RevpadResult<()> {
    let imports = std::mem::take(&mut file.imports);

    for import in &imports {
        let body = fetcher.fetch(&import.url)?;
        let digest = hash(&body);

        if env.stack.contains(&digest) {
            return Err(RevpadError::CyclicDependency);
        }

        if env.visited.contains(&digest) {
            debug!(url = %import.url, "import content already merged, skipping");
            continue;
        }

        let mut sub_file = parse_document(&body)?;

        env.stack.insert(digest.clone());
        env.visited.insert(digest.clone());

        process_imports(&mut sub_file, env, fetcher)?;

        env.stack.remove(&digest);

        debug!(url = %import.url, "merging imported document");
        file.append_labels(&sub_file);
        file.append_groups(&sub_file);
        file.append_rules(&sub_file);
        file.append_workflows(&sub_file);
    }

    Ok(())
}

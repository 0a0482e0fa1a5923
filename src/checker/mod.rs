mod result;

pub use result::CheckResult;

use std::path::Path;

use tracing::debug;

use crate::assert::Query;
use crate::error::{Result, TreeGuardError};
use crate::node::{DEFAULT_TAG_KEY, Node};

pub trait Checker {
    /// Check a parsed tree against the configured rules.
    fn check(&self, path: &Path, tree: &Node) -> CheckResult;
}

/// Runs one compiled query over tree files.
///
/// Holds no per-check state, so a single checker may serve many threads.
#[derive(Debug)]
pub struct TreeChecker {
    query: Query,
    tag_key: String,
}

impl TreeChecker {
    #[must_use]
    pub fn new(query: Query) -> Self {
        Self {
            query,
            tag_key: DEFAULT_TAG_KEY.to_string(),
        }
    }

    #[must_use]
    pub fn with_tag_key(mut self, tag_key: impl Into<String>) -> Self {
        self.tag_key = tag_key.into();
        self
    }

    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }

    /// Parse `content` as a JSON tree and check it.
    ///
    /// # Errors
    /// Returns an error if the content is not JSON or its root has no tag.
    pub fn check_source(&self, path: &Path, content: &str) -> Result<CheckResult> {
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|source| TreeGuardError::TreeParse {
                path: path.to_path_buf(),
                source,
            })?;
        let tree = Node::from_json(value, &self.tag_key)?;
        Ok(self.check(path, &tree))
    }

    /// Read, parse and check one tree file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn check_file(&self, path: &Path) -> Result<CheckResult> {
        let content = std::fs::read_to_string(path).map_err(|source| TreeGuardError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.check_source(path, &content)
    }
}

impl Checker for TreeChecker {
    fn check(&self, path: &Path, tree: &Node) -> CheckResult {
        let findings = self.query.findings(tree);
        let result = CheckResult::new(path.to_path_buf(), findings);
        debug!(
            path = %path.display(),
            failures = result.failure_count(),
            "checked tree"
        );
        result
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

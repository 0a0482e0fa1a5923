use std::path::{Path, PathBuf};

use crate::assert::Finding;

/// Result of checking one tree against the configured rules.
///
/// `findings` holds one entry per rule outcome, passing ones included, in
/// rule order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    path: PathBuf,
    findings: Vec<Finding>,
}

impl CheckResult {
    #[must_use]
    pub const fn new(path: PathBuf, findings: Vec<Finding>) -> Self {
        Self { path, findings }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Findings whose rule did not hold.
    pub fn failures(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| !f.is_passing())
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.findings.iter().all(Finding::is_passing)
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        !self.is_passed()
    }
}

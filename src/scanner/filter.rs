use std::ffi::OsStr;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{Result, TreeGuardError};

use super::TREE_EXTENSION;

pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;
}

/// Selects serialized tree files, minus anything matched by an exclude glob.
///
/// Globs are tested against the walked path and against the same path
/// without a leading `./`, so `vendor/**` applies when scanning `.`.
pub struct TreeFileFilter {
    excludes: GlobSet,
}

impl TreeFileFilter {
    /// # Errors
    /// Returns an error if any exclude pattern is invalid.
    pub fn new(excludes: &[String]) -> Result<Self> {
        Ok(Self {
            excludes: exclude_set(excludes)?,
        })
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(".").unwrap_or(path);
        self.excludes.is_match(path) || self.excludes.is_match(relative)
    }
}

impl FileFilter for TreeFileFilter {
    fn should_include(&self, path: &Path) -> bool {
        let is_tree = path
            .extension()
            .and_then(OsStr::to_str)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(TREE_EXTENSION));
        is_tree && !self.is_excluded(path)
    }
}

/// Compile exclude globs into one set.
///
/// # Errors
/// Returns [`TreeGuardError::InvalidPattern`] naming the first bad glob.
pub fn exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| TreeGuardError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| TreeGuardError::InvalidPattern {
        pattern: patterns.join(", "),
        source,
    })
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;

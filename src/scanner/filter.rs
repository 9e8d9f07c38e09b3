use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{Result, SpellcheckError};

/// Predicate over a discovered filesystem entry (file or directory).
pub trait FileFilter: Send + Sync {
    fn should_include(&self, path: &Path) -> bool;
}

/// Rejects entries whose name starts with a dot.
#[derive(Debug, Clone, Copy, Default)]
pub struct HiddenFileFilter;

impl FileFilter for HiddenFileFilter {
    fn should_include(&self, path: &Path) -> bool {
        !path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('.'))
    }
}

/// Rejects entries matching any of a set of exclude globs.
///
/// A pattern is tried against the full path and against the bare file name,
/// so both `**/generated/**` and `*Test.java` behave as expected.
pub struct GlobFilter {
    exclude_patterns: GlobSet,
}

impl GlobFilter {
    /// Create a new filter with the given exclude patterns.
    ///
    /// # Errors
    /// Returns an error if any exclude pattern is invalid.
    pub fn new(exclude_patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude_patterns {
            let glob = Glob::new(pattern).map_err(|e| SpellcheckError::InvalidPattern {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        let exclude_patterns = builder
            .build()
            .map_err(|e| SpellcheckError::InvalidPattern {
                pattern: "combined patterns".to_string(),
                source: e,
            })?;

        Ok(Self { exclude_patterns })
    }

    fn is_excluded(&self, path: &Path) -> bool {
        if self.exclude_patterns.is_match(path) {
            return true;
        }
        path.file_name()
            .is_some_and(|name| self.exclude_patterns.is_match(name))
    }
}

impl FileFilter for GlobFilter {
    fn should_include(&self, path: &Path) -> bool {
        !self.is_excluded(path)
    }
}

/// Ordered set of filters; an entry passes only if every filter accepts it.
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn FileFilter>>,
}

impl FilterChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, filter: impl FileFilter + 'static) {
        self.filters.push(Box::new(filter));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl FileFilter for FilterChain {
    fn should_include(&self, path: &Path) -> bool {
        self.filters.iter().all(|f| f.should_include(path))
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;

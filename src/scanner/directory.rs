use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{trace, warn};
use walkdir::WalkDir;

use super::FileFilter;
use crate::error::Result;

/// Recursive directory walker that hands accepted regular files to a visitor
/// one at a time, as they are discovered.
///
/// Every entry below the root goes through the filter. A rejected directory is
/// pruned together with its subtree.
pub struct DirectoryScanner {
    filter: Arc<dyn FileFilter>,
    use_gitignore: bool,
}

impl DirectoryScanner {
    #[must_use]
    pub fn new(filter: Arc<dyn FileFilter>) -> Self {
        Self {
            filter,
            use_gitignore: false,
        }
    }

    #[must_use]
    pub fn with_gitignore(filter: Arc<dyn FileFilter>, use_gitignore: bool) -> Self {
        Self {
            filter,
            use_gitignore,
        }
    }

    /// Walk `root` and call `visit` for every accepted regular file.
    ///
    /// Returns the number of files visited. Entries that cannot be read are
    /// logged and skipped.
    ///
    /// # Errors
    /// Propagates the first error returned by `visit`, which stops the walk.
    pub fn visit<V>(&self, root: &Path, visit: V) -> Result<usize>
    where
        V: FnMut(PathBuf) -> Result<()>,
    {
        if self.use_gitignore {
            self.visit_with_gitignore(root, visit)
        } else {
            self.visit_without_gitignore(root, visit)
        }
    }

    fn visit_without_gitignore<V>(&self, root: &Path, mut visit: V) -> Result<usize>
    where
        V: FnMut(PathBuf) -> Result<()>,
    {
        let mut visited = 0;
        let walker = WalkDir::new(root)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || self.filter.should_include(e.path()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            trace!(path = %entry.path().display(), "Discovered file");
            visit(entry.into_path())?;
            visited += 1;
        }

        Ok(visited)
    }

    fn visit_with_gitignore<V>(&self, root: &Path, mut visit: V) -> Result<usize>
    where
        V: FnMut(PathBuf) -> Result<()>,
    {
        use ignore::WalkBuilder;

        let filter = Arc::clone(&self.filter);
        let walker = WalkBuilder::new(root)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .require_git(false)
            .hidden(false)
            .parents(false)
            .filter_entry(move |e| e.depth() == 0 || filter.should_include(e.path()))
            .build();

        let mut visited = 0;
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            trace!(path = %entry.path().display(), "Discovered file");
            visit(entry.into_path())?;
            visited += 1;
        }

        Ok(visited)
    }
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;

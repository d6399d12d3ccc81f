//! Partial template discovery.
//!
//! [`TemplateSource`] is the filesystem capability the partial registry needs:
//! list the templates under a directory, and read one. [`DirectoryScanner`] is
//! the on-disk implementation.
//!
//! # Ordering
//!
//! Results are sorted by their full path *string*, not by `Path` component
//! order and not by traversal order. For a tree containing
//! `sub/test3.hbs`, `test 2.hbs` and `test1.hbs` the order is exactly that:
//! `'s' < 't'`, and `"test "` sorts before `"test1"` because a space is below
//! every digit. Generated modules register partials in this order, so it must
//! be reproducible across runs and platforms.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::config::TemplateExtension;
use crate::core::{HbsImportError, Result};

/// Filesystem access needed to build a partial map.
///
/// Implemented by [`DirectoryScanner`]; tests substitute counting or
/// in-memory implementations.
pub trait TemplateSource {
    /// List every template under `base_dir` ending with `extension`, sorted by
    /// path string.
    ///
    /// # Errors
    ///
    /// [`HbsImportError::DirectoryNotFound`] if `base_dir` is missing or not a
    /// directory; [`HbsImportError::Io`] if traversal fails.
    fn scan(&self, base_dir: &Path, extension: &TemplateExtension) -> Result<Vec<PathBuf>>;

    /// Read a template's source text.
    ///
    /// # Errors
    ///
    /// [`HbsImportError::Io`] if the file cannot be read as UTF-8.
    fn read(&self, path: &Path) -> Result<String>;
}

/// Recursive on-disk template scanner.
///
/// Symbolic links are followed, so a linked file or directory inside the
/// partials directory behaves like a regular one.
///
/// # Examples
///
/// ```rust,no_run
/// use hbs_import::config::TemplateExtension;
/// use hbs_import::templating::scanner::{DirectoryScanner, TemplateSource};
/// use std::path::Path;
///
/// # fn example() -> hbs_import::core::Result<()> {
/// let files = DirectoryScanner::new().scan(Path::new("/site/partials"), &TemplateExtension::default())?;
/// for file in files {
///     println!("{}", file.display());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryScanner;

impl DirectoryScanner {
    /// Create a scanner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TemplateSource for DirectoryScanner {
    fn scan(&self, base_dir: &Path, extension: &TemplateExtension) -> Result<Vec<PathBuf>> {
        debug!("Scanning {} for *{} templates", base_dir.display(), extension);

        if !base_dir.is_dir() {
            return Err(HbsImportError::DirectoryNotFound {
                path: base_dir.to_path_buf(),
            });
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(base_dir).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(base_dir).to_path_buf();
                HbsImportError::io("scan directory", path, e.into())
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            if extension.matches(&file_name) {
                trace!("Found template: {}", entry.path().display());
                files.push(entry.into_path());
            }
        }

        files.sort_by_cached_key(|path| path.to_string_lossy().into_owned());

        debug!("Found {} template(s) in {}", files.len(), base_dir.display());
        Ok(files)
    }

    fn read(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| HbsImportError::io("read template", path, e))
    }
}

//! Cross-platform path helpers
//!
//! Partial names end up in generated JavaScript and must be identical no
//! matter which operating system produced the bundle. The helpers here turn
//! native paths into that host-independent form and resolve configured
//! directories to absolute paths.
//!
//! # Examples
//!
//! ```rust,no_run
//! use hbs_import::utils::platform::{normalize_path_for_storage, resolve_absolute};
//! use std::path::Path;
//!
//! # fn example() -> hbs_import::core::Result<()> {
//! assert_eq!(normalize_path_for_storage(Path::new("sub\\card.hbs")), "sub/card.hbs");
//! let partials = resolve_absolute(Path::new("src/partials"))?;
//! assert!(partials.is_absolute());
//! # Ok(())
//! # }
//! ```

use std::path::{Component, Path, PathBuf};

use crate::core::{HbsImportError, Result};

/// Normalizes a path by converting every separator to a forward slash.
///
/// Used for values that leave the process: partial names embedded in generated
/// modules and registered with the template engine. The output is identical
/// for the same logical path on every platform.
///
/// Windows extended-length prefixes produced by `canonicalize()` are stripped
/// before normalization.
///
/// # Examples
///
/// ```rust,no_run
/// use hbs_import::utils::platform::normalize_path_for_storage;
/// use std::path::Path;
///
/// assert_eq!(normalize_path_for_storage(Path::new("a\\b/c.hbs")), "a/b/c.hbs");
/// assert_eq!(normalize_path_for_storage(Path::new("test 2.hbs")), "test 2.hbs");
/// ```
#[must_use]
pub fn normalize_path_for_storage<P: AsRef<Path>>(path: P) -> String {
    let path_str = path.as_ref().to_string_lossy();

    let cleaned = if let Some(stripped) = path_str.strip_prefix(r"\\?\UNC\") {
        format!("//{}", stripped)
    } else if let Some(stripped) = path_str.strip_prefix(r"\\?\") {
        stripped.to_string()
    } else {
        path_str.to_string()
    };

    cleaned.replace('\\', "/")
}

/// Resolves a possibly relative path against the current working directory.
///
/// The path does not have to exist. `.` and `..` components are collapsed
/// lexically, without following symlinks, so `/site/views/../partials` and
/// `/site/partials` resolve to the same path. Matches how bundler
/// configurations resolve relative directories at plugin construction time.
///
/// # Errors
///
/// Returns [`HbsImportError::Io`] if the current directory cannot be read.
pub fn resolve_absolute(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)
        .map_err(|e| HbsImportError::io("resolve absolute path", path, e))?;
    Ok(normalize_lexically(&absolute))
}

/// Collapses `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root.
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Checks whether `path` lies inside `dir`, comparing normalized path strings.
///
/// Both sides are normalized with [`normalize_path_for_storage`] and compared
/// component-wise, so `C:\site\partials\a.hbs` is inside `C:/site/partials`
/// while `/site/partials-old/a.hbs` is not inside `/site/partials`.
#[must_use]
pub fn is_within_directory(path: &Path, dir: &Path) -> bool {
    let path = normalize_path_for_storage(path);
    let dir = normalize_path_for_storage(dir);
    let dir = dir.trim_end_matches('/');

    match path.strip_prefix(dir) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

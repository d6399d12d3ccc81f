//! Partial name derivation.
//!
//! A partial's name is its path relative to the partials directory, with
//! forward-slash separators and the template extension removed:
//!
//! | File (base `/site/partials`) | Partial name |
//! |------------------------------|--------------|
//! | `/site/partials/test1.hbs` | `test1` |
//! | `/site/partials/test 2.hbs` | `test 2` |
//! | `/site/partials/sub/test3.hbs` | `sub/test3` |
//!
//! Case is preserved. Templates reference the partial with `{{> sub/test3}}`.

use std::path::Path;

use crate::config::TemplateExtension;
use crate::core::{HbsImportError, Result};
use crate::utils::platform::normalize_path_for_storage;

/// Name under which a partial is registered.
pub type PartialName = String;

/// Derive the partial name for `file_path` relative to `base_dir`.
///
/// Only one trailing occurrence of `extension` is removed, so
/// `card.hbs.hbs` becomes `card.hbs`.
///
/// # Errors
///
/// Returns [`HbsImportError::InvalidPath`] if `file_path` is not inside
/// `base_dir`. Scanned paths always are; the check guards direct callers.
///
/// # Examples
///
/// ```rust,no_run
/// use hbs_import::config::TemplateExtension;
/// use hbs_import::templating::naming::partial_name;
/// use std::path::Path;
///
/// # fn example() -> hbs_import::core::Result<()> {
/// let ext = TemplateExtension::default();
/// let name = partial_name(Path::new("/site/partials"), Path::new("/site/partials/sub/test3.hbs"), &ext)?;
/// assert_eq!(name, "sub/test3");
/// # Ok(())
/// # }
/// ```
pub fn partial_name(
    base_dir: &Path,
    file_path: &Path,
    extension: &TemplateExtension,
) -> Result<PartialName> {
    let relative = file_path.strip_prefix(base_dir).map_err(|_| HbsImportError::InvalidPath {
        path: file_path.to_path_buf(),
        base: base_dir.to_path_buf(),
    })?;

    let normalized = normalize_path_for_storage(relative);
    let name = match normalized.strip_suffix(extension.as_str()) {
        Some(stem) => stem.to_string(),
        None => normalized,
    };

    tracing::trace!("Derived partial name '{}' from {}", name, file_path.display());
    Ok(name)
}

//! Reaction to file-change notifications.
//!
//! A changed partial can affect any template that references it, directly or
//! through other partials, and that set is not tracked. A change under the
//! partials directory therefore invalidates the partial cache and asks the host
//! for a full reload instead of a targeted hot update.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::templating::compiler::TemplateCompiler;
use crate::templating::registry::PartialRegistry;
use crate::templating::scanner::TemplateSource;
use crate::utils::{is_within_directory, resolve_absolute};

/// Host operations the reactor triggers.
///
/// Implemented by the bundler integration. Calls arrive in the order
/// [`invalidate_all_modules`](Self::invalidate_all_modules), then
/// [`full_reload`](Self::full_reload).
pub trait HotUpdateHost {
    /// Mark every module in the host's dependency graph as stale.
    fn invalidate_all_modules(&mut self);

    /// Ask connected clients to reload the whole page.
    fn full_reload(&mut self);
}

/// What a change notification resulted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotUpdateOutcome {
    /// The path is not a partial; nothing was touched
    Ignored,
    /// The cache was invalidated and a full reload requested
    FullReload,
}

/// Watches for changes under one partials directory.
#[derive(Debug, Clone, Default)]
pub struct ChangeReactor {
    partials_dir: Option<PathBuf>,
}

impl ChangeReactor {
    /// Create a reactor for `partials_dir`; `None` ignores every change.
    #[must_use]
    pub fn new(partials_dir: Option<PathBuf>) -> Self {
        Self { partials_dir }
    }

    /// The directory changes are matched against.
    #[must_use]
    pub fn partials_dir(&self) -> Option<&Path> {
        self.partials_dir.as_deref()
    }

    /// Handle a changed file.
    ///
    /// If `path` lies under the partials directory the registry is
    /// invalidated, then the host is told to invalidate its modules and to
    /// reload. Otherwise nothing happens.
    pub fn on_file_changed<S: TemplateSource, C: TemplateCompiler>(
        &self,
        path: &Path,
        registry: &mut PartialRegistry<S, C>,
        host: &mut dyn HotUpdateHost,
    ) -> HotUpdateOutcome {
        let Some(partials_dir) = self.partials_dir.as_deref() else {
            return HotUpdateOutcome::Ignored;
        };

        let path = resolve_absolute(path).unwrap_or_else(|_| path.to_path_buf());
        if !is_within_directory(&path, partials_dir) {
            debug!("Ignoring change outside partials directory: {}", path.display());
            return HotUpdateOutcome::Ignored;
        }

        info!("Partial changed: {}, reloading", path.display());
        registry.invalidate();
        host.invalidate_all_modules();
        host.full_reload();
        HotUpdateOutcome::FullReload
    }
}

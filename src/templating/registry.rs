//! Cache-backed partial resolution.
//!
//! [`PartialRegistry`] answers "which partials exist for this configuration,
//! and what is their compiled form?". Every transform of a template with
//! partial dependents asks this question, so the answer is cached until
//! [`PartialRegistry::invalidate`] is called, normally by the change reactor
//! when a file under the partials directory changes.
//!
//! # Resolution
//!
//! On a cache miss the registry:
//!
//! 1. Scans the partials directory through its [`TemplateSource`]
//! 2. Derives each file's partial name with [`partial_name`]
//! 3. Reads and precompiles each file through its [`TemplateCompiler`]
//! 4. Stores the resulting [`PartialMap`], preserving scan order
//!
//! A hit returns the stored map without touching the filesystem or the
//! compiler.
//!
//! # Examples
//!
//! ```rust,no_run
//! use hbs_import::config::{CompileOptions, TemplateExtension};
//! use hbs_import::templating::PartialRegistry;
//! use std::path::Path;
//!
//! # fn example() -> hbs_import::core::Result<()> {
//! let mut registry = PartialRegistry::new();
//! let ext = TemplateExtension::default();
//! let partials = registry.get(&ext, Some(Path::new("/site/partials")), &CompileOptions::default())?;
//! for name in partials.names() {
//!     println!("{name}");
//! }
//!
//! // A partial changed on disk
//! registry.invalidate();
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{CompileOptions, TemplateExtension};
use crate::core::Result;
use crate::templating::cache::{CacheStats, PartialCache, PartialCacheKey};
use crate::templating::compiler::{HandlebarsCompiler, PrecompiledTemplate, TemplateCompiler};
use crate::templating::naming::{PartialName, partial_name};
use crate::templating::scanner::{DirectoryScanner, TemplateSource};
use crate::utils::resolve_absolute;

/// Compiled partials in scan order.
///
/// Names are unique: each comes from a distinct file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialMap {
    entries: Vec<(PartialName, PrecompiledTemplate)>,
}

impl PartialMap {
    /// Look up a partial by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PrecompiledTemplate> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    /// Iterate entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PrecompiledTemplate)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t))
    }

    /// Partial names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(PartialName, PrecompiledTemplate)> for PartialMap {
    fn from_iter<I: IntoIterator<Item = (PartialName, PrecompiledTemplate)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Process-scoped owner of the partial cache.
///
/// Generic over the filesystem and compiler capabilities; the defaults are the
/// on-disk [`DirectoryScanner`] and the [`HandlebarsCompiler`]. Mutation goes
/// through `&mut self`: hosts that transform in parallel own one registry per
/// worker.
#[derive(Debug)]
pub struct PartialRegistry<S = DirectoryScanner, C = HandlebarsCompiler> {
    source: S,
    compiler: C,
    cache: PartialCache,
}

impl PartialRegistry {
    /// Create a registry backed by the filesystem and the Handlebars compiler.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(DirectoryScanner::new(), HandlebarsCompiler::new())
    }
}

impl Default for PartialRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TemplateSource, C: TemplateCompiler> PartialRegistry<S, C> {
    /// Create a registry from explicit capabilities.
    pub fn with_parts(source: S, compiler: C) -> Self {
        Self {
            source,
            compiler,
            cache: PartialCache::new(),
        }
    }

    /// Get the partial map for a configuration.
    ///
    /// `base_dir == None` means partials are disabled: an empty map is
    /// returned and the cache is neither read nor written.
    ///
    /// # Errors
    ///
    /// On a cache miss, any scan, read, naming or compile failure is returned
    /// and nothing is cached.
    pub fn get(
        &mut self,
        extension: &TemplateExtension,
        base_dir: Option<&Path>,
        options: &CompileOptions,
    ) -> Result<Arc<PartialMap>> {
        let Some(base_dir) = base_dir else {
            return Ok(Arc::new(PartialMap::default()));
        };

        let base_dir = resolve_absolute(base_dir)?;
        let key = PartialCacheKey::new(extension, &base_dir, options);

        if let Some(map) = self.cache.get(&key) {
            debug!("Partial cache hit for {} ({} partials)", base_dir.display(), map.len());
            return Ok(map);
        }

        debug!("Partial cache miss for {}", base_dir.display());
        let map = Arc::new(self.load(extension, &base_dir, options)?);
        info!("Compiled {} partial(s) from {}", map.len(), base_dir.display());

        self.cache.insert(key, Arc::clone(&map));
        Ok(map)
    }

    /// Drop every cached partial map. Idempotent.
    pub fn invalidate(&mut self) {
        if !self.cache.is_empty() {
            debug!("Invalidating partial cache");
        }
        self.cache.clear();
    }

    /// Cache activity since the last invalidation.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// The compiler partials are compiled with.
    pub fn compiler(&self) -> &C {
        &self.compiler
    }

    fn load(
        &self,
        extension: &TemplateExtension,
        base_dir: &Path,
        options: &CompileOptions,
    ) -> Result<PartialMap> {
        self.source
            .scan(base_dir, extension)?
            .into_iter()
            .map(|path| {
                let name = partial_name(base_dir, &path, extension)?;
                let source = self.source.read(&path)?;
                let compiled =
                    self.compiler.precompile(&path.display().to_string(), &source, options)?;
                Ok((name, compiled))
            })
            .collect()
    }
}

//! Partial map cache.
//!
//! Scanning the partials directory and compiling every partial is the
//! expensive part of a transform, and every template with partial dependents
//! needs the result. The cache keeps one [`PartialMap`] per configuration until
//! the registry is invalidated.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{CompileOptions, TemplateExtension};
use crate::templating::registry::PartialMap;

/// Cache key for a compiled partial map.
///
/// Uniquely identifies a configuration by:
/// - The template extension the directory was scanned with
/// - The absolute partials directory
/// - The compile options the partials were compiled under
///
/// Two plugin instances configured differently in one process therefore never
/// see each other's partials.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct PartialCacheKey {
    extension: TemplateExtension,
    directory: PathBuf,
    options: CompileOptions,
}

impl PartialCacheKey {
    pub(crate) fn new(
        extension: &TemplateExtension,
        directory: &Path,
        options: &CompileOptions,
    ) -> Self {
        Self {
            extension: extension.clone(),
            directory: directory.to_path_buf(),
            options: options.clone(),
        }
    }
}

/// Snapshot of cache activity since the last invalidation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: usize,
    /// Lookups that required a scan
    pub misses: usize,
    /// Partial maps currently cached
    pub entries: usize,
}

impl CacheStats {
    /// Hit rate as a percentage; `0.0` before any lookup.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Compiled partial maps keyed by configuration.
///
/// Lifecycle: empty, filled lazily by the registry, emptied by [`clear`],
/// refilled lazily.
///
/// [`clear`]: PartialCache::clear
#[derive(Debug, Default)]
pub(crate) struct PartialCache {
    cache: HashMap<PartialCacheKey, Arc<PartialMap>>,
    hits: usize,
    misses: usize,
}

impl PartialCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Get the cached map for `key`, counting the lookup.
    pub(crate) fn get(&mut self, key: &PartialCacheKey) -> Option<Arc<PartialMap>> {
        if let Some(map) = self.cache.get(key) {
            self.hits += 1;
            Some(Arc::clone(map))
        } else {
            self.misses += 1;
            None
        }
    }

    pub(crate) fn insert(&mut self, key: PartialCacheKey, map: Arc<PartialMap>) {
        self.cache.insert(key, map);
    }

    /// Drop every entry and reset the counters. Safe to call when empty.
    pub(crate) fn clear(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub(crate) fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.cache.len(),
        }
    }
}

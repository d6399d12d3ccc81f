//! Instrumented capability implementations
//!
//! These wrap the real scanner and compiler and count how often they are
//! used, so tests can assert that cached paths never touch the filesystem.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::{CompileOptions, TemplateExtension};
use crate::core::Result;
use crate::plugin::HotUpdateHost;
use crate::templating::compiler::{HandlebarsCompiler, PrecompiledTemplate, TemplateCompiler};
use crate::templating::scanner::{DirectoryScanner, TemplateSource};

/// [`DirectoryScanner`] that counts scans and reads.
#[derive(Debug, Default)]
pub struct CountingSource {
    inner: DirectoryScanner,
    scans: AtomicUsize,
    reads: AtomicUsize,
}

impl CountingSource {
    pub fn scans(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl TemplateSource for CountingSource {
    fn scan(&self, base_dir: &Path, extension: &TemplateExtension) -> Result<Vec<PathBuf>> {
        self.scans.fetch_add(1, Ordering::SeqCst);
        self.inner.scan(base_dir, extension)
    }

    fn read(&self, path: &Path) -> Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read(path)
    }
}

/// [`HandlebarsCompiler`] that counts precompile calls.
#[derive(Debug, Default)]
pub struct CountingCompiler {
    inner: HandlebarsCompiler,
    compiles: AtomicUsize,
}

impl CountingCompiler {
    pub fn compiles(&self) -> usize {
        self.compiles.load(Ordering::SeqCst)
    }
}

impl TemplateCompiler for CountingCompiler {
    fn precompile(
        &self,
        template: &str,
        source: &str,
        options: &CompileOptions,
    ) -> Result<PrecompiledTemplate> {
        self.compiles.fetch_add(1, Ordering::SeqCst);
        self.inner.precompile(template, source, options)
    }
}

/// A call received by [`RecordingHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    InvalidateAllModules,
    FullReload,
}

/// [`HotUpdateHost`] that records the calls it receives, in order.
#[derive(Debug, Default)]
pub struct RecordingHost {
    events: Vec<HostEvent>,
}

impl RecordingHost {
    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }
}

impl HotUpdateHost for RecordingHost {
    fn invalidate_all_modules(&mut self) {
        self.events.push(HostEvent::InvalidateAllModules);
    }

    fn full_reload(&mut self) {
        self.events.push(HostEvent::FullReload);
    }
}

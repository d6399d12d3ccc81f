//! Test utilities for hbs-import
//!
//! This module provides utilities for writing tests: temporary partial trees,
//! instrumented scanner/compiler implementations, a recording hot-update host,
//! and one-time logging setup.
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration suite.
//!
//! # Example
//!
//! ```rust,no_run
//! use hbs_import::config::{CompileOptions, TemplateExtension};
//! use hbs_import::templating::PartialRegistry;
//! use hbs_import::test_utils::{CountingCompiler, CountingSource, PartialsFixture};
//!
//! let fixture = PartialsFixture::new().unwrap();
//! let mut registry =
//!     PartialRegistry::with_parts(CountingSource::default(), CountingCompiler::default());
//! let ext = TemplateExtension::default();
//!
//! registry.get(&ext, Some(fixture.partials_dir()), &CompileOptions::default()).unwrap();
//! ```

pub mod fixtures;
pub mod stubs;

pub use fixtures::{PartialsFixture, TEST1_PARTIAL, TEST2_PARTIAL, TEST3_PARTIAL};
pub use stubs::{CountingCompiler, CountingSource, HostEvent, RecordingHost};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` if given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=hbs_import=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

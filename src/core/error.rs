//! Error handling for hbs-import
//!
//! Every fallible library operation returns [`HbsImportError`]. The variants map
//! one-to-one onto the failure modes a host build tool has to surface:
//!
//! - **Partials directory**: [`HbsImportError::DirectoryNotFound`]
//! - **Template source**: [`HbsImportError::TemplateSyntax`], [`HbsImportError::Render`]
//! - **Path derivation**: [`HbsImportError::InvalidPath`]
//! - **Document context**: [`HbsImportError::ContextResolution`]
//! - **File system**: [`HbsImportError::Io`]
//!
//! Nothing in this crate retries or recovers silently. Errors propagate to the
//! caller, which is normally the host's transform pipeline, and the host decides
//! how to report the build failure.
//!
//! # Examples
//!
//! ```rust,no_run
//! use hbs_import::core::HbsImportError;
//!
//! fn report(error: &HbsImportError) {
//!     match error {
//!         HbsImportError::TemplateSyntax { template, line, .. } => {
//!             eprintln!("{template} failed to compile (line {line:?})");
//!         }
//!         HbsImportError::DirectoryNotFound { path } => {
//!             eprintln!("partials directory {} is missing", path.display());
//!         }
//!         other => eprintln!("{other}"),
//!     }
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// The error type for all partial-resolution, transform and render operations.
///
/// # Error Categories
///
/// ## Configuration and File System
/// - [`DirectoryNotFound`] - The configured partials directory is missing
/// - [`InvalidPath`] - A file handed to the namer lies outside its base directory
/// - [`Io`] - Reading a template or walking a directory failed
///
/// ## Templates
/// - [`TemplateSyntax`] - The engine rejected a template or HTML document
/// - [`Render`] - The engine failed while evaluating an already valid template
///
/// ## Document Rendering
/// - [`ContextResolution`] - The deferred context producer failed
///
/// [`DirectoryNotFound`]: HbsImportError::DirectoryNotFound
/// [`InvalidPath`]: HbsImportError::InvalidPath
/// [`Io`]: HbsImportError::Io
/// [`TemplateSyntax`]: HbsImportError::TemplateSyntax
/// [`Render`]: HbsImportError::Render
/// [`ContextResolution`]: HbsImportError::ContextResolution
#[derive(Error, Debug)]
pub enum HbsImportError {
    /// Partials directory does not exist or is not a directory
    ///
    /// Raised by the directory scanner before any traversal happens. Not
    /// retried: a missing directory is a configuration problem.
    #[error("Partials directory not found: {}", path.display())]
    DirectoryNotFound {
        /// The directory that was requested
        path: PathBuf,
    },

    /// Template or HTML document failed to compile
    ///
    /// Carries the engine's own diagnostic. `line` is filled in when the
    /// diagnostic names a position.
    #[error("Template syntax error in '{template}': {message}")]
    TemplateSyntax {
        /// File path, module id or partial name of the offending template
        template: String,
        /// Diagnostic produced by the template engine
        message: String,
        /// 1-indexed line number if the engine reported one
        line: Option<usize>,
    },

    /// File is not a descendant of the directory it was named against
    #[error("Path '{}' is not inside '{}'", path.display(), base.display())]
    InvalidPath {
        /// The file that was being named
        path: PathBuf,
        /// The base directory it was expected to live under
        base: PathBuf,
    },

    /// The deferred document context failed to produce a value
    ///
    /// Rendering is aborted and no partial output is returned.
    #[error("Failed to resolve template context")]
    ContextResolution {
        /// Error returned by the context producer
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The template engine failed while rendering a valid template
    ///
    /// Typical causes are strict-mode lookups of missing fields and helpers
    /// returning an error.
    #[error("Template rendering failed: {message}")]
    Render {
        /// Diagnostic produced by the template engine
        message: String,
    },

    /// File system operation failed
    #[error("File system error while trying to {operation}: {}", path.display())]
    Io {
        /// What was being attempted (e.g. "read template", "scan directory")
        operation: String,
        /// The path involved
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HbsImportError {
    /// Wrap an I/O error with the operation and path it occurred on.
    pub(crate) fn io(
        operation: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from the template engine rejecting source text.
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, Self::TemplateSyntax { .. })
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HbsImportError>;

//! Partial resolution, module generation and document rendering.
//!
//! # Overview
//!
//! A template file is turned into a JavaScript module in four steps:
//!
//! 1. The file's source is validated by the [`TemplateCompiler`]
//! 2. The [`PartialRegistry`] returns every partial under the partials
//!    directory, compiled, from its cache when possible
//! 3. The [`ModuleEmitter`] writes a module registering those partials and
//!    exporting the compiled template
//! 4. The host bundles the module like any other
//!
//! The HTML entry document takes a different route: the
//! [`DocumentRenderer`] renders it in-process against a data context, with
//! the same partials and any user-supplied helpers.
//!
//! # Modules
//!
//! - [`naming`] - Partial names from file paths (`sub/test3.hbs` → `sub/test3`)
//! - [`scanner`] - Recursive, deterministically ordered template discovery
//! - [`compiler`] - The template engine boundary and precompiled form
//! - [`cache`] - Partial maps keyed by configuration, with hit/miss stats
//! - [`registry`] - Cache-backed partial resolution and invalidation
//! - [`emitter`] - Byte-deterministic module source generation
//! - [`renderer`] - Async HTML rendering with first-registration-wins merging
//! - [`helpers`] - User helper functions and their engine adapter
//! - [`context`] - Plain or deferred render contexts
//!
//! # Partials
//!
//! Templates reference partials by their path relative to the partials
//! directory, without extension:
//!
//! ```handlebars
//! <main>
//!     {{> layout/header}}
//!     {{> test1}}
//! </main>
//! ```

pub mod cache;
pub mod compiler;
pub mod context;
pub mod emitter;
pub mod helpers;
pub mod naming;
pub mod registry;
pub mod renderer;
pub mod scanner;

pub use cache::CacheStats;
pub use compiler::{HandlebarsCompiler, PrecompiledTemplate, TemplateCompiler};
pub use context::ContextSource;
pub use emitter::ModuleEmitter;
pub use helpers::{HelperMap, TemplateHelper};
pub use naming::{PartialName, partial_name};
pub use registry::{PartialMap, PartialRegistry};
pub use renderer::DocumentRenderer;
pub use scanner::{DirectoryScanner, TemplateSource};

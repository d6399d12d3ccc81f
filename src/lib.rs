//! hbs-import - Handlebars import transform for JavaScript bundlers
//!
//! A build-tool plugin, delivered as a library, that turns Handlebars template
//! files into self-contained JavaScript modules. Each generated module
//! registers every partial found under a configured partials directory and then
//! exports the compiled template, so application code can simply
//! `import render from './view.hbs'`.
//!
//! # Architecture Overview
//!
//! The host bundler drives the plugin through three hooks:
//!
//! - **Per-file transform**: a `.hbs` module id goes in, generated module source
//!   comes out
//! - **HTML entry transform**: the entry document is rendered in-process against
//!   a data context with user-supplied helpers
//! - **Hot update**: a change under the partials directory invalidates the
//!   partial cache and forces a full reload
//!
//! Scanning and compiling partials is the expensive part. It happens once per
//! configuration and is cached until a partial changes.
//!
//! ## Key Features
//!
//! - **Deterministic output**: equal inputs produce byte-identical modules, so
//!   host build caches stay valid
//! - **Reproducible ordering**: partials register in absolute path string order
//!   on every platform
//! - **Cross-platform names**: partial names always use `/` separators
//! - **Optimized registration**: optional guards skip re-registering partials
//!   that another module already registered
//!
//! # Core Modules
//!
//! - [`config`] - Plugin options, compile options and TOML loading
//! - [`core`] - Error types
//! - [`templating`] - Partial resolution, caching, code generation, rendering
//! - [`plugin`] - The host-facing plugin object and hot-update handling
//! - [`utils`] - Cross-platform path helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use hbs_import::config::{PluginOptions, TransformIndexHtmlOptions};
//! use hbs_import::plugin::HandlebarsImportPlugin;
//! use hbs_import::templating::{ContextSource, HelperMap, TemplateHelper};
//! use serde_json::{Value, json};
//!
//! # async fn example() -> hbs_import::core::Result<()> {
//! let mut helpers = HelperMap::new();
//! helpers.insert(
//!     "upper-case".to_string(),
//!     TemplateHelper::new(|params| {
//!         let text = params.first().and_then(Value::as_str).unwrap_or_default();
//!         Ok(Value::String(text.to_uppercase()))
//!     }),
//! );
//!
//! let options = PluginOptions {
//!     template_file_extension: Some(".handlebars".to_string()),
//!     partials_directory_path: Some("src/partials".into()),
//!     ..Default::default()
//! }
//! .with_index_html(TransformIndexHtmlOptions {
//!     context: Some(ContextSource::deferred(|| async { Ok(json!({ "keyword": "static" })) })),
//!     helpers,
//! });
//!
//! let mut plugin = HandlebarsImportPlugin::new(options)?;
//!
//! let module = plugin.transform("/src/views/home.handlebars", "<main>{{> header}}</main>")?;
//! let html = plugin.transform_index_html("<h1>{{upper-case keyword}}</h1>").await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File
//!
//! ```toml
//! templateFileExtension = ".handlebars"
//! partialsDirectoryPath = "src/partials"
//! optimizePartialRegistration = true
//!
//! [compileOptions]
//! strict = true
//! ```

pub mod config;
pub mod core;
pub mod plugin;
pub mod templating;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

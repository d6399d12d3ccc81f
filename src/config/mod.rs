//! Configuration management for hbs-import
//!
//! A plugin instance is configured once, at construction, from
//! [`PluginOptions`]. Every option is optional and missing options degrade to
//! "feature disabled" rather than to an error:
//!
//! | Option | Default | Effect when unset |
//! |--------|---------|-------------------|
//! | `templateFileExtension` | `.hbs` | - |
//! | `partialsDirectoryPath` | none | no partials are scanned or registered |
//! | `optimizePartialRegistration` | `false` | registrations are unguarded |
//! | `compileOptions` | `{}` | engine defaults |
//! | `transform_index_html_options` | none | HTML is rendered with `{}` and no extra helpers |
//!
//! # Modules
//!
//! - `compile_options` - The option object forwarded to the template compiler
//! - `parser` - Generic TOML parsing with file-path error context
//!
//! # Configuration Files
//!
//! Hosts that keep plugin settings on disk can use a TOML file with the same
//! camelCase keys:
//!
//! ```toml
//! templateFileExtension = ".handlebars"
//! partialsDirectoryPath = "src/partials"
//! optimizePartialRegistration = true
//!
//! [compileOptions]
//! strict = true
//! knownHelpers = { "upper-case" = true }
//! ```
//!
//! The document context and helper functions cannot be expressed in a file;
//! they are attached programmatically through
//! [`PluginOptions::transform_index_html_options`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use hbs_import::config::{PluginOptions, TemplateExtension};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let options = PluginOptions::load("hbs-import.toml").await?;
//! let extension = TemplateExtension::decide(options.template_file_extension.as_deref());
//! println!("transforming *{extension}");
//! # Ok(())
//! # }
//! ```

pub mod compile_options;
pub mod parser;

pub use compile_options::CompileOptions;
pub use parser::parse_config;

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::templating::context::ContextSource;
use crate::templating::helpers::HelperMap;

/// Extension used when none is configured.
pub const DEFAULT_TEMPLATE_EXTENSION: &str = ".hbs";

/// A normalized template file extension, always beginning with `.`.
///
/// # Examples
///
/// ```rust,no_run
/// use hbs_import::config::TemplateExtension;
///
/// assert_eq!(TemplateExtension::decide(None).as_str(), ".hbs");
/// assert_eq!(TemplateExtension::decide(Some(".html")).as_str(), ".html");
/// assert_eq!(TemplateExtension::decide(Some("html")).as_str(), ".html");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateExtension(String);

impl TemplateExtension {
    /// Derive the extension from an optional user-supplied value.
    ///
    /// `None` yields `.hbs`; a value without a leading dot gets one.
    #[must_use]
    pub fn decide(configured: Option<&str>) -> Self {
        match configured {
            None => Self(DEFAULT_TEMPLATE_EXTENSION.to_string()),
            Some(ext) if ext.starts_with('.') => Self(ext.to_string()),
            Some(ext) => Self(format!(".{ext}")),
        }
    }

    /// The extension including its leading dot.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a module id or file name ends with this extension.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        name.ends_with(&self.0)
    }
}

impl Default for TemplateExtension {
    fn default() -> Self {
        Self::decide(None)
    }
}

impl fmt::Display for TemplateExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TemplateExtension {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Options for the HTML entry document transform.
///
/// Holds values that only exist at runtime (closures, async producers), so it
/// is never read from or written to configuration files.
#[derive(Clone, Default)]
pub struct TransformIndexHtmlOptions {
    /// Data the document is rendered against; `None` renders with `{}`
    pub context: Option<ContextSource>,
    /// Helpers made available to the document, first registration wins
    pub helpers: HelperMap,
}

impl fmt::Debug for TransformIndexHtmlOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformIndexHtmlOptions")
            .field("context", &self.context)
            .field("helpers", &self.helpers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Plugin construction options.
///
/// Field names serialize as camelCase to match bundler configuration
/// conventions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginOptions {
    /// File suffix identifying templates; normalized by [`TemplateExtension::decide`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_file_extension: Option<String>,

    /// Directory scanned recursively for partial templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partials_directory_path: Option<PathBuf>,

    /// Guard each generated partial registration with an "already registered" check
    #[serde(default)]
    pub optimize_partial_registration: bool,

    /// Options forwarded to the template compiler
    #[serde(default)]
    pub compile_options: CompileOptions,

    /// Context and helpers for the HTML entry document transform
    #[serde(skip)]
    pub transform_index_html_options: Option<TransformIndexHtmlOptions>,
}

impl PluginOptions {
    /// Parse options from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a key has the wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse plugin options")
    }

    /// Load options from a TOML file asynchronously.
    ///
    /// # Errors
    ///
    /// Returns an error naming the file if it cannot be read or parsed.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        parser::parse_config_content(&content, path)
    }

    /// Attach the HTML transform context and helpers.
    #[must_use]
    pub fn with_index_html(mut self, options: TransformIndexHtmlOptions) -> Self {
        self.transform_index_html_options = Some(options);
        self
    }
}

//! The plugin object a host bundler holds.
//!
//! [`HandlebarsImportPlugin`] wires configuration, the partial registry, the
//! module emitter, the document renderer and the change reactor together, and
//! exposes the three host boundaries:
//!
//! | Host hook | Method | Result |
//! |-----------|--------|--------|
//! | per-file transform | [`transform`] | generated module, or `None` for non-templates |
//! | HTML entry transform | [`transform_index_html`] | rendered HTML |
//! | file change | [`handle_hot_update`] | full reload for partial changes |
//!
//! [`transform`]: HandlebarsImportPlugin::transform
//! [`transform_index_html`]: HandlebarsImportPlugin::transform_index_html
//! [`handle_hot_update`]: HandlebarsImportPlugin::handle_hot_update
//!
//! # Examples
//!
//! ```rust,no_run
//! use hbs_import::config::PluginOptions;
//! use hbs_import::plugin::HandlebarsImportPlugin;
//!
//! # fn example() -> hbs_import::core::Result<()> {
//! let options = PluginOptions {
//!     partials_directory_path: Some("src/partials".into()),
//!     optimize_partial_registration: true,
//!     ..Default::default()
//! };
//! let mut plugin = HandlebarsImportPlugin::new(options)?;
//!
//! if let Some(output) = plugin.transform("/src/views/home.hbs", "<main>{{> header}}</main>")? {
//!     println!("{}", output.code);
//! }
//! # Ok(())
//! # }
//! ```

pub mod hot_update;

pub use hot_update::{ChangeReactor, HotUpdateHost, HotUpdateOutcome};

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{CompileOptions, PluginOptions, TemplateExtension, TransformIndexHtmlOptions};
use crate::core::Result;
use crate::templating::compiler::{HandlebarsCompiler, TemplateCompiler};
use crate::templating::emitter::ModuleEmitter;
use crate::templating::registry::PartialRegistry;
use crate::templating::renderer::DocumentRenderer;
use crate::templating::scanner::{DirectoryScanner, TemplateSource};
use crate::utils::resolve_absolute;

/// Name the plugin reports to its host.
pub const PLUGIN_NAME: &str = "vite-plugin-handlebars-import";

/// Result of a per-file transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// Generated module source
    pub code: String,
    /// Source map; never produced
    pub map: Option<String>,
}

/// Handlebars import transform plugin.
///
/// Holds all process-scoped state: the partial cache (inside the registry)
/// and the document renderer's engine instance. Every entry point takes
/// `&mut self`.
#[derive(Debug)]
pub struct HandlebarsImportPlugin<S = DirectoryScanner, C = HandlebarsCompiler> {
    extension: TemplateExtension,
    partials_dir: Option<PathBuf>,
    optimize: bool,
    compile_options: CompileOptions,
    index_html: TransformIndexHtmlOptions,
    registry: PartialRegistry<S, C>,
    renderer: DocumentRenderer,
    reactor: ChangeReactor,
}

impl HandlebarsImportPlugin {
    /// Create a plugin backed by the filesystem and the Handlebars compiler.
    ///
    /// # Errors
    ///
    /// Returns [`HbsImportError::Io`](crate::core::HbsImportError::Io) if a
    /// relative partials directory cannot be resolved against the current
    /// directory.
    pub fn new(options: PluginOptions) -> Result<Self> {
        Self::with_registry(options, PartialRegistry::new())
    }
}

impl<S: TemplateSource, C: TemplateCompiler> HandlebarsImportPlugin<S, C> {
    /// Create a plugin around an existing registry.
    ///
    /// # Errors
    ///
    /// Same as [`HandlebarsImportPlugin::new`].
    pub fn with_registry(options: PluginOptions, registry: PartialRegistry<S, C>) -> Result<Self> {
        let extension = TemplateExtension::decide(options.template_file_extension.as_deref());
        // An empty path disables partials, like an unset one.
        let partials_dir = options
            .partials_directory_path
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(resolve_absolute)
            .transpose()?;

        match &partials_dir {
            Some(dir) => info!("Using partials from {} (*{})", dir.display(), extension),
            None => debug!("No partials directory configured"),
        }

        Ok(Self {
            extension,
            reactor: ChangeReactor::new(partials_dir.clone()),
            partials_dir,
            optimize: options.optimize_partial_registration,
            compile_options: options.compile_options,
            index_html: options.transform_index_html_options.unwrap_or_default(),
            registry,
            renderer: DocumentRenderer::new(),
        })
    }

    /// The plugin's name, [`PLUGIN_NAME`].
    #[must_use]
    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    /// The template extension this plugin transforms.
    #[must_use]
    pub fn extension(&self) -> &TemplateExtension {
        &self.extension
    }

    /// The absolute partials directory, if configured.
    #[must_use]
    pub fn partials_dir(&self) -> Option<&Path> {
        self.partials_dir.as_deref()
    }

    /// The registry holding the partial cache.
    #[must_use]
    pub fn registry(&self) -> &PartialRegistry<S, C> {
        &self.registry
    }

    /// Transform one module.
    ///
    /// Returns `None` when `id` does not end with the template extension.
    /// Otherwise compiles `code`, resolves the partials (cached) and emits a
    /// module that registers them and exports the compiled template.
    ///
    /// # Errors
    ///
    /// [`HbsImportError::TemplateSyntax`](crate::core::HbsImportError::TemplateSyntax)
    /// if `code` or a partial does not parse, and any partial resolution
    /// failure.
    pub fn transform(&mut self, id: &str, code: &str) -> Result<Option<TransformOutput>> {
        if !self.extension.matches(id) {
            return Ok(None);
        }

        debug!("Transforming {}", id);
        let target = self.registry.compiler().precompile(id, code, &self.compile_options)?;
        let partials =
            self.registry.get(&self.extension, self.partials_dir.as_deref(), &self.compile_options)?;

        Ok(Some(TransformOutput {
            code: ModuleEmitter::emit(&target, &partials, self.optimize),
            map: None,
        }))
    }

    /// Render the HTML entry document with the configured context and helpers.
    ///
    /// # Errors
    ///
    /// See [`DocumentRenderer::render`].
    pub async fn transform_index_html(&mut self, html: &str) -> Result<String> {
        self.renderer
            .render(
                &mut self.registry,
                html,
                self.index_html.context.as_ref(),
                &self.index_html.helpers,
                &self.extension,
                self.partials_dir.as_deref(),
                &self.compile_options,
            )
            .await
    }

    /// React to a changed file reported by the host.
    pub fn handle_hot_update(
        &mut self,
        path: &Path,
        host: &mut dyn HotUpdateHost,
    ) -> HotUpdateOutcome {
        self.reactor.on_file_changed(path, &mut self.registry, host)
    }
}

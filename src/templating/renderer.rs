//! HTML entry document rendering.
//!
//! The HTML transform renders the entry document in-process rather than
//! emitting a module. [`DocumentRenderer`] owns a long-lived engine instance
//! that accumulates partials and helpers across renders the way the browser
//! runtime's global registry does: a name is registered once and the first
//! registration wins.
//!
//! Compiled partials come from the [`PartialRegistry`]. Turning them back into
//! something renderable is an explicit step: the stored, already validated
//! source is registered with the engine. No generated code is evaluated.

use std::collections::HashSet;
use std::path::Path;

use handlebars::Handlebars;
use tracing::{debug, trace};

use crate::config::{CompileOptions, TemplateExtension};
use crate::core::{HbsImportError, Result};
use crate::templating::compiler::{self, TemplateCompiler};
use crate::templating::context::{ContextSource, resolve_context};
use crate::templating::helpers::{BUILTIN_HELPERS, HelperMap, RegisteredHelper};
use crate::templating::registry::PartialRegistry;
use crate::templating::scanner::TemplateSource;

/// Name the entry document is compiled and rendered under.
pub const DOCUMENT_TEMPLATE_NAME: &str = "index.html";

/// Renders HTML documents against a context, with partials and helpers.
///
/// # Registration semantics
///
/// Partials and helpers are merged into the engine by name, skipping names
/// that are already present. Built-in helpers (`if`, `each`, ...) count as
/// present, so a user helper can never shadow one. Re-rendering with the same
/// helper map is a no-op for registration.
pub struct DocumentRenderer {
    handlebars: Handlebars<'static>,
    registered_helpers: HashSet<String>,
}

impl DocumentRenderer {
    /// Create a renderer with an empty partial registry and only the
    /// built-in helpers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlebars: Handlebars::new(),
            registered_helpers: BUILTIN_HELPERS.iter().map(|name| (*name).to_string()).collect(),
        }
    }

    /// Render `html` with the partials found for the given configuration.
    ///
    /// # Arguments
    ///
    /// * `registry` - Source of compiled partials (cache-backed)
    /// * `html` - The document template
    /// * `context` - Data to render against; `None` renders with `{}`
    /// * `helpers` - Helpers to merge into the engine before rendering
    /// * `extension` - Template extension the partials directory is scanned with
    /// * `base_dir` - Partials directory; `None` disables partials
    /// * `options` - Compile options for partials and the document
    ///
    /// # Errors
    ///
    /// - [`HbsImportError::DirectoryNotFound`] and other registry failures
    /// - [`HbsImportError::ContextResolution`] if a deferred context fails;
    ///   nothing is rendered
    /// - [`HbsImportError::TemplateSyntax`] if `html` does not parse
    /// - [`HbsImportError::Render`] if evaluation fails (for example a
    ///   strict-mode lookup of a missing field or a failing helper)
    #[allow(clippy::too_many_arguments)]
    pub async fn render<S: TemplateSource, C: TemplateCompiler>(
        &mut self,
        registry: &mut PartialRegistry<S, C>,
        html: &str,
        context: Option<&ContextSource>,
        helpers: &HelperMap,
        extension: &TemplateExtension,
        base_dir: Option<&Path>,
        options: &CompileOptions,
    ) -> Result<String> {
        let partials = registry.get(extension, base_dir, options)?;

        options.configure(&mut self.handlebars);

        for (name, template) in partials.iter() {
            if self.handlebars.has_template(name) {
                continue;
            }
            self.handlebars
                .register_partial(name, template.source())
                .map_err(|e| compiler::syntax_error(name, &e))?;
            trace!("Registered partial '{}'", name);
        }

        for (name, helper) in helpers {
            if self.registered_helpers.contains(name) {
                continue;
            }
            self.handlebars
                .register_helper(name, Box::new(RegisteredHelper::new(name, helper.clone())));
            self.registered_helpers.insert(name.clone());
            debug!("Registered helper '{}'", name);
        }

        let data = resolve_context(context).await?;

        let document = registry.compiler().precompile(DOCUMENT_TEMPLATE_NAME, html, options)?;
        let rendered = self
            .handlebars
            .render_template(document.source(), &data)
            .map_err(|e| HbsImportError::Render {
                message: e.to_string(),
            })?;

        debug!("Rendered {} ({} bytes)", DOCUMENT_TEMPLATE_NAME, rendered.len());
        Ok(rendered)
    }

    /// Whether a partial with this name has been registered.
    #[must_use]
    pub fn has_partial(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }

    /// Whether a helper with this name is registered, built-ins included.
    #[must_use]
    pub fn has_helper(&self, name: &str) -> bool {
        self.registered_helpers.contains(name)
    }
}

impl Default for DocumentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DocumentRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut helpers: Vec<_> = self.registered_helpers.iter().collect();
        helpers.sort();
        f.debug_struct("DocumentRenderer")
            .field("registered_helpers", &helpers)
            .finish_non_exhaustive()
    }
}

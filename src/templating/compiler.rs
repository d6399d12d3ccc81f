//! Template compilation boundary.
//!
//! [`TemplateCompiler`] is the seam between this crate and the template
//! engine. The crate never interprets template syntax itself: it asks the
//! compiler to validate a source and receives a [`PrecompiledTemplate`] back.
//!
//! A precompiled template is the validated source together with the
//! [`CompileOptions`] it was validated under. Generated modules embed both as
//! JSON literals (`Handlebars.compile(<source>, <options>)`), and the document
//! renderer turns one back into something renderable by registering
//! [`PrecompiledTemplate::source`] with its engine instance. Both paths compile
//! the same text, so the reconstructed render function behaves exactly like one
//! compiled from the file directly.
//!
//! # Accepted dialect
//!
//! Validation uses the `handlebars` crate's grammar for both the generated
//! modules and the in-process renderer, so a template is accepted only if the
//! Rust engine can parse it. Two JavaScript forms are outside that grammar and
//! are reported as [`HbsImportError::TemplateSyntax`]:
//!
//! | Rejected | Accepted equivalent |
//! |----------|---------------------|
//! | `{{^if a}}..{{/if}}` | `{{#unless a}}..{{/unless}}` |
//! | `{{lookup . "x"}}` | `{{lookup this "x"}}` |

use std::sync::Arc;

use handlebars::Template;
use regex::Regex;

use crate::config::CompileOptions;
use crate::core::{HbsImportError, Result};

/// A template that passed validation, ready to embed or register.
///
/// Cloning is cheap; the source is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecompiledTemplate {
    source: Arc<str>,
    options: CompileOptions,
}

impl PrecompiledTemplate {
    /// The validated template source.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The options the template was validated under.
    #[must_use]
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// The source as a JavaScript string literal.
    ///
    /// JSON string escaping is a subset of JavaScript's, so the result can be
    /// pasted into generated code as-is.
    #[must_use]
    pub fn source_literal(&self) -> String {
        serde_json::Value::String(self.source.to_string()).to_string()
    }

    /// The compile options as a JavaScript object literal.
    #[must_use]
    pub fn options_literal(&self) -> String {
        self.options.to_literal()
    }
}

/// Validates template sources and produces their precompiled form.
pub trait TemplateCompiler {
    /// Precompile `source` under `options`.
    ///
    /// `template` identifies the source in diagnostics (file path, module id
    /// or partial name).
    ///
    /// # Errors
    ///
    /// Returns [`HbsImportError::TemplateSyntax`] carrying the engine's
    /// diagnostic when the source does not parse.
    fn precompile(
        &self,
        template: &str,
        source: &str,
        options: &CompileOptions,
    ) -> Result<PrecompiledTemplate>;
}

/// [`TemplateCompiler`] backed by the `handlebars` crate's parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandlebarsCompiler;

impl HandlebarsCompiler {
    /// Create a compiler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TemplateCompiler for HandlebarsCompiler {
    fn precompile(
        &self,
        template: &str,
        source: &str,
        options: &CompileOptions,
    ) -> Result<PrecompiledTemplate> {
        validate(template, source)?;
        tracing::trace!("Precompiled template '{}' ({} bytes)", template, source.len());

        Ok(PrecompiledTemplate {
            source: Arc::from(source),
            options: options.clone(),
        })
    }
}

/// Parse `source` with the engine and map a failure to
/// [`HbsImportError::TemplateSyntax`].
pub(crate) fn validate(template: &str, source: &str) -> Result<()> {
    Template::compile(source).map(|_| ()).map_err(|e| syntax_error(template, &e))
}

pub(crate) fn syntax_error(template: &str, error: &impl std::fmt::Display) -> HbsImportError {
    let message = error.to_string();
    HbsImportError::TemplateSyntax {
        template: template.to_string(),
        line: extract_line(&message),
        message,
    }
}

/// Extract the line number from an engine diagnostic.
///
/// The engine reports positions as `name:line:column`.
fn extract_line(message: &str) -> Option<usize> {
    let re = Regex::new(r":(\d+):(\d+)").ok()?;
    let caps = re.captures(message)?;
    caps.get(1)?.as_str().parse::<usize>().ok()
}

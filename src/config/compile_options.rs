//! Template compile options.
//!
//! [`CompileOptions`] mirrors the option object accepted by the Handlebars
//! compiler. The crate does not interpret the flags when generating modules:
//! they are serialized verbatim (camelCase keys, unset keys omitted) into every
//! `Handlebars.compile(...)` call it emits. The in-process document renderer
//! applies the subset the Rust engine understands, see
//! [`CompileOptions::configure`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Options forwarded to the template compiler.
///
/// All fields are optional. `known_helpers` is a `BTreeMap` so that the
/// serialized form, and therefore the generated module, does not depend on
/// hash-map iteration order.
///
/// # Examples
///
/// ```rust,no_run
/// use hbs_import::config::CompileOptions;
///
/// let options = CompileOptions {
///     strict: Some(true),
///     no_escape: Some(false),
///     ..Default::default()
/// };
/// assert_eq!(options.to_literal(), r#"{"noEscape":false,"strict":true}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompileOptions {
    /// Track `@data` variables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<bool>,

    /// Recursive field lookup (Mustache compatibility)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compat: Option<bool>,

    /// Helpers known to exist at runtime, for call-site optimization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_helpers: Option<BTreeMap<String, bool>>,

    /// Only allow helpers listed in `known_helpers`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub known_helpers_only: Option<bool>,

    /// Disable HTML escaping of `{{expr}}` output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_escape: Option<bool>,

    /// Fail on missing fields instead of rendering nothing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,

    /// Skip object existence checks when traversing paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assume_objects: Option<bool>,

    /// Do not auto-indent partial output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prevent_indent: Option<bool>,

    /// Keep whitespace around standalone tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_standalone: Option<bool>,

    /// Do not pass the parent context to partials implicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit_partial_context: Option<bool>,
}

impl CompileOptions {
    /// Serialize to the JavaScript object literal embedded in generated code.
    ///
    /// The output is valid JSON and therefore a valid JavaScript expression.
    /// Field order is the declaration order above, so equal options always
    /// yield byte-identical literals.
    #[must_use]
    pub fn to_literal(&self) -> String {
        // Only bools and string-keyed maps: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Apply the options the Rust engine supports to a registry.
    ///
    /// `strict`, `no_escape` and `prevent_indent` have direct equivalents.
    /// The remaining flags only affect the JavaScript compiler and are
    /// ignored here.
    pub fn configure(&self, registry: &mut handlebars::Handlebars<'_>) {
        registry.set_strict_mode(self.strict.unwrap_or(false));
        registry.set_prevent_indent(self.prevent_indent.unwrap_or(false));
        if self.no_escape.unwrap_or(false) {
            registry.register_escape_fn(handlebars::no_escape);
        } else {
            registry.register_escape_fn(handlebars::html_escape);
        }
    }
}

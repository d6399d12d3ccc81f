//! User-supplied template helpers.
//!
//! Helpers are plain functions from the call's positional parameters to a
//! JSON value. [`TemplateHelper`] adapts them to the engine's [`HelperDef`]
//! interface so hosts never have to deal with render-context lifetimes.
//!
//! # Examples
//!
//! ```rust,no_run
//! use hbs_import::templating::helpers::{HelperMap, TemplateHelper};
//! use serde_json::Value;
//!
//! let mut helpers = HelperMap::new();
//! helpers.insert(
//!     "upper-case".to_string(),
//!     TemplateHelper::new(|params| {
//!         let text = params.first().and_then(Value::as_str).unwrap_or_default();
//!         Ok(Value::String(text.to_uppercase()))
//!     }),
//! );
//! ```
//!
//! A template then calls it as `{{upper-case keyword}}`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use handlebars::{
    Context, Handlebars, Helper, HelperDef, RenderContext, RenderError, ScopedJson,
};
use serde_json::Value;

/// Helper names the engine registers itself.
///
/// A user helper with one of these names is never registered: the built-in
/// registration came first and first registration wins.
pub const BUILTIN_HELPERS: &[&str] = &[
    "if", "unless", "each", "with", "lookup", "raw", "log", "eq", "ne", "gt", "gte", "lt", "lte",
    "and", "or", "not", "len",
];

type HelperFn = dyn Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync;

/// Mapping from helper name to implementation.
///
/// Ordered so registration, and the debug log it produces, is deterministic.
pub type HelperMap = BTreeMap<String, TemplateHelper>;

/// A helper function callable from templates.
#[derive(Clone)]
pub struct TemplateHelper {
    func: Arc<HelperFn>,
}

impl TemplateHelper {
    /// Wrap a function taking the call's positional parameters.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Invoke the helper directly.
    ///
    /// # Errors
    ///
    /// Returns whatever error the wrapped function returns.
    pub fn call(&self, params: &[Value]) -> anyhow::Result<Value> {
        (self.func)(params)
    }
}

impl fmt::Debug for TemplateHelper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TemplateHelper(..)")
    }
}

/// Adapter registered with the engine under a specific name.
pub(crate) struct RegisteredHelper {
    name: String,
    helper: TemplateHelper,
}

impl RegisteredHelper {
    pub(crate) fn new(name: &str, helper: TemplateHelper) -> Self {
        Self {
            name: name.to_string(),
            helper,
        }
    }
}

impl HelperDef for RegisteredHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        let params: Vec<Value> = h.params().iter().map(|p| p.value().clone()).collect();

        let value = self.helper.call(&params).map_err(|e| {
            RenderError::new(format!("Helper '{}' failed: {:#}", self.name, e))
        })?;

        Ok(ScopedJson::Derived(value))
    }
}

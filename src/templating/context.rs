//! Document render context.
//!
//! The HTML entry document is rendered against a context that is either known
//! up front or produced on demand by an async function (for example, fetched
//! from a CMS while the dev server starts). [`ContextSource`] models both.

use std::fmt;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;

use crate::core::{HbsImportError, Result};

/// Async producer of a render context.
pub type ContextProducer = Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<Value>> + Send + Sync>;

/// Where the document render context comes from.
///
/// # Examples
///
/// ```rust,no_run
/// use hbs_import::templating::context::ContextSource;
/// use serde_json::json;
///
/// let fixed = ContextSource::value(json!({ "keyword": "static" }));
/// let deferred = ContextSource::deferred(|| async { Ok(json!({ "keyword": "dynamic" })) });
/// ```
#[derive(Clone)]
pub enum ContextSource {
    /// A plain value used as-is
    Value(Value),
    /// A zero-argument async function invoked and awaited on every render
    Deferred(ContextProducer),
}

impl ContextSource {
    /// Wrap a plain value.
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// Wrap an async producer.
    pub fn deferred<F, Fut>(producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        Self::Deferred(Arc::new(move || producer().boxed()))
    }

    /// Produce the context value, awaiting the producer if there is one.
    ///
    /// # Errors
    ///
    /// Returns [`HbsImportError::ContextResolution`] if the producer fails.
    pub async fn resolve(&self) -> Result<Value> {
        match self {
            Self::Value(value) => Ok(value.clone()),
            Self::Deferred(producer) => {
                tracing::debug!("Awaiting deferred template context");
                producer().await.map_err(|e| HbsImportError::ContextResolution {
                    source: e.into(),
                })
            }
        }
    }
}

impl fmt::Debug for ContextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<Value> for ContextSource {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Resolve an optional context source, defaulting to an empty object.
///
/// # Errors
///
/// Propagates [`HbsImportError::ContextResolution`] from the producer.
pub async fn resolve_context(source: Option<&ContextSource>) -> Result<Value> {
    match source {
        Some(source) => source.resolve().await,
        None => Ok(Value::Object(serde_json::Map::new())),
    }
}

//! Core types for hbs-import
//!
//! This module holds the crate-wide error type and result alias. Every other
//! module reports failures through [`HbsImportError`], so hosts only have to
//! handle one error type regardless of which boundary they called.
//!
//! # Examples
//!
//! ```rust,no_run
//! use hbs_import::core::{HbsImportError, Result};
//!
//! fn check(found: bool) -> Result<()> {
//!     if !found {
//!         return Err(HbsImportError::DirectoryNotFound {
//!             path: "partials".into(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;

pub use error::{HbsImportError, Result};

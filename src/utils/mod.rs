//! Cross-platform utilities and helpers
//!
//! # Modules
//!
//! - [`platform`] - Path normalization and resolution
//!
//! # Cross-Platform Considerations
//!
//! Partial names are derived from file paths and embedded in generated code,
//! so they are always normalized to forward slashes regardless of the host's
//! separator convention.

pub mod platform;

pub use platform::{
    is_within_directory, normalize_lexically, normalize_path_for_storage, resolve_absolute,
};

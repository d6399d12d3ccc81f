//! Integration test suite for hbs-import
//!
//! End-to-end tests that drive the public API the way a host bundler does:
//! build a plugin from options, transform template modules, render the HTML
//! entry document, and deliver file-change notifications.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **config**: Option loading and extension normalization
//! - **hot_update**: Cache invalidation and reload signalling
//! - **index_html**: HTML entry rendering with contexts and helpers
//! - **module_transform**: Generated module shape and determinism
//! - **partial_resolution**: Scanning, naming and caching of partials

mod config;
mod hot_update;
mod module_transform;
mod partial_resolution;

//! Generic configuration parsing utilities.
//!
//! Reads a TOML file and deserializes it into any `DeserializeOwned` type,
//! attaching the file path to every error so a broken config points straight
//! at the offending file.
//!
//! Example error output:
//! ```text
//! Failed to parse config file: /path/to/hbs-import.toml
//! Caused by:
//!     invalid type: string "yes", expected a boolean
//! ```

use anyhow::{Context, Result};
use std::path::Path;

/// Parse a TOML configuration file into the specified type.
///
/// # Examples
///
/// ```rust,no_run
/// use hbs_import::config::{parse_config, PluginOptions};
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let options: PluginOptions = parse_config(Path::new("hbs-import.toml"))?;
/// println!("extension: {:?}", options.template_file_extension);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read or its contents do not match
/// the shape of `T`. Both errors name the file.
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config_content(&content, path)
}

/// Deserialize TOML `content` that was read from `path`.
///
/// Shared by the blocking and async loaders so both report errors the same way.
pub(crate) fn parse_config_content<T>(content: &str, path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    toml::from_str(content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

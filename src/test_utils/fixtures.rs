//! On-disk fixtures for partial directories
//!
//! The default tree mirrors what a small site keeps next to its views:
//!
//! ```text
//! <root>/
//! ├── empty/
//! └── partials/
//!     ├── sub/test3.hbs
//!     ├── test 2.hbs
//!     └── test1.hbs
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Content of `partials/test1.hbs`.
pub const TEST1_PARTIAL: &str = "<div>\n    <h1>Test 1</h1>\n    <p>Test 1 content</p>\n</div>";

/// Content of `partials/test 2.hbs`.
pub const TEST2_PARTIAL: &str = "<div>\n    <h1>Test 2</h1>\n    <p>{{message}}</p>\n</div>";

/// Content of `partials/sub/test3.hbs`.
pub const TEST3_PARTIAL: &str = "<section>\n    {{> test1}}\n</section>";

/// Temporary directory holding a partials tree.
///
/// The directory is removed when the fixture is dropped.
#[derive(Debug)]
pub struct PartialsFixture {
    temp: TempDir,
    partials: PathBuf,
    empty: PathBuf,
}

impl PartialsFixture {
    /// Create the default tree.
    pub fn new() -> Result<Self> {
        let fixture = Self::empty()?;
        fixture.write_partial("test1.hbs", TEST1_PARTIAL)?;
        fixture.write_partial("test 2.hbs", TEST2_PARTIAL)?;
        fixture.write_partial("sub/test3.hbs", TEST3_PARTIAL)?;
        Ok(fixture)
    }

    /// Create the directory layout without any templates.
    pub fn empty() -> Result<Self> {
        let temp = TempDir::new().context("Failed to create temp directory")?;
        let partials = temp.path().join("partials");
        let empty = temp.path().join("empty");
        fs::create_dir_all(&partials).context("Failed to create partials directory")?;
        fs::create_dir_all(&empty).context("Failed to create empty directory")?;
        Ok(Self {
            temp,
            partials,
            empty,
        })
    }

    /// The fixture root.
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// The partials directory, `<root>/partials`.
    pub fn partials_dir(&self) -> &Path {
        &self.partials
    }

    /// A directory that exists but holds no templates.
    pub fn empty_dir(&self) -> &Path {
        &self.empty
    }

    /// Write (or overwrite) a file relative to the partials directory.
    ///
    /// `relative` uses `/` separators; parent directories are created.
    pub fn write_partial(&self, relative: &str, content: &str) -> Result<PathBuf> {
        self.write_file(&format!("partials/{relative}"), content)
    }

    /// Write (or overwrite) a file relative to the fixture root.
    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = relative.split('/').fold(self.temp.path().to_path_buf(), |p, c| p.join(c));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Delete a file relative to the partials directory.
    pub fn remove_partial(&self, relative: &str) -> Result<()> {
        let path = relative.split('/').fold(self.partials.clone(), |p, c| p.join(c));
        fs::remove_file(&path).with_context(|| format!("Failed to remove {}", path.display()))
    }
}

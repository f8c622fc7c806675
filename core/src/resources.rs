//! Fixture loading by logical name.

use std::path::{Path, PathBuf};

use crate::error::RestError;

/// Source of fixture documents.
///
/// Names may include a sub-folder and a leading `/`, e.g.
/// `/schemas/member.json`.
pub trait Resources {
    fn read(&self, name: &str) -> Result<String, RestError>;
}

/// Fixtures stored under a directory on disk.
#[derive(Debug, Clone)]
pub struct FixtureDir {
    root: PathBuf,
}

impl FixtureDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name.trim_start_matches('/'))
    }
}

impl Resources for FixtureDir {
    fn read(&self, name: &str) -> Result<String, RestError> {
        let path = self.resolve(name);
        log::debug!("loading fixture {}", path.display());
        std::fs::read_to_string(&path).map_err(|source| RestError::Resource {
            name: name.to_string(),
            source,
        })
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use vantage_base::Result;
use vantage_nav::ViewpointSource;

/// Camera document read from disk on every fetch.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ViewpointSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String> {
        debug!(path = %self.path.display(), "reading viewpoint document");
        Ok(fs::read_to_string(&self.path)?)
    }
}

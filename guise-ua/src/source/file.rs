use std::{fmt, path::PathBuf};

use super::CorpusSource;
use crate::{BoxError, UserAgentRecord};

#[derive(Debug, Clone)]
/// A [`CorpusSource`] reading a JSON array of records from a local file.
pub struct FileCorpusSource {
    path: PathBuf,
}

impl FileCorpusSource {
    /// Create a new [`FileCorpusSource`] for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the corpus file.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CorpusSource for FileCorpusSource {
    async fn fetch_corpus(&self) -> Result<Vec<UserAgentRecord>, BoxError> {
        let raw = tokio::fs::read(&self.path).await?;
        let records = serde_json::from_slice(&raw)?;
        Ok(records)
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file {}", self.path.display())
    }
}

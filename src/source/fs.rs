//! Local directory source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::CenturySource;
use crate::error::{Error, Result};
use crate::models::{Century, CenturyDocument};

/// Reads `century{N}.json` from a data directory.
#[derive(Debug, Clone)]
pub struct FsSource {
    data_dir: PathBuf,
}

impl FsSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of one century's document.
    pub fn century_path(&self, century: Century) -> PathBuf {
        self.data_dir.join(century.file_name())
    }
}

#[async_trait]
impl CenturySource for FsSource {
    async fn fetch_century(&self, century: Century) -> Result<CenturyDocument> {
        let path = self.century_path(century);
        tracing::debug!("Reading century {} from {}", century, path.display());
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| Error::io(&path, e))?;
        CenturyDocument::from_json(century, &bytes)
    }

    fn describe(&self) -> String {
        self.data_dir.display().to_string()
    }
}

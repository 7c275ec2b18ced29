//! In-memory source.

use std::collections::HashMap;

use async_trait::async_trait;

use super::CenturySource;
use crate::error::{Error, Result};
use crate::models::{Century, CenturyDocument};

/// Serves documents from memory. Missing centuries fail like a 404.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<Century, CenturyDocument>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, document: CenturyDocument) -> Self {
        self.insert(document);
        self
    }

    pub fn insert(&mut self, document: CenturyDocument) {
        self.documents.insert(document.century(), document);
    }
}

#[async_trait]
impl CenturySource for MemorySource {
    async fn fetch_century(&self, century: Century) -> Result<CenturyDocument> {
        self.documents
            .get(&century)
            .cloned()
            .ok_or_else(|| Error::Status {
                url: format!("memory://{}", century.file_name()),
                status: 404,
            })
    }

    fn describe(&self) -> String {
        format!("memory ({} centuries)", self.documents.len())
    }
}

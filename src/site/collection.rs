//! Gathers every quatrain from the data directory for page generation.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::models::{Century, CenturyDocument, Quatrain, QuatrainId};

static CENTURY_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^century(\d+)\.json$").unwrap());

/// One quatrain to render as a page.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteItem {
    pub id: QuatrainId,
    pub quatrain: Quatrain,
}

/// Century number encoded in a data file name, if it is one.
pub fn century_of(file_name: &str) -> Option<u32> {
    CENTURY_FILE
        .captures(file_name)
        .and_then(|caps| caps[1].parse().ok())
}

/// Read every `century{N}.json` in `data_dir` and flatten it into items
/// sorted by century then number.
///
/// Files that cannot be read or parsed are logged and skipped.
pub async fn collect(data_dir: &Path) -> Result<Vec<SiteItem>> {
    let mut dir = tokio::fs::read_dir(data_dir)
        .await
        .map_err(|e| Error::io(data_dir, e))?;

    let mut items = Vec::new();
    while let Some(entry) = dir.next_entry().await.map_err(|e| Error::io(data_dir, e))? {
        let file_name = entry.file_name();
        let Some(number) = file_name.to_str().and_then(century_of) else {
            continue;
        };
        let path = entry.path();

        let century = match Century::new(number) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };
        let document = match tokio::fs::read(&path).await {
            Ok(bytes) => CenturyDocument::from_json(century, &bytes),
            Err(e) => Err(Error::io(&path, e)),
        };
        match document {
            Ok(document) => {
                tracing::debug!("Collected {} quatrains from {}", document.len(), path.display());
                items.extend(document.iter().map(|(id, q)| SiteItem {
                    id,
                    quatrain: q.clone(),
                }));
            }
            Err(e) => tracing::error!("Error processing {}: {}", path.display(), e),
        }
    }

    items.sort_by_key(|item| item.id);
    Ok(items)
}

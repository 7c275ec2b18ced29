//! Maintenance of the century data files.

use std::fmt;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::Century;
use crate::source::CenturySource;

/// Set `image` on every quatrain of one century file.
///
/// Key order and all other fields are preserved. The file is rewritten with
/// 4-space indentation, non-ASCII characters kept as-is. Returns the number of
/// quatrains updated.
pub fn assign_image(path: &Path, image: &str) -> Result<usize> {
    let contents = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    let mut document: Value =
        serde_json::from_slice(&contents).map_err(|e| Error::InvalidDocument {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let quatrains = document
        .as_object_mut()
        .ok_or_else(|| Error::InvalidDocument {
            path: path.to_path_buf(),
            reason: "top level is not an object".into(),
        })?;

    let mut updated = 0;
    for (key, record) in quatrains.iter_mut() {
        match record.as_object_mut() {
            Some(fields) => {
                fields.insert("image".to_string(), Value::String(image.to_string()));
                updated += 1;
            }
            None => tracing::warn!("{}: skipping non-object entry {:?}", path.display(), key),
        }
    }

    write_json_atomic(path, &document)?;
    tracing::info!("Set image {:?} on {} quatrains in {}", image, updated, path.display());
    Ok(updated)
}

/// Serialize `value` with 4-space indentation.
pub fn to_json_pretty<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(buf)
}

/// Replace `path` with `value` via a temp file in the same directory.
fn write_json_atomic(path: &Path, value: &Value) -> Result<()> {
    let bytes = to_json_pretty(value).map_err(|e| Error::InvalidDocument {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(&bytes).map_err(|e| Error::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

/// Problem found by [`check`].
#[derive(Debug, Clone, PartialEq)]
pub enum Issue {
    LoadFailed(String),
    Empty,
    LineMismatch { french: usize, english: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub century: Century,
    pub number: Option<u32>,
    pub issue: Issue,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(n) => write!(f, "{}:{} ", self.century, n)?,
            None => write!(f, "century {} ", self.century)?,
        }
        match &self.issue {
            Issue::LoadFailed(reason) => write!(f, "failed to load: {}", reason),
            Issue::Empty => write!(f, "has no quatrains"),
            Issue::LineMismatch { french, english } => write!(
                f,
                "has {} French lines but {} English lines",
                french, english
            ),
        }
    }
}

/// Result of validating every century.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub centuries: usize,
    pub quatrains: usize,
    pub findings: Vec<Finding>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Load all ten centuries and report data problems.
pub async fn check(source: &dyn CenturySource) -> CheckReport {
    let mut report = CheckReport::default();

    for century in Century::all() {
        let document = match source.fetch_century(century).await {
            Ok(d) => d,
            Err(e) => {
                report.findings.push(Finding {
                    century,
                    number: None,
                    issue: Issue::LoadFailed(e.to_string()),
                });
                continue;
            }
        };

        report.centuries += 1;
        report.quatrains += document.len();
        if document.is_empty() {
            report.findings.push(Finding {
                century,
                number: None,
                issue: Issue::Empty,
            });
        }
        for (id, quatrain) in document.iter() {
            if !quatrain.lines_aligned() {
                report.findings.push(Finding {
                    century,
                    number: Some(id.number),
                    issue: Issue::LineMismatch {
                        french: quatrain.french.len(),
                        english: quatrain.english.len(),
                    },
                });
            }
        }
    }

    tracing::debug!(
        "Checked {} centuries, {} quatrains, {} findings",
        report.centuries,
        report.quatrains,
        report.findings.len()
    );
    report
}

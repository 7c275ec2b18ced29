//! Flattened search corpus built from every century document.

use serde::Serialize;

use crate::models::{Century, CenturyDocument, Quatrain, QuatrainId};
use crate::source::CenturySource;
use crate::utils::join_lines;

/// One searchable quatrain with its lines joined into single strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusEntry {
    /// `"{century}:{number}"`.
    pub id: String,
    pub century: Century,
    pub quatrain: u32,
    pub french: String,
    pub english: String,
    pub interpretation: String,
    /// Empty when absent.
    pub video: String,
    /// Empty when absent.
    pub image: String,
}

impl CorpusEntry {
    pub fn new(id: QuatrainId, quatrain: &Quatrain) -> Self {
        Self {
            id: id.to_string(),
            century: id.century,
            quatrain: id.number,
            french: join_lines(&quatrain.french),
            english: join_lines(&quatrain.english),
            interpretation: quatrain.interpretation.clone(),
            video: quatrain.video.clone().unwrap_or_default(),
            image: quatrain.image.clone().unwrap_or_default(),
        }
    }

    pub fn quatrain_id(&self) -> QuatrainId {
        QuatrainId {
            century: self.century,
            number: self.quatrain,
        }
    }

    /// Searchable fields, in index order.
    pub fn fields(&self) -> [&str; 3] {
        [&self.french, &self.english, &self.interpretation]
    }
}

/// Flatten one century document into corpus entries.
pub fn entries_for(document: &CenturyDocument) -> impl Iterator<Item = CorpusEntry> + '_ {
    document.iter().map(|(id, q)| CorpusEntry::new(id, q))
}

/// Fetch all ten centuries in order and flatten them.
///
/// A century that fails to load is logged and left out.
pub async fn load_corpus(source: &dyn CenturySource) -> Vec<CorpusEntry> {
    let mut entries = Vec::new();
    for century in Century::all() {
        match source.fetch_century(century).await {
            Ok(document) => entries.extend(entries_for(&document)),
            Err(e) => tracing::warn!("Century {} load failed for search: {}", century, e),
        }
    }
    tracing::info!("Search corpus loaded: {} quatrains", entries.len());
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    fn quatrain() -> Quatrain {
        Quatrain {
            french: vec!["Estant assis".into(), "de nuict secret".into()],
            english: vec!["Being seated".into(), "by night in secret".into()],
            interpretation: "Prophetic method".into(),
            video: None,
            image: Some("study.jpg".into()),
        }
    }

    #[test]
    fn test_entry_flattening() {
        let id = QuatrainId::from_parts(1, 1).unwrap();
        let entry = CorpusEntry::new(id, &quatrain());
        assert_eq!(entry.id, "1:1");
        assert_eq!(entry.french, "Estant assis de nuict secret");
        assert_eq!(entry.english, "Being seated by night in secret");
        assert_eq!(entry.video, "");
        assert_eq!(entry.image, "study.jpg");
        assert_eq!(entry.quatrain_id(), id);
    }

    #[tokio::test]
    async fn test_load_corpus_tolerates_missing_centuries() {
        let mut source = MemorySource::new();
        for c in [1, 3] {
            let century = Century::new(c).unwrap();
            source.insert(CenturyDocument::from_quatrains(
                century,
                vec![(1, quatrain()), (2, quatrain())],
            ));
        }

        let entries = load_corpus(&source).await;
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1:1", "1:2", "3:1", "3:2"]);
    }
}

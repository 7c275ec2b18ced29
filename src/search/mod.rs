//! Fuzzy full-text search across all ten centuries.

mod corpus;
mod debounce;
mod index;

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub use corpus::{entries_for, load_corpus, CorpusEntry};
pub use debounce::Debouncer;
pub use index::{tokenize, ScoredEntry, SearchIndex, MAX_EDITS};

use crate::error::{Error, Result};
use crate::models::{Century, QuatrainId};
use crate::source::CenturySource;
use crate::utils::excerpt;

/// Tunables for matching and result presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Fuzziness tolerance: fraction of a term's length allowed as edits.
    pub threshold: f64,
    pub limit: usize,
    /// Trimmed queries shorter than this are not run.
    pub min_query_len: usize,
    pub excerpt_chars: usize,
    pub debounce: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            limit: 10,
            min_query_len: 2,
            excerpt_chars: 100,
            debounce: Duration::from_millis(200),
        }
    }
}

/// One search result line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: QuatrainId,
    pub century: Century,
    pub quatrain: u32,
    pub score: f64,
    pub excerpt: String,
    pub link: String,
}

impl SearchHit {
    /// Result heading, e.g. "Century 2, Quatrain 46".
    pub fn heading(&self) -> String {
        format!("Century {}, Quatrain {}", self.century, self.quatrain)
    }
}

/// What the result panel should show for a query.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Query too short: panel hidden, nothing run.
    Hidden,
    NoMatches,
    Results(Vec<SearchHit>),
}

impl SearchOutcome {
    pub fn is_visible(&self) -> bool {
        !matches!(self, SearchOutcome::Hidden)
    }

    pub fn hits(&self) -> &[SearchHit] {
        match self {
            SearchOutcome::Results(hits) => hits,
            _ => &[],
        }
    }
}

impl SearchIndex {
    /// Evaluate a raw query from the search box.
    pub fn query(&self, raw: &str) -> SearchOutcome {
        let query = raw.trim();
        if query.chars().count() < self.options().min_query_len {
            return SearchOutcome::Hidden;
        }

        let scored = self.search(query, self.options().limit);
        if scored.is_empty() {
            tracing::debug!("No matches for {:?}", query);
            return SearchOutcome::NoMatches;
        }

        let hits = scored
            .into_iter()
            .filter_map(|s| {
                let entry = self.entry(s.entry)?;
                let id = entry.quatrain_id();
                Some(SearchHit {
                    id,
                    century: entry.century,
                    quatrain: entry.quatrain,
                    score: s.score,
                    excerpt: excerpt(&entry.english, self.options().excerpt_chars),
                    link: id.link(),
                })
            })
            .collect();
        SearchOutcome::Results(hits)
    }
}

/// Load the corpus from `source` and build the index.
pub async fn build_index(source: &dyn CenturySource, options: SearchOptions) -> Result<SearchIndex> {
    let entries = load_corpus(source).await;
    SearchIndex::build(entries, options)
}

/// Index that may still be building in the background.
pub enum IndexHandle {
    Building(JoinHandle<Result<SearchIndex>>),
    Ready(Arc<SearchIndex>),
    Failed(String),
}

impl IndexHandle {
    /// Start building the index on a background task.
    pub fn spawn(source: Arc<dyn CenturySource>, options: SearchOptions) -> Self {
        IndexHandle::Building(tokio::spawn(async move {
            build_index(source.as_ref(), options).await
        }))
    }

    pub fn ready_now(index: SearchIndex) -> Self {
        IndexHandle::Ready(Arc::new(index))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, IndexHandle::Ready(_))
    }

    /// Wait for the build to finish and return the index.
    pub async fn ready(&mut self) -> Result<Arc<SearchIndex>> {
        if let IndexHandle::Building(handle) = self {
            let settled = match handle.await {
                Ok(Ok(index)) => IndexHandle::Ready(Arc::new(index)),
                Ok(Err(e)) => IndexHandle::Failed(e.to_string()),
                Err(e) => IndexHandle::Failed(e.to_string()),
            };
            *self = settled;
        }

        match self {
            IndexHandle::Ready(index) => Ok(Arc::clone(index)),
            IndexHandle::Failed(message) => Err(Error::Index(message.clone())),
            IndexHandle::Building(_) => Err(Error::Index("index build still pending".into())),
        }
    }
}

/// Search box state: debounced input feeding a lazily-ready index.
pub struct SearchPanel {
    index: IndexHandle,
    debouncer: Debouncer<String>,
    settled: mpsc::UnboundedReceiver<String>,
}

impl SearchPanel {
    pub fn new(index: IndexHandle, debounce: Duration) -> Self {
        let (debouncer, settled) = Debouncer::new(debounce);
        Self {
            index,
            debouncer,
            settled,
        }
    }

    /// Record new search box contents; cancels any pending evaluation.
    pub fn input(&mut self, text: &str) {
        self.debouncer.push(text.to_string());
    }

    /// Next query whose input has gone quiet.
    pub async fn next_settled(&mut self) -> Option<String> {
        self.settled.recv().await
    }

    /// Run `query`, waiting for the index if it is still building.
    pub async fn evaluate(&mut self, query: &str) -> Result<SearchOutcome> {
        let index = self.index.ready().await?;
        Ok(index.query(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CenturyDocument, Quatrain};
    use crate::source::MemorySource;

    fn quatrain(english: &str) -> Quatrain {
        Quatrain {
            french: vec!["Vers".into()],
            english: vec![english.into()],
            interpretation: String::new(),
            video: None,
            image: None,
        }
    }

    fn source() -> Arc<dyn CenturySource> {
        let long = "a ".repeat(80) + "comet";
        let mut source = MemorySource::new();
        source.insert(CenturyDocument::from_quatrains(
            Century::new(1).unwrap(),
            vec![(1, quatrain("The great comet")), (2, quatrain(&long))],
        ));
        source.insert(CenturyDocument::from_quatrains(
            Century::new(2).unwrap(),
            vec![(46, quatrain("Fire in the sky, a comet"))],
        ));
        Arc::new(source)
    }

    #[tokio::test]
    async fn test_query_contract() {
        let index = build_index(source().as_ref(), SearchOptions::default())
            .await
            .unwrap();
        assert_eq!(index.len(), 3);

        assert_eq!(index.query(" c "), SearchOutcome::Hidden);
        assert!(!index.query("").is_visible());
        assert_eq!(index.query("zzyzx"), SearchOutcome::NoMatches);

        let outcome = index.query("comet");
        let hits = outcome.hits();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].link, "/c1/q001/");
        assert_eq!(hits[0].excerpt, "The great comet...");
        assert_eq!(hits[2].heading(), "Century 2, Quatrain 46");
    }

    #[tokio::test]
    async fn test_excerpt_truncated() {
        let index = build_index(source().as_ref(), SearchOptions::default())
            .await
            .unwrap();
        let outcome = index.query("comet");
        let long = outcome.hits().iter().find(|h| h.quatrain == 2).unwrap();
        assert_eq!(long.excerpt.chars().count(), 103);
        assert!(long.excerpt.ends_with("..."));
    }

    #[tokio::test]
    async fn test_limit_respected() {
        let options = SearchOptions {
            limit: 1,
            ..SearchOptions::default()
        };
        let index = build_index(source().as_ref(), options).await.unwrap();
        assert_eq!(index.query("comet").hits().len(), 1);
    }

    #[tokio::test]
    async fn test_default_limit_is_ten_ranked() {
        let words = ["comet", "comets", "comet", "comete", "comets", "comet"];
        let mut source = MemorySource::new();
        source.insert(CenturyDocument::from_quatrains(
            Century::new(3).unwrap(),
            (1..=12).map(|n| (n, quatrain(&format!("A {} over the city", words[n as usize % 6])))),
        ));
        let index = build_index(&source, SearchOptions::default()).await.unwrap();
        assert_eq!(index.len(), 12);

        let outcome = index.query("comet");
        let hits = outcome.hits();
        assert_eq!(hits.len(), 10);
        assert!(hits.windows(2).all(|w| w[0].score <= w[1].score));
        assert_eq!(hits[0].score, 0.0);
        assert!(hits[9].score > 0.0);
    }

    #[tokio::test]
    async fn test_first_query_awaits_build() {
        let mut handle = IndexHandle::spawn(source(), SearchOptions::default());
        let index = handle.ready().await.unwrap();
        assert!(handle.is_ready());
        assert_eq!(index.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_panel_debounces_input() {
        let handle = IndexHandle::spawn(source(), SearchOptions::default());
        let mut panel = SearchPanel::new(handle, Duration::from_millis(200));

        panel.input("co");
        panel.input("com");
        panel.input("comet");
        let query = panel.next_settled().await.unwrap();
        assert_eq!(query, "comet");

        let outcome = panel.evaluate(&query).await.unwrap();
        assert_eq!(outcome.hits().len(), 3);
    }
}

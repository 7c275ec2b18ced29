//! Fuzzy search index over the flattened corpus.
//!
//! Terms from the French, English and interpretation text are stored in an
//! FST map (term -> term id) with a postings list per term. Query terms are
//! matched against the dictionary with Levenshtein automata of increasing
//! edit budget and with prefix automata, so matches are typo-tolerant and
//! position-independent.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use fst::automaton::{Automaton, Levenshtein, Str};
use fst::{IntoStreamer, Map, MapBuilder, Streamer};

use super::corpus::CorpusEntry;
use super::SearchOptions;
use crate::error::Result;

/// Upper bound on edits per query term.
pub const MAX_EDITS: u32 = 2;

/// Shortest query term that also matches as a prefix.
const MIN_PREFIX_LEN: usize = 2;

/// An entry index paired with its relevance score (lower is better).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredEntry {
    pub entry: usize,
    pub score: f64,
}

/// Search index built once from the corpus.
pub struct SearchIndex {
    entries: Vec<CorpusEntry>,
    terms: Map<Vec<u8>>,
    postings: Vec<Vec<usize>>,
    options: SearchOptions,
}

/// Lowercase `text` and split it on anything that is not alphanumeric.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

impl SearchIndex {
    pub fn build(entries: Vec<CorpusEntry>, options: SearchOptions) -> Result<Self> {
        let start = std::time::Instant::now();

        let mut dictionary: BTreeMap<String, BTreeSet<usize>> = BTreeMap::new();
        for (i, entry) in entries.iter().enumerate() {
            for field in entry.fields() {
                for term in tokenize(field) {
                    dictionary.entry(term).or_default().insert(i);
                }
            }
        }

        let mut builder = MapBuilder::memory();
        let mut postings = Vec::with_capacity(dictionary.len());
        for (term_id, (term, docs)) in dictionary.into_iter().enumerate() {
            builder.insert(term.as_bytes(), term_id as u64)?;
            postings.push(docs.into_iter().collect());
        }
        let terms = Map::new(builder.into_inner()?)?;

        tracing::debug!("Index built in {:?} ({} terms)", start.elapsed(), terms.len());
        tracing::info!("Search ready: {} quatrains indexed", entries.len());

        Ok(Self {
            entries,
            terms,
            postings,
            options,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn entry(&self, index: usize) -> Option<&CorpusEntry> {
        self.entries.get(index)
    }

    /// Edit budget for a query term of `len` characters.
    fn edit_budget(&self, len: usize) -> u32 {
        let budget = (len as f64 * self.options.threshold).floor() as u32;
        budget.min(MAX_EDITS)
    }

    /// Best score per dictionary term matching `term`.
    fn match_term(&self, term: &str) -> HashMap<u64, f64> {
        let len = term.chars().count();
        let mut scores: HashMap<u64, f64> = HashMap::new();
        if len == 0 {
            return scores;
        }

        for edits in 0..=self.edit_budget(len) {
            let automaton = match Levenshtein::new(term, edits) {
                Ok(a) => a,
                Err(e) => {
                    tracing::debug!("Skipping {}-edit automaton for {:?}: {}", edits, term, e);
                    break;
                }
            };
            let mut stream = self.terms.search(automaton).into_stream();
            while let Some((_, term_id)) = stream.next() {
                scores
                    .entry(term_id)
                    .or_insert(edits as f64 / len as f64);
            }
        }

        // a zero threshold means whole terms only
        if len >= MIN_PREFIX_LEN && self.options.threshold > 0.0 {
            let prefix = Str::new(term).starts_with();
            let mut stream = self.terms.search(prefix).into_stream();
            while let Some((matched, term_id)) = stream.next() {
                let matched_len = String::from_utf8_lossy(matched).chars().count().max(1);
                let penalty =
                    self.options.threshold * 0.5 * (1.0 - len as f64 / matched_len as f64);
                scores
                    .entry(term_id)
                    .and_modify(|s| *s = s.min(penalty))
                    .or_insert(penalty);
            }
        }

        scores
    }

    /// Rank entries for `query`, best first, at most `limit`.
    ///
    /// Every query term must match somewhere in an entry; the entry score is
    /// the mean of its per-term best scores. Ties go to the earlier quatrain.
    pub fn search(&self, query: &str, limit: usize) -> Vec<ScoredEntry> {
        let query_terms = tokenize(query);
        if query_terms.is_empty() {
            return Vec::new();
        }

        let mut totals: HashMap<usize, (f64, usize)> = HashMap::new();
        for term in &query_terms {
            let mut best: HashMap<usize, f64> = HashMap::new();
            for (term_id, score) in self.match_term(term) {
                for &entry in &self.postings[term_id as usize] {
                    best.entry(entry)
                        .and_modify(|s| *s = s.min(score))
                        .or_insert(score);
                }
            }
            for (entry, score) in best {
                let total = totals.entry(entry).or_insert((0.0, 0));
                total.0 += score;
                total.1 += 1;
            }
        }

        let wanted = query_terms.len();
        let mut results: Vec<ScoredEntry> = totals
            .into_iter()
            .filter(|(_, (_, matched))| *matched == wanted)
            .map(|(entry, (sum, _))| ScoredEntry {
                entry,
                score: sum / wanted as f64,
            })
            .collect();

        results.sort_by(|a, b| {
            let (ia, ib) = (&self.entries[a.entry], &self.entries[b.entry]);
            a.score
                .total_cmp(&b.score)
                .then_with(|| ia.quatrain_id().cmp(&ib.quatrain_id()))
        });
        results.truncate(limit);
        results
    }
}

//! Century documents: every quatrain of one century keyed by number.

use std::collections::BTreeMap;

use super::century::Century;
use super::quatrain::{Quatrain, QuatrainId};
use crate::error::{Error, Result};

/// All quatrains of one century, ordered by number.
#[derive(Debug, Clone, PartialEq)]
pub struct CenturyDocument {
    century: Century,
    quatrains: BTreeMap<u32, Quatrain>,
}

impl CenturyDocument {
    pub fn new(century: Century) -> Self {
        Self {
            century,
            quatrains: BTreeMap::new(),
        }
    }

    /// Build a document from already-numbered quatrains.
    pub fn from_quatrains(century: Century, quatrains: impl IntoIterator<Item = (u32, Quatrain)>) -> Self {
        Self {
            century,
            quatrains: quatrains.into_iter().filter(|(n, _)| *n > 0).collect(),
        }
    }

    /// Parse a `century{N}.json` body: an object mapping number strings to records.
    ///
    /// Keys that are not positive integers are skipped.
    pub fn from_json(century: Century, bytes: &[u8]) -> Result<Self> {
        let parse_err = |source| Error::Parse {
            century: century.get(),
            source,
        };

        let raw: serde_json::Map<String, serde_json::Value> =
            serde_json::from_slice(bytes).map_err(parse_err)?;

        let mut quatrains = BTreeMap::new();
        for (key, value) in raw {
            let number = match key.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!("Century {}: skipping non-numeric key {:?}", century, key);
                    continue;
                }
            };
            let quatrain: Quatrain = serde_json::from_value(value).map_err(parse_err)?;
            if !quatrain.lines_aligned() {
                tracing::debug!(
                    "Century {} quatrain {}: {} French lines vs {} English lines",
                    century,
                    number,
                    quatrain.french.len(),
                    quatrain.english.len()
                );
            }
            quatrains.insert(number, quatrain);
        }

        Ok(Self { century, quatrains })
    }

    pub fn century(&self) -> Century {
        self.century
    }

    pub fn len(&self) -> usize {
        self.quatrains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quatrains.is_empty()
    }

    pub fn get(&self, number: u32) -> Option<&Quatrain> {
        self.quatrains.get(&number)
    }

    /// Look up a quatrain, reporting absence as an error.
    pub fn require(&self, number: u32) -> Result<&Quatrain> {
        self.get(number).ok_or(Error::QuatrainNotFound {
            century: self.century.get(),
            number,
        })
    }

    /// Quatrain numbers, ascending.
    pub fn numbers(&self) -> Vec<u32> {
        self.quatrains.keys().copied().collect()
    }

    pub fn first_number(&self) -> Option<u32> {
        self.quatrains.keys().next().copied()
    }

    pub fn last_number(&self) -> Option<u32> {
        self.quatrains.keys().next_back().copied()
    }

    /// Next-higher number after `number` within this century.
    pub fn number_after(&self, number: u32) -> Option<u32> {
        self.quatrains
            .range(number.saturating_add(1)..)
            .next()
            .map(|(n, _)| *n)
    }

    /// Next-lower number before `number` within this century.
    pub fn number_before(&self, number: u32) -> Option<u32> {
        self.quatrains.range(..number).next_back().map(|(n, _)| *n)
    }

    pub fn id(&self, number: u32) -> QuatrainId {
        QuatrainId {
            century: self.century,
            number,
        }
    }

    /// Iterate quatrains in ascending number order.
    pub fn iter(&self) -> impl Iterator<Item = (QuatrainId, &Quatrain)> {
        self.quatrains.iter().map(|(n, q)| (self.id(*n), q))
    }

    pub fn insert(&mut self, number: u32, quatrain: Quatrain) -> Option<Quatrain> {
        self.quatrains.insert(number, quatrain)
    }
}

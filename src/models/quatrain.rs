//! Quatrain records and identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::century::Century;
use crate::error::{Error, Result};

/// A single quatrain as stored in a century document.
///
/// Century and number are implied by the file and key the record was read
/// from; see [`QuatrainId`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quatrain {
    /// French source lines.
    #[serde(default)]
    pub french: Vec<String>,
    /// English translation, line for line with `french`.
    #[serde(default)]
    pub english: Vec<String>,
    #[serde(default)]
    pub interpretation: String,
    /// Video URL (hosting link or embeddable source).
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub video: Option<String>,
    /// Image filename, relative to the image base path.
    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
}

fn blank_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

impl Quatrain {
    /// Whether the French and English sequences have the same length.
    pub fn lines_aligned(&self) -> bool {
        self.french.len() == self.english.len()
    }

    /// French/English pairs by index. Extra lines on either side are dropped.
    pub fn line_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.french
            .iter()
            .zip(self.english.iter())
            .map(|(f, e)| (f.as_str(), e.as_str()))
    }
}

/// Position of a quatrain in the corpus: century, then number.
///
/// Ordering is century ascending then number ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuatrainId {
    pub century: Century,
    pub number: u32,
}

impl QuatrainId {
    pub fn new(century: Century, number: u32) -> Result<Self> {
        if number == 0 {
            return Err(Error::InvalidQuatrainNumber);
        }
        Ok(Self { century, number })
    }

    /// Build an id from raw integers, validating both parts.
    pub fn from_parts(century: u32, number: u32) -> Result<Self> {
        Self::new(Century::new(century)?, number)
    }

    /// Deep link for this quatrain (`/c{century}/q{number:03}/`).
    pub fn link(&self) -> String {
        super::permalink::link(*self)
    }

    /// Display title, e.g. "Century 3 - Quatrain 7".
    pub fn title(&self) -> String {
        format!("Century {} - Quatrain {}", self.century, self.number)
    }
}

impl fmt::Display for QuatrainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.century, self.number)
    }
}

impl FromStr for QuatrainId {
    type Err = Error;

    /// Parse the `"{century}:{number}"` form used for search corpus ids.
    fn from_str(s: &str) -> Result<Self> {
        let (century, number) = s
            .split_once(':')
            .ok_or_else(|| Error::InvalidId(s.to_string()))?;
        let century: Century = century.parse()?;
        let number: u32 = number
            .trim()
            .parse()
            .map_err(|_| Error::InvalidId(s.to_string()))?;
        Self::new(century, number)
    }
}

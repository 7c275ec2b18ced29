//! Century numbering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One of the ten centuries of the corpus, numbered 1 through 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Century(u8);

impl Century {
    pub const FIRST: Century = Century(1);
    pub const LAST: Century = Century(10);

    /// Validate a century number.
    pub fn new(n: u32) -> Result<Self> {
        if (1..=10).contains(&n) {
            Ok(Century(n as u8))
        } else {
            Err(Error::InvalidCentury(n))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// The following century, or None after the last.
    pub fn next(self) -> Option<Self> {
        (self < Self::LAST).then(|| Century(self.0 + 1))
    }

    /// The preceding century, or None before the first.
    pub fn prev(self) -> Option<Self> {
        (self > Self::FIRST).then(|| Century(self.0 - 1))
    }

    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// All centuries in ascending order.
    pub fn all() -> impl DoubleEndedIterator<Item = Century> {
        (1..=10u8).map(Century)
    }

    /// File name of this century's data document.
    pub fn file_name(self) -> String {
        format!("century{}.json", self.0)
    }
}

impl TryFrom<u32> for Century {
    type Error = Error;

    fn try_from(n: u32) -> Result<Self> {
        Century::new(n)
    }
}

impl From<Century> for u32 {
    fn from(c: Century) -> u32 {
        c.0 as u32
    }
}

impl fmt::Display for Century {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Century {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let n: u32 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidId(s.to_string()))?;
        Century::new(n)
    }
}

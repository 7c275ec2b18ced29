//! Century data sources.
//!
//! A source yields one parsed [`CenturyDocument`] per request. Three backends:
//! - `FsSource`: `century{N}.json` files in a local directory
//! - `HttpSource`: the same files served by a deployed site
//! - `MemorySource`: documents held in memory

mod fs;
mod http;
mod memory;

pub use fs::FsSource;
pub use http::{HttpSource, USER_AGENT};
pub use memory::MemorySource;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Century, CenturyDocument};

/// Fetches century documents on demand.
#[async_trait]
pub trait CenturySource: Send + Sync {
    /// Fetch and parse one century document. No caching, no retries.
    async fn fetch_century(&self, century: Century) -> Result<CenturyDocument>;

    /// Human-readable location for log messages.
    fn describe(&self) -> String;
}

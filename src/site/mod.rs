//! Static site generation from the century data files.

mod builder;
mod collection;
pub mod filters;
mod templates;

pub use builder::{BuildReport, SiteBuilder, PASSTHROUGH};
pub use collection::{century_of, collect, SiteItem};
pub use filters::{absolute_url, pad_start};

//! Data models for the quatrain corpus.

mod century;
mod document;
mod permalink;
mod quatrain;

pub use century::Century;
pub use document::CenturyDocument;
pub use permalink::{link, parse_link};
pub use quatrain::{Quatrain, QuatrainId};

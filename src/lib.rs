//! quatrains - static site, navigator and fuzzy search for the Centuries.
//!
//! Core library: the quatrain data model, century data sources, the viewer
//! state machine (selection, rendering, navigation), the search index and the
//! static-site builder.

pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod search;
pub mod site;
pub mod source;
pub mod utils;
pub mod viewer;

pub use error::{Error, Result};

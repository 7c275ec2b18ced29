//! Deep-link URL scheme: `/c{century}/q{number zero-padded to 3}/`.

use std::sync::LazyLock;

use regex::Regex;

use super::quatrain::QuatrainId;
use crate::error::{Error, Result};
use crate::utils::pad_start;

static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/?c(\d+)/q(\d+)/?$").unwrap());

/// Build the deep link for a quatrain.
pub fn link(id: QuatrainId) -> String {
    format!("/c{}/q{}/", id.century, pad_start(id.number, 3, '0'))
}

/// Parse a deep link back into a quatrain id.
///
/// Leading and trailing slashes are optional; a full URL is accepted if its
/// path is a deep link.
pub fn parse_link(path: &str) -> Result<QuatrainId> {
    let trimmed = path.trim();
    let path_only = match url::Url::parse(trimmed) {
        Ok(url) => url.path().to_string(),
        Err(_) => trimmed.to_string(),
    };

    let caps = LINK_PATTERN
        .captures(&path_only)
        .ok_or_else(|| Error::InvalidLink(path.to_string()))?;
    let century: u32 = caps[1]
        .parse()
        .map_err(|_| Error::InvalidLink(path.to_string()))?;
    let number: u32 = caps[2]
        .parse()
        .map_err(|_| Error::InvalidLink(path.to_string()))?;

    QuatrainId::from_parts(century, number)
}

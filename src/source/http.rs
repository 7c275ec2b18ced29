//! Deployed-site source over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::CenturySource;
use crate::error::{Error, Result};
use crate::models::{Century, CenturyDocument};

/// Default user agent for data requests.
pub const USER_AGENT: &str = concat!("quatrains/", env!("CARGO_PKG_VERSION"));

/// Fetches `{base}/{data_path}/century{N}.json` from a deployed site.
#[derive(Clone)]
pub struct HttpSource {
    client: Client,
    data_url: Url,
}

impl HttpSource {
    /// Create a source rooted at `site_url`, reading documents from `data_path`
    /// beneath it (e.g. `js/data`).
    pub fn new(site_url: &str, data_path: &str, timeout: Duration, user_agent: Option<&str>) -> Result<Self> {
        let data_url = data_url(site_url, data_path)?;
        let client = Client::builder()
            .user_agent(user_agent.unwrap_or(USER_AGENT))
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|source| Error::Http {
                url: data_url.to_string(),
                source,
            })?;

        Ok(Self { client, data_url })
    }

    /// URL of one century's document.
    pub fn century_url(&self, century: Century) -> Result<Url> {
        self.data_url
            .join(&century.file_name())
            .map_err(|e| Error::InvalidLink(format!("{}: {}", self.data_url, e)))
    }
}

/// Resolve the data directory URL, guaranteeing a trailing slash so joins
/// append rather than replace the last segment.
fn data_url(site_url: &str, data_path: &str) -> Result<Url> {
    let mut base = site_url.trim_end_matches('/').to_string();
    base.push('/');
    let base = Url::parse(&base).map_err(|e| Error::InvalidLink(format!("{}: {}", site_url, e)))?;

    let mut path = data_path.trim_matches('/').to_string();
    if !path.is_empty() {
        path.push('/');
    }
    base.join(&path)
        .map_err(|e| Error::InvalidLink(format!("{}: {}", data_path, e)))
}

#[async_trait]
impl CenturySource for HttpSource {
    async fn fetch_century(&self, century: Century) -> Result<CenturyDocument> {
        let url = self.century_url(century)?;
        tracing::debug!("Fetching century {} from {}", century, url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| Error::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| Error::Http {
            url: url.to_string(),
            source,
        })?;
        CenturyDocument::from_json(century, &bytes)
    }

    fn describe(&self) -> String {
        self.data_url.to_string()
    }
}

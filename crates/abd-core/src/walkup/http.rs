//! Metadata lookup over HTTP(S) using the curl crate (libcurl).
//!
//! Queries `<scheme>://<domain>/.abd/<location>?<labels>` and expects a JSON
//! list of metadata on 200.

use anyhow::{Context, Result};
use std::time::Duration;
use url::Url;

use crate::schema::{Labels, Metadata};

use super::{LookupOutcome, MetadataLookup};

/// Path segment under which a domain publishes its metadata.
const METADATA_DIR: &str = ".abd";

#[derive(Debug, Clone)]
pub struct HttpLookup {
    scheme: String,
    connect_timeout: Duration,
    timeout: Duration,
}

impl Default for HttpLookup {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
        }
    }
}

impl HttpLookup {
    /// Lookup against plain HTTP; only meant for local test servers.
    pub fn insecure() -> Self {
        Self {
            scheme: "http".to_string(),
            ..Self::default()
        }
    }

    fn get(&self, url: &Url) -> Result<(u32, Vec<u8>)> {
        let mut body = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str()).context("invalid URL")?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer
                .perform()
                .with_context(|| format!("GET {url} failed"))?;
        }

        let code = easy.response_code().context("no response code")?;
        Ok((code, body))
    }
}

impl MetadataLookup for HttpLookup {
    fn lookup(&self, domain: &str, location: &str, labels: &Labels) -> Result<LookupOutcome> {
        let url = lookup_url(&self.scheme, domain, location, labels)?;
        let (code, body) = self.get(&url)?;
        tracing::debug!("GET {} returned HTTP {} ({} bytes)", url, code, body.len());

        if code != 200 {
            return Ok(LookupOutcome::NotFound);
        }
        match serde_json::from_slice::<Vec<Metadata>>(&body) {
            Ok(list) => Ok(LookupOutcome::Found(list)),
            Err(e) => {
                tracing::debug!("body from {} is not a metadata list: {}", url, e);
                Ok(LookupOutcome::NotFound)
            }
        }
    }
}

/// Builds the lookup URL. Empty path segments are dropped, labels become query parameters.
pub(crate) fn lookup_url(
    scheme: &str,
    domain: &str,
    location: &str,
    labels: &Labels,
) -> Result<Url> {
    let mut raw = format!("{scheme}://{domain}/{METADATA_DIR}");
    for segment in location.split('/').filter(|s| !s.is_empty()) {
        raw.push('/');
        raw.push_str(segment);
    }

    let mut url = Url::parse(&raw).with_context(|| format!("invalid lookup URL {raw}"))?;
    if !labels.is_empty() {
        url.query_pairs_mut().extend_pairs(labels.iter());
    }
    Ok(url)
}
